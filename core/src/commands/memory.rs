/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::commands::header::{CommandHeader, HEADER_SIZE};
use crate::commands::record::{CommandRecord, word_block};
use crate::core::utilities::read_u32_le;
use crate::error::CommandError;

// Header: address | length, followed by one block carrying the memory id.
macro_rules! memory_region_command {
    ($(#[$meta:meta])* $name:ident, $tag:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub address: u32,
            pub length: u32,
            pub memory_id: u32,
        }

        impl $name {
            pub fn new(address: u32, length: u32, memory_id: u32) -> Self {
                $name {
                    address,
                    length,
                    memory_id,
                }
            }
        }

        impl CommandRecord for $name {
            const TAG: CmdTag = $tag;

            fn header_fields(&self) -> (u32, u32) {
                (self.address, self.length)
            }

            fn payload(&self) -> Vec<u8> {
                word_block(&[self.memory_id])
            }

            fn payload_len(_header: &CommandHeader) -> Result<usize, CommandError> {
                Ok(HEADER_SIZE)
            }

            fn decode(header: &CommandHeader, payload: &[u8]) -> Result<Self, CommandError> {
                Ok($name {
                    address: header.primary,
                    length: header.secondary,
                    memory_id: read_u32_le(payload, 0),
                })
            }

            fn info(&self) -> String {
                format!(
                    "{}: Address=0x{:08X}, Length={}, Memory ID={}",
                    Self::TAG.name(),
                    self.address,
                    self.length,
                    self.memory_id
                )
            }
        }
    };
}

memory_region_command!(
    /// Erases `length` bytes at `address` of memory `memory_id`.
    Erase,
    CmdTag::Erase
);
memory_region_command!(
    /// Loads data into memory.
    Load,
    CmdTag::Load
);
memory_region_command!(
    /// Loads data and verifies it against a CMAC.
    LoadCmac,
    CmdTag::LoadCmac
);
memory_region_command!(LoadHashLocking, CmdTag::LoadHashLocking);
memory_region_command!(
    /// Fills a memory region.
    FillMemory,
    CmdTag::FillMemory
);

/// Copies `length` bytes from `address` in `memory_id_from` to
/// `destination_address` in `memory_id_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyMemory {
    pub address: u32,
    pub length: u32,
    pub destination_address: u32,
    pub memory_id_from: u32,
    pub memory_id_to: u32,
}

impl CopyMemory {
    pub fn new(
        address: u32,
        length: u32,
        destination_address: u32,
        memory_id_from: u32,
        memory_id_to: u32,
    ) -> Self {
        CopyMemory {
            address,
            length,
            destination_address,
            memory_id_from,
            memory_id_to,
        }
    }
}

impl CommandRecord for CopyMemory {
    const TAG: CmdTag = CmdTag::Copy;

    fn header_fields(&self) -> (u32, u32) {
        (self.address, self.length)
    }

    // 0x00 destination address | 0x04 memory id from | 0x08 memory id to | 0x0C reserved
    fn payload(&self) -> Vec<u8> {
        word_block(&[
            self.destination_address,
            self.memory_id_from,
            self.memory_id_to,
        ])
    }

    fn payload_len(_header: &CommandHeader) -> Result<usize, CommandError> {
        Ok(HEADER_SIZE)
    }

    fn decode(header: &CommandHeader, payload: &[u8]) -> Result<Self, CommandError> {
        Ok(CopyMemory {
            address: header.primary,
            length: header.secondary,
            destination_address: read_u32_le(payload, 0),
            memory_id_from: read_u32_le(payload, 4),
            memory_id_to: read_u32_le(payload, 8),
        })
    }

    fn info(&self) -> String {
        format!(
            "{}: Address=0x{:08X}, Length={}, Destination address=0x{:08X}, Memory ID from={}, Memory ID to={}",
            Self::TAG.name(),
            self.address,
            self.length,
            self.destination_address,
            self.memory_id_from,
            self.memory_id_to
        )
    }
}

/// Configures the memory `memory_id` from the descriptor at `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureMemory {
    pub address: u32,
    pub memory_id: u32,
}

impl ConfigureMemory {
    pub fn new(address: u32, memory_id: u32) -> Self {
        ConfigureMemory { address, memory_id }
    }
}

impl CommandRecord for ConfigureMemory {
    const TAG: CmdTag = CmdTag::ConfigureMemory;

    fn header_fields(&self) -> (u32, u32) {
        (self.address, self.memory_id)
    }

    fn decode(header: &CommandHeader, _payload: &[u8]) -> Result<Self, CommandError> {
        Ok(ConfigureMemory {
            address: header.primary,
            memory_id: header.secondary,
        })
    }

    fn info(&self) -> String {
        format!(
            "{}: Address=0x{:08X}, Memory ID={}",
            Self::TAG.name(),
            self.address,
            self.memory_id
        )
    }
}
