/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::commands::header::CommandHeader;
use crate::commands::record::CommandRecord;
use crate::core::utilities::u32_len;
use crate::error::CommandError;

const OFFSET_MASK: u32 = 0xFFFF;
const KEY_WRAP_SHIFT: u32 = 16;

// Primary header word: key wrap id in bits 31..16, offset in bits 15..0.
fn pack_location(offset: u16, key_wrap_id: u16) -> u32 {
    (u32::from(key_wrap_id) << KEY_WRAP_SHIFT) | u32::from(offset)
}

fn unpack_location(word: u32) -> (u16, u16) {
    ((word & OFFSET_MASK) as u16, (word >> KEY_WRAP_SHIFT) as u16)
}

/// Loads a wrapped key blob at `offset` of the key store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadKeyBlob {
    pub offset: u16,
    pub key_wrap_id: u16,
    data: Vec<u8>,
}

impl LoadKeyBlob {
    pub const NXP_CUST_KEK_INT_SK: u16 = 16;
    pub const NXP_CUST_KEK_EXT_SK: u16 = 17;

    pub fn new(offset: u16, key_wrap_id: u16, data: Vec<u8>) -> Result<Self, CommandError> {
        u32_len("key blob length", data.len())?;
        Ok(LoadKeyBlob {
            offset,
            key_wrap_id,
            data,
        })
    }

    /// The blob offset, as carried in the address slot.
    pub fn address(&self) -> u32 {
        u32::from(self.offset)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<u8>) -> Result<(), CommandError> {
        u32_len("key blob length", data.len())?;
        self.data = data;
        Ok(())
    }

    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }
}

impl CommandRecord for LoadKeyBlob {
    const TAG: CmdTag = CmdTag::LoadKeyBlob;

    fn header_fields(&self) -> (u32, u32) {
        (pack_location(self.offset, self.key_wrap_id), self.length())
    }

    fn payload(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn payload_len(header: &CommandHeader) -> Result<usize, CommandError> {
        Ok(header.secondary as usize)
    }

    fn decode(header: &CommandHeader, payload: &[u8]) -> Result<Self, CommandError> {
        let (offset, key_wrap_id) = unpack_location(header.primary);
        Ok(LoadKeyBlob {
            offset,
            key_wrap_id,
            data: payload.to_vec(),
        })
    }

    fn info(&self) -> String {
        format!(
            "{}: Offset=0x{:04X}, Key wrap ID={}, Length={}",
            Self::TAG.name(),
            self.offset,
            self.key_wrap_id,
            self.length()
        )
    }
}
