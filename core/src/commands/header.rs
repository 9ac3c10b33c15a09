/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::core::utilities::{read_u32_le, require};
use crate::error::CommandError;
use log::error;

/// Signature opening every command record (`55 AA AA 55` on the wire).
pub const CMD_MAGIC: u32 = 0x55AA_AA55;
pub const HEADER_SIZE: usize = 16;

// Layout (all little-endian u32)
// 0x00 magic
// 0x04 primary   (address, value, or packed offset/key wrap id)
// 0x08 secondary (length, count, memory id or counter id)
// 0x0C tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHeader {
    pub magic: u32,
    pub primary: u32,
    pub secondary: u32,
    pub tag: u32,
}

impl CommandHeader {
    pub fn new(primary: u32, secondary: u32, tag: u32) -> Self {
        CommandHeader {
            magic: CMD_MAGIC,
            primary,
            secondary,
            tag,
        }
    }

    pub fn export(&self) -> [u8; HEADER_SIZE] {
        let mut hdr = [0u8; HEADER_SIZE];
        hdr[0..4].copy_from_slice(&self.magic.to_le_bytes());
        hdr[4..8].copy_from_slice(&self.primary.to_le_bytes());
        hdr[8..12].copy_from_slice(&self.secondary.to_le_bytes());
        hdr[12..16].copy_from_slice(&self.tag.to_le_bytes());
        hdr
    }

    /// Decodes one header unit at `offset`. Neither the magic nor the tag is checked here.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, CommandError> {
        require(data, offset, HEADER_SIZE)?;

        Ok(CommandHeader {
            magic: read_u32_le(data, offset),
            primary: read_u32_le(data, offset + 4),
            secondary: read_u32_le(data, offset + 8),
            tag: read_u32_le(data, offset + 12),
        })
    }

    pub fn check_magic(&self) -> Result<(), CommandError> {
        if self.magic != CMD_MAGIC {
            error!("Invalid command signature: 0x{:08X}", self.magic);
            return Err(CommandError::InvalidMagic { found: self.magic });
        }
        Ok(())
    }

    /// Checks the signature, then that the tag word belongs to `expected`.
    pub fn expect(&self, expected: CmdTag) -> Result<(), CommandError> {
        self.check_magic()?;
        if self.tag != u32::from(expected) {
            error!(
                "Tag mismatch. Expected: {}, Got: 0x{:08X}",
                expected, self.tag
            );
            return Err(CommandError::TagMismatch {
                expected,
                found: self.tag,
            });
        }
        Ok(())
    }
}
