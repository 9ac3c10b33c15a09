/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::{Command, export_block, parse_block};
use crate::core::utilities::{read_u32_le, require, u32_len};
use crate::error::CommandError;
use std::fmt;

pub const SECTION_HEADER_SIZE: usize = 16;

/// First record of every section. Unlike command records it carries neither
/// the command signature nor a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub section_uid: u32,
    pub section_type: u32,
    /// Byte length of the command block following this header.
    pub length: u32,
}

impl Default for SectionHeader {
    fn default() -> Self {
        SectionHeader {
            section_uid: 1,
            section_type: 1,
            length: 0,
        }
    }
}

impl SectionHeader {
    pub fn new(section_uid: u32, section_type: u32, length: u32) -> Self {
        SectionHeader {
            section_uid,
            section_type,
            length,
        }
    }

    // 0x00 uid | 0x04 type | 0x08 length | 0x0C reserved
    pub fn export(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(SECTION_HEADER_SIZE);
        data.extend_from_slice(&self.section_uid.to_le_bytes());
        data.extend_from_slice(&self.section_type.to_le_bytes());
        data.extend_from_slice(&self.length.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data
    }

    /// Parses the header, which must sit at offset 0 of its section.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, CommandError> {
        if offset != 0 {
            return Err(CommandError::InvalidOffset {
                record: "section header",
                offset,
            });
        }
        require(data, offset, SECTION_HEADER_SIZE)?;

        Ok(SectionHeader {
            section_uid: read_u32_le(data, 0),
            section_type: read_u32_le(data, 4),
            length: read_u32_le(data, 8),
        })
    }

    pub fn info(&self) -> String {
        format!(
            "Section header: UID=0x{:08X}, Type={}, Length={}",
            self.section_uid, self.section_type, self.length
        )
    }
}

impl fmt::Display for SectionHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info())
    }
}

/// A section header together with the commands it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub section_uid: u32,
    pub section_type: u32,
    pub commands: Vec<Command>,
}

impl Section {
    pub fn new(section_uid: u32, section_type: u32, commands: Vec<Command>) -> Self {
        Section {
            section_uid,
            section_type,
            commands,
        }
    }

    pub fn header(&self) -> Result<SectionHeader, CommandError> {
        let block_len: usize = self.commands.iter().map(Command::export_len).sum();
        Ok(SectionHeader::new(
            self.section_uid,
            self.section_type,
            u32_len("section length", block_len)?,
        ))
    }

    pub fn export(&self) -> Result<Vec<u8>, CommandError> {
        let mut data = self.header()?.export();
        data.extend_from_slice(&export_block(&self.commands));
        Ok(data)
    }

    /// Parses a section starting at the beginning of `data`. Bytes past the
    /// announced length are left alone.
    pub fn parse(data: &[u8]) -> Result<Self, CommandError> {
        let header = SectionHeader::parse(data, 0)?;
        let length = header.length as usize;
        require(data, SECTION_HEADER_SIZE, length)?;

        let commands = parse_block(&data[SECTION_HEADER_SIZE..SECTION_HEADER_SIZE + length])?;
        Ok(Section {
            section_uid: header.section_uid,
            section_type: header.section_type,
            commands,
        })
    }
}
