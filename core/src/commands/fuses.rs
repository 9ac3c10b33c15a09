/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::commands::header::CommandHeader;
use crate::commands::record::CommandRecord;
use crate::core::utilities::{read_u32_le, u32_len};
use crate::error::CommandError;

/// Programs the 32-bit fuse words in `data` starting at fuse `address`.
///
/// The header length field holds the word count, not the byte count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgFuses {
    pub address: u32,
    data: Vec<u32>,
}

impl ProgFuses {
    pub fn new(address: u32, data: Vec<u32>) -> Result<Self, CommandError> {
        u32_len("fuse word count", data.len())?;
        Ok(ProgFuses { address, data })
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<u32>) -> Result<(), CommandError> {
        u32_len("fuse word count", data.len())?;
        self.data = data;
        Ok(())
    }

    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }
}

impl CommandRecord for ProgFuses {
    const TAG: CmdTag = CmdTag::ProgFuses;

    fn header_fields(&self) -> (u32, u32) {
        (self.address, self.length())
    }

    fn payload(&self) -> Vec<u8> {
        self.data.iter().flat_map(|word| word.to_le_bytes()).collect()
    }

    fn payload_len(header: &CommandHeader) -> Result<usize, CommandError> {
        (header.secondary as usize).checked_mul(4).ok_or_else(|| {
            CommandError::out_of_range(
                "fuse word count",
                u64::from(header.secondary),
                (usize::MAX / 4) as u64,
            )
        })
    }

    fn decode(header: &CommandHeader, payload: &[u8]) -> Result<Self, CommandError> {
        let data = (0..payload.len())
            .step_by(4)
            .map(|pos| read_u32_le(payload, pos))
            .collect();

        Ok(ProgFuses {
            address: header.primary,
            data,
        })
    }

    fn info(&self) -> String {
        let words: Vec<String> = self.data.iter().map(|w| format!("0x{:08X}", w)).collect();
        format!(
            "{}: Address=0x{:08X}, Length={}, Data=[{}]",
            Self::TAG.name(),
            self.address,
            self.length(),
            words.join(", ")
        )
    }
}

/// Programs raw bytes into the IFR (information flash region) at `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgIfr {
    pub address: u32,
    data: Vec<u8>,
}

impl ProgIfr {
    pub fn new(address: u32, data: Vec<u8>) -> Result<Self, CommandError> {
        u32_len("IFR data length", data.len())?;
        Ok(ProgIfr { address, data })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<u8>) -> Result<(), CommandError> {
        u32_len("IFR data length", data.len())?;
        self.data = data;
        Ok(())
    }

    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }
}

impl CommandRecord for ProgIfr {
    const TAG: CmdTag = CmdTag::ProgIfr;

    fn header_fields(&self) -> (u32, u32) {
        (self.address, self.length())
    }

    fn payload(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn payload_len(header: &CommandHeader) -> Result<usize, CommandError> {
        Ok(header.secondary as usize)
    }

    fn decode(header: &CommandHeader, payload: &[u8]) -> Result<Self, CommandError> {
        Ok(ProgIfr {
            address: header.primary,
            data: payload.to_vec(),
        })
    }

    fn info(&self) -> String {
        format!(
            "{}: Address=0x{:08X}, Length={}, Data={}",
            Self::TAG.name(),
            self.address,
            self.length(),
            hex::encode(&self.data)
        )
    }
}
