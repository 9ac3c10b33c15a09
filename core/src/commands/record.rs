/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::commands::header::{CommandHeader, HEADER_SIZE};
use crate::core::utilities::{align_up, pad_to_alignment, require};
use crate::error::CommandError;
use log::debug;

/// Shared encode/decode contract of every tagged command record.
///
/// A variant only describes its header mapping and payload; framing, padding
/// and tag validation are provided here so they stay uniform across variants.
pub trait CommandRecord: Sized {
    const TAG: CmdTag;

    /// Primary and secondary header words.
    fn header_fields(&self) -> (u32, u32);

    /// Bytes following the header, before padding.
    fn payload(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Payload length announced by a decoded header.
    fn payload_len(_header: &CommandHeader) -> Result<usize, CommandError> {
        Ok(0)
    }

    fn decode(header: &CommandHeader, payload: &[u8]) -> Result<Self, CommandError>;

    fn info(&self) -> String;

    fn cmd_tag(&self) -> CmdTag {
        Self::TAG
    }

    fn export_len(&self) -> usize {
        align_up(HEADER_SIZE + self.payload().len())
    }

    fn export(&self) -> Vec<u8> {
        self.export_with_tag(Self::TAG.into())
    }

    /// Exports the record with an arbitrary tag word.
    ///
    /// Only meant for producing mistagged records in negative tests.
    fn export_with_tag(&self, tag: u32) -> Vec<u8> {
        let (primary, secondary) = self.header_fields();
        let mut data = CommandHeader::new(primary, secondary, tag).export().to_vec();
        data.extend_from_slice(&self.payload());
        pad_to_alignment(&mut data);
        data
    }

    fn parse(data: &[u8]) -> Result<Self, CommandError> {
        Self::parse_at(data, 0)
    }

    fn parse_at(data: &[u8], offset: usize) -> Result<Self, CommandError> {
        let header = CommandHeader::parse(data, offset)?;
        header.expect(Self::TAG)?;

        let payload_len = Self::payload_len(&header)?;
        let record_len = HEADER_SIZE
            .checked_add(payload_len)
            .map(align_up)
            .ok_or_else(|| {
                CommandError::out_of_range("record length", payload_len as u64, usize::MAX as u64)
            })?;
        require(data, offset, record_len)?;

        debug!(
            "Decoding {} at offset 0x{:X} ({} bytes)",
            Self::TAG,
            offset,
            record_len
        );
        let start = offset + HEADER_SIZE;
        Self::decode(&header, &data[start..start + payload_len])
    }
}

/// Sixteen-byte trailing block holding at most four words, zero-filled.
pub(crate) fn word_block(words: &[u32]) -> Vec<u8> {
    let mut block = vec![0u8; HEADER_SIZE];
    for (i, word) in words.iter().enumerate() {
        block[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    block
}
