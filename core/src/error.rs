/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use std::io::{Error, ErrorKind};

/// Errors raised while encoding or decoding command records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("buffer too short at offset {offset}: need {needed} bytes, got {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid command signature 0x{found:08X}")]
    InvalidMagic { found: u32 },

    #[error("tag mismatch: expected {expected}, found 0x{found:08X}")]
    TagMismatch { expected: CmdTag, found: u32 },

    #[error("unknown command tag 0x{0:08X}")]
    UnknownTag(u32),

    #[error("{field} value {value} is out of range (maximum {max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("length {length} is not a multiple of the 16-byte alignment unit")]
    Misaligned { length: usize },

    #[error("{record} must start at offset 0, got offset {offset}")]
    InvalidOffset { record: &'static str, offset: usize },
}

impl CommandError {
    pub(crate) fn out_of_range(field: &'static str, value: u64, max: u64) -> Self {
        CommandError::OutOfRange { field, value, max }
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Error::new(ErrorKind::InvalidData, err)
    }
}

/// Errors surfaced by the debug probe layer.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("debug probe is not open")]
    NotOpen,

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
