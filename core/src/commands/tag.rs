/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::error::CommandError;
use std::fmt;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmdTag {
    Erase = 0x01,
    Load = 0x02,
    Execute = 0x03,
    Call = 0x04,
    ProgFuses = 0x05,
    ProgIfr = 0x06,
    LoadCmac = 0x07,
    Copy = 0x08,
    LoadHashLocking = 0x09,
    LoadKeyBlob = 0x0A,
    ConfigureMemory = 0x0B,
    FillMemory = 0x0C,
    FwVersionCheck = 0x0D,
}

impl CmdTag {
    /// Every registered tag, in wire order.
    pub const ALL: [CmdTag; 13] = [
        CmdTag::Erase,
        CmdTag::Load,
        CmdTag::Execute,
        CmdTag::Call,
        CmdTag::ProgFuses,
        CmdTag::ProgIfr,
        CmdTag::LoadCmac,
        CmdTag::Copy,
        CmdTag::LoadHashLocking,
        CmdTag::LoadKeyBlob,
        CmdTag::ConfigureMemory,
        CmdTag::FillMemory,
        CmdTag::FwVersionCheck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CmdTag::Erase => "ERASE",
            CmdTag::Load => "LOAD",
            CmdTag::Execute => "EXECUTE",
            CmdTag::Call => "CALL",
            CmdTag::ProgFuses => "PROGRAM_FUSES",
            CmdTag::ProgIfr => "PROGRAM_IFR",
            CmdTag::LoadCmac => "LOAD_CMAC",
            CmdTag::Copy => "COPY",
            CmdTag::LoadHashLocking => "LOAD_HASH_LOCKING",
            CmdTag::LoadKeyBlob => "LOAD_KEY_BLOB",
            CmdTag::ConfigureMemory => "CONFIGURE_MEMORY",
            CmdTag::FillMemory => "FILL_MEMORY",
            CmdTag::FwVersionCheck => "FW_VERSION_CHECK",
        }
    }
}

impl From<CmdTag> for u32 {
    fn from(tag: CmdTag) -> Self {
        tag as u32
    }
}

impl TryFrom<u32> for CmdTag {
    type Error = CommandError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CmdTag::ALL
            .into_iter()
            .find(|tag| *tag as u32 == value)
            .ok_or(CommandError::UnknownTag(value))
    }
}

impl fmt::Display for CmdTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), *self as u32)
    }
}
