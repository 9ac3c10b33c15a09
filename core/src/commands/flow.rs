/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::commands::header::CommandHeader;
use crate::commands::record::CommandRecord;
use crate::error::CommandError;

/// Jumps to `address` without returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execute {
    pub address: u32,
}

impl Execute {
    pub fn new(address: u32) -> Self {
        Execute { address }
    }
}

impl CommandRecord for Execute {
    const TAG: CmdTag = CmdTag::Execute;

    fn header_fields(&self) -> (u32, u32) {
        (self.address, 0)
    }

    fn decode(header: &CommandHeader, _payload: &[u8]) -> Result<Self, CommandError> {
        Ok(Execute {
            address: header.primary,
        })
    }

    fn info(&self) -> String {
        format!("{}: Address=0x{:08X}", Self::TAG.name(), self.address)
    }
}

/// Calls the routine at `address`; the bootloader resumes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub address: u32,
}

impl Call {
    pub fn new(address: u32) -> Self {
        Call { address }
    }
}

impl CommandRecord for Call {
    const TAG: CmdTag = CmdTag::Call;

    fn header_fields(&self) -> (u32, u32) {
        (self.address, 0)
    }

    fn decode(header: &CommandHeader, _payload: &[u8]) -> Result<Self, CommandError> {
        Ok(Call {
            address: header.primary,
        })
    }

    fn info(&self) -> String {
        format!("{}: Address=0x{:08X}", Self::TAG.name(), self.address)
    }
}
