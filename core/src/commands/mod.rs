/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
mod block;
mod flow;
mod fuses;
pub mod header;
mod keyblob;
mod memory;
mod record;
mod section;
mod tag;
mod version;

#[cfg(test)]
mod tests;

pub use block::{export_block, parse_block};
pub use flow::{Call, Execute};
pub use fuses::{ProgFuses, ProgIfr};
pub use header::{CMD_MAGIC, CommandHeader, HEADER_SIZE};
pub use keyblob::LoadKeyBlob;
pub use memory::{ConfigureMemory, CopyMemory, Erase, FillMemory, Load, LoadCmac, LoadHashLocking};
pub use record::CommandRecord;
pub use section::{SECTION_HEADER_SIZE, Section, SectionHeader};
pub use tag::CmdTag;
pub use version::{CounterId, FwVersionCheck};

use crate::error::CommandError;
use log::debug;
use std::fmt;

/// Any command record that can appear in a command block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Erase(Erase),
    Load(Load),
    Execute(Execute),
    Call(Call),
    ProgFuses(ProgFuses),
    ProgIfr(ProgIfr),
    LoadCmac(LoadCmac),
    Copy(CopyMemory),
    LoadHashLocking(LoadHashLocking),
    LoadKeyBlob(LoadKeyBlob),
    ConfigureMemory(ConfigureMemory),
    FillMemory(FillMemory),
    FwVersionCheck(FwVersionCheck),
}

macro_rules! impl_from_record {
    ($($variant:ident($record:ty)),* $(,)?) => {
        $(
            impl From<$record> for Command {
                fn from(cmd: $record) -> Self {
                    Command::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_record!(
    Erase(Erase),
    Load(Load),
    Execute(Execute),
    Call(Call),
    ProgFuses(ProgFuses),
    ProgIfr(ProgIfr),
    LoadCmac(LoadCmac),
    Copy(CopyMemory),
    LoadHashLocking(LoadHashLocking),
    LoadKeyBlob(LoadKeyBlob),
    ConfigureMemory(ConfigureMemory),
    FillMemory(FillMemory),
    FwVersionCheck(FwVersionCheck),
);

impl Command {
    pub fn cmd_tag(&self) -> CmdTag {
        match self {
            Command::Erase(c) => c.cmd_tag(),
            Command::Load(c) => c.cmd_tag(),
            Command::Execute(c) => c.cmd_tag(),
            Command::Call(c) => c.cmd_tag(),
            Command::ProgFuses(c) => c.cmd_tag(),
            Command::ProgIfr(c) => c.cmd_tag(),
            Command::LoadCmac(c) => c.cmd_tag(),
            Command::Copy(c) => c.cmd_tag(),
            Command::LoadHashLocking(c) => c.cmd_tag(),
            Command::LoadKeyBlob(c) => c.cmd_tag(),
            Command::ConfigureMemory(c) => c.cmd_tag(),
            Command::FillMemory(c) => c.cmd_tag(),
            Command::FwVersionCheck(c) => c.cmd_tag(),
        }
    }

    pub fn export(&self) -> Vec<u8> {
        match self {
            Command::Erase(c) => c.export(),
            Command::Load(c) => c.export(),
            Command::Execute(c) => c.export(),
            Command::Call(c) => c.export(),
            Command::ProgFuses(c) => c.export(),
            Command::ProgIfr(c) => c.export(),
            Command::LoadCmac(c) => c.export(),
            Command::Copy(c) => c.export(),
            Command::LoadHashLocking(c) => c.export(),
            Command::LoadKeyBlob(c) => c.export(),
            Command::ConfigureMemory(c) => c.export(),
            Command::FillMemory(c) => c.export(),
            Command::FwVersionCheck(c) => c.export(),
        }
    }

    /// Exports the record with an arbitrary tag word in place of its own.
    pub fn export_with_tag(&self, tag: u32) -> Vec<u8> {
        match self {
            Command::Erase(c) => c.export_with_tag(tag),
            Command::Load(c) => c.export_with_tag(tag),
            Command::Execute(c) => c.export_with_tag(tag),
            Command::Call(c) => c.export_with_tag(tag),
            Command::ProgFuses(c) => c.export_with_tag(tag),
            Command::ProgIfr(c) => c.export_with_tag(tag),
            Command::LoadCmac(c) => c.export_with_tag(tag),
            Command::Copy(c) => c.export_with_tag(tag),
            Command::LoadHashLocking(c) => c.export_with_tag(tag),
            Command::LoadKeyBlob(c) => c.export_with_tag(tag),
            Command::ConfigureMemory(c) => c.export_with_tag(tag),
            Command::FillMemory(c) => c.export_with_tag(tag),
            Command::FwVersionCheck(c) => c.export_with_tag(tag),
        }
    }

    pub fn export_len(&self) -> usize {
        match self {
            Command::Erase(c) => c.export_len(),
            Command::Load(c) => c.export_len(),
            Command::Execute(c) => c.export_len(),
            Command::Call(c) => c.export_len(),
            Command::ProgFuses(c) => c.export_len(),
            Command::ProgIfr(c) => c.export_len(),
            Command::LoadCmac(c) => c.export_len(),
            Command::Copy(c) => c.export_len(),
            Command::LoadHashLocking(c) => c.export_len(),
            Command::LoadKeyBlob(c) => c.export_len(),
            Command::ConfigureMemory(c) => c.export_len(),
            Command::FillMemory(c) => c.export_len(),
            Command::FwVersionCheck(c) => c.export_len(),
        }
    }

    pub fn info(&self) -> String {
        match self {
            Command::Erase(c) => c.info(),
            Command::Load(c) => c.info(),
            Command::Execute(c) => c.info(),
            Command::Call(c) => c.info(),
            Command::ProgFuses(c) => c.info(),
            Command::ProgIfr(c) => c.info(),
            Command::LoadCmac(c) => c.info(),
            Command::Copy(c) => c.info(),
            Command::LoadHashLocking(c) => c.info(),
            Command::LoadKeyBlob(c) => c.info(),
            Command::ConfigureMemory(c) => c.info(),
            Command::FillMemory(c) => c.info(),
            Command::FwVersionCheck(c) => c.info(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info())
    }
}

/// Decodes the command record at the start of `data`, whatever its kind.
pub fn parse_command(data: &[u8]) -> Result<Command, CommandError> {
    parse_command_at(data, 0)
}

pub fn parse_command_at(data: &[u8], offset: usize) -> Result<Command, CommandError> {
    let header = CommandHeader::parse(data, offset)?;
    header.check_magic()?;
    let tag = CmdTag::try_from(header.tag)?;
    debug!("Dispatching {} at offset 0x{:X}", tag, offset);

    let cmd = match tag {
        CmdTag::Erase => Erase::parse_at(data, offset)?.into(),
        CmdTag::Load => Load::parse_at(data, offset)?.into(),
        CmdTag::Execute => Execute::parse_at(data, offset)?.into(),
        CmdTag::Call => Call::parse_at(data, offset)?.into(),
        CmdTag::ProgFuses => ProgFuses::parse_at(data, offset)?.into(),
        CmdTag::ProgIfr => ProgIfr::parse_at(data, offset)?.into(),
        CmdTag::LoadCmac => LoadCmac::parse_at(data, offset)?.into(),
        CmdTag::Copy => CopyMemory::parse_at(data, offset)?.into(),
        CmdTag::LoadHashLocking => LoadHashLocking::parse_at(data, offset)?.into(),
        CmdTag::LoadKeyBlob => LoadKeyBlob::parse_at(data, offset)?.into(),
        CmdTag::ConfigureMemory => ConfigureMemory::parse_at(data, offset)?.into(),
        CmdTag::FillMemory => FillMemory::parse_at(data, offset)?.into(),
        CmdTag::FwVersionCheck => FwVersionCheck::parse_at(data, offset)?.into(),
    };

    Ok(cmd)
}
