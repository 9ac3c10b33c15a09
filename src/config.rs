/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use sbcmd::commands::{
    Call, Command, ConfigureMemory, CopyMemory, CounterId, Erase, Execute, FillMemory,
    FwVersionCheck, Load, LoadCmac, LoadHashLocking, LoadKeyBlob, ProgFuses, ProgIfr,
};
use serde::Deserialize;
use std::error::Error;

/// Command block description read by `sbcmd build`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub section: Option<SectionConfig>,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub uid: u32,
    #[serde(rename = "type")]
    pub section_type: u32,
}

// Binary payloads are hex strings, fuse values are plain words.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandConfig {
    Erase {
        address: u32,
        length: u32,
        #[serde(default)]
        memory_id: u32,
    },
    Load {
        address: u32,
        length: u32,
        #[serde(default)]
        memory_id: u32,
    },
    Execute {
        address: u32,
    },
    Call {
        address: u32,
    },
    ProgFuses {
        address: u32,
        data: Vec<u32>,
    },
    ProgIfr {
        address: u32,
        data: String,
    },
    LoadCmac {
        address: u32,
        length: u32,
        #[serde(default)]
        memory_id: u32,
    },
    Copy {
        address: u32,
        length: u32,
        destination_address: u32,
        #[serde(default)]
        memory_id_from: u32,
        #[serde(default)]
        memory_id_to: u32,
    },
    LoadHashLocking {
        address: u32,
        length: u32,
        #[serde(default)]
        memory_id: u32,
    },
    LoadKeyBlob {
        offset: u16,
        key_wrap_id: u16,
        data: String,
    },
    ConfigureMemory {
        address: u32,
        memory_id: u32,
    },
    FillMemory {
        address: u32,
        length: u32,
        #[serde(default)]
        memory_id: u32,
    },
    FwVersionCheck {
        value: u32,
        counter_id: u32,
    },
}

impl BuildConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_commands(&self) -> Result<Vec<Command>, Box<dyn Error>> {
        self.commands.iter().map(CommandConfig::to_command).collect()
    }
}

impl CommandConfig {
    pub fn to_command(&self) -> Result<Command, Box<dyn Error>> {
        let cmd: Command = match *self {
            CommandConfig::Erase {
                address,
                length,
                memory_id,
            } => Erase::new(address, length, memory_id).into(),
            CommandConfig::Load {
                address,
                length,
                memory_id,
            } => Load::new(address, length, memory_id).into(),
            CommandConfig::Execute { address } => Execute::new(address).into(),
            CommandConfig::Call { address } => Call::new(address).into(),
            CommandConfig::ProgFuses { address, ref data } => {
                ProgFuses::new(address, data.clone())?.into()
            }
            CommandConfig::ProgIfr { address, ref data } => {
                ProgIfr::new(address, hex::decode(data)?)?.into()
            }
            CommandConfig::LoadCmac {
                address,
                length,
                memory_id,
            } => LoadCmac::new(address, length, memory_id).into(),
            CommandConfig::Copy {
                address,
                length,
                destination_address,
                memory_id_from,
                memory_id_to,
            } => CopyMemory::new(
                address,
                length,
                destination_address,
                memory_id_from,
                memory_id_to,
            )
            .into(),
            CommandConfig::LoadHashLocking {
                address,
                length,
                memory_id,
            } => LoadHashLocking::new(address, length, memory_id).into(),
            CommandConfig::LoadKeyBlob {
                offset,
                key_wrap_id,
                ref data,
            } => LoadKeyBlob::new(offset, key_wrap_id, hex::decode(data)?)?.into(),
            CommandConfig::ConfigureMemory { address, memory_id } => {
                ConfigureMemory::new(address, memory_id).into()
            }
            CommandConfig::FillMemory {
                address,
                length,
                memory_id,
            } => FillMemory::new(address, length, memory_id).into(),
            CommandConfig::FwVersionCheck { value, counter_id } => {
                FwVersionCheck::new(value, CounterId::try_from(counter_id)?).into()
            }
        };
        Ok(cmd)
    }
}
