/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::CmdTag;
use crate::commands::header::CommandHeader;
use crate::commands::record::CommandRecord;
use crate::error::CommandError;

/// Monotonic counters a firmware version can be checked against.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterId {
    None = 0,
    NonSecure = 1,
    Secure = 2,
    Radio = 3,
    Snt = 4,
    Bootloader = 5,
}

impl TryFrom<u32> for CounterId {
    type Error = CommandError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CounterId::None),
            1 => Ok(CounterId::NonSecure),
            2 => Ok(CounterId::Secure),
            3 => Ok(CounterId::Radio),
            4 => Ok(CounterId::Snt),
            5 => Ok(CounterId::Bootloader),
            _ => Err(CommandError::out_of_range(
                "counter id",
                u64::from(value),
                CounterId::Bootloader as u64,
            )),
        }
    }
}

/// Rejects the image unless `value` is not older than the counter `counter_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FwVersionCheck {
    pub value: u32,
    pub counter_id: CounterId,
}

impl FwVersionCheck {
    pub fn new(value: u32, counter_id: CounterId) -> Self {
        FwVersionCheck { value, counter_id }
    }
}

impl CommandRecord for FwVersionCheck {
    const TAG: CmdTag = CmdTag::FwVersionCheck;

    fn header_fields(&self) -> (u32, u32) {
        (self.value, self.counter_id as u32)
    }

    fn decode(header: &CommandHeader, _payload: &[u8]) -> Result<Self, CommandError> {
        Ok(FwVersionCheck {
            value: header.primary,
            counter_id: CounterId::try_from(header.secondary)?,
        })
    }

    fn info(&self) -> String {
        format!(
            "{}: Value={}, Counter ID={:?} ({})",
            Self::TAG.name(),
            self.value,
            self.counter_id,
            self.counter_id as u32
        )
    }
}
