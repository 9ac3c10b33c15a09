/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod commands;
pub mod connection;
pub mod core;
pub mod error;

pub use commands::{Command, CommandRecord, Section, SectionHeader, parse_block, parse_command};
pub use connection::DebugProbe;
pub use error::{CommandError, ProbeError};
