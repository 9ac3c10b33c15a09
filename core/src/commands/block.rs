/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::commands::{Command, parse_command_at};
use crate::core::utilities::ALIGNMENT;
use crate::error::CommandError;
use log::debug;

/// Concatenates the exported records of `commands`.
pub fn export_block(commands: &[Command]) -> Vec<u8> {
    let mut data = Vec::with_capacity(commands.iter().map(Command::export_len).sum());
    for cmd in commands {
        data.extend_from_slice(&cmd.export());
    }
    data
}

/// Decodes consecutive command records until `data` is exhausted.
pub fn parse_block(data: &[u8]) -> Result<Vec<Command>, CommandError> {
    if data.len() % ALIGNMENT != 0 {
        return Err(CommandError::Misaligned { length: data.len() });
    }

    let mut commands = Vec::new();
    let mut offset = 0;
    while offset < data.len() {
        let cmd = parse_command_at(data, offset)?;
        offset += cmd.export_len();
        commands.push(cmd);
    }

    debug!("Parsed {} commands from {} bytes", commands.len(), data.len());
    Ok(commands)
}
