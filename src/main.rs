/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
mod config;
use clap::{Parser, Subcommand};
use config::BuildConfig;
use env_logger::Builder;
use log::{LevelFilter, debug, error, info};
use sbcmd::commands::{Command, SECTION_HEADER_SIZE, Section, export_block, parse_block};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sbcmd", version, about = "Build and inspect secure-boot command blocks")]
struct Cli {
    /// Log decoding details (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decode a command block and print every command
    Parse {
        file: PathBuf,
        /// Byte offset of the block inside the file
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// The block starts with a section header
        #[arg(long)]
        section: bool,
    },
    /// Build a command block from a TOML description
    Build {
        config: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let result = match cli.action {
        Action::Parse {
            file,
            offset,
            section,
        } => parse(&file, offset, section),
        Action::Build { config, output } => build(&config, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse(file: &PathBuf, offset: usize, section: bool) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(file)?;
    let region = data.get(offset..).ok_or_else(|| {
        format!(
            "offset 0x{:X} is past the end of {} ({} bytes)",
            offset,
            file.display(),
            data.len()
        )
    })?;
    debug!("Decoding {} bytes at offset 0x{:X}", region.len(), offset);

    let (commands, consumed): (Vec<Command>, usize) = if section {
        let parsed = Section::parse(region)?;
        let header = parsed.header()?;
        println!("{}", header);
        (parsed.commands, SECTION_HEADER_SIZE + header.length as usize)
    } else {
        (parse_block(region)?, region.len())
    };

    for (i, cmd) in commands.iter().enumerate() {
        println!("[{:3}] {}", i, cmd);
    }
    println!("SHA-256: {}", hex::encode(Sha256::digest(&region[..consumed])));

    Ok(())
}

fn build(config: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn Error>> {
    let text = std::fs::read_to_string(config)?;
    let config = BuildConfig::from_toml(&text)?;
    let commands = config.to_commands()?;

    let data = match &config.section {
        Some(section) => Section::new(section.uid, section.section_type, commands).export()?,
        None => export_block(&commands),
    };

    std::fs::write(output, &data)?;
    info!("Wrote {} bytes to {}", data.len(), output.display());
    println!("SHA-256: {}", hex::encode(Sha256::digest(&data)));

    Ok(())
}
