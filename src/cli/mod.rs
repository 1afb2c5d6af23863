// src/cli/mod.rs
use clap::Parser;
use std::path::PathBuf;

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Use JSON for output (non-interactive commands)
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of the encrypted password store
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Path of the encryption key file
    #[arg(long, global = true)]
    pub key_file: Option<PathBuf>,

    /// Command to execute; the interactive menu runs when omitted
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
