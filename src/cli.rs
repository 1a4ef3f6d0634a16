//! # Command-Line Interface Module
//!
//! Clap definitions for the `curator` binary. A run either keeps the file
//! that just played (`--move`) or throws it away (`--delete`); exactly one of
//! the two must be given.
//!
//! Mode validation is done by [`Args::run_mode`] rather than by a clap group
//! so that a missing or doubled mode is reported as a configuration error
//! with exit code 1.
//!
//! ## Examples
//!
//! ```bash
//! curator --move
//! curator -d --port 8080 --password hunter2
//! CURATOR_PASSWORD=hunter2 curator -m --good-folder keepers
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::file_action::RunMode;

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(about = "Curator: keep or delete what VLC just played, then move on")]
#[command(version)]
pub struct Args {
    /// Move the current file into the good folder next to it
    #[arg(short, long = "move")]
    pub move_file: bool,

    /// Delete the current file
    #[arg(short, long = "delete")]
    pub delete_file: bool,

    /// Read settings from this JSON file instead of the default location
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Host of VLC's HTTP interface
    #[arg(long, env = "CURATOR_HOST")]
    pub host: Option<String>,

    /// Port of VLC's HTTP interface
    #[arg(long, env = "CURATOR_PORT")]
    pub port: Option<u16>,

    /// Password of VLC's HTTP interface
    #[arg(long, env = "CURATOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Name of the folder kept files are moved into
    #[arg(long, env = "CURATOR_GOOD_FOLDER")]
    pub good_folder: Option<String>,

    /// Remove the playlist entry even if moving/deleting the file failed
    #[arg(long)]
    pub always_remove: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn run_mode(&self) -> Result<RunMode> {
        RunMode::from_flags(self.move_file, self.delete_file)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            password: self.password.clone(),
            good_folder: self.good_folder.clone(),
        }
    }
}
