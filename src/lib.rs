//! Playlist curation for an HTTP-controlled media player.
//!
//! Core modules:
//! - [`advance`] - Advancement engine with duplicate skipping
//! - [`playlist`] - Playlist snapshot model
//! - [`session`] - Per-session state (last played entry, seen entries)
//! - [`orchestrator`] - One curation pass, with its isolated failure zone
//!
//! ### Supporting Modules
//!
//! - [`control_api`] - VLC HTTP interface behind the `ControlApi` trait
//! - [`file_action`] - Move-to-folder / delete of the played file
//! - [`media_uri`] - `file://` URI decoding
//! - [`config`] - Connection settings and config file layering
//! - [`cli`] - Command-line interface definitions with clap
//! - [`error`] - Tagged error kinds
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use curator::config::{Config, ConfigOverrides};
//! use curator::control_api::VlcHttpClient;
//! use curator::file_action::RunMode;
//! use curator::orchestrator::{Curator, RunOutcome};
//!
//! let config = Config::load(None, ConfigOverrides::default())?;
//! let mut curator = Curator::new(VlcHttpClient::new(&config), RunMode::Move, config.good_folder.clone());
//!
//! match curator.run_once()? {
//!     RunOutcome::NothingToDo => println!("nothing playing"),
//!     RunOutcome::Completed(report) => println!("handled {}", report.path.display()),
//! }
//! # Ok::<(), curator::error::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Failures while checking
//! shuffle, reading the current media or decoding its path are returned to
//! the caller; failures while advancing, acting on the file or removing the
//! stale entry are logged and reported in the pass report instead.

pub mod advance;
pub mod cli;
pub mod config;
pub mod control_api;
pub mod error;
pub mod file_action;
pub mod media_uri;
pub mod orchestrator;
pub mod playlist;
pub mod session;
