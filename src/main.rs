//! # Curator
//!
//! Walks a shuffled VLC playlist one file at a time. Each run takes the
//! entry that is playing right now, advances VLC to an entry not handled yet,
//! keeps (`--move`) or deletes (`--delete`) the file that was playing, and
//! removes its now stale entry from the playlist.
//!
//! ## Usage
//!
//! ```bash
//! # Liked it: move into ./good next to the file
//! curator --move
//!
//! # Did not: delete it
//! curator --delete
//! ```
//!
//! Exit code is 0 when the run completed, including "nothing playing", and
//! 1 on a configuration error or when VLC could not be queried up front.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use curator::cli::Args;
use curator::config::Config;
use curator::control_api::VlcHttpClient;
use curator::orchestrator::{Curator, RunOutcome};

/// Main entry point.
///
/// Logging goes through `env_logger` at `info` by default; `RUST_LOG`
/// overrides it:
/// - `RUST_LOG=debug curator -m` - every request and decision
/// - `RUST_LOG=curator::advance=debug curator -m` - just the engine
fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // Validate before any request goes out
    let mode = args.run_mode()?;
    let config = Config::load(args.config.as_deref(), args.overrides())
        .context("Failed to load configuration")?;
    debug!("Using control API at {}", config.base_url());

    let client = VlcHttpClient::new(&config);
    let mut curator = Curator::new(client, mode, config.good_folder.clone())
        .always_remove(args.always_remove);

    match curator.run_once().context("Curation run failed")? {
        RunOutcome::NothingToDo => info!("No media to process. Exiting."),
        RunOutcome::Completed(report) => {
            if let Some(e) = &report.error {
                warn!("Run finished with a recovered error: {e}");
            } else {
                info!("Done with {}", report.path.display());
            }
        }
    }

    Ok(())
}
