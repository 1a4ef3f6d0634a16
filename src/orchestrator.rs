//! # Orchestrator
//!
//! Sequences one curation pass:
//!
//! ```text
//! shuffle check -> read current media -> decode path
//!     -> [ advance -> move/delete file -> remove stale entry ]
//! ```
//!
//! Everything before the bracket is fatal when it fails. The bracketed part
//! is an isolated zone: a failure there is logged as a warning and ends the
//! zone, but the pass itself still counts as done.
//!
//! Removing the stale entry is skipped when the file action failed, so the
//! playlist never loses an entry whose file was left untouched. Setting
//! `always_remove` removes it regardless.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::advance::{advance, AdvanceOutcome};
use crate::control_api::ControlApi;
use crate::error::{Error, Result};
use crate::file_action::{self, FileOutcome, RunMode};
use crate::media_uri::decode_uri;
use crate::session::SessionState;

/// Whether the player shuffles. Only ever used for an advisory warning.
pub fn check_shuffle<A>(api: &mut A) -> Result<bool>
where
    A: ControlApi + ?Sized,
{
    debug!("Checking if shuffle is enabled");
    let status = api.status()?;
    info!("Shuffle status: {}", status.random);
    if !status.random {
        warn!("Shuffle is not enabled. Curation works best with shuffle enabled.");
    }
    Ok(status.random)
}

/// URI of the entry currently playing, remembering its id in the session.
///
/// `None` when the playlist is empty or nothing is current; that is not an
/// error.
pub fn read_current_media<A>(api: &mut A, session: &mut SessionState) -> Result<Option<String>>
where
    A: ControlApi + ?Sized,
{
    debug!("Fetching currently playing media");
    let snapshot = api.playlist()?;

    if snapshot.is_empty() {
        info!("No items in the playlist");
        return Ok(None);
    }

    let Some(current) = snapshot.current().filter(|entry| !entry.uri.is_empty()) else {
        info!("No media is currently playing");
        return Ok(None);
    };

    session.set_last_played(current.id.clone());
    info!("Current media URI: {}", current.uri);
    Ok(Some(current.uri.clone()))
}

/// Remove the entry that was current before the last advancement.
///
/// Returns the removed id, or `None` when nothing was recorded.
pub fn remove_stale<A>(api: &mut A, session: &SessionState) -> Result<Option<String>>
where
    A: ControlApi + ?Sized,
{
    let Some(id) = session.last_played_id() else {
        info!("No last played item, nothing to remove");
        return Ok(None);
    };

    info!("Removing playlist entry {id}");
    let status = api.delete(id)?;
    if let Some(filename) = status.filename {
        debug!("Player now reports file: {filename}");
    }
    info!("Most recently played playlist entry removed");
    Ok(Some(id.to_string()))
}

/// What one pass through the isolated zone did.
#[derive(Debug, Default)]
pub struct PassReport {
    pub path: PathBuf,
    /// Shuffle state reported before the pass; `false` was warned about.
    pub shuffle_enabled: bool,
    pub advance: Option<AdvanceOutcome>,
    pub file: Option<FileOutcome>,
    pub removed_id: Option<String>,
    /// First failure inside the zone, already logged.
    pub error: Option<Error>,
}

impl PassReport {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing is playing, nothing was touched.
    NothingToDo,
    Completed(PassReport),
}

/// Drives curation passes against one player.
pub struct Curator<A: ControlApi> {
    api: A,
    session: SessionState,
    mode: RunMode,
    good_folder: String,
    always_remove: bool,
}

impl<A: ControlApi> Curator<A> {
    pub fn new(api: A, mode: RunMode, good_folder: impl Into<String>) -> Self {
        Self {
            api,
            session: SessionState::new(),
            mode,
            good_folder: good_folder.into(),
            always_remove: false,
        }
    }

    /// Remove the stale entry even when the file action failed.
    pub fn always_remove(mut self, enabled: bool) -> Self {
        self.always_remove = enabled;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Run one full pass.
    ///
    /// Errors returned here happened outside the isolated zone and are fatal;
    /// zone failures are reported through [`PassReport::error`].
    pub fn run_once(&mut self) -> Result<RunOutcome> {
        let shuffle_enabled = check_shuffle(&mut self.api)?;

        let Some(uri) = read_current_media(&mut self.api, &mut self.session)? else {
            info!("No media to process");
            return Ok(RunOutcome::NothingToDo);
        };

        let path = decode_uri(&uri)?;
        info!("Decoded media path: {}", path.display());

        let mut report = self.curate(&path);
        report.shuffle_enabled = shuffle_enabled;
        Ok(RunOutcome::Completed(report))
    }

    /// Advance, act on the file, drop the stale entry.
    fn curate(&mut self, path: &Path) -> PassReport {
        let mut report = PassReport {
            path: path.to_path_buf(),
            ..PassReport::default()
        };

        match advance(&mut self.api, &mut self.session) {
            Ok(outcome) => report.advance = Some(outcome),
            Err(e) => {
                warn!("Playlist operation failed: {e}");
                report.error = Some(e);
                return report;
            }
        }

        match file_action::perform(self.mode, path, &self.good_folder) {
            Ok(outcome) => report.file = Some(outcome),
            Err(e) => {
                warn!("File action failed: {e}");
                report.error = Some(e);
                if !self.always_remove {
                    warn!("Keeping the playlist entry since its file was not handled");
                    return report;
                }
            }
        }

        match remove_stale(&mut self.api, &self.session) {
            Ok(removed) => report.removed_id = removed,
            Err(e) => {
                warn!("Playlist operation failed: {e}");
                if report.error.is_none() {
                    report.error = Some(e);
                }
            }
        }

        report
    }
}
