//! # Advancement Engine
//!
//! Moves the player to the next playlist entry and makes sure the entry it
//! lands on is one this session has not already handled.
//!
//! ## Why deduplication is needed
//!
//! With shuffle on, the player reorders the playlist whenever it likes. After
//! asking for "the entry after the current one" the player may well land on
//! something handled a minute ago. Without a check the curator would then
//! move or delete the same file's neighbour again and again.
//!
//! ## One pass
//!
//! 1. Fetch a snapshot, pick the target: the entry after the current one,
//!    the first entry when the current one is last or none is current.
//! 2. Play the target and fetch a fresh snapshot.
//! 3. If the new current entry is the last played entry or was already seen,
//!    mark it seen and go again, unless at most one entry is left.
//!    Otherwise mark it seen and stop.
//!
//! The number of repeated passes is bounded by the size of the playlist seen
//! at the start; a player that keeps reporting duplicates beyond that is
//! reported as [`Error::AdvancementStalled`].
//!
//! The engine never touches the session's last played id; that belongs to
//! whoever read the current media, and is what gets removed afterwards.

use log::{debug, info, warn};

use crate::control_api::ControlApi;
use crate::error::{Error, Result};
use crate::playlist::{find_current_index, PlaylistEntry, PlaylistSnapshot};
use crate::session::SessionState;

/// How an advancement ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Nothing to play; no command was issued.
    EmptyPlaylist,
    /// Landed on an entry not handled before in this session.
    Landed { id: String },
    /// The player reported no current entry after the play command.
    NoCurrentAfterPlay,
    /// Landed on a duplicate with nothing else left to skip to.
    Exhausted { id: String },
}

impl AdvanceOutcome {
    /// Id of the entry the player ended up on, when known.
    pub fn landed_id(&self) -> Option<&str> {
        match self {
            Self::Landed { id } | Self::Exhausted { id } => Some(id),
            Self::EmptyPlaylist | Self::NoCurrentAfterPlay => None,
        }
    }
}

/// The entry to play next given one snapshot.
pub fn select_target(snapshot: &PlaylistSnapshot) -> Option<&PlaylistEntry> {
    match find_current_index(snapshot) {
        None => {
            if !snapshot.is_empty() {
                info!("Current item not found in the playlist, playing the first item");
            }
            snapshot.first()
        }
        Some(index) if index + 1 >= snapshot.len() => {
            info!("Reached the end of the playlist, looping back to the start");
            snapshot.first()
        }
        Some(index) => snapshot.get(index + 1),
    }
}

/// Advance the player past the current entry, skipping duplicate landings.
///
/// A failing API call ends the advancement with that error; the caller
/// decides whether that is fatal.
pub fn advance<A>(api: &mut A, session: &mut SessionState) -> Result<AdvanceOutcome>
where
    A: ControlApi + ?Sized,
{
    info!("Advancing to the next item in the playlist");

    let mut max_skips: Option<usize> = None;
    let mut skips = 0usize;

    loop {
        let before = api.playlist()?;
        let bound = *max_skips.get_or_insert(before.len());

        let Some(target) = select_target(&before) else {
            info!("Playlist is empty, cannot advance");
            return Ok(AdvanceOutcome::EmptyPlaylist);
        };

        debug!("Playing entry {} ({})", target.id, target.uri);
        api.play(&target.id)?;

        let after = api.playlist()?;
        let Some(landed) = after.current() else {
            debug!("Player reports no current entry after play");
            return Ok(AdvanceOutcome::NoCurrentAfterPlay);
        };
        let landed_id = landed.id.clone();

        if !session.is_duplicate(&landed_id) {
            session.mark_seen(landed_id.clone());
            info!("Advanced to entry {landed_id}");
            debug!("{} entries seen this session", session.seen_count());
            return Ok(AdvanceOutcome::Landed { id: landed_id });
        }

        info!("Entry {landed_id} was already handled this session");
        if after.len() <= 1 {
            info!("Playlist has only one item left, stopping advance");
            return Ok(AdvanceOutcome::Exhausted { id: landed_id });
        }

        session.mark_seen(landed_id);
        skips += 1;
        if skips > bound {
            warn!("Still landing on handled entries after {skips} skips, giving up");
            return Err(Error::AdvancementStalled { skips });
        }
        debug!("Advancing again (skip {skips} of at most {bound})");
    }
}
