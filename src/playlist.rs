//! # Playlist Snapshot Model
//!
//! One fetched state of the player's playlist. The entry order is whatever
//! playback order the player reports, which under shuffle can change between
//! two consecutive fetches, so a snapshot is never reused after a command has
//! been issued.
//!
//! The player returns a tree; only the first top-level group (the live
//! playlist, as opposed to the media library) is flattened into entries.

use crate::control_api::PlaylistNode;

/// One playable item in the player's playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Opaque id assigned by the player, stable while the entry exists.
    pub id: String,
    /// Percent-encoded `file://` URI. Empty when the player gave none.
    pub uri: String,
    /// Marked as the active entry by the player.
    pub is_current: bool,
}

impl PlaylistEntry {
    /// Build an entry from its raw parts.
    pub fn new(id: impl Into<String>, uri: impl Into<String>, is_current: bool) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            is_current,
        }
    }
}

/// The playlist as the player reported it at one moment, in playback order.
///
/// # Examples
///
/// ```
/// use curator::playlist::{PlaylistEntry, PlaylistSnapshot};
///
/// let snapshot = PlaylistSnapshot::new(vec![
///     PlaylistEntry::new("3", "file:///media/a.mkv", false),
///     PlaylistEntry::new("4", "file:///media/b.mkv", true),
/// ]);
/// assert_eq!(snapshot.len(), 2);
/// assert_eq!(snapshot.current().map(|entry| entry.id.as_str()), Some("4"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistSnapshot {
    pub entries: Vec<PlaylistEntry>,
}

impl PlaylistSnapshot {
    /// Snapshot over `entries`, kept in the given order.
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    /// Flatten the children of the first top-level group of a playlist tree.
    ///
    /// A root without children (nothing loaded at all) yields an empty
    /// snapshot rather than an error.
    pub fn from_tree(root: &PlaylistNode) -> Self {
        let entries = root
            .children
            .first()
            .map(|group| {
                group
                    .children
                    .iter()
                    .map(|node| PlaylistEntry {
                        id: node.id.clone(),
                        uri: node.uri.clone().unwrap_or_default(),
                        is_current: node.is_current(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at the head of the playback order.
    pub fn first(&self) -> Option<&PlaylistEntry> {
        self.entries.first()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    /// The entry marked current.
    ///
    /// # Returns
    ///
    /// `None` when nothing is playing, which includes an empty snapshot.
    pub fn current(&self) -> Option<&PlaylistEntry> {
        find_current_index(self).and_then(|index| self.entries.get(index))
    }

    /// Whether an entry with `id` is still in the playlist.
    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }
}

/// Position of the entry marked current, if any.
///
/// Well-formed responses mark at most one entry; should several be marked,
/// the first one wins.
pub fn find_current_index(snapshot: &PlaylistSnapshot) -> Option<usize> {
    snapshot.entries.iter().position(|entry| entry.is_current)
}
