//! Per-session curation state.
//!
//! A session is one invocation, or one loop iteration when the curator is
//! driven continuously. It is passed explicitly to whoever needs it; there is
//! no global copy, so several players can be curated side by side.

use std::collections::HashSet;

/// What the curator remembers between advancements of one session.
///
/// # Examples
///
/// ```
/// use curator::session::SessionState;
///
/// let mut session = SessionState::new();
/// session.set_last_played("4");
/// assert!(session.is_duplicate("4"));
/// assert!(session.mark_seen("7"));
/// assert!(!session.mark_seen("7"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Entry that was current right before the most recent advancement.
    /// Set when the current media is read; this is the entry removed later.
    last_played_id: Option<String>,
    /// Entries the engine has landed on during this session.
    seen_ids: HashSet<String>,
}

impl SessionState {
    /// Empty session: nothing played, nothing seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the entry that will be removed as stale, if one was read.
    pub fn last_played_id(&self) -> Option<&str> {
        self.last_played_id.as_deref()
    }

    /// Record the entry that is current before advancing, replacing any
    /// earlier one.
    pub fn set_last_played(&mut self, id: impl Into<String>) {
        self.last_played_id = Some(id.into());
    }

    /// Remember that the engine landed on `id`.
    ///
    /// # Returns
    ///
    /// `true` if `id` was not seen before in this session.
    pub fn mark_seen(&mut self, id: impl Into<String>) -> bool {
        self.seen_ids.insert(id.into())
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// A landing on `id` repeats something this session already handled.
    pub fn is_duplicate(&self, id: &str) -> bool {
        self.last_played_id.as_deref() == Some(id) || self.has_seen(id)
    }

    /// Number of distinct entries landed on so far.
    pub fn seen_count(&self) -> usize {
        self.seen_ids.len()
    }

    /// Forget everything, starting a fresh session.
    pub fn reset(&mut self) {
        self.last_played_id = None;
        self.seen_ids.clear();
    }
}
