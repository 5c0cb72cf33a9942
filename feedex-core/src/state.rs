//! Pagination state owned by one list controller.

use std::collections::HashSet;

use feedex_model::{Generation, ItemKey, PageCursor};

/// How the cursor advances when a response carries no explicit `next_page`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CursorPolicy {
    /// `next_page` is the contract: a non-empty page without one means the
    /// feed is complete.
    #[default]
    Explicit,
    /// Legacy page-counter shim for backends that never send `next_page`:
    /// the cursor increments by one and only an empty page ends the feed.
    LegacyIncrement,
}

/// Why a feed stopped loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustReason {
    /// The backend reported the end of its data.
    EndOfFeed,
    /// A fetch failed; the feed stays halted until the next reset.
    Failed(String),
}

/// Load state machine for one list view.
///
/// `Fetching` is the in-flight guard: it is the only state in which a new
/// load is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListLoadState {
    #[default]
    Idle,
    Fetching,
    Exhausted { reason: ExhaustReason },
}

impl ListLoadState {
    pub fn is_fetching(&self) -> bool {
        matches!(self, ListLoadState::Fetching)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, ListLoadState::Exhausted { .. })
    }

    pub fn can_fetch(&self) -> bool {
        matches!(self, ListLoadState::Idle)
    }
}

/// Mutable pagination state for a single list view.
///
/// Created when the view mounts, dropped when it unmounts, and mutated only
/// through controller operations; trigger callbacks never touch it
/// directly.
#[derive(Debug, Default)]
pub struct PaginationState {
    pub cursor: PageCursor,
    pub query: String,
    pub load_state: ListLoadState,
    pub generation: Generation,
    seen: HashSet<ItemKey>,
    debounce_seq: u64,
    pending_query: Option<String>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh epoch: new query, first page, cleared dedup set.
    /// Bumping the generation orphans any fetch still in flight.
    pub fn reset(&mut self, query: String) {
        self.generation.bump();
        self.query = query;
        self.cursor = PageCursor::FIRST;
        self.load_state = ListLoadState::Idle;
        self.seen.clear();
    }

    /// Record an identity key. Returns `true` when the key was not seen
    /// before (i.e. the item should be rendered).
    pub fn mark_seen(&mut self, key: ItemKey) -> bool {
        self.seen.insert(key)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Arm (or re-arm) the debounce window for a new query value.
    /// Returns the sequence number identifying this burst entry.
    pub fn note_query_change(&mut self, query: String) -> u64 {
        self.debounce_seq += 1;
        self.pending_query = Some(query);
        self.debounce_seq
    }

    /// Take the pending query if `seq` is still the newest one; superseded
    /// timers get `None` and must do nothing.
    pub fn take_pending_if_current(&mut self, seq: u64) -> Option<String> {
        if seq == self.debounce_seq {
            self.pending_query.take()
        } else {
            None
        }
    }

    /// Invalidate any pending debounce entry (explicit submissions win
    /// over a still-armed timer).
    pub fn supersede_pending(&mut self) {
        self.debounce_seq += 1;
        self.pending_query = None;
    }
}
