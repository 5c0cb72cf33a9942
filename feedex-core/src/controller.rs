//! Synchronous list controller state machine.
//!
//! The controller mediates between UI triggers (scroll proximity, query
//! input) and a paginated backend, keeping pagination correct and the
//! rendered list duplicate-free. Everything here is synchronous and
//! deterministic; the async fetch and timer plumbing lives in
//! [`crate::coordinator`].

use tracing::{debug, warn};

use feedex_model::{FeedPage, Generation, ItemKey, PageCursor};

use crate::error::FetchError;
use crate::sink::{ListSink, NoticeLevel};
use crate::state::{
    CursorPolicy, ExhaustReason, ListLoadState, PaginationState,
};

/// Identity key extractor supplied by the caller.
pub type KeyFn<T> = Box<dyn Fn(&T) -> ItemKey + Send + Sync>;

/// Tunables for one controller instance.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Distance from the bottom of the view at or under which scroll
    /// proximity triggers a load.
    pub scroll_threshold: f32,
    pub cursor_policy: CursorPolicy,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            scroll_threshold: 100.0,
            cursor_policy: CursorPolicy::default(),
        }
    }
}

/// Tag tying an issued fetch to the state epoch that issued it.
///
/// A completion whose generation no longer matches the controller's is
/// stale (the view it was answering no longer exists) and is dropped
/// without touching state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub cursor: PageCursor,
    pub query: String,
    pub generation: Generation,
}

/// Tag tying a debounce timer to the input event that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(pub(crate) u64);

/// What a completed load did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Items were appended (duplicates already subtracted); feed still live.
    Appended(usize),
    /// The backend signalled the end of the feed.
    EndOfFeed,
    /// The fetch failed; the feed is halted until a reset.
    Failed,
    /// The response belonged to an earlier epoch and was discarded.
    Stale,
}

/// Incremental list controller: owns the pagination cursor, the in-flight
/// guard, the dedup set and the glue to the renderer sink.
pub struct ListController<T, S: ListSink<T>> {
    state: PaginationState,
    settings: ControllerSettings,
    key_fn: KeyFn<T>,
    sink: S,
}

impl<T, S: ListSink<T>> std::fmt::Debug for ListController<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .finish()
    }
}

impl<T, S: ListSink<T>> ListController<T, S> {
    pub fn new(
        settings: ControllerSettings,
        key_fn: impl Fn(&T) -> ItemKey + Send + Sync + 'static,
        sink: S,
    ) -> Self {
        Self {
            state: PaginationState::new(),
            settings,
            key_fn: Box::new(key_fn),
            sink,
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Start a load cycle if the state machine allows one.
    ///
    /// This is the race-guard: while a fetch is outstanding or the feed is
    /// exhausted the call is a cheap no-op. On acceptance the state moves
    /// to `Fetching`, the loading indicator is shown and the returned
    /// ticket carries everything the fetch needs.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.state.load_state.can_fetch() {
            return None;
        }

        self.state.load_state = ListLoadState::Fetching;
        self.sink.show_loading();

        Some(LoadTicket {
            cursor: self.state.cursor,
            query: self.state.query.clone(),
            generation: self.state.generation,
        })
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Stale tickets (issued before the most recent reset) are discarded
    /// unconditionally. For current tickets the in-flight flag is cleared
    /// and the loading indicator hidden on every path, success or failure.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<FeedPage<T>, FetchError>,
    ) -> Completion {
        if ticket.generation != self.state.generation {
            // The reset that orphaned this fetch already restored the
            // sink; hiding the loader here could clobber a newer fetch.
            debug!(
                issued = %ticket.generation,
                current = %self.state.generation,
                "dropping stale page response"
            );
            return Completion::Stale;
        }

        let completion = match outcome {
            Err(err) => {
                warn!(cursor = %ticket.cursor, error = %err, "page fetch failed; halting feed");
                self.state.load_state = ListLoadState::Exhausted {
                    reason: ExhaustReason::Failed(err.to_string()),
                };
                self.sink.notify(
                    &format!("Failed to load more items: {err}"),
                    NoticeLevel::Error,
                );
                Completion::Failed
            }
            Ok(page) if page.is_empty() => {
                debug!(cursor = %ticket.cursor, "empty page; feed exhausted");
                self.state.load_state = ListLoadState::Exhausted {
                    reason: ExhaustReason::EndOfFeed,
                };
                self.sink
                    .notify("No more items to load", NoticeLevel::Info);
                Completion::EndOfFeed
            }
            Ok(page) => self.apply_page(page),
        };

        self.sink.hide_loading();
        completion
    }

    fn apply_page(&mut self, page: FeedPage<T>) -> Completion {
        let mut appended = 0usize;
        for item in &page.items {
            let key = (self.key_fn)(item);
            if self.state.mark_seen(key) {
                let node = self.sink.render(item);
                self.sink.append(node);
                appended += 1;
            }
        }

        match (page.next_page, self.settings.cursor_policy) {
            (Some(next), _) => {
                self.state.cursor = next;
                self.state.load_state = ListLoadState::Idle;
            }
            (None, CursorPolicy::LegacyIncrement) => {
                self.state.cursor = self.state.cursor.bumped();
                self.state.load_state = ListLoadState::Idle;
            }
            (None, CursorPolicy::Explicit) => {
                // No continuation offered: the page we just rendered was
                // the last one.
                self.state.load_state = ListLoadState::Exhausted {
                    reason: ExhaustReason::EndOfFeed,
                };
            }
        }

        debug!(
            appended,
            skipped = page.len() - appended,
            cursor = %self.state.cursor,
            "page applied"
        );
        Completion::Appended(appended)
    }

    /// Clear the view and start a fresh epoch under `new_query`.
    ///
    /// Any fetch still in flight keeps running but its completion will be
    /// discarded as stale.
    pub fn reset(&mut self, new_query: impl Into<String>) {
        let was_fetching = self.state.load_state.is_fetching();
        self.state.reset(new_query.into());
        self.sink.clear();
        if was_fetching {
            self.sink.hide_loading();
        }
    }

    /// Scroll trigger: start a load when the viewport is within the
    /// configured threshold of the bottom.
    ///
    /// Invoked many times per second while scrolling; rejections do no
    /// allocation and no I/O.
    pub fn on_scroll_proximity(
        &mut self,
        distance_from_bottom: f32,
    ) -> Option<LoadTicket> {
        if distance_from_bottom > self.settings.scroll_threshold {
            return None;
        }
        self.begin_load()
    }

    /// Record a new query value and arm the debounce window for it.
    pub fn note_query_change(
        &mut self,
        query: impl Into<String>,
    ) -> DebounceTicket {
        DebounceTicket(self.state.note_query_change(query.into()))
    }

    /// Called when a debounce timer elapses. Superseded tickets are
    /// no-ops; the newest ticket resets to its query and starts a load.
    pub fn debounce_elapsed(
        &mut self,
        ticket: DebounceTicket,
    ) -> Option<LoadTicket> {
        let query = self.state.take_pending_if_current(ticket.0)?;
        self.reset(query);
        self.begin_load()
    }

    /// Explicit search submission (the Enter-key path): wins over any
    /// pending debounce timer and fetches immediately.
    pub fn submit_query(
        &mut self,
        query: impl Into<String>,
    ) -> Option<LoadTicket> {
        self.state.supersede_pending();
        self.reset(query);
        self.begin_load()
    }

    /// Reload the feed from the first page under the current query.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        let query = self.state.query.clone();
        self.reset(query);
        self.begin_load()
    }

    /// Register identity keys for items that are already on screen
    /// (server-rendered bootstrap payloads) so the first fetched page
    /// does not duplicate them. Nothing is rendered.
    pub fn seed<'a>(&mut self, items: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        for item in items {
            let key = (self.key_fn)(item);
            self.state.mark_seen(key);
        }
    }
}
