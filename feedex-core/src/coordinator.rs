//! Async glue between UI triggers, the debounce timer and the controller.
//!
//! The coordinator owns the controller behind a mutex that is never held
//! across an await: state access is lock-scoped and synchronous, the fetch
//! itself runs unlocked. The `Fetching` state, not the mutex, is what
//! serializes load cycles.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::controller::{Completion, ListController, LoadTicket};
use crate::sink::ListSink;
use crate::source::PageSource;

/// Default quiescence window for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Drives one [`ListController`] from async land: spawns fetch cycles for
/// scroll triggers and runs the single-flight debounce for query input.
pub struct FeedCoordinator<P, S>
where
    P: PageSource,
    S: ListSink<P::Item>,
{
    controller: Mutex<ListController<P::Item, S>>,
    source: P,
    debounce: Duration,
}

impl<P, S> std::fmt::Debug for FeedCoordinator<P, S>
where
    P: PageSource,
    S: ListSink<P::Item>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedCoordinator")
            .field("debounce", &self.debounce)
            .finish()
    }
}

impl<P, S> FeedCoordinator<P, S>
where
    P: PageSource + 'static,
    P::Item: Send + 'static,
    S: ListSink<P::Item> + 'static,
{
    pub fn new(controller: ListController<P::Item, S>, source: P) -> Self {
        Self {
            controller: Mutex::new(controller),
            source,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Override the debounce quiescence window.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Lock-scoped access to the controller, for wiring and assertions.
    pub fn controller(&self) -> MutexGuard<'_, ListController<P::Item, S>> {
        self.controller.lock().expect("controller state poisoned")
    }

    /// Fetch the next page if the controller allows it, and apply the
    /// result. Completes when the page has been rendered (or the feed
    /// halted).
    pub async fn load_next(&self) {
        let ticket = self.controller().begin_load();
        if let Some(ticket) = ticket {
            self.fetch_and_apply(ticket).await;
        }
    }

    /// Scroll trigger. Cheap when the threshold or the in-flight guard
    /// rejects; otherwise spawns the fetch cycle and returns immediately.
    pub fn on_scroll_proximity(self: Arc<Self>, distance_from_bottom: f32) {
        let ticket =
            self.controller().on_scroll_proximity(distance_from_bottom);
        if let Some(ticket) = ticket {
            tokio::spawn(async move {
                self.fetch_and_apply(ticket).await;
            });
        }
    }

    /// Query input trigger. Arms the debounce window; only the newest
    /// value within a burst ever reaches the backend.
    pub fn on_query_change(self: Arc<Self>, query: impl Into<String>) {
        let ticket = self.controller().note_query_change(query);
        tokio::spawn(async move {
            tokio::time::sleep(self.debounce).await;
            let load = self.controller().debounce_elapsed(ticket);
            match load {
                Some(load) => self.fetch_and_apply(load).await,
                // Superseded by a newer input event; nothing to do.
                None => debug!("debounce timer superseded"),
            }
        });
    }

    /// Explicit search submission: supersedes any pending debounce and
    /// fetches the first page for `query` immediately.
    pub async fn submit_query(&self, query: impl Into<String>) {
        let ticket = self.controller().submit_query(query);
        if let Some(ticket) = ticket {
            self.fetch_and_apply(ticket).await;
        }
    }

    /// Reload the feed from the first page under the current query.
    pub async fn refresh(&self) {
        let ticket = self.controller().refresh();
        if let Some(ticket) = ticket {
            self.fetch_and_apply(ticket).await;
        }
    }

    /// Clear the view and start a fresh epoch without fetching.
    pub fn reset(&self, query: impl Into<String>) {
        self.controller().reset(query);
    }

    /// Register server-rendered items with the dedup set.
    pub fn seed(&self, items: &[P::Item]) {
        self.controller().seed(items);
    }

    async fn fetch_and_apply(&self, ticket: LoadTicket) {
        let outcome =
            self.source.fetch_page(ticket.cursor, &ticket.query).await;
        let completion = self.controller().complete_load(&ticket, outcome);
        debug!(?completion, cursor = %ticket.cursor, "load cycle finished");
    }
}
