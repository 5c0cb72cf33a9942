//! Incremental list controller for paginated content feeds.
//!
//! One parameterized controller replaces the per-site copies of the same
//! infinite-scroll loop: it owns the pagination cursor, the in-flight
//! guard, duplicate suppression and the reset-on-search lifecycle, and
//! drives a renderer sink from a paginated JSON backend.
//!
//! The split mirrors the event-loop model the controller targets:
//! [`controller::ListController`] is a synchronous, deterministic state
//! machine; [`coordinator::FeedCoordinator`] supplies the async fetch and
//! debounce plumbing around it.

pub mod controller;
pub mod coordinator;
pub mod error;
pub mod sink;
pub mod source;
pub mod state;
pub mod testing;

pub use controller::{
    Completion, ControllerSettings, DebounceTicket, ListController,
    LoadTicket,
};
pub use coordinator::{FeedCoordinator, DEFAULT_DEBOUNCE};
pub use error::{FetchError, Result};
pub use sink::{ListSink, NoticeLevel};
pub use source::http::HttpPageSource;
pub use source::PageSource;
pub use state::{
    CursorPolicy, ExhaustReason, ListLoadState, PaginationState,
};
