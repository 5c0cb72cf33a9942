//! Backend-facing port and adapters.

pub mod http;

use async_trait::async_trait;

use feedex_model::{FeedPage, PageCursor};

use crate::error::Result;

/// Port for fetching one page of a feed.
///
/// Implementations live in adapters (HTTP, scripted test doubles) and
/// must not leak transport types into the controller.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// The record type the backend serves.
    type Item;

    /// Fetch the page at `cursor`, filtered by `query` (empty string =
    /// unfiltered).
    async fn fetch_page(
        &self,
        cursor: PageCursor,
        query: &str,
    ) -> Result<FeedPage<Self::Item>>;
}
