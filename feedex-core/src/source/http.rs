//! HTTP adapter for the page source port.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use feedex_model::{FeedPage, PageCursor};

use crate::error::{FetchError, Result};
use crate::source::PageSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches feed pages from a REST backend speaking the
/// `GET <endpoint>?page=<cursor>&q=<query>` contract.
#[derive(Debug, Clone)]
pub struct HttpPageSource<T> {
    client: Client,
    endpoint: String,
    items_key: String,
    page_param: String,
    query_param: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    /// Create a source for `endpoint`, whose responses nest the item
    /// array under `items_key`.
    pub fn new(
        endpoint: impl Into<String>,
        items_key: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: normalize(endpoint.into()),
            items_key: items_key.into(),
            page_param: "page".to_string(),
            query_param: "q".to_string(),
            _item: PhantomData,
        }
    }

    /// Override the `page`/`q` query parameter names.
    pub fn with_params(
        mut self,
        page_param: impl Into<String>,
        query_param: impl Into<String>,
    ) -> Self {
        self.page_param = page_param.into();
        self.query_param = query_param.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query_pairs(&self, cursor: PageCursor, query: &str) -> Vec<(String, String)> {
        let mut pairs =
            vec![(self.page_param.clone(), cursor.to_string())];
        if !query.is_empty() {
            pairs.push((self.query_param.clone(), query.to_string()));
        }
        pairs
    }
}

/// Default the scheme and trim a trailing slash so "localhost:8000/feed"
/// style endpoints work; reqwest rejects scheme-less URLs.
fn normalize(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed
    } else {
        warn!(endpoint = %trimmed, "endpoint has no scheme; assuming http");
        format!("http://{trimmed}")
    }
}

#[async_trait]
impl<T> PageSource for HttpPageSource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch_page(
        &self,
        cursor: PageCursor,
        query: &str,
    ) -> Result<FeedPage<T>> {
        debug!(endpoint = %self.endpoint, %cursor, query, "fetching page");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_pairs(cursor, query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "backend rejected page fetch");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        Ok(FeedPage::from_value(&self.items_key, body)?)
    }
}
