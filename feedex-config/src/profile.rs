//! Per-feed profile definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use feedex_core::controller::ControllerSettings;
use feedex_core::state::CursorPolicy;
use feedex_core::HttpPageSource;

fn default_page_param() -> String {
    "page".to_string()
}

fn default_query_param() -> String {
    "q".to_string()
}

fn default_scroll_threshold() -> f32 {
    100.0
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Settings for one feed variant. Use these to tune how early scrolling
/// prefetches and how patient the search box is before hitting the
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedProfile {
    /// Profile name, used for lookup and logging.
    pub name: String,
    /// Endpoint serving the paginated JSON. Absolute, or a path resolved
    /// against a base URL at wiring time.
    pub endpoint: String,
    /// JSON field under which the backend nests the item array
    /// (`news`, `stocks`, `papers`, `trends`).
    pub items_key: String,
    /// Query parameter carrying the page cursor.
    #[serde(default = "default_page_param")]
    pub page_param: String,
    /// Query parameter carrying the search string.
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Distance from the bottom of the view at or under which scrolling
    /// triggers a load. Raise it to prefetch earlier on fast-scrolling
    /// feeds.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f32,
    /// Quiescence window (ms) the search box waits after the last
    /// keystroke before querying. Shorter windows feel snappier but send
    /// more requests mid-word.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Per-request timeout (seconds) for page fetches.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How the cursor advances when a response has no `next_page`.
    /// `legacy-increment` is the compatibility shim for page-counter
    /// backends.
    #[serde(default)]
    pub cursor_policy: CursorPolicy,
}

impl FeedProfile {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        items_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            items_key: items_key.into(),
            page_param: default_page_param(),
            query_param: default_query_param(),
            scroll_threshold: default_scroll_threshold(),
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            cursor_policy: CursorPolicy::default(),
        }
    }

    /// The built-in profile for one of the known aggregator feeds.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "news" => Some(
                Self::new("news", "/load_more_news", "news")
                    .with_cursor_policy(CursorPolicy::LegacyIncrement),
            ),
            "market" => Some(
                Self::new("market", "/load_more_stocks", "stocks")
                    .with_cursor_policy(CursorPolicy::LegacyIncrement),
            ),
            // The papers backend is the one variant that already speaks
            // the explicit continuation contract.
            "papers" => {
                Some(Self::new("papers", "/api/load-more-papers", "papers"))
            }
            "trends" => Some(
                Self::new("trends", "/load_more_trends", "trends")
                    .with_cursor_policy(CursorPolicy::LegacyIncrement),
            ),
            _ => None,
        }
    }

    /// All built-in profiles.
    pub fn builtins() -> Vec<Self> {
        ["news", "market", "papers", "trends"]
            .iter()
            .filter_map(|name| Self::builtin(name))
            .collect()
    }

    pub fn with_cursor_policy(mut self, policy: CursorPolicy) -> Self {
        self.cursor_policy = policy;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Controller tunables derived from this profile.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            scroll_threshold: self.scroll_threshold,
            cursor_policy: self.cursor_policy,
        }
    }

    /// Build the HTTP page source for this profile. A relative `endpoint`
    /// is resolved against `base_url`.
    pub fn page_source<T>(&self, base_url: &str) -> Result<HttpPageSource<T>> {
        let endpoint = if self.endpoint.starts_with("http://")
            || self.endpoint.starts_with("https://")
        {
            self.endpoint.clone()
        } else {
            let base = Url::parse(base_url).with_context(|| {
                format!("invalid base url `{base_url}`")
            })?;
            base.join(&self.endpoint)
                .with_context(|| {
                    format!(
                        "cannot resolve endpoint `{}` against `{base_url}`",
                        self.endpoint
                    )
                })?
                .to_string()
        };

        Ok(HttpPageSource::new(endpoint, self.items_key.clone())
            .with_params(self.page_param.clone(), self.query_param.clone())
            .with_timeout(self.request_timeout()))
    }

    /// Apply `FEEDEX_*` environment overrides to scalar fields.
    ///
    /// Durations accept humantime strings (`300ms`, `2s`).
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var("FEEDEX_SCROLL_THRESHOLD")
            && !raw.trim().is_empty()
        {
            self.scroll_threshold = raw
                .trim()
                .parse()
                .with_context(|| {
                    format!("invalid FEEDEX_SCROLL_THRESHOLD `{raw}`")
                })?;
        }

        if let Ok(raw) = std::env::var("FEEDEX_DEBOUNCE")
            && !raw.trim().is_empty()
        {
            let window = humantime::parse_duration(raw.trim())
                .with_context(|| format!("invalid FEEDEX_DEBOUNCE `{raw}`"))?;
            self.debounce_ms = window.as_millis() as u64;
        }

        if let Ok(raw) = std::env::var("FEEDEX_REQUEST_TIMEOUT")
            && !raw.trim().is_empty()
        {
            let timeout = humantime::parse_duration(raw.trim())
                .with_context(|| {
                    format!("invalid FEEDEX_REQUEST_TIMEOUT `{raw}`")
                })?;
            self.request_timeout_secs = timeout.as_secs().max(1);
        }

        Ok(())
    }
}
