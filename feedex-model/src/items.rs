//! Concrete item records for the four aggregator feeds.
//!
//! Backends are sloppy about optional fields (missing authors, absent
//! images, null tweet volumes), so every record deserializes with safe
//! fallbacks instead of rejecting the page.

use serde::{Deserialize, Serialize};

use crate::ids::ItemKey;

fn unknown() -> String {
    "Unknown".to_string()
}

/// A news article card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default = "unknown")]
    pub source: String,
    #[serde(default = "unknown")]
    pub author: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "urlToImage", default)]
    pub image_url: Option<String>,
}

impl Article {
    /// Articles are identified by URL; title is the fallback for feeds
    /// that serve items without one.
    pub fn identity_key(&self) -> ItemKey {
        if self.url.is_empty() {
            ItemKey::new(self.title.clone())
        } else {
            ItemKey::new(self.url.clone())
        }
    }
}

/// One OHLCV snapshot for a stock symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl StockQuote {
    /// The same symbol recurs once per snapshot, so identity is the
    /// symbol qualified by its timestamp.
    pub fn identity_key(&self) -> ItemKey {
        ItemKey::new(format!("{}@{}", self.symbol, self.timestamp))
    }
}

/// A scientific paper card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default = "unknown")]
    pub journal: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub url: String,
}

impl Paper {
    pub fn identity_key(&self) -> ItemKey {
        if self.url.is_empty() {
            ItemKey::new(self.title.clone())
        } else {
            ItemKey::new(self.url.clone())
        }
    }
}

/// A trending-topic card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub name: String,
    #[serde(default)]
    pub tweet_volume: Option<u64>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub url: String,
}

impl Trend {
    /// Trend listings are snapshots over time; the same name at a new
    /// timestamp is a distinct row, not a duplicate.
    pub fn identity_key(&self) -> ItemKey {
        if self.timestamp.is_empty() {
            ItemKey::new(self.name.clone())
        } else {
            ItemKey::new(format!("{}@{}", self.name, self.timestamp))
        }
    }
}
