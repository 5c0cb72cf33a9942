//! The paginated response envelope shared by all feed backends.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::ids::PageCursor;

/// One page of feed items as returned by a backend.
///
/// The wire shape is `{ "<items-key>": [...], "next_page": <n> }` where the
/// items key differs per feed (`news`, `stocks`, `papers`, `trends`) and
/// `next_page` is optional. An absent `next_page` means the backend has no
/// continuation to offer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub next_page: Option<PageCursor>,
}

impl<T> FeedPage<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: DeserializeOwned> FeedPage<T> {
    /// Decode a backend response body.
    ///
    /// The item array must sit under `items_key`; anything else is a
    /// malformed response. A `null` `next_page` is treated as absent.
    pub fn from_value(items_key: &str, body: Value) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Err(ModelError::UnexpectedShape(
                "response body is not a JSON object".to_string(),
            ));
        };

        let raw_items = map
            .remove(items_key)
            .ok_or_else(|| ModelError::MissingItemsKey(items_key.to_string()))?;
        if !raw_items.is_array() {
            return Err(ModelError::UnexpectedShape(format!(
                "`{items_key}` is not an array"
            )));
        }
        let items: Vec<T> = serde_json::from_value(raw_items)?;

        let next_page = match map.remove("next_page") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(serde_json::from_value::<PageCursor>(raw)?),
        };

        Ok(FeedPage { items, next_page })
    }
}
