//! Hand-rolled test doubles for exercising the controller without a real
//! backend or UI.
//!
//! `ScriptedSource` replays queued page outcomes (optionally gated so a
//! fetch can be held open mid-flight) and `RecordingSink` captures every
//! sink call in order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use feedex_model::{FeedPage, PageCursor};

use crate::error::Result;
use crate::sink::{ListSink, NoticeLevel};
use crate::source::PageSource;

/// A page source that replays scripted outcomes in order.
///
/// Clones share state, so a test can keep a handle while the coordinator
/// owns the source. With an exhausted script it serves empty pages.
pub struct ScriptedSource<T> {
    responses: Arc<Mutex<VecDeque<Result<FeedPage<T>>>>>,
    calls: Arc<Mutex<Vec<(PageCursor, String)>>>,
    gate: Option<Arc<Semaphore>>,
}

impl<T> std::fmt::Debug for ScriptedSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedSource")
            .field("calls", &self.calls.lock().unwrap().len())
            .field("gated", &self.gate.is_some())
            .finish()
    }
}

impl<T> Clone for ScriptedSource<T> {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
            gate: self.gate.clone(),
        }
    }
}

impl<T> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScriptedSource<T> {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// A source whose fetches block until the returned gate hands out a
    /// permit, one per fetch. Lets tests hold a request in flight.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut source = Self::new();
        source.gate = Some(Arc::clone(&gate));
        (source, gate)
    }

    /// Queue a successful page.
    pub fn push_page(&self, items: Vec<T>, next_page: Option<u64>) {
        self.responses.lock().unwrap().push_back(Ok(FeedPage {
            items,
            next_page: next_page.map(PageCursor::new),
        }));
    }

    /// Queue a failed fetch.
    pub fn push_error(&self, err: crate::error::FetchError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// Every `(cursor, query)` pair fetched so far, in issue order.
    pub fn calls(&self) -> Vec<(PageCursor, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl<T> PageSource for ScriptedSource<T>
where
    T: Send + Sync + 'static,
{
    type Item = T;

    async fn fetch_page(
        &self,
        cursor: PageCursor,
        query: &str,
    ) -> Result<FeedPage<T>> {
        self.calls
            .lock()
            .unwrap()
            .push((cursor, query.to_string()));

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate closed");
            permit.forget();
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(FeedPage {
                    items: Vec::new(),
                    next_page: None,
                })
            })
    }
}

/// One observed sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Appended,
    Cleared,
    LoadingShown,
    LoadingHidden,
    Notice(String, NoticeLevel),
}

/// A sink that records everything it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingSink<T> {
    events: Vec<SinkEvent>,
    appended: Vec<T>,
}

impl<T> RecordingSink<T> {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            appended: Vec::new(),
        }
    }

    /// Items appended since the last `clear`, in render order.
    pub fn appended(&self) -> &[T] {
        &self.appended
    }

    /// Every sink call in order, across clears.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn notices(&self) -> Vec<(String, NoticeLevel)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Notice(message, level) => {
                    Some((message.clone(), *level))
                }
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::Cleared))
            .count()
    }

    /// Net show/hide balance; zero means the loading indicator is hidden.
    pub fn loading_depth(&self) -> isize {
        self.events
            .iter()
            .map(|event| match event {
                SinkEvent::LoadingShown => 1,
                SinkEvent::LoadingHidden => -1,
                _ => 0,
            })
            .sum()
    }
}

impl<T: Clone + Send> ListSink<T> for RecordingSink<T> {
    type Node = T;

    fn render(&self, item: &T) -> T {
        item.clone()
    }

    fn append(&mut self, node: T) {
        self.events.push(SinkEvent::Appended);
        self.appended.push(node);
    }

    fn clear(&mut self) {
        self.events.push(SinkEvent::Cleared);
        self.appended.clear();
    }

    fn show_loading(&mut self) {
        self.events.push(SinkEvent::LoadingShown);
    }

    fn hide_loading(&mut self) {
        self.events.push(SinkEvent::LoadingHidden);
    }

    fn notify(&mut self, message: &str, level: NoticeLevel) {
        self.events
            .push(SinkEvent::Notice(message.to_string(), level));
    }
}
