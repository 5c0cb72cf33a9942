//! Renderer-facing port.

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Where rendered cards go.
///
/// Implementations adapt a concrete surface (DOM bridge, TUI, a test
/// recorder). All methods are synchronous and fire-and-forget from the
/// controller's point of view; entrance transitions for appended nodes are
/// the sink's concern and must not block the load cycle.
pub trait ListSink<T>: Send {
    /// The rendered representation of one item.
    type Node;

    /// Build the display node for an item. No side effects beyond UI
    /// construction.
    fn render(&self, item: &T) -> Self::Node;

    /// Append a node to the end of the displayed list.
    fn append(&mut self, node: Self::Node);

    /// Remove every displayed item.
    fn clear(&mut self);

    fn show_loading(&mut self);

    fn hide_loading(&mut self);

    /// Surface a non-blocking notification ("no more items", failures).
    fn notify(&mut self, message: &str, level: NoticeLevel);
}
