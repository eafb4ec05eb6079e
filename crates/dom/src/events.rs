use crate::node::NodeId;

/// Input device class for a pointer-down gesture.
///
/// Mouse and touch are separate registrations so an embedder can install
/// the same handler for both variants and cancel them individually.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Listener phase.
///
/// Ordering contract: within a single dispatch, every `Capture` listener
/// runs before any `Bubble` listener; inside one phase, listeners run in
/// registration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DispatchPhase {
    Capture,
    Bubble,
}

/// Payload passed to document-level pointer-down listeners.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PointerDownEvent {
    pub target: NodeId,
    pub kind: PointerKind,
}

/// Cancellation handle for a document-level pointer-down listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointerListenerHandle(pub(crate) u64);

/// Cancellation handle for an element click listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClickListenerHandle(pub(crate) u64);
