//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - An operation being dispatched
/// - An operation settling (resolved or rejected)
/// - Whole-slice resets
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
