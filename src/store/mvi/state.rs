//! Base trait for slice state in MVI architecture.

/// Marker trait for slice state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data a reader needs)
/// - Comparable (PartialEq for detecting changes)
/// - Resettable (Default is the initial, idle state)
pub trait SliceState: Clone + PartialEq + Default + Send + 'static {}
