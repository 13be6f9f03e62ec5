//! Base trait for view state.

/// Marker trait for state objects: cloneable, comparable, and holding
/// everything a view needs to render.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
