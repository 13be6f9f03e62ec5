//! Base trait for intents.

/// Marker trait for intent objects.
///
/// An intent is either a user action (submit, reset) or a system event
/// (submission response, poll response, animation tick).
pub trait Intent: Send + 'static {}
