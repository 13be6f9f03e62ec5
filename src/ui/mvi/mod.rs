//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────── reset / submit ──────┘
//! ```
//!
//! Reducers are pure: timers, network calls and cancellation live outside
//! and only feed intents in.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
