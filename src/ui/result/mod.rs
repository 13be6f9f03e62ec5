//! Result state machine and its panels.
//!
//! Uses the same MVI split as the other UI features:
//! - `state.rs` - Task lifecycle state
//! - `intent.rs` - Submission, poll and user events
//! - `reducer.rs` - Pure state transitions
//! - `view.rs` - View mode mapping and rendering

mod intent;
mod reducer;
mod state;
mod view;

pub use intent::ResultIntent;
pub use reducer::ResultReducer;
pub use state::{ResultState, UNKNOWN_FAILURE};
pub use view::{
    panel_lines, render_result, ViewMode, DOWNLOAD_LABEL, PROGRESS_MESSAGE, SUCCESS_MESSAGE,
};
