//! State Management
//!
//! Global chart state and the feedback submission state machine.

pub mod global;
pub mod submission;

pub use global::{provide_global_state, GlobalState};
pub use submission::SubmissionState;
