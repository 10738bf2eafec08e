//! API Routes
//!
//! Route handlers organized by functionality.

pub mod feedback;
pub mod health;
pub mod report;
pub mod sentiment;
