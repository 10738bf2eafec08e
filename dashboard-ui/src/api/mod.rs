//! API client module

pub mod client;

pub use client::*;
