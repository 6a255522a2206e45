//! Person API Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod person;
/// Application state management
///
/// Holds the person store shared by all request handlers.
pub mod state;
