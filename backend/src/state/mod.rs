// State management module
// Holds the shared handles injected into request handlers

pub mod app_state;

pub use app_state::AppState;
