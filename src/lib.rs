pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod log;
pub mod plural;
pub mod sanitize;

// Decoupled game loop architecture
pub mod app;
pub mod pipeline;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
