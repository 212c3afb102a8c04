//! Library entry point for the cinedeck crate.
//!
//! cinedeck browses a TMDB-style media catalog from the terminal: banner,
//! paginated carousels and a detail overlay for movies, TV shows and search
//! results. Every long-lived component is an actor; see [`app::App`] for the
//! wiring.

pub mod api;
pub mod app;
pub mod env;
pub mod fs;
pub mod log;
pub mod net;
pub mod terminal;
pub mod utils;

pub use utils::*;

/// Default mailbox size used by the actors of the application.
pub const BUFFER_SIZE: usize = 128;
