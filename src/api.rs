//! API module providing high-level interfaces for external services.
//!
//! Actors here intermediate calls to the networking actor and turn raw
//! response bodies into typed records. The media catalog is the only
//! service the application talks to.

pub mod catalog;

pub use catalog::CatalogApi;
