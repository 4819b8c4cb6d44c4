//! trimux-core: shared error type, configuration, and media enums.
//!
//! This crate is the foundational dependency for all other trimux crates,
//! providing a unified error type, the stream-kind classification, and
//! application configuration.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
