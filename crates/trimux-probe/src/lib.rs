//! # trimux-probe
//!
//! The probing seam of trimux: the [`Prober`] trait and the types a probe
//! produces ([`ProbeReport`], [`StreamDescriptor`]).
//!
//! Remux planning depends only on this crate's types, so the planner can be
//! exercised entirely without an external binary. The ffprobe-backed
//! implementation lives in `trimux-av`.

pub mod prober;
pub mod types;

// Re-export key types at crate root for convenience.
pub use prober::Prober;
pub use types::{ProbeReport, StreamDescriptor};
