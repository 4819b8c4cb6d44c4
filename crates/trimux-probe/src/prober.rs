//! The [`Prober`] trait defining the interface for container probing.

use std::path::Path;

use crate::types::ProbeReport;

/// A container prober capable of extracting the stream inventory from a
/// video file.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait Prober: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Probe a container at the given path and extract its stream inventory.
    ///
    /// Returns a [`ProbeReport`] on success, or an error if the file cannot
    /// be read or parsed.
    fn probe(&self, path: &Path) -> trimux_core::Result<ProbeReport>;

    /// Check whether this prober supports the given file path.
    ///
    /// Typically checks the file extension. A return value of `true` does
    /// not guarantee that [`Prober::probe`] will succeed.
    fn supports(&self, path: &Path) -> bool;
}
