//! Per-file workspace management.
//!
//! A [`Workspace`] owns a temporary directory for the intermediate files of
//! one input's processing and promotes the final staged result into the
//! output tree. Input files are never touched; the temp directory (and any
//! leftover intermediates) is removed when the workspace drops.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Workspace for processing a single input file.
///
/// # Example
///
/// ```no_run
/// use trimux_av::Workspace;
/// use std::path::Path;
///
/// # fn example() -> trimux_core::Result<()> {
/// let ws = Workspace::new(Path::new("/library/movie.mkv"))?;
/// let staged = ws.stage_output("strip-audio");
/// // ... write the remuxed container to `staged` ...
/// ws.promote(&staged, Path::new("/processed/movie.mkv"))?;
/// # Ok(())
/// # }
/// ```
pub struct Workspace {
    temp_dir: TempDir,
    input_path: PathBuf,
}

impl Workspace {
    /// Create a new workspace for processing a file.
    pub fn new(input: &Path) -> trimux_core::Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| trimux_core::Error::Tool {
            tool: "workspace".to_string(),
            message: format!("failed to create temp dir: {e}"),
        })?;

        Ok(Self {
            temp_dir,
            input_path: input.to_path_buf(),
        })
    }

    /// The original input file path.
    pub fn input(&self) -> &Path {
        &self.input_path
    }

    /// Path to the temporary directory.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Scratch path for a stage's output inside the temp directory.
    ///
    /// The input file name is kept as a suffix so the muxer can infer the
    /// container format from the extension.
    pub fn stage_output(&self, stage: &str) -> PathBuf {
        let file_name = self
            .input_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("output"));
        self.temp_dir
            .path()
            .join(format!("{stage}-{}", file_name.to_string_lossy()))
    }

    /// Move a staged file to its final destination, overwriting any existing
    /// file there.
    ///
    /// Parent directories of `dest` are created as needed. Rename is tried
    /// first (same filesystem), falling back to copy+remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the staged file does not exist or if the move
    /// fails.
    pub fn promote(&self, from: &Path, dest: &Path) -> trimux_core::Result<()> {
        if !from.exists() {
            return Err(trimux_core::Error::Tool {
                tool: "workspace".to_string(),
                message: format!("staged file does not exist: {}", from.display()),
            });
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| trimux_core::Error::Tool {
                tool: "workspace".to_string(),
                message: format!("failed to create output directory: {e}"),
            })?;
        }

        if let Err(_rename_err) = std::fs::rename(from, dest) {
            std::fs::copy(from, dest).map_err(|e| trimux_core::Error::Tool {
                tool: "workspace".to_string(),
                message: format!("failed to copy staged file to destination: {e}"),
            })?;
            let _ = std::fs::remove_file(from);
        }

        Ok(())
    }
}
