//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! tool and batch sub-configs. Every section defaults sensibly so a
//! completely empty `{}` file is valid, and running without any config file
//! at all is the common case.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::media::VIDEO_EXTENSIONS;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub batch: BatchConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    ///
    /// This is intentionally string-based so the caller can read the file
    /// however it sees fit.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.batch.extensions.is_empty() {
            warnings.push("batch.extensions is empty; no files will match".into());
        }

        for (name, path) in [
            ("tools.ffmpeg_path", &self.tools.ffmpeg_path),
            ("tools.ffprobe_path", &self.tools.ffprobe_path),
        ] {
            if let Some(p) = path {
                if !p.exists() {
                    warnings.push(format!("{name} '{}' does not exist", p.display()));
                }
            }
        }

        if self.tools.remux_timeout_secs == 0 {
            warnings.push("tools.remux_timeout_secs is 0; remuxes will time out immediately".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Paths and timeouts for the external CLI tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Explicit path to ffmpeg; `PATH` lookup when unset.
    pub ffmpeg_path: Option<PathBuf>,
    /// Explicit path to ffprobe; `PATH` lookup when unset.
    pub ffprobe_path: Option<PathBuf>,
    /// Maximum seconds a probe may run.
    pub probe_timeout_secs: u64,
    /// Maximum seconds a remux may run.
    pub remux_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            probe_timeout_secs: 60,
            remux_timeout_secs: 3600,
        }
    }
}

/// How output paths relate to input paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// Preserve the input-relative directory structure under the output root.
    Mirror,
    /// Group each file under a single directory named after its parent.
    Flatten,
}

/// Batch traversal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions (without dot) picked up by the walk.
    pub extensions: Vec<String>,
    /// Output tree layout.
    pub layout: OutputLayout,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            layout: OutputLayout::Mirror,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.batch.extensions, vec!["mp4", "mkv", "avi", "mov"]);
        assert_eq!(cfg.batch.layout, OutputLayout::Mirror);
        assert!(cfg.tools.ffmpeg_path.is_none());
        assert_eq!(cfg.tools.probe_timeout_secs, 60);
        assert_eq!(cfg.tools.remux_timeout_secs, 3600);
    }

    #[test]
    fn default_config_no_warnings() {
        let cfg = Config::default();
        let warnings = cfg.validate();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn parse_json_config() {
        let json = r#"{"batch": {"layout": "flatten"}}"#;
        let cfg = Config::from_json(json).unwrap();
        assert_eq!(cfg.batch.layout, OutputLayout::Flatten);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.tools.probe_timeout_secs, 60);
    }

    #[test]
    fn parse_empty_json_uses_defaults() {
        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg.batch.layout, OutputLayout::Mirror);
    }

    #[test]
    fn invalid_json_is_a_validation_error() {
        let result = Config::from_json("not json");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn load_or_default_with_none() {
        let cfg = Config::load_or_default(None);
        assert_eq!(cfg.batch.layout, OutputLayout::Mirror);
    }

    #[test]
    fn load_or_default_with_missing_file() {
        let cfg = Config::load_or_default(Some(Path::new("/nonexistent/trimux.json")));
        assert_eq!(cfg.tools.probe_timeout_secs, 60);
    }

    #[test]
    fn empty_extensions_warn() {
        let mut cfg = Config::default();
        cfg.batch.extensions.clear();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("extensions")));
    }

    #[test]
    fn missing_tool_path_warns() {
        let mut cfg = Config::default();
        cfg.tools.ffmpeg_path = Some(PathBuf::from("/nonexistent/ffmpeg"));
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("ffmpeg_path")));
    }

    #[test]
    fn zero_remux_timeout_warns() {
        let mut cfg = Config::default();
        cfg.tools.remux_timeout_secs = 0;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("remux_timeout_secs")));
    }
}
