//! # trimux-av
//!
//! External tool plumbing for trimux.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg
//!   and ffprobe.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Workspace management** ([`Workspace`]) -- per-file temporary directory
//!   lifecycle and promotion into the output tree.
//! - **Probe backend** ([`probe::FfprobeProber`]) -- implements
//!   [`trimux_probe::Prober`] by shelling out to ffprobe.
//! - **Remux execution** ([`actions::remux_streams`]) -- the single ffmpeg
//!   invocation that copies a retained-stream selection into a new container.

pub mod actions;
pub mod command;
pub mod probe;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use actions::remux_streams;
pub use command::{ToolCommand, ToolOutput};
pub use probe::FfprobeProber;
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
pub use workspace::Workspace;
