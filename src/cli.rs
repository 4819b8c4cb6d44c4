use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trimux")]
#[command(author, version, about = "Batch removal of audio language and subtitle tracks from video libraries")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a folder of video files; any missing option is prompted for
    Run {
        /// Input folder to walk
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output folder for the processed copies
        #[arg(long)]
        output: Option<PathBuf>,

        /// Language code of the audio track to remove (e.g. "eng")
        #[arg(long)]
        language: Option<String>,

        /// Also remove all subtitle tracks (true/false)
        #[arg(long)]
        strip_subtitles: Option<bool>,

        /// Show what would be done without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Probe a media file and display its stream inventory
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,
}
