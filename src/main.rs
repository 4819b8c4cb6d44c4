mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use indicatif::{ProgressBar, ProgressStyle};

use trimux::batch::{self, BatchProgress, BatchRequest, FileOutcome};
use trimux::prompt;
use trimux_core::config::Config;
use trimux_pipeline::RemovalRequest;
use trimux_probe::Prober;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "trimux=trace,trimux_av=trace,trimux_pipeline=trace,trimux_probe=debug,trimux_core=debug"
                .to_string()
        } else {
            "trimux=info,trimux_av=info,trimux_pipeline=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config = Config::load_or_default(cli.config.as_deref());
    for warning in config.validate() {
        tracing::warn!("config: {warning}");
    }

    match cli.command {
        Commands::Run {
            input,
            output,
            language,
            strip_subtitles,
            dry_run,
        } => run_batch_command(&config, input, output, language, strip_subtitles, dry_run),
        Commands::Probe { file, json } => probe_file(&config, &file, json),
        Commands::CheckTools => check_tools(&config),
    }
}

fn run_batch_command(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    language: Option<String>,
    strip_subtitles: Option<bool>,
    dry_run: bool,
) -> Result<()> {
    // Collect whatever the command line did not provide.
    let input_root = match input {
        Some(path) => path,
        None => PathBuf::from(prompt::prompt_line("Enter the input folder path")?),
    };
    let output_root = match output {
        Some(path) => path,
        None => PathBuf::from(prompt::prompt_line("Enter the output folder path")?),
    };
    let language = match language {
        Some(code) => code,
        None => prompt::prompt_line("Enter the language code to remove (e.g. 'eng')")?,
    };
    let strip_subtitles = match strip_subtitles {
        Some(value) => value,
        None => prompt::prompt_yes_no("Remove all subtitle tracks?")?,
    };

    let request = BatchRequest {
        input_root,
        output_root,
        removal: RemovalRequest {
            language,
            strip_subtitles,
        },
        dry_run,
    };

    let progress = BarProgress::new()?;
    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(batch::run_batch(config, &request, &progress))?;
    progress.finish();

    println!(
        "Processed: {} | Skipped: {} | Failed: {}",
        summary.processed, summary.skipped, summary.failed
    );

    // Individual file failures never change the exit status; the batch ran
    // to completion.
    Ok(())
}

/// Batch observer rendering an indicatif progress bar.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BatchProgress for BarProgress {
    fn on_file_started(&self, path: &Path, index: u64, total: u64) {
        if index == 1 {
            self.bar.set_length(total);
        }
        if let Some(name) = path.file_name() {
            self.bar.set_message(name.to_string_lossy().to_string());
        }
    }

    fn on_file_finished(&self, _path: &Path, _outcome: &FileOutcome) {
        self.bar.inc(1);
    }
}

fn probe_file(config: &Config, file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let tools = trimux_av::ToolRegistry::discover(&config.tools);
    let prober = trimux_av::FfprobeProber::from_registry(&tools)?;
    let report = prober.probe(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("File: {}", report.file_path.display());
        if let Some(ref format) = report.format_name {
            println!("Container: {format}");
        }
        println!("Size: {} bytes", report.file_size);
        if let Some(ref duration) = report.duration {
            let secs = duration.as_secs();
            let mins = secs / 60;
            let hours = mins / 60;
            println!("Duration: {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
        }

        println!("\nStreams: {}", report.streams.len());
        for stream in &report.streams {
            print!("  [{}] {}", stream.index, stream.kind);
            if let Some(ref codec) = stream.codec {
                print!(" {codec}");
            }
            if let Some(ref lang) = stream.language {
                print!(" ({lang})");
            }
            if stream.default {
                print!(" [default]");
            }
            println!();
        }
    }

    Ok(())
}

fn check_tools(config: &Config) -> Result<()> {
    println!("Checking external tools...\n");

    let registry = trimux_av::ToolRegistry::discover(&config.tools);
    let tools = registry.check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({version})");
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg and ffprobe to enable processing.");
    }

    Ok(())
}
