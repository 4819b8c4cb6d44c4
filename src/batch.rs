//! Batch driver: walk an input tree, run the per-file pipeline, promote the
//! results into the output tree.
//!
//! Files are processed one at a time, strictly sequentially. Every per-file
//! failure is caught at this boundary, logged with the offending path, and
//! the loop continues; the batch always runs to completion.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use trimux_av::{FfprobeProber, ToolRegistry, Workspace};
use trimux_core::config::{Config, OutputLayout};
use trimux_core::StreamKind;
use trimux_pipeline::{
    create_actions, ActionContext, PipelineExecutor, PipelineOutcome, RemovalRequest,
};
use trimux_probe::{ProbeReport, Prober};
use walkdir::WalkDir;

/// One batch run's parameters.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Root directory to walk for video files.
    pub input_root: PathBuf,
    /// Root directory receiving the processed copies.
    pub output_root: PathBuf,
    /// What to remove from each file.
    pub removal: RemovalRequest,
    /// When `true`, log plans without writing anything.
    pub dry_run: bool,
}

/// What happened to a single file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// The file went through the pipeline; the output lives at the path.
    Processed(PathBuf),
    /// The file was not applicable (e.g. no matching audio language).
    Skipped(String),
    /// Probing, remuxing, or promotion failed; the batch moved on.
    Failed(String),
}

/// Callback interface for observing batch progress.
///
/// Passed into the driver explicitly; the driver itself keeps no
/// progress-reporting state.
pub trait BatchProgress: Send + Sync {
    /// A file is about to be processed (`index` is 1-based).
    fn on_file_started(&self, path: &Path, index: u64, total: u64);
    /// The file's processing finished with the given outcome.
    fn on_file_finished(&self, path: &Path, outcome: &FileOutcome);
}

/// Observer that discards all notifications.
pub struct SilentProgress;

impl BatchProgress for SilentProgress {
    fn on_file_started(&self, _path: &Path, _index: u64, _total: u64) {}
    fn on_file_finished(&self, _path: &Path, _outcome: &FileOutcome) {}
}

/// Totals of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl BatchSummary {
    /// Number of files the batch looked at.
    pub fn total(&self) -> u64 {
        self.processed + self.skipped + self.failed
    }
}

/// Run the batch described by `request`.
///
/// # Errors
///
/// Only startup problems abort the run: a missing input root, an unusable
/// output root, missing tools, or an invalid removal request. Per-file
/// failures are counted in the summary instead.
pub async fn run_batch(
    config: &Config,
    request: &BatchRequest,
    progress: &dyn BatchProgress,
) -> trimux_core::Result<BatchSummary> {
    if !request.input_root.is_dir() {
        return Err(trimux_core::Error::Validation(format!(
            "input folder does not exist: {}",
            request.input_root.display()
        )));
    }

    let tools = Arc::new(ToolRegistry::discover(&config.tools));
    let executor = PipelineExecutor::new(create_actions(&request.removal, &tools)?);
    let prober: Arc<dyn Prober> = Arc::new(FfprobeProber::from_registry(&tools)?);

    if !request.dry_run {
        std::fs::create_dir_all(&request.output_root)?;
    }

    let files = collect_files(&request.input_root, &config.batch.extensions);
    let total = files.len() as u64;
    tracing::info!(
        "{total} video file(s) under {}",
        request.input_root.display()
    );

    let mut summary = BatchSummary::default();
    for (i, file) in files.iter().enumerate() {
        progress.on_file_started(file, i as u64 + 1, total);

        let outcome = process_file(&executor, &prober, &tools, config, request, file).await;
        match &outcome {
            FileOutcome::Processed(dest) => {
                tracing::info!("{} -> {}", file.display(), dest.display());
                summary.processed += 1;
            }
            FileOutcome::Skipped(reason) => {
                tracing::info!("{}: {reason}", file.display());
                summary.skipped += 1;
            }
            FileOutcome::Failed(message) => {
                tracing::error!("{}: {message}", file.display());
                summary.failed += 1;
            }
        }

        progress.on_file_finished(file, &outcome);
    }

    Ok(summary)
}

/// Process one file. Every failure is converted into a [`FileOutcome`] here
/// so the caller's loop never aborts.
async fn process_file(
    executor: &PipelineExecutor,
    prober: &Arc<dyn Prober>,
    tools: &Arc<ToolRegistry>,
    config: &Config,
    request: &BatchRequest,
    file: &Path,
) -> FileOutcome {
    let report = match prober.probe(file) {
        Ok(report) => report,
        Err(e) => return FileOutcome::Failed(e.to_string()),
    };
    log_inventory(&report);

    let workspace = match Workspace::new(file) {
        Ok(ws) => Arc::new(ws),
        Err(e) => return FileOutcome::Failed(e.to_string()),
    };

    let ctx = ActionContext::new(
        Arc::clone(&workspace),
        Arc::new(report),
        Arc::clone(tools),
        Arc::clone(prober),
    )
    .with_dry_run(request.dry_run);

    match executor.execute(&ctx).await {
        Ok(PipelineOutcome::Completed { output }) => {
            if request.dry_run {
                return FileOutcome::Processed(output);
            }
            let dest = destination_for(
                &request.input_root,
                &request.output_root,
                file,
                config.batch.layout,
            );
            match workspace.promote(&output, &dest) {
                Ok(()) => FileOutcome::Processed(dest),
                Err(e) => FileOutcome::Failed(e.to_string()),
            }
        }
        Ok(PipelineOutcome::Skipped { reason, .. }) => FileOutcome::Skipped(reason),
        Err(e) => FileOutcome::Failed(e.to_string()),
    }
}

/// Log the audio/subtitle inventory of a probed file.
fn log_inventory(report: &ProbeReport) {
    for stream in report
        .streams
        .iter()
        .filter(|s| matches!(s.kind, StreamKind::Audio | StreamKind::Subtitle))
    {
        tracing::debug!(
            "{}: stream #{} {} ({})",
            report.file_path.display(),
            stream.index,
            stream.kind,
            stream.language.as_deref().unwrap_or("unknown")
        );
    }
}

/// Collect the video files under `root`, sorted for deterministic order.
fn collect_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("walk error: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_matching_extension(p, extensions))
        .collect();
    files.sort();
    files
}

/// Extension filter, compared case-insensitively.
fn has_matching_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Map an input file to its output path under the requested layout.
///
/// `mirror` preserves the input-relative directory structure; `flatten`
/// groups each file under a single directory named after its parent.
fn destination_for(
    input_root: &Path,
    output_root: &Path,
    file: &Path,
    layout: OutputLayout,
) -> PathBuf {
    let file_name = file
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("output"));

    match layout {
        OutputLayout::Mirror => match file.strip_prefix(input_root) {
            Ok(rel) => output_root.join(rel),
            Err(_) => output_root.join(file_name),
        },
        OutputLayout::Flatten => match file.parent().and_then(|p| p.file_name()) {
            Some(parent_name) => output_root.join(parent_name).join(file_name),
            None => output_root.join(file_name),
        },
    }
}
