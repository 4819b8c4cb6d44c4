//! Stream-copy remux using ffmpeg.

use std::path::Path;

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Copy-remux `input` into `output`, keeping exactly the given stream
/// indices.
///
/// Every retained stream is mapped explicitly (`-map 0:<index>`) and copied
/// without re-encoding; `-y` makes ffmpeg overwrite any existing file at the
/// output path without confirmation. The input file is never modified.
pub async fn remux_streams(
    tools: &ToolRegistry,
    input: &Path,
    output: &Path,
    retained: &[usize],
) -> trimux_core::Result<()> {
    let ffmpeg = tools.require("ffmpeg")?;

    tracing::info!(
        "remux {} -> {} keeping streams {:?}",
        input.display(),
        output.display(),
        retained
    );

    let mut cmd = ToolCommand::new(ffmpeg.path.clone());
    cmd.timeout(ffmpeg.timeout);
    cmd.args(["-y", "-i"]);
    cmd.arg(input.to_string_lossy().as_ref());
    for index in retained {
        cmd.arg("-map");
        cmd.arg(format!("0:{index}"));
    }
    cmd.args(["-c:v", "copy", "-c:a", "copy", "-c:s", "copy"]);
    cmd.arg(output.to_string_lossy().as_ref());

    cmd.execute().await?;

    Ok(())
}
