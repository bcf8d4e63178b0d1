use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use anyhow::{Result, anyhow};
use log::{error, debug};
use tokio::process::Command;

use crate::chapter_parser::Chapter;
use crate::errors::SplitError;

// @module: ffmpeg discovery and invocation

// @const: Platform executable name
#[cfg(windows)]
const FFMPEG_EXECUTABLE: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_EXECUTABLE: &str = "ffmpeg";

/// Locate the ffmpeg executable by scanning each PATH entry
pub fn find_ffmpeg() -> Result<PathBuf> {
    let path_var = env::var_os("PATH").unwrap_or_default();

    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(FFMPEG_EXECUTABLE);
        if candidate.is_file() {
            debug!("Found ffmpeg at {:?}", candidate);
            return Ok(candidate);
        }
    }

    Err(SplitError::ToolUnavailable.into())
}

/// Query ffmpeg for a file's metadata text.
///
/// An inspect-only invocation exits non-zero ("At least one output file must
/// be specified") while still writing the full chapter listing to stderr, so
/// the combined stdout/stderr text is returned regardless of exit status.
pub async fn probe<P: AsRef<Path>>(tool: &Path, input: P) -> Result<String> {
    let input = input.as_ref();

    let output = Command::new(tool)
        .args(["-hide_banner", "-i"])
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| anyhow!("Failed to execute ffmpeg metadata query: {}", e))?;

    let mut text = String::from_utf8_lossy(&output.stdout).to_string();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(text)
}

/// Run one trim-copy invocation for a chapter, racing the child against
/// ctrl-c. Returns whether ffmpeg exited zero; a non-zero exit is the
/// caller's per-chapter failure, not an error here.
pub async fn run_split(
    tool: &Path,
    input: &Path,
    chapter: &Chapter,
    output_file: &Path,
    verbose: bool,
) -> Result<bool> {
    let mut command = Command::new(tool);
    command
        .arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-ss")
        .arg(format!("{:.6}", chapter.start))
        .arg("-t")
        .arg(format!("{:.6}", chapter.duration()))
        .arg(output_file)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    if verbose {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
    }

    let split_future = command.output();

    // kill_on_drop terminates the child if the interrupt branch wins
    let result = tokio::select! {
        result = split_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg split for chapter {}: {}", chapter.index, e))?
        },
        _ = tokio::signal::ctrl_c() => {
            return Err(anyhow!("Interrupted, terminating ffmpeg"));
        }
    };

    if !result.status.success() && !verbose {
        let stderr = String::from_utf8_lossy(&result.stderr);
        error!(
            "ffmpeg split failed for chapter {}: {}",
            chapter.index,
            filter_stderr(&stderr)
        );
    }

    Ok(result.status.success())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Chapter",
        "    Chapter",
        "  Stream #",
        "      Metadata:",
        "        title",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
