/*!
 * Common test utilities for the chapsplit test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample ffmpeg metadata text with three complete chapters surrounded
/// by the usual diagnostic noise
pub fn sample_metadata() -> String {
    sample_metadata_with_chapters(&[
        (0.0, 125.5, "Introduction"),
        (125.5, 382.0, "Chapter One"),
        (382.0, 543.25, "Chapter Two"),
    ])
}

/// Builds ffmpeg-shaped metadata text for the given (start, end, title) triples
pub fn sample_metadata_with_chapters(chapters: &[(f64, f64, &str)]) -> String {
    let mut text = String::from(
        "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'audiobook.m4a':\n\
         \x20\x20Duration: 01:02:03.04, bitrate: 64 kb/s\n\
         \x20\x20Chapters:\n",
    );

    for (i, (start, end, title)) in chapters.iter().enumerate() {
        text.push_str(&format!(
            "    Chapter #0:{}: start {:.6}, end {:.6}\n\
             \x20\x20\x20\x20\x20\x20Metadata:\n\
             \x20\x20\x20\x20\x20\x20\x20\x20title           : {}\n",
            i, start, end, title
        ));
    }

    text.push_str("At least one output file must be specified\n");
    text
}

/// Writes an executable fake ffmpeg script into `dir`.
///
/// The script answers a metadata query (`-hide_banner -i ...`) by printing
/// `metadata` to stderr and exiting non-zero, the way a real inspect-only
/// ffmpeg invocation does. A split invocation creates the output file
/// (its last argument) and exits zero, unless the output filename contains
/// one of `fail_markers`, in which case it exits 1 without writing.
#[cfg(unix)]
pub fn write_fake_ffmpeg(dir: &Path, metadata: &str, fail_markers: &[&str]) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let metadata_path = dir.join("fake_metadata.txt");
    fs::write(&metadata_path, metadata)?;

    let mut fail_cases = String::new();
    for marker in fail_markers {
        fail_cases.push_str(&format!("  *{}*) exit 1 ;;\n", marker));
    }

    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"-hide_banner\" ]; then\n\
         \x20 cat '{}' 1>&2\n\
         \x20 exit 1\n\
         fi\n\
         out=\"\"\n\
         for a in \"$@\"; do out=\"$a\"; done\n\
         case \"$out\" in\n\
         {}esac\n\
         : > \"$out\"\n\
         exit 0\n",
        metadata_path.display(),
        fail_cases
    );

    let script_path = dir.join("fake_ffmpeg");
    fs::write(&script_path, script)?;

    let mut perms = fs::metadata(&script_path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script_path, perms)?;

    Ok(script_path)
}
