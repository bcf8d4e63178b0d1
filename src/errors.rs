/*!
 * Error types for the chapsplit application.
 *
 * This module contains custom error types for the split pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the split pipeline
#[derive(Error, Debug)]
pub enum SplitError {
    /// Input file does not exist at the resolved path; fatal before any chapter work
    #[error("Input file not found: {0:?}")]
    NotFound(PathBuf),

    /// The external media tool could not be located on this host; fatal
    #[error("ffmpeg not found on PATH, please install ffmpeg")]
    ToolUnavailable,

    /// A chapter's accumulated metadata fields failed to parse; fatal for the run
    #[error("Failed to parse chapter metadata: {0}")]
    Parse(String),

    /// Output directory could not be created; fatal
    #[error("Failed to create output directory {path:?}: {source}")]
    DirectoryCreate {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying io error
        source: std::io::Error,
    },

    /// One chapter's ffmpeg invocation exited non-zero; recorded, run continues
    #[error("Chapter {index} split failed ({file_name})")]
    ChapterSplit {
        /// Index of the failed chapter
        index: usize,
        /// Output filename that was being written
        file_name: String,
    },
}
