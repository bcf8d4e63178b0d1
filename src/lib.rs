/*!
 * # chapsplit - Audio chapter splitter
 *
 * A Rust library for splitting a single audio file with embedded chapter
 * markers into one output file per chapter, using ffmpeg for both metadata
 * inspection and audio trimming.
 *
 * ## Features
 *
 * - Parse chapter markers out of ffmpeg's diagnostic output
 * - One bounded ffmpeg invocation per chapter, in discovery order
 * - Per-chapter success/failure accounting without aborting the run
 * - Diacritic-stripped, filesystem-safe output filenames
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `chapter_parser`: Chapter metadata extraction from ffmpeg output
 * - `sanitize`: Safe filename generation
 * - `ffmpeg`: External tool discovery and invocation
 * - `splitter`: Per-chapter split orchestration
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod chapter_parser;
pub mod errors;
pub mod ffmpeg;
pub mod sanitize;
pub mod splitter;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use chapter_parser::{Chapter, ChapterAccumulator, parse_chapters};
pub use errors::SplitError;
pub use splitter::{SplitOrchestrator, SplitOutcome};
