use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{warn, info};

use crate::app_config::Config;
use crate::chapter_parser;
use crate::errors::SplitError;
use crate::ffmpeg;
use crate::splitter::{SplitOrchestrator, SplitOutcome};

// @module: Application controller for chapter splitting

/// Main application controller for the split pipeline
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Resolved ffmpeg executable
    tool: PathBuf,

    // @field: Forward ffmpeg output to the console
    verbose: bool,
}

impl Controller {
    // @method: Create a controller, locating ffmpeg on the host
    pub fn with_config(config: Config, verbose: bool) -> Result<Self> {
        let tool = ffmpeg::find_ffmpeg()?;
        Ok(Self {
            config,
            tool,
            verbose,
        })
    }

    /// Create a controller around an explicit tool path - used by tests
    /// and callers with a non-standard ffmpeg install
    pub fn with_tool(config: Config, tool: PathBuf, verbose: bool) -> Result<Self> {
        if !tool.is_file() {
            return Err(SplitError::ToolUnavailable.into());
        }
        Ok(Self {
            config,
            tool,
            verbose,
        })
    }

    /// Run the full workflow: probe metadata, parse chapters, split each
    /// chapter, and report the per-chapter outcomes in discovery order
    pub async fn run(&self, input_file: &Path, output_dir: &Path) -> Result<Vec<SplitOutcome>> {
        let start_time = std::time::Instant::now();

        if !input_file.is_file() {
            return Err(SplitError::NotFound(input_file.to_path_buf()).into());
        }

        let input_name = input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| input_file.display().to_string());

        info!("Splitting '{}'", input_name);

        let metadata = ffmpeg::probe(&self.tool, input_file)
            .await
            .context("Failed to read file metadata")?;

        let chapters = chapter_parser::parse_chapters(&metadata)
            .map_err(|e| SplitError::Parse(e.to_string()))?;

        info!("Found {} chapters in '{}'", chapters.len(), input_name);

        if chapters.is_empty() {
            warn!("No chapter markers found, nothing to split");
            return Ok(Vec::new());
        }

        let orchestrator = SplitOrchestrator::new(self.tool.clone(), self.config.clone(), self.verbose);
        let outcomes = orchestrator.split_all(input_file, output_dir, &chapters).await?;

        let failed = outcomes.iter().filter(|o| !o.success).count();
        let elapsed = start_time.elapsed();

        if failed == 0 {
            info!(
                "Split {} chapters in {:.1}s",
                outcomes.len(),
                elapsed.as_secs_f64()
            );
        } else {
            warn!(
                "Split finished with {} of {} chapters failed ({:.1}s)",
                failed,
                outcomes.len(),
                elapsed.as_secs_f64()
            );
        }

        Ok(outcomes)
    }
}
