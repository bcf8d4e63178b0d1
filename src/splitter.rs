use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use log::{error, info, debug};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::chapter_parser::Chapter;
use crate::errors::SplitError;
use crate::ffmpeg;
use crate::sanitize;

// @module: Per-chapter split orchestration

// @struct: Outcome of one chapter's split attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    // @field: Chapter index
    pub index: usize,

    // @field: Generated output filename
    pub file_name: String,

    // @field: Whether ffmpeg exited zero
    pub success: bool,
}

/// Drives one bounded ffmpeg invocation per chapter, in discovery order,
/// recording a per-chapter outcome and never aborting the loop on an
/// individual chapter's failure.
pub struct SplitOrchestrator {
    // @field: Resolved ffmpeg executable
    tool: PathBuf,

    // @field: App configuration
    config: Config,

    // @field: Forward ffmpeg output to the console
    verbose: bool,
}

impl SplitOrchestrator {
    /// Create an orchestrator around a resolved ffmpeg executable
    pub fn new(tool: PathBuf, config: Config, verbose: bool) -> Self {
        SplitOrchestrator {
            tool,
            config,
            verbose,
        }
    }

    /// Compute the output filename for a chapter
    pub fn output_file_name(&self, chapter: &Chapter) -> String {
        sanitize::chapter_file_name(
            chapter.index,
            &chapter.title,
            &self.config.output_extension,
            self.config.filename_max_length,
            &self.config.default_chapter_name,
        )
    }

    /// Split every chapter of the input file into the output directory.
    ///
    /// Pre-flight validation (missing input, directory creation) is fatal;
    /// after that every chapter is attempted exactly once and failures are
    /// isolated to their chapter. Outcomes are returned in chapter order.
    pub async fn split_all(
        &self,
        input_file: &Path,
        output_dir: &Path,
        chapters: &[Chapter],
    ) -> Result<Vec<SplitOutcome>> {
        if !input_file.is_file() {
            return Err(SplitError::NotFound(input_file.to_path_buf()).into());
        }

        if !output_dir.exists() {
            fs::create_dir_all(output_dir).map_err(|e| SplitError::DirectoryCreate {
                path: output_dir.to_path_buf(),
                source: e,
            })?;
        }

        if chapters.is_empty() {
            return Ok(Vec::new());
        }

        let progress_bar = ProgressBar::new(chapters.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chapters ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut outcomes = Vec::with_capacity(chapters.len());

        for chapter in chapters {
            let file_name = self.output_file_name(chapter);
            let output_file = output_dir.join(&file_name);

            progress_bar.set_message(file_name.clone());
            debug!("Splitting {} -> {:?}", chapter, output_file);

            let success = ffmpeg::run_split(
                &self.tool,
                input_file,
                chapter,
                &output_file,
                self.verbose,
            )
            .await?;

            if success {
                info!("Chapter {:03} - {} split successfully", chapter.index, file_name);
            } else {
                let failure = SplitError::ChapterSplit {
                    index: chapter.index,
                    file_name: file_name.clone(),
                };
                error!("{}", failure);
            }

            outcomes.push(SplitOutcome {
                index: chapter.index,
                file_name,
                success,
            });

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        Ok(outcomes)
    }
}
