use std::fmt;
use anyhow::{Result, Context, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

// @module: Chapter metadata parsing from ffmpeg diagnostic output

// @const: Chapter time line regex, e.g. "    Chapter #0:2: start 125.500000, end 382.000000"
static CHAPTER_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"start ([\d.]+), end ([\d.]+)").unwrap()
});

// @const: Chapter title line regex, e.g. "      title           : Introduction"
static CHAPTER_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"title\s*:(.*)$").unwrap()
});

// @struct: Single chapter marker
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    // @field: Position in discovery order, starting at 0
    pub index: usize,

    // @field: Display title, trimmed, may be empty
    pub title: String,

    // @field: Start offset in seconds
    pub start: f64,

    // @field: End offset in seconds
    pub end: f64,
}

impl Chapter {
    /// Creates a new chapter entry - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(index: usize, start: f64, end: f64, title: String) -> Self {
        Chapter {
            index,
            title,
            start,
            end,
        }
    }

    // @creates: Validated chapter
    // @validates: Finite non-negative times and positive duration
    pub fn new_validated(index: usize, start: f64, end: f64, title: String) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < 0.0 {
            return Err(anyhow!(
                "Invalid chapter times for chapter {}: start {}, end {}",
                index, start, end
            ));
        }

        // Reject non-positive durations rather than handing ffmpeg a nonsense -t
        if end <= start {
            return Err(anyhow!(
                "Invalid time range for chapter {}: end {} <= start {}",
                index, end, start
            ));
        }

        Ok(Chapter {
            index,
            title: title.trim().to_string(),
            start,
            end,
        })
    }

    /// Duration in seconds, always positive for a validated chapter
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Chapter {:03} '{}' [{:.3}s - {:.3}s]",
            self.index, self.title, self.start, self.end
        )
    }
}

/// Accumulator for one in-progress chapter.
///
/// The time and title lines for a chapter can appear in either order in
/// ffmpeg's output, as long as both precede the next chapter's data. Each
/// slot is only tested while empty, so a stray later match never overwrites
/// an in-progress chapter and the first match wins for a slot.
#[derive(Debug, Default)]
pub struct ChapterAccumulator {
    start: Option<String>,
    end: Option<String>,
    title: Option<String>,
    next_index: usize,
}

impl ChapterAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line of metadata text, emitting a chapter once the
    /// time pair and title have both been seen
    pub fn feed(&mut self, line: &str) -> Result<Option<Chapter>> {
        if self.start.is_none() && self.end.is_none() {
            if let Some(caps) = CHAPTER_TIME_REGEX.captures(line) {
                self.start = Some(caps[1].to_string());
                self.end = Some(caps[2].to_string());
            }
        }

        if self.title.is_none() {
            if let Some(caps) = CHAPTER_TITLE_REGEX.captures(line) {
                self.title = Some(caps[1].to_string());
            }
        }

        if let (Some(start), Some(end), Some(title)) = (&self.start, &self.end, &self.title) {
            let index = self.next_index;

            // f64 parsing is locale-independent, decimal point only
            let start: f64 = start.parse()
                .with_context(|| format!("Failed to parse chapter {} start time: '{}'", index, start))?;
            let end: f64 = end.parse()
                .with_context(|| format!("Failed to parse chapter {} end time: '{}'", index, end))?;

            let chapter = Chapter::new_validated(index, start, end, title.clone())?;

            self.start = None;
            self.end = None;
            self.title = None;
            self.next_index += 1;

            return Ok(Some(chapter));
        }

        Ok(None)
    }

    /// Whether a partially accumulated chapter is pending at end of input.
    /// Trailing incomplete slots are dropped, never emitted.
    pub fn has_partial(&self) -> bool {
        self.start.is_some() || self.end.is_some() || self.title.is_some()
    }
}

/// Parse ffmpeg's combined diagnostic output into ordered chapter records.
///
/// Chapter-relevant lines are interspersed with unrelated diagnostic text;
/// anything that matches neither pattern is skipped. Zero matches yield an
/// empty list, which callers must treat as "no chapters found" rather than
/// an error. A malformed numeric value or a non-positive duration is fatal.
pub fn parse_chapters(metadata: &str) -> Result<Vec<Chapter>> {
    let mut accumulator = ChapterAccumulator::new();
    let mut chapters = Vec::new();

    for line in metadata.lines() {
        if let Some(chapter) = accumulator.feed(line)? {
            chapters.push(chapter);
        }
    }

    if accumulator.has_partial() {
        log::warn!("Dropping incomplete chapter data at end of metadata");
    }

    Ok(chapters)
}
