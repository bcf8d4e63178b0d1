use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// @module: Safe filename generation for chapter output files

/// Maximum filename length in characters, counted after normalization
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Fallback name used when sanitization leaves nothing usable
pub const DEFAULT_NAME: &str = "unknown";

// @const: Characters illegal in filenames on at least one supported host.
// The Windows set is a superset of the Unix one, so stripping it keeps
// generated names portable.
const ILLEGAL_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Strip diacritical marks by decomposing to base letters, dropping
/// combining marks, and recomposing
fn remove_accents(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Produce a filesystem-safe name from a free-form chapter title.
///
/// Diacritics are stripped, illegal and control characters removed, and the
/// result truncated to `max_length` characters. An empty or whitespace-only
/// remainder falls back to `default_name`. The transform is idempotent.
pub fn safe_filename(input: &str, max_length: usize, default_name: &str) -> String {
    let normalized = remove_accents(input);

    let name: String = normalized
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect();

    // Truncate before the emptiness check so a whitespace-only prefix
    // still falls back to the default name
    let name: String = name.chars().take(max_length).collect();

    if name.trim().is_empty() {
        return default_name.to_string();
    }

    name
}

/// Build the output filename for a chapter: zero-padded index prefix,
/// sanitized title, fixed audio extension
pub fn chapter_file_name(index: usize, title: &str, extension: &str, max_length: usize, default_name: &str) -> String {
    format!(
        "{:03}_{}.{}",
        index,
        safe_filename(title, max_length, default_name),
        extension
    )
}
