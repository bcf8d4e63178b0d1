/*!
 * Tests for safe filename generation
 */

use chapsplit::sanitize::{safe_filename, chapter_file_name, MAX_FILENAME_LENGTH, DEFAULT_NAME};

/// Test that a plain title passes through unchanged
#[test]
fn test_safe_filename_withPlainTitle_shouldPassThrough() {
    let name = safe_filename("Introduction", MAX_FILENAME_LENGTH, DEFAULT_NAME);
    assert_eq!(name, "Introduction");
}

/// Test diacritic stripping down to base letters
#[test]
fn test_safe_filename_withDiacritics_shouldStripToBaseLetters() {
    assert_eq!(safe_filename("Café au lait", 100, "unknown"), "Cafe au lait");
    assert_eq!(safe_filename("Überraschung", 100, "unknown"), "Uberraschung");
    assert_eq!(safe_filename("naïve résumé", 100, "unknown"), "naive resume");
}

/// Test removal of characters illegal in host filenames
#[test]
fn test_safe_filename_withIllegalChars_shouldRemoveThem() {
    let name = safe_filename("Chapter: \"One\"/Two", 100, "unknown");

    assert!(!name.is_empty());
    for illegal in ['\\', '/', ':', '*', '?', '"', '<', '>', '|'] {
        assert!(!name.contains(illegal), "found illegal char {:?} in {:?}", illegal, name);
    }
    assert_eq!(name, "Chapter OneTwo");
}

/// Test the empty and whitespace fallbacks
#[test]
fn test_safe_filename_withNothingUsable_shouldFallBackToDefault() {
    assert_eq!(safe_filename("", 100, "unknown"), "unknown");
    assert_eq!(safe_filename("   ", 100, "unknown"), "unknown");
    assert_eq!(safe_filename("???///:::", 100, "unknown"), "unknown");
    assert_eq!(safe_filename("\u{0301}\u{0308}", 100, "unknown"), "unknown");
}

/// Test truncation measured in characters, not bytes
#[test]
fn test_safe_filename_withLongTitle_shouldTruncateInChars() {
    let long_title: String = "é".repeat(150);
    let name = safe_filename(&long_title, 100, "unknown");

    assert_eq!(name.chars().count(), 100);
    assert!(name.chars().all(|c| c == 'e'));
}

/// Sanitization is idempotent: applying it twice equals applying it once
#[test]
fn test_safe_filename_appliedTwice_shouldEqualOnce() {
    let long = "à".repeat(200);
    let inputs = [
        "Introduction",
        "Chapter: \"One\"/Two",
        "Café au lait",
        "   ",
        "???",
        long.as_str(),
    ];

    for input in inputs {
        let once = safe_filename(input, 100, "unknown");
        let twice = safe_filename(&once, 100, "unknown");
        assert_eq!(once, twice, "sanitization not idempotent for {:?}", input);
    }
}

/// Control characters never survive sanitization
#[test]
fn test_safe_filename_withControlChars_shouldRemoveThem() {
    let name = safe_filename("tab\there\nand newline", 100, "unknown");
    assert_eq!(name, "tabhereand newline");
}

/// Test the full chapter filename format: zero-padded index, sanitized
/// title, extension
#[test]
fn test_chapter_file_name_withPlainTitle_shouldMatchExpectedName() {
    let name = chapter_file_name(0, "Introduction", "mp3", 100, "unknown");
    assert_eq!(name, "000_Introduction.mp3");
}

/// Index padding is a 3-digit minimum, wider indices are not truncated
#[test]
fn test_chapter_file_name_withLargeIndex_shouldKeepAllDigits() {
    assert_eq!(chapter_file_name(7, "x", "mp3", 100, "unknown"), "007_x.mp3");
    assert_eq!(chapter_file_name(42, "x", "mp3", 100, "unknown"), "042_x.mp3");
    assert_eq!(chapter_file_name(1234, "x", "mp3", 100, "unknown"), "1234_x.mp3");
}

/// An unusable title falls back to the default inside the full filename
#[test]
fn test_chapter_file_name_withEmptyTitle_shouldUseDefaultName() {
    assert_eq!(chapter_file_name(3, "///", "mp3", 100, "unknown"), "003_unknown.mp3");
}
