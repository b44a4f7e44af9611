//! Line-based loader for INI-style settings files.
//!
//! Accepted file shape:
//!
//! ```text
//! [SectionName]
//! key=value
//! ;comment line
//! anotherKey=value with = signs preserved
//! ```
//!
//! The parse is deliberately permissive: comments and blank lines are
//! skipped, and malformed lines (no `=`, empty key, key before the first
//! section header) are silently dropped rather than rejected. Tightening this
//! would be an observable behavior change for files that load fine today.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::file::FileError;
use crate::store::IniStore;

/// Loads a settings file into a fresh [`IniStore`].
///
/// An empty or comment-only file yields an empty store; only a file that
/// cannot be read at all is an error.
///
/// # Errors
///
/// Returns [`FileError::Read`] if the file cannot be read.
pub fn load(path: impl AsRef<Path>) -> Result<IniStore, FileError> {
    let mut store = IniStore::new();
    load_into(&mut store, path, true)?;
    Ok(store)
}

/// Loads a settings file into an existing store.
///
/// With `clear_existing` set, current contents are discarded before the read
/// is attempted (so a failed reload leaves the store empty, matching the
/// constructor path). Without it, file entries are merged over whatever the
/// store already holds, overwriting on key collisions.
///
/// # Errors
///
/// Returns [`FileError::Read`] if the file cannot be read.
pub fn load_into(
    store: &mut IniStore,
    path: impl AsRef<Path>,
    clear_existing: bool,
) -> Result<(), FileError> {
    let path = path.as_ref();

    if clear_existing {
        store.clear();
    }

    let text = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_into(store, &text);
    debug!(
        "loaded settings from {}: {} section(s)",
        path.display(),
        store.len()
    );
    Ok(())
}

/// Parses INI-style text into `store`, line by line.
///
/// Rules:
/// - a line whose first character is `;` is a comment and is ignored;
/// - `[name]` (first char `[`, last char `]`) opens section `name`; an empty
///   `[]` behaves like having no section at all;
/// - any other line is split at the *first* `=`: the key is
///   whitespace-stripped, the value is everything after the `=` verbatim
///   (further `=` characters included);
/// - lines with no `=`, with an empty stripped key, or outside any section
///   are skipped.
pub fn parse_into(store: &mut IniStore, text: &str) {
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let name = &line[1..line.len() - 1];
            current_section = if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            };
            continue;
        }

        let Some(section) = current_section.as_deref() else {
            trace!("skipping line outside any section: {line:?}");
            continue;
        };

        let Some((raw_key, value)) = line.split_once('=') else {
            trace!("skipping line without '=': {line:?}");
            continue;
        };

        if raw_key.chars().all(char::is_whitespace) {
            trace!("skipping line with empty key: {line:?}");
            continue;
        }

        store.set(section, raw_key, value);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> IniStore {
        let mut store = IniStore::new();
        parse_into(&mut store, text);
        store
    }

    // ── basic shape ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_sections_and_keys() {
        let mut store = parse("[Video]\nwidth=1920\nheight=1080\n[Audio]\nvolume=8\n");

        assert_eq!(store.get("Video", "width", ""), "1920");
        assert_eq!(store.get("Video", "height", ""), "1080");
        assert_eq!(store.get("Audio", "volume", ""), "8");
    }

    #[test]
    fn test_parse_ignores_comments_and_blank_lines() {
        let mut store = parse(";header comment\n\n[A]\n;note\nfoo=1\n\n");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("A", "foo", ""), "1");
    }

    #[test]
    fn test_parse_empty_text_yields_empty_store() {
        assert!(parse("").is_empty());
        assert!(parse(";only\n;comments\n").is_empty());
    }

    // ── value handling ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_splits_at_first_equals_only() {
        let mut store = parse("[A]\nurl=http://host?a=1&b=2\n");
        assert_eq!(store.get("A", "url", ""), "http://host?a=1&b=2");
    }

    #[test]
    fn test_parse_keeps_empty_value() {
        let mut store = parse("[A]\nempty=\n");
        assert_eq!(store.get("A", "empty", "fallback"), "");
    }

    #[test]
    fn test_parse_preserves_whitespace_in_value() {
        let mut store = parse("[A]\nk= padded \n");
        assert_eq!(store.get("A", "k", ""), " padded ");
    }

    #[test]
    fn test_parse_strips_whitespace_from_key() {
        let mut store = parse("[A]\n  my key  =v\n");
        assert_eq!(store.get("A", "mykey", ""), "v");
    }

    // ── permissive skips ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_skips_line_without_equals() {
        // No valid key line means no section is materialized at all.
        let store = parse("[A]\nnot a pair\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_parse_skips_line_with_empty_key() {
        let store = parse("[A]\n=value\n  =value\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_parse_skips_keys_before_any_section() {
        let store = parse("orphan=1\n[A]\nkept=2\n");

        assert_eq!(store.len(), 1);
        let (name, section) = store.sections().next().unwrap();
        assert_eq!(name.as_str(), "A");
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_parse_empty_section_header_disables_keys() {
        let store = parse("[]\nignored=1\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let mut store = parse("[A]\nfoo=1\nFOO=2\n");
        assert_eq!(store.get("A", "foo", ""), "2");
    }

    // ── file I/O ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_file_returns_read_error() {
        let result = load("/nonexistent/path/settings.ini");
        assert!(matches!(result, Err(FileError::Read { .. })));
    }

    #[test]
    fn test_load_into_clears_before_attempting_read() {
        let mut store = IniStore::new();
        store.set("A", "k", "v");

        let result = load_into(&mut store, "/nonexistent/settings.ini", true);

        assert!(result.is_err());
        assert!(store.is_empty(), "store is cleared even when the read fails");
    }

    #[test]
    fn test_load_into_without_clear_merges_over_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        std::fs::write(&path, "[A]\nfoo=file\nbar=file\n").unwrap();

        let mut store = IniStore::new();
        store.set("A", "foo", "memory");
        store.set("B", "x", "memory");
        load_into(&mut store, &path, false).unwrap();

        // File entries overwrite collisions; untouched entries survive.
        assert_eq!(store.get("A", "foo", ""), "file");
        assert_eq!(store.get("A", "bar", ""), "file");
        assert_eq!(store.get("B", "x", ""), "memory");
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        std::fs::write(&path, "[Net]\nport=24800\n").unwrap();

        let mut store = load(&path).unwrap();

        assert_eq!(store.get_parsed::<u16>("Net", "port", 0), 24800);
    }
}
