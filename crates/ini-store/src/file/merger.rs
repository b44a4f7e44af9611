//! Format-preserving merge-on-save for settings files.
//!
//! Saving does not regenerate the file from the store. Instead the current
//! on-disk copy is re-read and the store's contents are merged into it line
//! by line, so comments, blank lines, key ordering, and sections the store
//! never touched all survive a save. Only values the store actually holds are
//! rewritten; keys that exist on disk but not in the store pass through with
//! their on-disk value.
//!
//! The merge drains a *scratch copy* of the store's sections: every key
//! matched against a file line is removed from the scratch, and whatever is
//! left over when a section ends (or the file ends) is exactly the set of
//! keys added in memory since the last load, which gets appended in place.
//! Sections still fully populated after the whole pass never appeared in the
//! file at all and are appended wholesale at the end.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::file::FileError;
use crate::store::{IniStore, Section, SettingName};

/// Writes `store` to `path`, preserving the existing file's layout.
///
/// - An empty store is a no-op success: there is nothing to persist, and
///   nothing should be deleted from an existing file.
/// - If `path` does not exist, the store is rendered from scratch via
///   [`IniStore::dump`].
/// - Otherwise the existing content is read in full, merged via
///   [`merge_with_existing`], and the file is truncated and rewritten with
///   the result. No locking is performed; concurrent savers race and the
///   last write wins.
///
/// # Errors
///
/// Returns [`FileError::Read`] if an existing file cannot be read, and
/// [`FileError::Write`] if the result cannot be written back.
pub fn save(path: impl AsRef<Path>, store: &IniStore) -> Result<(), FileError> {
    let path = path.as_ref();

    if store.is_empty() {
        debug!("settings store is empty, nothing to save to {}", path.display());
        return Ok(());
    }

    let output = match fs::read_to_string(path) {
        Ok(original) => merge_with_existing(&original, store).into_bytes(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let mut rendered = Vec::new();
            store
                .dump(&mut rendered)
                .map_err(|source| FileError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            rendered
        }
        Err(source) => {
            return Err(FileError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    fs::write(path, output).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {} section(s) to {}", store.len(), path.display());
    Ok(())
}

/// Merges `store` into the text of an existing settings file, returning the
/// updated file content. `store` itself is left untouched; the merge drains a
/// scratch copy of its sections.
///
/// Per-line policy:
/// - blank lines copy through, except that the blank directly before a
///   section header is elided and re-emitted after the previous section's
///   leftover keys, so appended keys sit flush against their section body;
/// - a `[name]` header first flushes the previous section's leftover keys,
///   then copies through and switches the current section;
/// - inside a section, a line whose whitespace-stripped key is found in the
///   scratch is rewritten as `key=<store value>` and the key is drained; a
///   miss (unmanaged, stale, or duplicate key) passes through with the value
///   found on that very line. A key starting with `;` is an embedded comment
///   and copies verbatim;
/// - outside any section only comment lines survive;
/// - at end of file the last section's leftovers are flushed, and sections
///   the file never mentioned are appended as whole blocks.
///
/// Duplicate keys within one file section are reconciled first-occurrence
/// only: the first line is rewritten, later ones pass through stale. The
/// store holds a single value per key, so the intended semantics for such
/// files are ambiguous anyway; this keeps the historical behavior.
pub fn merge_with_existing(original: &str, store: &IniStore) -> String {
    let mut scratch = store.scratch_sections();
    // Re-looked-up by name on each access; holding a reference into the
    // growing scratch map across iterations would not borrow-check anyway.
    let mut current: Option<SettingName> = None;
    let mut out: Vec<String> = Vec::new();

    for line in original.lines() {
        if line.is_empty() {
            out.push(String::new());
        } else if line.starts_with('[') && line.ends_with(']') {
            if let Some(prev) = current.take() {
                if out.last().is_some_and(|l| l.is_empty()) {
                    out.pop();
                }
                flush_leftovers(&mut scratch, &prev, &mut out);
                out.push(String::new());
            }

            let name = SettingName::section(&line[1..line.len() - 1]);
            // Unmanaged sections get an empty scratch entry so their key
            // lines take the lookup-miss pass-through path below.
            scratch.entry(name.clone()).or_default();
            current = Some(name);
            out.push(line.to_string());
        } else if let Some(cur) = &current {
            let (raw_key, file_value) = match line.split_once('=') {
                Some((key, value)) => (key, value),
                None => (line, ""),
            };
            let key = SettingName::key(raw_key);

            if key.as_str().starts_with(';') {
                // Embedded comment (possibly indented).
                out.push(line.to_string());
            } else if key.is_empty() {
                out.push(line.to_string());
            } else if let Some((stored_key, stored_value)) = scratch
                .get_mut(cur)
                .and_then(|section| section.remove_entry(&key))
            {
                out.push(format!("{stored_key}={stored_value}"));
            } else {
                out.push(format!("{key}={file_value}"));
            }
        } else if line.starts_with(';') {
            out.push(line.to_string());
        }
        // Anything else outside a section is dropped.
    }

    if let Some(last) = current {
        flush_leftovers(&mut scratch, &last, &mut out);
    }

    let mut result = String::with_capacity(original.len());
    for line in &out {
        result.push_str(line);
        result.push('\n');
    }

    // Sections never encountered in the file are still fully populated.
    for (name, section) in &scratch {
        if section.is_empty() {
            continue;
        }
        result.push('\n');
        result.push('[');
        result.push_str(name.as_str());
        result.push_str("]\n");
        for (key, value) in section.iter() {
            result.push_str(key.as_str());
            result.push('=');
            result.push_str(value);
            result.push('\n');
        }
    }

    result
}

/// Appends every key still left in `section`'s scratch entry as rendered
/// `key=value` lines, then drains the entry. Leftover keys are the ones added
/// to the store after the file was last written.
fn flush_leftovers(
    scratch: &mut BTreeMap<SettingName, Section>,
    section: &SettingName,
    out: &mut Vec<String>,
) {
    if let Some(leftovers) = scratch.get_mut(section) {
        for (key, value) in leftovers.iter() {
            out.push(format!("{key}={value}"));
        }
        leftovers.clear();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
