//! Case-insensitive, display-preserving name keys.
//!
//! Section and key names in the store compare case-insensitively but keep the
//! casing they were first seen with for display and serialization. `SettingName`
//! carries both forms: a lower-cased `folded` string used for ordering and
//! equality, and the original `display` string used everywhere the name is
//! rendered back out.
//!
//! Because `Ord`/`Eq` look only at the folded form, a
//! `BTreeMap<SettingName, _>` iterates in case-insensitive lexicographic
//! order, and `BTreeMap::insert` keeps the first-seen key on an equal entry —
//! which is exactly the "first casing wins" rule the store wants.

use std::cmp::Ordering;
use std::fmt;

/// A section or key name that compares case-insensitively.
#[derive(Debug, Clone)]
pub struct SettingName {
    /// Original spelling, preserved for display and file output.
    display: String,
    /// Lower-cased comparison form.
    folded: String,
}

impl SettingName {
    /// Creates a name for a section. Section names are taken verbatim; only
    /// the comparison is case-insensitive.
    pub fn section(raw: impl Into<String>) -> Self {
        let display = raw.into();
        let folded = display.to_lowercase();
        Self { display, folded }
    }

    /// Creates a name for a key. Every whitespace character is removed first
    /// (`"my key "` and `"mykey"` are the same key), then the result compares
    /// case-insensitively.
    pub fn key(raw: &str) -> Self {
        let display: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let folded = display.to_lowercase();
        Self { display, folded }
    }

    /// Returns the display form (original casing, keys whitespace-stripped).
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Returns `true` if the display form is empty.
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

// Equality and ordering intentionally ignore `display` so that map lookups
// and iteration order depend only on the folded form.

impl PartialEq for SettingName {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for SettingName {}

impl PartialOrd for SettingName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SettingName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_names_differing_only_in_case_are_equal() {
        assert_eq!(SettingName::section("Video"), SettingName::section("VIDEO"));
        assert_eq!(SettingName::key("Width"), SettingName::key("width"));
    }

    #[test]
    fn test_key_strips_all_whitespace_not_just_edges() {
        let name = SettingName::key("  screen width\t");
        assert_eq!(name.as_str(), "screenwidth");
    }

    #[test]
    fn test_section_keeps_whitespace() {
        let name = SettingName::section("My Section");
        assert_eq!(name.as_str(), "My Section");
    }

    #[test]
    fn test_display_preserves_original_casing() {
        let name = SettingName::key("FullScreen");
        assert_eq!(name.to_string(), "FullScreen");
    }

    #[test]
    fn test_ordering_is_case_insensitive_lexicographic() {
        let mut names = vec![
            SettingName::key("beta"),
            SettingName::key("Alpha"),
            SettingName::key("GAMMA"),
        ];
        names.sort();
        let order: Vec<&str> = names.iter().map(SettingName::as_str).collect();
        assert_eq!(order, vec!["Alpha", "beta", "GAMMA"]);
    }

    #[test]
    fn test_btreemap_keeps_first_seen_casing() {
        let mut map = BTreeMap::new();
        map.insert(SettingName::key("Volume"), "10");
        map.insert(SettingName::key("VOLUME"), "20");

        assert_eq!(map.len(), 1);
        let (key, value) = map.iter().next().unwrap();
        assert_eq!(key.as_str(), "Volume", "first casing must win");
        assert_eq!(*value, "20", "value must still be updated");
    }

    #[test]
    fn test_whitespace_only_key_is_empty() {
        assert!(SettingName::key(" \t ").is_empty());
    }
}
