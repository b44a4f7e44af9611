//! The in-memory settings store.
//!
//! An [`IniStore`] maps section names to [`Section`]s, and a `Section` maps
//! key names to textual values. Both levels are case-insensitive and iterate
//! in deterministic comparator order (see [`SettingName`]), so serialization
//! output never depends on the order in which callers touched the store.
//!
//! Values are always stored as text. Typed access ([`IniStore::get_parsed`],
//! [`IniStore::set_value`]) is a thin conversion layer over the textual
//! entries using `FromStr` / `ToString`.

use std::collections::BTreeMap;
use std::io;
use std::str::FromStr;

use crate::store::name::SettingName;

/// One named group of key/value settings.
///
/// Keys are unique under case-insensitive, whitespace-stripped comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    entries: BTreeMap<SettingName, String>,
}

impl Section {
    /// Returns `true` if the section holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of keys in the section.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value stored under `key`, if any.
    pub fn value(&self, key: &SettingName) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in comparator order.
    pub fn iter(&self) -> impl Iterator<Item = (&SettingName, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub(crate) fn insert(&mut self, key: SettingName, value: String) {
        self.entries.insert(key, value);
    }

    /// Removes `key`, returning the stored key (with its first-seen casing)
    /// and value. Used by the merger to drain the scratch copy.
    pub(crate) fn remove_entry(&mut self, key: &SettingName) -> Option<(SettingName, String)> {
        self.entries.remove_entry(key)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// In-memory mapping of sections to key/value settings.
///
/// Created empty via [`IniStore::new`] or from a file via [`crate::load`].
/// Callers read and write it for the process lifetime; [`crate::save`]
/// serializes it back to disk without clearing it.
///
/// Not safe for concurrent mutation from multiple threads; treat it as owned
/// by a single logical owner at a time.
///
/// # Examples
///
/// ```rust
/// use ini_store::IniStore;
///
/// let mut store = IniStore::new();
/// store.set("Video", "width", "1920");
/// assert_eq!(store.get("video", "WIDTH", "0"), "1920");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniStore {
    sections: BTreeMap<SettingName, Section>,
}

impl IniStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `(section, key)`, or inserts and returns
    /// `default` when the key is absent.
    ///
    /// This is an auto-provisioning read: asking for a missing key writes the
    /// default into the store, so the next [`crate::save`] persists it. That
    /// is how the effective configuration ends up on disk even when the file
    /// started out incomplete.
    pub fn get(&mut self, section: &str, key: &str, default: &str) -> String {
        let key_name = SettingName::key(key);

        if let Some(sec) = self.sections.get(&SettingName::section(section)) {
            if let Some(value) = sec.entries.get(&key_name) {
                return value.clone();
            }
        }

        self.insert(SettingName::section(section), key_name, default);
        default.to_string()
    }

    /// Typed variant of [`IniStore::get`].
    ///
    /// Looks up (or auto-provisions) the textual value, then parses it into
    /// `T`. On parse failure the supplied `default` is returned as given and
    /// the stored text is left untouched — the failure is swallowed, not
    /// reported.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_store::IniStore;
    ///
    /// let mut store = IniStore::new();
    /// store.set("S", "n", "not-a-number");
    /// assert_eq!(store.get_parsed::<i32>("S", "n", 42), 42);
    /// assert_eq!(store.get("S", "n", ""), "not-a-number");
    /// ```
    pub fn get_parsed<T: FromStr + ToString>(&mut self, section: &str, key: &str, default: T) -> T {
        let text = self.get(section, key, &default.to_string());
        text.parse().unwrap_or(default)
    }

    /// Stores `value` under `(section, key)`, overwriting any previous value.
    ///
    /// The key is whitespace-stripped before storage. Line breaks in `value`
    /// are removed: the file format holds one `key=value` per line, so an
    /// embedded newline would corrupt the file on save.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let key_name = SettingName::key(key);
        let value = value.replace(['\n', '\r'], "");
        self.sections
            .entry(SettingName::section(section))
            .or_default()
            .entries
            .insert(key_name, value);
    }

    /// Typed variant of [`IniStore::set`]; renders `value` via `ToString`.
    pub fn set_value<T: ToString>(&mut self, section: &str, key: &str, value: T) {
        self.set(section, key, &value.to_string());
    }

    /// Removes every section and key. Disk contents are unaffected until the
    /// next save.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Returns `true` if the store holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Iterates over `(section name, section)` pairs in comparator order.
    pub fn sections(&self) -> impl Iterator<Item = (&SettingName, &Section)> {
        self.sections.iter()
    }

    /// Renders the whole store from scratch as `[section]` blocks of
    /// `key=value` lines, each block followed by a blank line.
    ///
    /// This is the fallback rendering used when no prior file exists; saving
    /// over an existing file goes through the format-preserving merger
    /// instead.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `sink`.
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        for (name, section) in &self.sections {
            writeln!(sink, "[{name}]")?;
            for (key, value) in section.iter() {
                writeln!(sink, "{key}={value}")?;
            }
            writeln!(sink)?;
        }
        Ok(())
    }

    /// Clones the section map into the disposable scratch structure the
    /// merger drains while reconciling against an existing file.
    pub(crate) fn scratch_sections(&self) -> BTreeMap<SettingName, Section> {
        self.sections.clone()
    }

    fn insert(&mut self, section: SettingName, key: SettingName, value: &str) {
        self.sections
            .entry(section)
            .or_default()
            .entries
            .insert(key, value.to_string());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
