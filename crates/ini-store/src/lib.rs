//! # ini-store
//!
//! An in-process key-value settings store backed by an INI-style text file:
//! flat `[section]` headers, `key=value` lines, `;` comments. Reads and
//! writes are typed at the edges but everything is stored as text.
//!
//! The distinguishing piece is the **format-preserving merge-on-save**:
//! saving re-reads the current on-disk file and reconciles the store's
//! contents into it instead of regenerating it, so hand-written comments,
//! blank lines, key ordering, and sections the store never touched all
//! survive. Only a file that never existed is rendered from scratch.
//!
//! # Module map
//!
//! - **`store`** – The in-memory map: sections of key/value pairs, both
//!   levels case-insensitive with deterministic iteration order, plus the
//!   typed `get`/`set` conversion layer.
//!
//! - **`file`** – Persistence: the permissive line-based loader, and the
//!   merger that drains a scratch copy of the store against the existing
//!   file's lines.
//!
//! # Example
//!
//! ```rust,no_run
//! use ini_store::{load, save};
//!
//! fn main() -> Result<(), ini_store::FileError> {
//!     let mut settings = load("settings.ini")?;
//!     // A read with a default provisions the default when missing.
//!     let width: u32 = settings.get_parsed("Video", "width", 1920);
//!     settings.set_value("Video", "width", width);
//!     save("settings.ini", &settings)?;
//!     Ok(())
//! }
//! ```
//!
//! Everything is single-threaded, synchronous, blocking I/O. Two processes
//! saving the same file race (last write wins); callers needing multi-process
//! safety must serialize access externally.

pub mod file;
pub mod store;

// Re-export the whole API surface at the crate root so callers can write
// `ini_store::IniStore` instead of `ini_store::store::settings::IniStore`.
pub use file::{load, load_into, merge_with_existing, parse_into, save, FileError};
pub use store::{IniStore, Section, SettingName};
