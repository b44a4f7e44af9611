//! Store module containing the in-memory settings map and its name keys.

pub mod name;
pub mod settings;

pub use name::SettingName;
pub use settings::{IniStore, Section};
