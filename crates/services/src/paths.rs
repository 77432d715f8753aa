//! Platform storage locations.

use std::path::PathBuf;

/// Data directory for persisted collections. Falls back to the current
/// directory when the platform dirs are unavailable.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("com.local", "MindSort", "MindSort")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Location of the optional settings file.
pub fn settings_file() -> PathBuf {
    directories::ProjectDirs::from("com.local", "MindSort", "MindSort")
        .map(|dirs| dirs.config_dir().join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}
