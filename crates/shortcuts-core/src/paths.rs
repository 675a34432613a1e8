use crate::error::{Result, ShortcutsError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const HOME_DIR: &str = ".shortcuts";
pub const ALIASES_FILE: &str = "aliases";
pub const CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `~/.shortcuts`, or `HomeNotFound` when the user's home can't be determined.
pub fn default_home() -> Result<PathBuf> {
    home::home_dir()
        .map(|h| h.join(HOME_DIR))
        .ok_or(ShortcutsError::HomeNotFound)
}

pub fn aliases_path(home: &Path) -> PathBuf {
    home.join(ALIASES_FILE)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}
