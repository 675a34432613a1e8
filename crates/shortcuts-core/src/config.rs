use crate::error::{Result, ShortcutsError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// What the loader does with a malformed definition line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Fail on the first malformed line.
    #[default]
    Abort,
    /// Log a warning, drop the line, keep loading.
    Skip,
}

/// What `run` does with a name that is not an alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Hand the name and its arguments to the interpreter unchanged.
    #[default]
    Passthrough,
    /// Refuse with `NotFound`.
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub unknown: UnknownPolicy,
    #[serde(default)]
    pub on_parse_error: LoadPolicy,
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            max_depth: default_max_depth(),
            unknown: UnknownPolicy::default(),
            on_parse_error: LoadPolicy::default(),
        }
    }
}

impl Config {
    /// Load `<home>/config.yaml`. A missing file yields the defaults.
    pub fn load(home: &Path) -> Result<Self> {
        let path = paths::config_path(home);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&data)
            .map_err(|e| ShortcutsError::InvalidConfig(format!("{}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.max_depth == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "max_depth must be at least 1".to_string(),
            });
        } else if self.max_depth > 256 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("max_depth={} (>256 is unusual)", self.max_depth),
            });
        }

        if self.shell.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "shell is empty".to_string(),
            });
        } else if which::which(&self.shell).is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("shell '{}' not found on PATH", self.shell),
            });
        }

        warnings
    }

    /// `validate()` collapsed to the first hard error, if any.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(ShortcutsError::InvalidConfig(w.message)),
            None => Ok(()),
        }
    }
}
