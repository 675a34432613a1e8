use serde::Serialize;
use std::fmt;

use thiserror::Error;

/// A malformed line in a definition source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
    pub reason: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {:?}", self.line, self.reason, self.content)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Error)]
pub enum ShortcutsError {
    #[error("parse error at {0}")]
    Parse(#[from] ParseError),

    #[error("alias cycle at '{name}': {}", .chain.join(" -> "))]
    Cycle { name: String, chain: Vec<String> },

    #[error("alias expansion exceeded depth {limit}: {}", .chain.join(" -> "))]
    DepthExceeded { limit: usize, chain: Vec<String> },

    #[error("not an alias: {0}")]
    NotFound(String),

    #[error("alias '{alias}' needs a value for {{{placeholder}}}")]
    MissingPlaceholder { alias: String, placeholder: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("home directory not found: set HOME or SHORTCUTS_HOME")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ShortcutsError {
    /// True for failures caused by the alias table or its policy rather than
    /// by the environment (I/O, serialization).
    pub fn is_usage(&self) -> bool {
        !matches!(
            self,
            ShortcutsError::Io(_) | ShortcutsError::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ShortcutsError>;
