pub mod config;
pub mod definition;
pub mod error;
pub mod io;
pub mod paths;
pub mod placeholder;
pub mod quote;
pub mod table;

pub use error::{ParseError, Result, ShortcutsError};
pub use table::{AliasTable, Expansion, ResolvedCommand};

/// Exit code reserved for definition, chain and policy failures (BSD `EX_USAGE`).
pub const EXIT_USAGE: i32 = 64;
