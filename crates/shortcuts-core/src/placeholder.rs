//! `{NAME}` / `{NAME:-default}` substitution from an explicit environment
//! snapshot. Templates never read the process environment directly.

use crate::error::{Result, ShortcutsError};
use crate::quote::quote;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Variables visible to placeholder substitution.
pub type Env = BTreeMap<String, String>;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\{([A-Z][A-Z0-9_]*)(?::-([^}]*))?\}").unwrap())
}

/// A brace directly after `$` is the shell's own `${NAME}` expansion and is
/// left for the interpreter.
fn is_shell_parameter(text: &str, brace: usize) -> bool {
    brace > 0 && text.as_bytes()[brace - 1] == b'$'
}

/// Replace every placeholder in `command` with its quoted value from `env`,
/// falling back to the inline default. `alias` names the alias the command
/// came from, for the error message.
pub fn substitute(command: &str, env: &Env, alias: &str) -> Result<String> {
    let mut missing: Option<String> = None;
    let out = placeholder_re().replace_all(command, |caps: &Captures<'_>| {
        let whole = &caps[0];
        if caps.get(0).is_some_and(|m| is_shell_parameter(command, m.start())) {
            return whole.to_string();
        }
        let name = &caps[1];
        match env.get(name).map(String::as_str).or(caps.get(2).map(|m| m.as_str())) {
            Some(value) => quote(value),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });
    if let Some(placeholder) = missing {
        return Err(ShortcutsError::MissingPlaceholder {
            alias: alias.to_string(),
            placeholder,
        });
    }
    Ok(out.into_owned())
}
