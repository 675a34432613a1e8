use shortcuts_core::config::UnknownPolicy;
use shortcuts_core::placeholder::Env;
use shortcuts_core::{Expansion, ShortcutsError};

use crate::home::Context;

pub mod check;
pub mod expand;
pub mod init;
pub mod list;
pub mod resolve;
pub mod run;

/// clap value parser for `--set KEY=VALUE`.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Process environment with `--set` overrides on top.
pub fn env_snapshot(overrides: &[(String, String)]) -> Env {
    let mut env: Env = std::env::vars().collect();
    env.extend(overrides.iter().cloned());
    env
}

/// Load the table, expand `name`, and apply the unknown-name policy.
pub fn build_expansion(
    ctx: &Context,
    name: &str,
    args: &[String],
    overrides: &[(String, String)],
    strict: bool,
) -> anyhow::Result<Expansion> {
    ctx.config.ensure_valid()?;
    let table = ctx.load_table()?;
    let expansion = table.expand(name, args, &env_snapshot(overrides))?;

    let policy = if strict {
        UnknownPolicy::Error
    } else {
        ctx.config.unknown
    };
    if expansion.is_passthrough() && policy == UnknownPolicy::Error {
        return Err(ShortcutsError::NotFound(name.to_string()).into());
    }
    Ok(expansion)
}
