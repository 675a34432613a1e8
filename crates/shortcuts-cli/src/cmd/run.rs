use anyhow::Context as _;
use std::process::{Command, ExitStatus};

use crate::cmd::build_expansion;
use crate::exit::CommandExit;
use crate::home::Context;
use crate::output::print_json;

pub fn run(
    ctx: &Context,
    name: &str,
    args: &[String],
    overrides: &[(String, String)],
    strict: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let expansion = build_expansion(ctx, name, args, overrides, strict)?;

    if dry_run {
        if ctx.json {
            print_json(&expansion)?;
        } else {
            println!("{}", expansion.command);
        }
        return Ok(());
    }

    let status = execute(&ctx.config.shell, &expansion.command)?;
    check_status(status)
}

/// Run `command` through `<shell> -c` with inherited stdio.
fn execute(shell: &str, command: &str) -> anyhow::Result<ExitStatus> {
    tracing::info!(shell, command, "spawning");
    Command::new(shell)
        .arg("-c")
        .arg(command)
        .status()
        .with_context(|| format!("failed to spawn '{shell}'"))
}

fn check_status(status: ExitStatus) -> anyhow::Result<()> {
    if status.success() {
        return Ok(());
    }
    if let Some(code) = status.code() {
        return Err(CommandExit::Code(code).into());
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return Err(CommandExit::Signal(sig).into());
        }
    }
    Err(CommandExit::Code(1).into())
}
