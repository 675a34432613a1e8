mod cmd;
mod exit;
mod home;
mod output;

use clap::{Parser, Subcommand};
use shortcuts_core::{ShortcutsError, EXIT_USAGE};
use std::path::PathBuf;

use crate::exit::CommandExit;

#[derive(Parser)]
#[command(
    name = "shortcuts",
    about = "Expand and run shell shortcuts from a plain-text alias table",
    version,
    propagate_version = true
)]
struct Cli {
    /// Shortcuts home directory (default: ~/.shortcuts)
    #[arg(long, global = true, env = "SHORTCUTS_HOME")]
    home: Option<PathBuf>,

    /// Alias definitions file (default: <home>/aliases)
    #[arg(long, global = true, env = "SHORTCUTS_FILE")]
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log alias loading and expansion steps to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand an alias and run it through the configured shell
    Run {
        /// Print the expanded command instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Fail when NAME is not an alias instead of passing it through
        #[arg(long)]
        strict: bool,

        /// Placeholder value, overriding the environment (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = cmd::parse_assignment)]
        set: Vec<(String, String)>,

        /// Alias name
        name: String,

        /// Arguments appended to the expansion, each quoted as one word
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the command an alias expands to, without running it
    Expand {
        /// Fail when NAME is not an alias instead of passing it through
        #[arg(long)]
        strict: bool,

        /// Placeholder value, overriding the environment (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = cmd::parse_assignment)]
        set: Vec<(String, String)>,

        /// Alias name
        name: String,

        /// Arguments appended to the expansion, each quoted as one word
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the raw template for an alias
    Resolve {
        /// Alias name
        name: String,
    },

    /// List active aliases
    List,

    /// Report malformed lines, redefinitions, cycles and config problems
    Check,

    /// Create the home directory with a starter alias table and config
    Init,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = home::Context::new(cli.home.as_deref(), cli.file.as_deref(), cli.json)
        .and_then(|ctx| match cli.command {
            Commands::Run {
                dry_run,
                strict,
                set,
                name,
                args,
            } => cmd::run::run(&ctx, &name, &args, &set, strict, dry_run),
            Commands::Expand {
                strict,
                set,
                name,
                args,
            } => cmd::expand::run(&ctx, &name, &args, &set, strict),
            Commands::Resolve { name } => cmd::resolve::run(&ctx, &name),
            Commands::List => cmd::list::run(&ctx),
            Commands::Check => cmd::check::run(&ctx),
            Commands::Init => cmd::init::run(&ctx),
        });

    if let Err(e) = result {
        if let Some(exit) = e.downcast_ref::<CommandExit>() {
            if !exit.is_silent() {
                eprintln!("error: {exit}");
            }
            std::process::exit(exit.exit_code());
        }
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(exit_code_for(&e));
    }
}

fn exit_code_for(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<ShortcutsError>() {
        Some(err) if err.is_usage() => EXIT_USAGE,
        _ => 1,
    }
}
