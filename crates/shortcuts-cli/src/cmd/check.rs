use serde::Serialize;
use shortcuts_core::config::{ConfigWarning, LoadPolicy, WarnLevel};
use shortcuts_core::table::Override;
use shortcuts_core::ParseError;

use crate::exit::CommandExit;
use crate::home::Context;
use crate::output::print_json;

#[derive(Serialize)]
struct CheckReport {
    file: String,
    aliases: usize,
    skipped: Vec<ParseError>,
    overridden: Vec<Override>,
    chain_errors: Vec<String>,
    config: Vec<ConfigWarning>,
}

impl CheckReport {
    /// Overrides and config warnings don't count; they are often intentional.
    fn problems(&self) -> usize {
        self.skipped.len()
            + self.chain_errors.len()
            + self
                .config
                .iter()
                .filter(|w| w.level == WarnLevel::Error)
                .count()
    }
}

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    // Always collect every bad line, whatever the configured policy.
    let table = ctx.load_table_with(LoadPolicy::Skip)?;

    let report = CheckReport {
        file: ctx.aliases.display().to_string(),
        aliases: table.len(),
        skipped: table.skipped().to_vec(),
        overridden: table.overridden(),
        chain_errors: table.check().iter().map(|e| e.to_string()).collect(),
        config: ctx.config.validate(),
    };

    if ctx.json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    match report.problems() {
        0 => Ok(()),
        problems => Err(CommandExit::CheckFailed { problems }.into()),
    }
}

fn print_report(report: &CheckReport) {
    println!("{}: {} alias(es)", report.file, report.aliases);

    for e in &report.skipped {
        println!("  error    line {}: {}: {}", e.line, e.reason, e.content);
    }
    for e in &report.chain_errors {
        println!("  error    {e}");
    }
    for o in &report.overridden {
        let lines: Vec<String> = o.shadowed_lines.iter().map(|l| l.to_string()).collect();
        println!(
            "  warning  '{}' on line {} overrides line(s) {}",
            o.name,
            o.active_line,
            lines.join(", ")
        );
    }
    for w in &report.config {
        let level = match w.level {
            WarnLevel::Error => "error",
            WarnLevel::Warning => "warning",
        };
        println!("  {level:<8} config: {}", w.message);
    }

    if report.problems() == 0 {
        println!("ok");
    }
}
