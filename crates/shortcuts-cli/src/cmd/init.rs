use serde::Serialize;
use shortcuts_core::config::Config;
use shortcuts_core::{io, paths};

use crate::home::Context;
use crate::output::print_json;

const STARTER_ALIASES: &str = r#"# shortcuts alias table: one `name=template` per line.
# Later lines override earlier ones. Templates may use {NAME} or
# {NAME:-default} placeholders, filled from the environment or --set.

# Navigation
..=cd ..
...=cd ../..
....=cd ../../..
cg=cd `git rev-parse --show-toplevel`

# Listing and disk usage
l=ls -lhF
la=ls -lhAF
lt=ls -lhtrF
duh=du -h -d 1
dus=du -sh
df=df -h

# Colour
grep=grep --color=auto
egrep=grep -E --color=auto
cdiff=colordiff -u

# Network
myip=dig +short myip.opendns.com @resolver1.opendns.com
localip=ifconfig | awk '/inet / && $2 != "127.0.0.1" {print $2}'
ports=lsof -nP -iTCP:{PORT:-8000} -sTCP:LISTEN

# Files
cpr=rsync -avh --progress
sha256=openssl dgst -sha256
"#;

#[derive(Serialize)]
struct InitReport {
    home: String,
    aliases_created: bool,
    config_created: bool,
}

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    std::fs::create_dir_all(&ctx.home)?;

    let aliases_created = io::write_if_missing(&ctx.aliases, STARTER_ALIASES.as_bytes())?;

    let config_path = paths::config_path(&ctx.home);
    let config_yaml = config_template(&Config::default())?;
    let config_created = io::write_if_missing(&config_path, config_yaml.as_bytes())?;

    let report = InitReport {
        home: ctx.home.display().to_string(),
        aliases_created,
        config_created,
    };

    if ctx.json {
        return print_json(&report);
    }

    println!("Initialized shortcuts in {}", report.home);
    let status = |created: bool| if created { "created" } else { "exists " };
    println!("  {}  {}", status(aliases_created), ctx.aliases.display());
    println!("  {}  {}", status(config_created), config_path.display());
    Ok(())
}

fn config_template(config: &Config) -> anyhow::Result<String> {
    let mut out = String::from("# shortcuts configuration\n");
    out.push_str(&config.to_yaml()?);
    Ok(out)
}
