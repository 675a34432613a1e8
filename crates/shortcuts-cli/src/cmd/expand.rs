use crate::cmd::build_expansion;
use crate::home::Context;
use crate::output::print_json;

pub fn run(
    ctx: &Context,
    name: &str,
    args: &[String],
    overrides: &[(String, String)],
    strict: bool,
) -> anyhow::Result<()> {
    let expansion = build_expansion(ctx, name, args, overrides, strict)?;
    if ctx.json {
        print_json(&expansion)?;
        return Ok(());
    }
    println!("{}", expansion.command);
    if expansion.chain.len() > 1 {
        eprintln!("via {}", expansion.chain.join(" -> "));
    }
    Ok(())
}
