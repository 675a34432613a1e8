use shortcuts_core::definition::leading_token;

use crate::home::Context;
use crate::output::print_json;

pub fn run(ctx: &Context, name: &str) -> anyhow::Result<()> {
    let table = ctx.load_table()?;
    let resolved = table.resolve(name);

    if ctx.json {
        return match resolved {
            Some(r) => print_json(&r),
            None => print_json(&serde_json::json!({ "name": name, "found": false })),
        };
    }

    match resolved {
        Some(r) => {
            println!("{}={}", r.name, r.template);
            if r.chains {
                let next = leading_token(r.template).unwrap_or_default();
                println!("  chains into '{next}'");
            }
        }
        None => println!("{name}: not an alias"),
    }
    Ok(())
}
