use crate::home::Context;
use crate::output::{print_json, print_table};

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let table = ctx.load_table()?;
    let defs = table.definitions();

    if ctx.json {
        return print_json(&defs);
    }

    if defs.is_empty() {
        println!("No aliases defined.");
        return Ok(());
    }

    let rows = defs
        .iter()
        .map(|d| vec![d.name.clone(), d.line.to_string(), d.template.clone()])
        .collect();
    print_table(&["NAME", "LINE", "TEMPLATE"], rows);
    Ok(())
}
