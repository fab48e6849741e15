use anyhow::Result;

use rendernames_core::templates::placeholder;
use rendernames_core::variables::VariableRegistry;

use crate::output;

/// Print every template variable, grouped by category.
pub async fn run(json: bool) -> Result<()> {
    let registry = VariableRegistry::builtin();

    if json {
        println!("{}", serde_json::to_string_pretty(&registry.describe())?);
        return Ok(());
    }

    output::print_header("rendernames variables");
    for (category, vars) in registry.by_category() {
        println!("\n{}", category.label());
        for var in vars {
            output::print_key_value(&placeholder(var.name), var.description);
        }
    }
    println!();

    Ok(())
}
