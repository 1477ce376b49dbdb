//! List the component catalog.

use std::fmt::Write;
use tdp_calc::PowerBudgetCalculator;
use tdp_catalog::{Catalog, ComponentCategory};

use crate::catalog::load_into;
use crate::CatalogArgs;

pub const NO_PARTS_NOTICE: &str = "No parts are configured in the system.";

/// Format the catalog grouped by category, skipping empty categories.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in ComponentCategory::ALL {
        let entries: Vec<_> = catalog.by_category(category).collect();
        if entries.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{} ({})", category, entries.len());
        for entry in entries {
            let _ = write!(out, "  {:<40} {:>7} W", entry.model_name, entry.tdp_watts);
            if let Some(specs) = &entry.specifications {
                let _ = write!(out, "  [{}]", specs.flatten(", "));
            }
            out.push('\n');
        }
    }
    out
}

pub async fn run_parts(args: &CatalogArgs, json: bool) -> anyhow::Result<()> {
    let mut calc = PowerBudgetCalculator::default();
    let load = load_into(&mut calc, args).await?;
    let Some(catalog) = calc.catalog() else {
        anyhow::bail!("catalog did not load");
    };
    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
    } else if load.is_empty() {
        println!("{}", NO_PARTS_NOTICE);
    } else {
        print!("{}", render_catalog(catalog));
    }
    Ok(())
}
