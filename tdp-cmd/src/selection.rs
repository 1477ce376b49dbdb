//! Parsing of user selections from `--item` arguments and JSON files.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tdp_calc::selection::{parse_quantity, quantity_from_f64};
use tdp_catalog::ComponentCategory;

/// One requested line item before catalog validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    pub category: ComponentCategory,
    pub model: String,
    pub quantity: u32,
}

/// Parse `CATEGORY:MODEL[:QTY]`. When more than one `:` follows the
/// category, the last segment is the quantity.
pub fn parse_item(raw: &str) -> anyhow::Result<SelectionRequest> {
    let (category, rest) = raw
        .split_once(':')
        .with_context(|| format!("expected CATEGORY:MODEL[:QTY], got '{}'", raw))?;
    let category: ComponentCategory = category.parse()?;
    let (model, quantity) = match rest.rsplit_once(':') {
        Some((model, quantity)) => (model, parse_quantity(quantity)?),
        None => (rest, 1),
    };
    let model = model.trim();
    if model.is_empty() {
        anyhow::bail!("missing model name in '{}'", raw);
    }
    Ok(SelectionRequest {
        category,
        model: model.to_string(),
        quantity,
    })
}

#[derive(Debug, Deserialize)]
struct RawSelection {
    category: String,
    model: String,
    #[serde(default)]
    quantity: Option<serde_json::Number>,
}

/// Parse a JSON array of `{category, model, quantity}`; quantity defaults to 1.
pub fn parse_selection_json(json: &str) -> anyhow::Result<Vec<SelectionRequest>> {
    let raw: Vec<RawSelection> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|r| -> anyhow::Result<SelectionRequest> {
            let quantity = match r.quantity {
                None => 1,
                Some(n) => {
                    let value = n
                        .as_f64()
                        .with_context(|| format!("quantity {} is not a number", n))?;
                    quantity_from_f64(value)?
                }
            };
            Ok(SelectionRequest {
                category: r.category.parse()?,
                model: r.model.trim().to_string(),
                quantity,
            })
        })
        .collect()
}

/// Gather requests from a selection file (first) and `--item` arguments.
pub fn collect_requests(
    items: &[String],
    selection: Option<&Path>,
) -> anyhow::Result<Vec<SelectionRequest>> {
    let mut requests = Vec::new();
    if let Some(path) = selection {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read selection file {}", path.display()))?;
        requests.extend(parse_selection_json(&json)?);
    }
    for item in items {
        requests.push(parse_item(item)?);
    }
    Ok(requests)
}
