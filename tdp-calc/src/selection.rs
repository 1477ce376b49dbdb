//! Selected line items and the ordered configuration that holds them.

use serde::Serialize;
use std::fmt;
use tdp_catalog::{ComponentCatalogEntry, ComponentCategory, Specifications};

use crate::error::{CalcError, Result};

/// Session-unique identity of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineItemId(u64);

impl LineItemId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One user-chosen line item. Catalog fields are copied at selection time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedComponent {
    pub id: LineItemId,
    pub category: ComponentCategory,
    pub name: String,
    pub unit_tdp_watts: f64,
    /// Always at least 1
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
}

impl SelectedComponent {
    pub(crate) fn from_entry(id: LineItemId, entry: &ComponentCatalogEntry, quantity: u32) -> Self {
        Self {
            id,
            category: entry.category,
            name: entry.model_name.clone(),
            unit_tdp_watts: entry.tdp_watts,
            quantity,
            specifications: entry.specifications.clone(),
        }
    }

    /// `unit_tdp_watts * quantity`
    pub fn total_tdp_watts(&self) -> f64 {
        self.unit_tdp_watts * f64::from(self.quantity)
    }
}

/// Reject quantities below 1.
pub fn validate_quantity(quantity: u32) -> Result<u32> {
    if quantity < 1 {
        Err(CalcError::InvalidQuantity(quantity.to_string()))
    } else {
        Ok(quantity)
    }
}

/// Parse a quantity typed by a user. Only whole decimal numbers of at
/// least 1 are accepted; `1.5`, `0`, `-2` and `abc` are all rejected.
pub fn parse_quantity(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(CalcError::InvalidQuantity(raw.to_string()));
    }
    let quantity = trimmed
        .parse::<u32>()
        .map_err(|_| CalcError::InvalidQuantity(raw.to_string()))?;
    validate_quantity(quantity)
}

/// Accept a numeric quantity only when it is integral and in range.
pub fn quantity_from_f64(value: f64) -> Result<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(CalcError::InvalidQuantity(value.to_string()));
    }
    Ok(value as u32)
}

/// Ordered collection of line items. Insertion order is display and export order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PowerConfiguration {
    items: Vec<SelectedComponent>,
}

impl PowerConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SelectedComponent] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: LineItemId) -> Option<&SelectedComponent> {
        self.items.iter().find(|item| item.id == id)
    }

    pub(crate) fn push(&mut self, item: SelectedComponent) {
        self.items.push(item);
    }

    /// Remove the item with `id`, if present.
    pub(crate) fn remove(&mut self, id: LineItemId) -> Option<SelectedComponent> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Replace the quantity of the item with `id`. Returns false if absent.
    pub(crate) fn set_quantity(&mut self, id: LineItemId, quantity: u32) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_tdp_watts * quantity`, recomputed on every call.
    pub fn total_tdp_watts(&self) -> f64 {
        self.items.iter().map(SelectedComponent::total_tdp_watts).sum()
    }
}
