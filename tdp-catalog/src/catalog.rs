use serde::{Deserialize, Serialize};

use crate::category::ComponentCategory;
use crate::entry::ComponentCatalogEntry;

/// A resolved catalog: both partitions as fetched for this session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub common_parts: Vec<ComponentCatalogEntry>,
    pub gpus: Vec<ComponentCatalogEntry>,
}

impl Catalog {
    pub fn new(common_parts: Vec<ComponentCatalogEntry>, gpus: Vec<ComponentCatalogEntry>) -> Self {
        Self { common_parts, gpus }
    }

    /// All entries, common parts first, each partition in source order.
    pub fn entries(&self) -> impl Iterator<Item = &ComponentCatalogEntry> {
        self.common_parts.iter().chain(self.gpus.iter())
    }

    /// Entries of a single category.
    pub fn by_category(
        &self,
        category: ComponentCategory,
    ) -> impl Iterator<Item = &ComponentCatalogEntry> {
        self.entries().filter(move |e| e.category == category)
    }

    /// Look up an entry by category and model name.
    pub fn find(&self, category: ComponentCategory, model_name: &str) -> Option<&ComponentCatalogEntry> {
        let model_name = model_name.trim();
        self.by_category(category).find(|e| e.model_name == model_name)
    }

    pub fn len(&self) -> usize {
        self.common_parts.len() + self.gpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.common_parts.is_empty() && self.gpus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: ComponentCategory, name: &str, tdp: f64) -> ComponentCatalogEntry {
        ComponentCatalogEntry {
            category,
            model_name: name.to_string(),
            tdp_watts: tdp,
            specifications: None,
        }
    }

    #[test]
    fn find_is_scoped_to_category() {
        let catalog = Catalog::new(
            vec![
                entry(ComponentCategory::Cpu, "Shared Name", 200.0),
                entry(ComponentCategory::Nic, "Shared Name", 25.0),
            ],
            vec![entry(ComponentCategory::Gpu, "H100", 700.0)],
        );
        assert_eq!(catalog.find(ComponentCategory::Nic, "Shared Name").unwrap().tdp_watts, 25.0);
        assert_eq!(catalog.find(ComponentCategory::Gpu, " H100 ").unwrap().tdp_watts, 700.0);
        assert!(catalog.find(ComponentCategory::Cpu, "H100").is_none());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.entries().count(), 0);
    }
}
