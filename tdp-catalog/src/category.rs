use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// The fixed set of hardware categories a catalog entry can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Chassis,
    Cpu,
    Gpu,
    Memory,
    Disk,
    Nic,
    AddOnCard,
    Cooling,
}

impl ComponentCategory {
    /// All categories in display order.
    pub const ALL: [ComponentCategory; 8] = [
        ComponentCategory::Chassis,
        ComponentCategory::Cpu,
        ComponentCategory::Gpu,
        ComponentCategory::Memory,
        ComponentCategory::Disk,
        ComponentCategory::Nic,
        ComponentCategory::AddOnCard,
        ComponentCategory::Cooling,
    ];

    /// Stable storage key, identical to the serde name.
    pub fn key(&self) -> &'static str {
        match self {
            ComponentCategory::Chassis => "chassis",
            ComponentCategory::Cpu => "cpu",
            ComponentCategory::Gpu => "gpu",
            ComponentCategory::Memory => "memory",
            ComponentCategory::Disk => "disk",
            ComponentCategory::Nic => "nic",
            ComponentCategory::AddOnCard => "add_on_card",
            ComponentCategory::Cooling => "cooling",
        }
    }

    /// Human-readable label used in listings and reports.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentCategory::Chassis => "Chassis",
            ComponentCategory::Cpu => "CPU",
            ComponentCategory::Gpu => "GPU",
            ComponentCategory::Memory => "Memory",
            ComponentCategory::Disk => "Disk",
            ComponentCategory::Nic => "NIC",
            ComponentCategory::AddOnCard => "Add-on Card",
            ComponentCategory::Cooling => "Cooling",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentCategory {
    type Err = CatalogError;

    /// Parse a stored `part_type` value. Matching ignores case, surrounding
    /// whitespace, and the separators `-`, `_` and space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match normalized.as_str() {
            "chassis" | "case" => Ok(ComponentCategory::Chassis),
            "cpu" | "processor" => Ok(ComponentCategory::Cpu),
            "gpu" => Ok(ComponentCategory::Gpu),
            "memory" | "ram" | "dimm" => Ok(ComponentCategory::Memory),
            "disk" | "storage" | "ssd" | "hdd" => Ok(ComponentCategory::Disk),
            "nic" | "network" => Ok(ComponentCategory::Nic),
            "addon" | "addoncard" | "card" => Ok(ComponentCategory::AddOnCard),
            "cooling" | "fan" | "cooler" => Ok(ComponentCategory::Cooling),
            _ => Err(CatalogError::UnknownCategory(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentCategory;

    #[test]
    fn parses_stored_part_types() {
        assert_eq!("cpu".parse::<ComponentCategory>().unwrap(), ComponentCategory::Cpu);
        assert_eq!(" GPU ".parse::<ComponentCategory>().unwrap(), ComponentCategory::Gpu);
        assert_eq!(
            "Add-on Card".parse::<ComponentCategory>().unwrap(),
            ComponentCategory::AddOnCard
        );
        assert_eq!("addon".parse::<ComponentCategory>().unwrap(), ComponentCategory::AddOnCard);
        assert_eq!("ram".parse::<ComponentCategory>().unwrap(), ComponentCategory::Memory);
    }

    #[test]
    fn rejects_unknown_part_type() {
        assert!("psu".parse::<ComponentCategory>().is_err());
        assert!("".parse::<ComponentCategory>().is_err());
    }

    #[test]
    fn label_round_trips_through_parser() {
        for category in ComponentCategory::ALL {
            assert_eq!(category.label().parse::<ComponentCategory>().unwrap(), category);
            assert_eq!(category.key().parse::<ComponentCategory>().unwrap(), category);
        }
    }
}
