//! Cost categories for cost-sheet line items.

use serde::{Deserialize, Serialize};

/// The category a cost-sheet line item belongs to.
///
/// Each category owns one ordered item table on the cost sheet and one
/// subtotal. Production items are priced per unit; every other category is
/// priced by consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Fabric,
    Accessory,
    Process,
    Production,
}

impl CostCategory {
    /// All categories in cost-sheet order.
    pub const ALL: [Self; 4] = [
        Self::Fabric,
        Self::Accessory,
        Self::Process,
        Self::Production,
    ];

    /// Name of the item table holding this category (e.g. `fabric_items`).
    #[must_use]
    pub const fn table_field(self) -> &'static str {
        match self {
            Self::Fabric => "fabric_items",
            Self::Accessory => "accessory_items",
            Self::Process => "process_items",
            Self::Production => "production_items",
        }
    }

    /// Name of the subtotal field for this category (e.g. `fabric_cost`).
    #[must_use]
    pub const fn cost_field(self) -> &'static str {
        match self {
            Self::Fabric => "fabric_cost",
            Self::Accessory => "accessory_cost",
            Self::Process => "process_cost",
            Self::Production => "production_cost",
        }
    }

    /// Whether items are priced by consumption (net consumption plus loss).
    #[must_use]
    pub const fn is_consumption_based(self) -> bool {
        !matches!(self, Self::Production)
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fabric => write!(f, "fabric"),
            Self::Accessory => write!(f, "accessory"),
            Self::Process => write!(f, "process"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for CostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fabric" => Ok(Self::Fabric),
            "accessory" => Ok(Self::Accessory),
            "process" => Ok(Self::Process),
            "production" => Ok(Self::Production),
            _ => Err(format!("invalid cost category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_and_cost_fields() {
        assert_eq!(CostCategory::Fabric.table_field(), "fabric_items");
        assert_eq!(CostCategory::Production.cost_field(), "production_cost");
    }

    #[test]
    fn test_only_production_is_unit_priced() {
        let consumption: Vec<_> = CostCategory::ALL
            .into_iter()
            .filter(|c| c.is_consumption_based())
            .collect();
        assert_eq!(
            consumption,
            vec![
                CostCategory::Fabric,
                CostCategory::Accessory,
                CostCategory::Process
            ]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "accessory".parse::<CostCategory>().unwrap(),
            CostCategory::Accessory
        );
        assert!("trim".parse::<CostCategory>().is_err());
    }
}
