//! City production orders.

use serde::{Deserialize, Serialize};

use crate::buildings::BuildingKind;
use crate::unit::UnitType;

/// What a city is currently building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductionOrder {
    /// A city improvement.
    Building(BuildingKind),
    /// A unit delivered at the city.
    Unit(UnitType),
    /// A one-off project.
    Wonder {
        /// Wonder name.
        name: String,
        /// Production cost.
        cost: u32,
    },
}

impl ProductionOrder {
    /// Production needed to complete the order.
    #[must_use]
    pub fn cost(&self) -> u32 {
        match self {
            ProductionOrder::Building(kind) => kind.cost(),
            ProductionOrder::Unit(unit_type) => unit_type.cost(),
            ProductionOrder::Wonder { cost, .. } => *cost,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ProductionOrder::Building(kind) => kind.name(),
            ProductionOrder::Unit(unit_type) => unit_type.name(),
            ProductionOrder::Wonder { name, .. } => name,
        }
    }
}
