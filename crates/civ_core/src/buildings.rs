//! City buildings and the flat yield bonuses they grant.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Per-turn city output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Yields {
    /// Food toward growth.
    pub food: u32,
    /// Production toward the current order.
    pub production: u32,
    /// Science.
    pub science: u32,
    /// Gold.
    pub gold: u32,
    /// Culture.
    pub culture: u32,
}

impl Yields {
    /// No output.
    pub const ZERO: Self = Self {
        food: 0,
        production: 0,
        science: 0,
        gold: 0,
        culture: 0,
    };
}

impl Add for Yields {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            food: self.food + rhs.food,
            production: self.production + rhs.production,
            science: self.science + rhs.science,
            gold: self.gold + rhs.gold,
            culture: self.culture + rhs.culture,
        }
    }
}

impl AddAssign for Yields {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Buildings a city can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// +2 food.
    Granary,
    /// +2 food.
    Aqueduct,
    /// +2 production.
    Workshop,
    /// +4 production.
    Factory,
    /// +2 science.
    Library,
    /// +4 science.
    University,
    /// +2 gold.
    Market,
    /// +4 gold.
    Bank,
    /// +1 culture.
    Monument,
    /// +2 culture.
    Temple,
}

/// Static data for a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingInfo {
    /// Lookup key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Production cost.
    pub cost: u32,
    /// Flat bonus added to the city's yields.
    pub bonus: Yields,
}

const fn bonus(food: u32, production: u32, science: u32, gold: u32, culture: u32) -> Yields {
    Yields {
        food,
        production,
        science,
        gold,
        culture,
    }
}

static GRANARY: BuildingInfo = BuildingInfo {
    key: "granary",
    name: "Granary",
    cost: 60,
    bonus: bonus(2, 0, 0, 0, 0),
};
static AQUEDUCT: BuildingInfo = BuildingInfo {
    key: "aqueduct",
    name: "Aqueduct",
    cost: 100,
    bonus: bonus(2, 0, 0, 0, 0),
};
static WORKSHOP: BuildingInfo = BuildingInfo {
    key: "workshop",
    name: "Workshop",
    cost: 80,
    bonus: bonus(0, 2, 0, 0, 0),
};
static FACTORY: BuildingInfo = BuildingInfo {
    key: "factory",
    name: "Factory",
    cost: 200,
    bonus: bonus(0, 4, 0, 0, 0),
};
static LIBRARY: BuildingInfo = BuildingInfo {
    key: "library",
    name: "Library",
    cost: 90,
    bonus: bonus(0, 0, 2, 0, 0),
};
static UNIVERSITY: BuildingInfo = BuildingInfo {
    key: "university",
    name: "University",
    cost: 160,
    bonus: bonus(0, 0, 4, 0, 0),
};
static MARKET: BuildingInfo = BuildingInfo {
    key: "market",
    name: "Market",
    cost: 80,
    bonus: bonus(0, 0, 0, 2, 0),
};
static BANK: BuildingInfo = BuildingInfo {
    key: "bank",
    name: "Bank",
    cost: 120,
    bonus: bonus(0, 0, 0, 4, 0),
};
static MONUMENT: BuildingInfo = BuildingInfo {
    key: "monument",
    name: "Monument",
    cost: 40,
    bonus: bonus(0, 0, 0, 0, 1),
};
static TEMPLE: BuildingInfo = BuildingInfo {
    key: "temple",
    name: "Temple",
    cost: 80,
    bonus: bonus(0, 0, 0, 0, 2),
};

impl BuildingKind {
    /// All buildings in catalog order.
    pub const ALL: [BuildingKind; 10] = [
        BuildingKind::Granary,
        BuildingKind::Aqueduct,
        BuildingKind::Workshop,
        BuildingKind::Factory,
        BuildingKind::Library,
        BuildingKind::University,
        BuildingKind::Market,
        BuildingKind::Bank,
        BuildingKind::Monument,
        BuildingKind::Temple,
    ];

    /// Catalog entry.
    #[must_use]
    pub fn info(self) -> &'static BuildingInfo {
        match self {
            BuildingKind::Granary => &GRANARY,
            BuildingKind::Aqueduct => &AQUEDUCT,
            BuildingKind::Workshop => &WORKSHOP,
            BuildingKind::Factory => &FACTORY,
            BuildingKind::Library => &LIBRARY,
            BuildingKind::University => &UNIVERSITY,
            BuildingKind::Market => &MARKET,
            BuildingKind::Bank => &BANK,
            BuildingKind::Monument => &MONUMENT,
            BuildingKind::Temple => &TEMPLE,
        }
    }

    /// Resolve a key. Unlike terrain and units there is no fallback.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.info().key == key)
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Production cost.
    #[must_use]
    pub fn cost(self) -> u32 {
        self.info().cost
    }
}

/// Sum of bonuses granted by a set of buildings.
pub fn total_bonus<'a>(buildings: impl IntoIterator<Item = &'a BuildingKind>) -> Yields {
    buildings
        .into_iter()
        .fold(Yields::ZERO, |acc, b| acc + b.info().bonus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_sum() {
        let set = [BuildingKind::Granary, BuildingKind::Aqueduct, BuildingKind::Bank];
        let total = total_bonus(&set);
        assert_eq!(total.food, 4);
        assert_eq!(total.gold, 4);
        assert_eq!(total.production, 0);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(BuildingKind::from_key("temple"), Some(BuildingKind::Temple));
        assert_eq!(BuildingKind::from_key("colosseum"), None);
    }

    #[test]
    fn test_yields_add_assign() {
        let mut y = Yields {
            food: 1,
            ..Yields::ZERO
        };
        y += Yields {
            culture: 2,
            ..Yields::ZERO
        };
        assert_eq!((y.food, y.culture), (1, 2));
    }
}
