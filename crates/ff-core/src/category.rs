//! Closed enumerations shared across the grid, scenario, needs, and decider
//! crates: the fixed POI category set, the fixed grid cell-class set, and
//! the agent role set.
//!
//! All variants are always compiled in (no per-variant feature flags) — the
//! sets are closed by specification, not subject to runtime extension.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

// ── PoiCategory ───────────────────────────────────────────────────────────────

/// The closed set of point-of-interest categories.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PoiCategory {
    Grocery,
    Pharmacy,
    Cafe,
    Restaurant,
    Transit,
    Education,
    Health,
    Retail,
    Other,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 9] = [
        PoiCategory::Grocery,
        PoiCategory::Pharmacy,
        PoiCategory::Cafe,
        PoiCategory::Restaurant,
        PoiCategory::Transit,
        PoiCategory::Education,
        PoiCategory::Health,
        PoiCategory::Retail,
        PoiCategory::Other,
    ];

    /// The need this category primarily satisfies, used to translate a
    /// scenario's POI-category bias weights into need-category terms.
    /// `Transit` and `Other` satisfy no tracked need and return `None`.
    pub fn primary_need(self) -> Option<NeedCategory> {
        match self {
            PoiCategory::Grocery => Some(NeedCategory::Groceries),
            PoiCategory::Pharmacy => Some(NeedCategory::Health),
            PoiCategory::Cafe => Some(NeedCategory::Caffeine),
            PoiCategory::Restaurant => Some(NeedCategory::Hunger),
            PoiCategory::Education => Some(NeedCategory::Education),
            PoiCategory::Retail => Some(NeedCategory::Leisure),
            PoiCategory::Health => Some(NeedCategory::Health),
            PoiCategory::Transit | PoiCategory::Other => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PoiCategory::Grocery => "grocery",
            PoiCategory::Pharmacy => "pharmacy",
            PoiCategory::Cafe => "cafe",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::Transit => "transit",
            PoiCategory::Education => "education",
            PoiCategory::Health => "health",
            PoiCategory::Retail => "retail",
            PoiCategory::Other => "other",
        }
    }
}

impl FromStr for PoiCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "grocery" => PoiCategory::Grocery,
            "pharmacy" => PoiCategory::Pharmacy,
            "cafe" => PoiCategory::Cafe,
            "restaurant" => PoiCategory::Restaurant,
            "transit" => PoiCategory::Transit,
            "education" => PoiCategory::Education,
            "health" => PoiCategory::Health,
            "retail" => PoiCategory::Retail,
            "other" => PoiCategory::Other,
            other => return Err(CoreError::Config(format!("unknown category {other:?}"))),
        })
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── NeedCategory ──────────────────────────────────────────────────────────────

/// The closed set of agent need dimensions. Distinct from [`PoiCategory`]:
/// a need is a craving, a POI category is a place that can satisfy one.
/// [`NeedCategory::satisfying_category`] is the fixed table a deterministic
/// decider consults to turn "the agent's strongest need" into "the kind of
/// place it should walk to."
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeedCategory {
    Hunger,
    Caffeine,
    Groceries,
    Health,
    Education,
    Leisure,
    Social,
}

impl NeedCategory {
    pub const ALL: [NeedCategory; 7] = [
        NeedCategory::Hunger,
        NeedCategory::Caffeine,
        NeedCategory::Groceries,
        NeedCategory::Health,
        NeedCategory::Education,
        NeedCategory::Leisure,
        NeedCategory::Social,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NeedCategory::Hunger => "hunger",
            NeedCategory::Caffeine => "caffeine",
            NeedCategory::Groceries => "groceries",
            NeedCategory::Health => "health",
            NeedCategory::Education => "education",
            NeedCategory::Leisure => "leisure",
            NeedCategory::Social => "social",
        }
    }

    /// The POI category that satisfies this need, per the fixed
    /// hunger→restaurant / caffeine→cafe / groceries→grocery /
    /// health→pharmacy / education→education / leisure→retail /
    /// social→cafe table.
    pub fn satisfying_category(self) -> PoiCategory {
        match self {
            NeedCategory::Hunger => PoiCategory::Restaurant,
            NeedCategory::Caffeine => PoiCategory::Cafe,
            NeedCategory::Groceries => PoiCategory::Grocery,
            NeedCategory::Health => PoiCategory::Pharmacy,
            NeedCategory::Education => PoiCategory::Education,
            NeedCategory::Leisure => PoiCategory::Retail,
            NeedCategory::Social => PoiCategory::Cafe,
        }
    }
}

impl FromStr for NeedCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "hunger" => NeedCategory::Hunger,
            "caffeine" => NeedCategory::Caffeine,
            "groceries" => NeedCategory::Groceries,
            "health" => NeedCategory::Health,
            "education" => NeedCategory::Education,
            "leisure" => NeedCategory::Leisure,
            "social" => NeedCategory::Social,
            other => return Err(CoreError::Config(format!("unknown need category {other:?}"))),
        })
    }
}

impl fmt::Display for NeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CellClass ─────────────────────────────────────────────────────────────────

/// The closed set of semantic grid cell classes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellClass {
    Void,
    Building,
    Sidewalk,
    Footpath,
    Parking,
    Plaza,
    Green,
    Water,
    Road,
    Crossing,
}

impl CellClass {
    /// Decode a raw `semantic.npy` byte. Returns `None` if out of range.
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => CellClass::Void,
            1 => CellClass::Building,
            2 => CellClass::Sidewalk,
            3 => CellClass::Footpath,
            4 => CellClass::Parking,
            5 => CellClass::Plaza,
            6 => CellClass::Green,
            7 => CellClass::Water,
            8 => CellClass::Road,
            9 => CellClass::Crossing,
            _ => return None,
        })
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

// ── Role ──────────────────────────────────────────────────────────────────────

/// The fixed agent role distribution role-sampling draws from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    Student,
    Resident,
    Worker,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Resident, Role::Worker];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Resident => "resident",
            Role::Worker => "worker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
