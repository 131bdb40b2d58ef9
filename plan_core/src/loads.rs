//! # Floor Loads
//!
//! Surface loads (kN/m²) for floor pre-sizing, per DTU P06-001 as applied
//! in Tunisia. The design load on a floor is
//!
//! ```text
//! g (slab + finishes) + q (occupancy) + partitions
//! ```
//!
//! with q depending on the [`BuildingType`].
//!
//! ```rust
//! use plan_core::loads::{BuildingType, total_distributed_load};
//!
//! let kind: BuildingType = "habitation".parse().unwrap();
//! assert_eq!(total_distributed_load(kind), 7.5);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// Permanent load of a 20 cm RC slab with finishes (kN/m²)
pub const PERMANENT_FLOOR_LOAD: f64 = 5.0;
/// Light partitions (kN/m²)
pub const PARTITION_LOAD: f64 = 1.0;

/// Occupancy category, selecting the exploitation load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    /// Housing
    #[default]
    Habitation,
    /// Offices
    Bureaux,
    /// Retail
    Commerce,
}

impl BuildingType {
    pub const ALL: [BuildingType; 3] = [BuildingType::Habitation, BuildingType::Bureaux, BuildingType::Commerce];

    /// Identifier used on the command line and in reports
    pub fn code(&self) -> &'static str {
        match self {
            BuildingType::Habitation => "habitation",
            BuildingType::Bureaux => "bureaux",
            BuildingType::Commerce => "commerce",
        }
    }

    /// Exploitation (live) load q (kN/m²)
    pub fn exploitation_load(&self) -> f64 {
        match self {
            BuildingType::Habitation => 1.5,
            BuildingType::Bureaux => 2.5,
            BuildingType::Commerce => 5.0,
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for BuildingType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BuildingType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlanError::unknown_building_type(s))
    }
}

/// Total floor design load g + q + partitions (kN/m²)
pub fn total_distributed_load(building_type: BuildingType) -> f64 {
    PERMANENT_FLOOR_LOAD + building_type.exploitation_load() + PARTITION_LOAD
}
