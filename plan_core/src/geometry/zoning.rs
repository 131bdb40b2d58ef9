//! # Zoning Ratios
//!
//! Tunisian urban planning (PAU) checks: the land occupation coefficient
//! (COS), the floor area ratio (CUF) and minimum setbacks from the plot
//! boundary.
//!
//! ```rust
//! use plan_core::geometry::zoning::{coefficient_occupation_sol, meets_setback, DEFAULT_MIN_SETBACK};
//!
//! assert_eq!(coefficient_occupation_sol(150.0, 375.0), 0.4);
//! assert_eq!(coefficient_occupation_sol(150.0, 0.0), 0.0);
//! assert!(meets_setback(3.0, DEFAULT_MIN_SETBACK));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::plan::{Plan, Terrain};
use crate::units::round_dp;

/// Setback applied when no specific minimum is given (m)
pub const DEFAULT_MIN_SETBACK: f64 = 3.0;

/// COS: built footprint over plot area. `0.0` for a non-positive plot.
pub fn coefficient_occupation_sol(built_area: f64, plot_area: f64) -> f64 {
    if plot_area <= 0.0 {
        return 0.0;
    }
    built_area / plot_area
}

/// CUF: total floor area over plot area. `0.0` for a non-positive plot.
pub fn coefficient_utilisation_fonciere(total_floor_area: f64, plot_area: f64) -> f64 {
    if plot_area <= 0.0 {
        return 0.0;
    }
    total_floor_area / plot_area
}

/// True when `distance` is at least `min_required`
pub fn meets_setback(distance: f64, min_required: f64) -> bool {
    distance >= min_required
}

/// Which plot boundary a setback is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetbackKind {
    /// Street side
    Front,
    /// Left and right neighbours
    Side,
    Rear,
}

/// Local planning limits.
///
/// Defaults are the usual values for a residential PAU zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regulations {
    /// Maximum COS
    pub cos: f64,
    /// Maximum CUF
    pub cuf: f64,
    pub front_setback: f64,
    pub side_setback: f64,
    pub rear_setback: f64,
    /// Maximum building height (m)
    pub max_height: f64,
}

impl Default for Regulations {
    fn default() -> Self {
        Regulations {
            cos: 0.40,
            cuf: 1.20,
            front_setback: 5.0,
            side_setback: DEFAULT_MIN_SETBACK,
            rear_setback: DEFAULT_MIN_SETBACK,
            max_height: 9.0,
        }
    }
}

impl Regulations {
    /// Minimum setback for a boundary
    pub fn minimum(&self, kind: SetbackKind) -> f64 {
        match kind {
            SetbackKind::Front => self.front_setback,
            SetbackKind::Side => self.side_setback,
            SetbackKind::Rear => self.rear_setback,
        }
    }

    /// Check a measured distance against the minimum for its boundary
    pub fn meets(&self, kind: SetbackKind, distance: f64) -> bool {
        meets_setback(distance, self.minimum(kind))
    }
}

/// Area and zoning figures for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    /// Built area (m², 2 decimals)
    pub total_area: f64,
    pub cos: f64,
    pub cuf: f64,
    pub regulations_compliant: bool,
    /// Which ratios are exceeded, `None` when compliant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_message: Option<String>,
}

impl PlanMetrics {
    /// Compute metrics for a plan of `floors` identical storeys.
    ///
    /// Uses the plan's terrain, or the default plot when it has none.
    pub fn compute(plan: &Plan, regulations: &Regulations, floors: u32) -> Self {
        Self::from_areas(plan.built_area(), &plan.terrain_or_default(), regulations, floors)
    }

    /// Compute metrics from a footprint area directly.
    pub fn from_areas(built_area: f64, terrain: &Terrain, regulations: &Regulations, floors: u32) -> Self {
        let plot_area = terrain.area();
        let cos = coefficient_occupation_sol(built_area, plot_area);
        let cuf = coefficient_utilisation_fonciere(built_area * f64::from(floors.max(1)), plot_area);

        let mut problems = Vec::new();
        if cos > regulations.cos {
            problems.push(format!("COS {:.2} exceeds maximum {:.2}", cos, regulations.cos));
        }
        if cuf > regulations.cuf {
            problems.push(format!("CUF {:.2} exceeds maximum {:.2}", cuf, regulations.cuf));
        }

        debug!(built_area, plot_area, cos, cuf, "zoning metrics");

        PlanMetrics {
            total_area: round_dp(built_area, 2),
            cos: round_dp(cos, 2),
            cuf: round_dp(cuf, 2),
            regulations_compliant: problems.is_empty(),
            compliance_message: if problems.is_empty() {
                None
            } else {
                Some(problems.join(". "))
            },
        }
    }
}
