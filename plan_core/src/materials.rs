//! # Materials
//!
//! Physical properties of the two materials used for pre-sizing: C25/30
//! concrete (fc28 = 25 MPa) and HA400 high-bond reinforcing steel. These are
//! fixed constants, not input.
//!
//! ```rust
//! use plan_core::materials::CONCRETE_C25_30;
//! use plan_core::units::KnPerM2;
//!
//! let e: KnPerM2 = CONCRETE_C25_30.elastic_modulus.into();
//! assert_eq!(e.0, 31_000_000.0);
//! ```

use serde::Serialize;

use crate::units::Mpa;

/// Property bundle for a structural material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub name: &'static str,
    /// Modulus of elasticity E
    pub elastic_modulus: Mpa,
    /// Unit weight (kN/m³)
    pub density: f64,
    /// Characteristic compressive strength fc
    pub compressive_strength: Mpa,
    /// Yield strength fy (zero for concrete)
    pub yield_strength: Mpa,
}

/// Reinforced concrete C25/30
pub const CONCRETE_C25_30: Material = Material {
    name: "Concrete C25/30",
    elastic_modulus: Mpa(31_000.0),
    density: 25.0,
    compressive_strength: Mpa(25.0),
    yield_strength: Mpa(0.0),
};

/// High-bond reinforcing bars, fe = 400 MPa
pub const STEEL_HA400: Material = Material {
    name: "Steel HA400",
    elastic_modulus: Mpa(200_000.0),
    density: 78.5,
    compressive_strength: Mpa(0.0),
    yield_strength: Mpa(400.0),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_properties() {
        assert_eq!(CONCRETE_C25_30.elastic_modulus, Mpa(31_000.0));
        assert_eq!(CONCRETE_C25_30.compressive_strength.value(), 25.0);
        assert_eq!(CONCRETE_C25_30.yield_strength.value(), 0.0);
    }

    #[test]
    fn test_steel_properties() {
        assert_eq!(STEEL_HA400.yield_strength.value(), 400.0);
        assert!(STEEL_HA400.elastic_modulus > CONCRETE_C25_30.elastic_modulus);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&STEEL_HA400).unwrap();
        assert!(json.contains("\"yield_strength\":400.0"));
    }
}
