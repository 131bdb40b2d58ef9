//! # Unit Types
//!
//! Lightweight newtype wrappers for the SI units used by plans and the
//! structural checker. Serialization is transparent (plain numbers).
//!
//! Plans are drawn in metres. Beam deflections are reported in millimetres,
//! section heights are discussed in centimetres, and elastic moduli come in
//! MPa but enter the deflection formula in kN/m².
//!
//! ## Example
//!
//! ```rust
//! use plan_core::units::{Meters, Millimeters, meters_to_cm};
//!
//! let span = Meters(4.0);
//! let span_mm: Millimeters = span.into();
//! assert_eq!(span_mm.0, 4000.0);
//! assert_eq!(meters_to_cm(0.20), 20.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(meters_to_cm(m.0))
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm_to_meters(cm.0))
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

/// Convert metres to centimetres
pub fn meters_to_cm(m: f64) -> f64 {
    m * 100.0
}

/// Convert centimetres to metres
pub fn cm_to_meters(cm: f64) -> f64 {
    cm / 100.0
}

/// Round to a fixed number of decimal places, as reported values are
pub fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mpa(pub f64);

/// Stress in kilonewtons per square metre (kPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM2(pub f64);

impl From<Mpa> for KnPerM2 {
    fn from(mpa: Mpa) -> Self {
        KnPerM2(mpa.0 * 1000.0)
    }
}

impl From<KnPerM2> for Mpa {
    fn from(kpa: KnPerM2) -> Self {
        Mpa(kpa.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Mpa);
impl_arithmetic!(KnPerM2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_scale() {
        assert_eq!(meters_to_cm(2.5), 250.0);
        assert_eq!(cm_to_meters(250.0), 2.5);
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(16.5649, 2), 16.56);
        assert_eq!(round_dp(0.125, 1), 0.1);
        assert_eq!(round_dp(7.5, 0), 8.0);
    }

    #[test]
    fn test_meters_to_millimeters() {
        let mm: Millimeters = Meters(8.0).into();
        assert_eq!(mm.0, 8000.0);
        let back: Meters = mm.into();
        assert_eq!(back, Meters(8.0));
    }

    #[test]
    fn test_mpa_to_kn_per_m2() {
        let e: KnPerM2 = Mpa(31_000.0).into();
        assert_eq!(e.0, 31_000_000.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(10.0);
        let b = Meters(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).value(), 5.0);
    }

    #[test]
    fn test_serialization() {
        let cm = Centimeters(20.0);
        let json = serde_json::to_string(&cm).unwrap();
        assert_eq!(json, "20.0");
    }
}
