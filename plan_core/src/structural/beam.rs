//! # Beam Pre-Sizing
//!
//! Simplified pre-dimensioning of one reinforced-concrete beam per room.
//!
//! ## Assumptions
//!
//! - Simply-supported beam spanning the longer room dimension
//! - Uniform load from a tributary strip of half the shorter dimension
//! - Rectangular section 0.25 m wide, depth L/16 but never under 0.30 m
//! - Concrete C25/30 modulus, no cracking or creep
//! - Serviceability limit L/500, span limit 8 m
//!
//! ```rust
//! use plan_core::structural::beam::{BeamInput, BeamOptions, calculate};
//!
//! let input = BeamInput::new("Beam-Salon", 4.0, 11.25);
//! let result = calculate(&input, &BeamOptions::default());
//! assert_eq!(result.max_moment, 22.5);
//! assert!(result.is_valid);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::materials::CONCRETE_C25_30;
use crate::plan::Room;
use crate::units::{round_dp, Centimeters, KnPerM2, Meters, Millimeters};

/// Tunables of the pre-sizing rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamOptions {
    /// Section width (m)
    pub beam_width: f64,
    /// Lower bound on section depth (m)
    pub min_height: f64,
    /// Longest span accepted for reinforced concrete (m)
    pub max_span: f64,
    /// Admissible deflection is L / this ratio
    pub deflection_limit_ratio: f64,
}

impl Default for BeamOptions {
    fn default() -> Self {
        BeamOptions {
            beam_width: 0.25,
            min_height: 0.30,
            max_span: 8.0,
            deflection_limit_ratio: 500.0,
        }
    }
}

/// Span/depth ratio giving the minimum depth of a simply-supported beam
const SPAN_DEPTH_RATIO: f64 = 16.0;

/// One beam to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// Element identifier, e.g. "Beam-Salon"
    pub label: String,
    /// Span L (m)
    pub span: f64,
    /// Uniform linear load q (kN/m)
    pub linear_load: f64,
}

impl BeamInput {
    pub fn new(label: impl Into<String>, span: f64, linear_load: f64) -> Self {
        BeamInput {
            label: label.into(),
            span,
            linear_load,
        }
    }

    /// Beam carrying a room's floor.
    ///
    /// Spans the longer side and collects `surface_load` (kN/m²) over half
    /// the shorter side.
    pub fn from_room(room: &Room, surface_load: f64) -> Self {
        let span = room.width.max(room.height);
        let tributary_width = tributary_width(room);
        BeamInput::new(format!("Beam-{}", room.name), span, surface_load * tributary_width)
    }
}

/// Half the shorter room dimension (m)
pub fn tributary_width(room: &Room) -> f64 {
    room.width.min(room.height) / 2.0
}

/// Design depth h = max(L/16, min_height) (m)
pub fn section_height(span: f64, options: &BeamOptions) -> f64 {
    (span / SPAN_DEPTH_RATIO).max(options.min_height)
}

/// Pre-sizing outcome for one element.
///
/// Forces and deflections are rounded to 2 decimals; `is_valid` is decided
/// on the unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralResult {
    /// Always "beam"
    pub element_type: String,
    pub element_id: String,
    /// Span (m)
    pub span: f64,
    /// Maximum bending moment qL²/8 (kN·m)
    pub max_moment: f64,
    /// Maximum shear qL/2 (kN)
    pub max_shear: f64,
    /// Midspan deflection 5qL⁴/(384EI) (mm)
    pub max_deflection: f64,
    /// L/500 (mm)
    pub admissible_deflection: f64,
    pub is_valid: bool,
    pub message: String,
}

/// Run the pre-sizing checks on a beam.
///
/// Never fails: a non-conforming beam is an ordinary result with
/// `is_valid == false` and a message saying which check tripped.
pub fn calculate(input: &BeamInput, options: &BeamOptions) -> StructuralResult {
    let span = input.span;
    let q = input.linear_load;

    let max_moment = q * span.powi(2) / 8.0;
    let max_shear = q * span / 2.0;

    let h = section_height(span, options);
    let inertia = options.beam_width * h.powi(3) / 12.0;
    let e = KnPerM2::from(CONCRETE_C25_30.elastic_modulus).value();

    let deflection = Meters(5.0 * q * span.powi(4) / (384.0 * e * inertia));
    let max_deflection = Millimeters::from(deflection).value();
    let admissible_deflection = Millimeters::from(Meters(span)).value() / options.deflection_limit_ratio;

    let span_ok = span <= options.max_span;
    let deflection_ok = max_deflection <= admissible_deflection;

    let message = if !span_ok {
        format!(
            "{:?}m exceeds recommended max ({}m for reinforced concrete)",
            span, options.max_span
        )
    } else if !deflection_ok {
        format!(
            "deflection {:.1}mm exceeds admissible {:.1}mm — increase section",
            max_deflection, admissible_deflection
        )
    } else {
        "OK".to_string()
    };

    debug!(
        element = %input.label,
        span,
        linear_load = q,
        h_cm = Centimeters::from(Meters(h)).value(),
        max_deflection,
        admissible_deflection,
        "beam checked"
    );

    StructuralResult {
        element_type: "beam".to_string(),
        element_id: input.label.clone(),
        span,
        max_moment: round_dp(max_moment, 2),
        max_shear: round_dp(max_shear, 2),
        max_deflection: round_dp(max_deflection, 2),
        admissible_deflection: round_dp(admissible_deflection, 2),
        is_valid: span_ok && deflection_ok,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str, width: f64, height: f64) -> Room {
        Room {
            name: name.to_string(),
            room_type: None,
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_from_room() {
        let input = BeamInput::from_room(&room("Chambre", 4.0, 3.0), 7.5);
        assert_eq!(input.label, "Beam-Chambre");
        assert_eq!(input.span, 4.0);
        assert!((input.linear_load - 11.25).abs() < 1e-9);

        // orientation of the room does not matter
        let rotated = BeamInput::from_room(&room("Chambre", 3.0, 4.0), 7.5);
        assert_eq!(rotated, input);
    }

    #[test]
    fn test_section_height() {
        let options = BeamOptions::default();
        assert_eq!(section_height(4.0, &options), 0.30);
        assert!((section_height(8.0, &options) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_short_room_passes() {
        let result = calculate(&BeamInput::new("Beam-Chambre", 4.0, 11.25), &BeamOptions::default());

        assert!((result.max_moment - 22.5).abs() < 1e-9);
        assert!((result.max_shear - 22.5).abs() < 1e-9);
        assert!((result.admissible_deflection - 8.0).abs() < 1e-9);

        // 5 * 11.25 * 4^4 / (384 * 31e6 * 0.25 * 0.3^3 / 12) * 1000
        let inertia = 0.25 * 0.3_f64.powi(3) / 12.0;
        let expected = 5.0 * 11.25 * 256.0 / (384.0 * 31.0e6 * inertia) * 1000.0;
        assert!((result.max_deflection - round_dp(expected, 2)).abs() < 1e-9);
        assert!((result.max_deflection - 2.15).abs() < 1e-9);

        assert!(result.is_valid);
        assert_eq!(result.message, "OK");
        assert_eq!(result.element_type, "beam");
    }

    #[test]
    fn test_long_span_fails() {
        let input = BeamInput::from_room(&room("Hangar", 10.0, 3.0), 7.5);
        let result = calculate(&input, &BeamOptions::default());

        assert_eq!(result.span, 10.0);
        assert!(!result.is_valid);
        assert!(result.message.contains("8m"));
        assert_eq!(result.message, "10.0m exceeds recommended max (8m for reinforced concrete)");
    }

    #[test]
    fn test_span_message_keeps_decimal_point() {
        let result = calculate(&BeamInput::new("Beam-X", 10.25, 1.0), &BeamOptions::default());
        assert_eq!(result.message, "10.25m exceeds recommended max (8m for reinforced concrete)");

        let result = calculate(&BeamInput::new("Beam-X", 9.0, 1.0), &BeamOptions::default());
        assert!(result.message.starts_with("9.0m exceeds"));
    }

    #[test]
    fn test_span_limit_is_inclusive() {
        // 8 x 1 m strip: span exactly at the limit, light load
        let input = BeamInput::from_room(&room("Couloir", 8.0, 1.0), 7.5);
        let result = calculate(&input, &BeamOptions::default());
        assert!(result.is_valid, "{}", result.message);
    }

    #[test]
    fn test_deflection_fails() {
        // 8 x 8 m: q = 7.5 * 4 = 30 kN/m, h = 0.5 m, EI = 80729 kN·m²
        let input = BeamInput::from_room(&room("Salon", 8.0, 8.0), 7.5);
        let result = calculate(&input, &BeamOptions::default());

        assert!(!result.is_valid);
        assert!((result.admissible_deflection - 16.0).abs() < 1e-9);
        assert!((result.max_deflection - 19.82).abs() < 1e-9);
        assert_eq!(result.message, "deflection 19.8mm exceeds admissible 16.0mm — increase section");
    }

    #[test]
    fn test_span_message_takes_precedence() {
        // both checks fail, the span message wins
        let result = calculate(&BeamInput::new("Beam-X", 12.0, 200.0), &BeamOptions::default());
        assert!(!result.is_valid);
        assert!(result.message.starts_with("12.0m exceeds"));
    }

    #[test]
    fn test_custom_options() {
        let options = BeamOptions {
            max_span: 12.0,
            ..BeamOptions::default()
        };
        let result = calculate(&BeamInput::new("Beam-X", 10.0, 1.0), &options);
        assert!(result.is_valid, "{}", result.message);
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&BeamInput::new("Beam-Salon", 4.0, 11.25), &BeamOptions::default());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"element_id\":\"Beam-Salon\""));
        assert!(json.contains("\"max_moment\":22.5"));
        assert!(json.contains("\"is_valid\":true"));
    }
}
