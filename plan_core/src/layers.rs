//! # Drawing Layers
//!
//! The fixed layer table used by every architectural drawing. Colours are
//! AutoCAD Color Index (ACI) values.
//!
//! | Layer | Colour | Linetype | Content |
//! |-------|--------|----------|---------|
//! | MURS_PORTEURS | 1 red | CONTINUOUS | load-bearing walls |
//! | MURS_CLOISONS | 3 green | CONTINUOUS | partitions, inner wall faces |
//! | OUVERTURES | 5 blue | DASHED | doors and windows |
//! | COTATIONS | 7 white | CONTINUOUS | dimensions |
//! | MOBILIER | 8 grey | CONTINUOUS | furniture |
//! | TEXTE | 7 white | CONTINUOUS | labels |
//! | TERRAIN | 30 orange | DASHDOT | plot boundary |
//! | RESEAUX | 6 magenta | DASHED | networks (water, power) |

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Line pattern of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineStyle {
    Continuous,
    Dashed,
    DashDot,
}

impl LineStyle {
    pub const ALL: [LineStyle; 3] = [LineStyle::Continuous, LineStyle::Dashed, LineStyle::DashDot];

    /// Linetype name as written to CAD files
    pub fn dxf_name(&self) -> &'static str {
        match self {
            LineStyle::Continuous => "CONTINUOUS",
            LineStyle::Dashed => "DASHED",
            LineStyle::DashDot => "DASHDOT",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LineStyle::Continuous => "Solid line",
            LineStyle::Dashed => "Dashed __ __ __",
            LineStyle::DashDot => "Dash dot __ . __ .",
        }
    }

    /// Dash pattern in drawing units: positive = dash, negative = gap, zero = dot
    pub fn pattern(&self) -> &'static [f64] {
        match self {
            LineStyle::Continuous => &[],
            LineStyle::Dashed => &[0.5, -0.25],
            LineStyle::DashDot => &[0.5, -0.25, 0.0, -0.25],
        }
    }
}

/// One entry of the layer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub name: &'static str,
    pub color: u8,
    pub line_style: LineStyle,
}

const fn layer(name: &'static str, color: u8, line_style: LineStyle) -> LayerSpec {
    LayerSpec {
        name,
        color,
        line_style,
    }
}

pub static MURS_PORTEURS: LayerSpec = layer("MURS_PORTEURS", 1, LineStyle::Continuous);
pub static MURS_CLOISONS: LayerSpec = layer("MURS_CLOISONS", 3, LineStyle::Continuous);
pub static OUVERTURES: LayerSpec = layer("OUVERTURES", 5, LineStyle::Dashed);
pub static COTATIONS: LayerSpec = layer("COTATIONS", 7, LineStyle::Continuous);
pub static MOBILIER: LayerSpec = layer("MOBILIER", 8, LineStyle::Continuous);
pub static TEXTE: LayerSpec = layer("TEXTE", 7, LineStyle::Continuous);
pub static TERRAIN: LayerSpec = layer("TERRAIN", 30, LineStyle::DashDot);
pub static RESEAUX: LayerSpec = layer("RESEAUX", 6, LineStyle::Dashed);

/// All layers in table order
pub static LAYERS: [&LayerSpec; 8] = [
    &MURS_PORTEURS,
    &MURS_CLOISONS,
    &OUVERTURES,
    &COTATIONS,
    &MOBILIER,
    &TEXTE,
    &TERRAIN,
    &RESEAUX,
];

static BY_NAME: Lazy<HashMap<&'static str, &'static LayerSpec>> =
    Lazy::new(|| LAYERS.iter().map(|l| (l.name, *l)).collect());

/// Look a layer up by name
pub fn by_name(name: &str) -> Option<&'static LayerSpec> {
    BY_NAME.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_eight_unique_layers() {
        assert_eq!(LAYERS.len(), 8);
        assert_eq!(BY_NAME.len(), 8);
    }

    #[test]
    fn test_lookup() {
        let terrain = by_name("TERRAIN").unwrap();
        assert_eq!(terrain.color, 30);
        assert_eq!(terrain.line_style, LineStyle::DashDot);
        assert_eq!(by_name("OUVERTURES").unwrap().line_style.dxf_name(), "DASHED");
        assert!(by_name("UNKNOWN").is_none());
    }

    #[test]
    fn test_table_order() {
        let names: Vec<_> = LAYERS.iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            ["MURS_PORTEURS", "MURS_CLOISONS", "OUVERTURES", "COTATIONS", "MOBILIER", "TEXTE", "TERRAIN", "RESEAUX"]
        );
    }

    #[test]
    fn test_serializes_linetype_name() {
        let json = serde_json::to_string(&TERRAIN).unwrap();
        assert_eq!(json, r#"{"name":"TERRAIN","color":30,"line_style":"DASHDOT"}"#);
    }
}
