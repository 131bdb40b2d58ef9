//! # Drawing Layout Engine
//!
//! Walks a [`Plan`] and derives the flat, ordered list of drawing
//! primitives for it. Each primitive carries its layer; serialising the list
//! to a CAD format is the job of a sink such as [`dxf`].
//!
//! ## Emission Order
//!
//! 1. Terrain boundary (1 m margin all around), only if the plan has a terrain
//! 2. Per room, in plan order: outer wall loop, inner wall loop, label
//! 3. Doors: one segment each
//! 4. Windows: two parallel segments each
//!
//! ## Example
//!
//! ```rust
//! use plan_core::drawing::{layout, LayoutOptions, Primitive};
//! use plan_core::plan::Plan;
//!
//! let plan = Plan::from_json(r#"{
//!     "terrain": {"width": 15, "height": 25},
//!     "rooms": [{"name": "Salon", "x": 0, "y": 0, "width": 5, "height": 4}]
//! }"#).unwrap();
//!
//! let primitives = layout(&plan, &LayoutOptions::default());
//! assert_eq!(primitives.len(), 4);
//! match &primitives[3] {
//!     Primitive::Label { text, .. } => assert_eq!(text, "Salon\n16.6 m²"),
//!     other => panic!("expected label, got {:?}", other),
//! }
//! ```

pub mod dxf;

use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::geometry::{rectangle, rectangle_area, Point, Polygon};
use crate::layers::{self, LayerSpec};
use crate::plan::{Door, Orientation, Plan, Room, Terrain, Window};

/// Standard wall thickness (m)
pub const DEFAULT_WALL_THICKNESS: f64 = 0.20;
/// Label text height (m)
pub const DEFAULT_LABEL_HEIGHT: f64 = 0.15;
/// Margin drawn around the terrain boundary (m)
pub const TERRAIN_MARGIN: f64 = 1.0;
/// Half the gap between the two lines of a window (m)
pub const WINDOW_HALF_GAP: f64 = 0.05;

/// Tunables for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub wall_thickness: f64,
    pub label_char_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            wall_thickness: DEFAULT_WALL_THICKNESS,
            label_char_height: DEFAULT_LABEL_HEIGHT,
        }
    }
}

/// One drawable entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    /// Closed polyline
    Polygon {
        #[serde(serialize_with = "layer_name")]
        layer: &'static LayerSpec,
        polygon: Polygon,
    },
    /// Straight segment
    Line {
        #[serde(serialize_with = "layer_name")]
        layer: &'static LayerSpec,
        start: Point,
        end: Point,
    },
    /// Text anchored at its centre; `\n` separates lines
    Label {
        #[serde(serialize_with = "layer_name")]
        layer: &'static LayerSpec,
        position: Point,
        text: String,
        char_height: f64,
    },
}

impl Primitive {
    pub fn layer(&self) -> &'static LayerSpec {
        match self {
            Primitive::Polygon { layer, .. } | Primitive::Line { layer, .. } | Primitive::Label { layer, .. } => {
                *layer
            }
        }
    }
}

fn layer_name<S: Serializer>(layer: &&'static LayerSpec, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(layer.name)
}

/// Derive every primitive of a plan, in emission order.
///
/// Rooms too small for two wall thicknesses still get an inner loop; its
/// dimensions are simply non-positive and the label area negative or zero.
pub fn layout(plan: &Plan, options: &LayoutOptions) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(
        1 + plan.rooms().len() * 3 + plan.doors().len() + plan.windows().len() * 2,
    );

    if let Some(terrain) = plan.terrain() {
        out.push(terrain_boundary(terrain));
    }

    for room in plan.rooms() {
        out.extend(room_primitives(room, options));
    }

    out.extend(plan.doors().iter().map(door_primitive));

    for window in plan.windows() {
        out.extend(window_primitives(window));
    }

    info!(
        rooms = plan.rooms().len(),
        doors = plan.doors().len(),
        windows = plan.windows().len(),
        primitives = out.len(),
        "plan laid out"
    );
    out
}

/// Plot outline with its margin
pub fn terrain_boundary(terrain: &Terrain) -> Primitive {
    Primitive::Polygon {
        layer: &layers::TERRAIN,
        polygon: rectangle(
            -TERRAIN_MARGIN,
            -TERRAIN_MARGIN,
            terrain.width + 2.0 * TERRAIN_MARGIN,
            terrain.height + 2.0 * TERRAIN_MARGIN,
        ),
    }
}

/// Outer loop, inner loop and label of a room
pub fn room_primitives(room: &Room, options: &LayoutOptions) -> [Primitive; 3] {
    let t = options.wall_thickness;
    let inner_width = room.width - 2.0 * t;
    let inner_height = room.height - 2.0 * t;

    if inner_width <= 0.0 || inner_height <= 0.0 {
        debug!(room = %room.name, inner_width, inner_height, "room thinner than its walls");
    }

    let net_area = rectangle_area(inner_width, inner_height);
    let center = Point::new(room.x + room.width / 2.0, room.y + room.height / 2.0);
    debug!(room = %room.name, net_area, "room laid out");

    [
        Primitive::Polygon {
            layer: &layers::MURS_PORTEURS,
            polygon: room.outline(),
        },
        Primitive::Polygon {
            layer: &layers::MURS_CLOISONS,
            polygon: rectangle(room.x + t, room.y + t, inner_width, inner_height),
        },
        Primitive::Label {
            layer: &layers::TEXTE,
            position: center,
            text: format!("{}\n{:.1} m²", room.name, net_area),
            char_height: options.label_char_height,
        },
    ]
}

/// A door is a single segment of its width; no swing arc is drawn.
pub fn door_primitive(door: &Door) -> Primitive {
    let start = Point::new(door.x, door.y);
    Primitive::Line {
        layer: &layers::OUVERTURES,
        start,
        end: along(start, door.orientation, door.width),
    }
}

/// A window is two parallel segments either side of its axis.
pub fn window_primitives(window: &Window) -> [Primitive; 2] {
    [-WINDOW_HALF_GAP, WINDOW_HALF_GAP].map(|shift| {
        let start = match window.orientation {
            Orientation::Horizontal => Point::new(window.x, window.y + shift),
            Orientation::Vertical => Point::new(window.x + shift, window.y),
        };
        Primitive::Line {
            layer: &layers::OUVERTURES,
            start,
            end: along(start, window.orientation, window.width),
        }
    })
}

fn along(start: Point, orientation: Orientation, length: f64) -> Point {
    match orientation {
        Orientation::Horizontal => Point::new(start.x + length, start.y),
        Orientation::Vertical => Point::new(start.x, start.y + length),
    }
}
