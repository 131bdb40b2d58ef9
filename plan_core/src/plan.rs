//! # Plan Model
//!
//! The in-memory floor plan shared by the drawing layout engine and the
//! structural checker. A [`Plan`] is built once from the input payload,
//! validated as a whole, and only read afterwards.
//!
//! ## Input Format
//!
//! ```json
//! {
//!   "terrain": { "width": 15, "height": 25 },
//!   "rooms": [
//!     { "name": "Salon", "x": 0, "y": 0, "width": 5, "height": 4 },
//!     { "name": "Chambre 1", "x": 5, "y": 0, "width": 4, "height": 3.5 }
//!   ],
//!   "doors": [ { "x": 2, "y": 0, "orientation": "horizontal" } ],
//!   "windows": [ { "x": 0, "y": 1, "width": 1.2, "orientation": "vertical" } ]
//! }
//! ```
//!
//! Validation runs before anything is derived from the plan, so a payload
//! with a missing room dimension never produces partial drawings or reports.
//!
//! ```rust
//! use plan_core::plan::Plan;
//!
//! let plan = Plan::from_json(r#"{"rooms":[{"name":"Salon","x":0,"y":0,"width":5,"height":4}]}"#).unwrap();
//! assert_eq!(plan.rooms().len(), 1);
//! assert!(plan.terrain().is_none());
//!
//! let err = Plan::from_json(r#"{"rooms":[{"name":"Salon","x":0,"y":0,"height":4}]}"#).unwrap_err();
//! assert_eq!(err.to_string(), "Missing required field: rooms[0].width");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::geometry::{rectangle, rectangle_area, Polygon};

/// Terrain width used when the payload has none (m)
pub const DEFAULT_TERRAIN_WIDTH: f64 = 15.0;
/// Terrain height used when the payload has none (m)
pub const DEFAULT_TERRAIN_HEIGHT: f64 = 25.0;
/// Standard interior door width (m)
pub const DEFAULT_DOOR_WIDTH: f64 = 0.90;
/// Standard window width (m)
pub const DEFAULT_WINDOW_WIDTH: f64 = 1.20;

/// Direction an opening runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Plot boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub width: f64,
    pub height: f64,
}

impl Default for Terrain {
    fn default() -> Self {
        Terrain {
            width: DEFAULT_TERRAIN_WIDTH,
            height: DEFAULT_TERRAIN_HEIGHT,
        }
    }
}

impl Terrain {
    pub fn area(&self) -> f64 {
        rectangle_area(self.width, self.height)
    }
}

/// A rectangular room, origin at its lower-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Room category ("salon", "chambre", ...), set by plan generation
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Room {
    /// Outer wall outline
    pub fn outline(&self) -> Polygon {
        rectangle(self.x, self.y, self.width, self.height)
    }

    /// Gross area, walls included
    pub fn gross_area(&self) -> f64 {
        rectangle_area(self.width, self.height)
    }
}

/// A door opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub orientation: Orientation,
}

/// A window opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub orientation: Orientation,
}

/// A validated floor plan.
///
/// Fields are private: a `Plan` only comes out of [`Plan::new`] or
/// [`Plan::from_json`], both of which validate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    terrain: Option<Terrain>,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    windows: Vec<Window>,
}

impl Plan {
    /// Build a plan from already-typed parts, validating them.
    pub fn new(
        terrain: Option<Terrain>,
        rooms: Vec<Room>,
        doors: Vec<Door>,
        windows: Vec<Window>,
    ) -> PlanResult<Self> {
        if let Some(t) = &terrain {
            require_positive("terrain.width", t.width)?;
            require_positive("terrain.height", t.height)?;
        }

        let mut names = HashSet::new();
        for (i, room) in rooms.iter().enumerate() {
            let field = |name: &str| format!("rooms[{}].{}", i, name);
            if room.name.trim().is_empty() {
                return Err(PlanError::invalid_input(field("name"), "\"\"", "Room name must not be empty"));
            }
            if !names.insert(room.name.as_str()) {
                return Err(PlanError::invalid_input(
                    field("name"),
                    room.name.clone(),
                    "Room names must be unique within a plan",
                ));
            }
            require_finite(&field("x"), room.x)?;
            require_finite(&field("y"), room.y)?;
            require_positive(&field("width"), room.width)?;
            require_positive(&field("height"), room.height)?;
        }

        for (i, door) in doors.iter().enumerate() {
            require_finite(&format!("doors[{}].x", i), door.x)?;
            require_finite(&format!("doors[{}].y", i), door.y)?;
            require_positive(&format!("doors[{}].width", i), door.width)?;
        }

        for (i, window) in windows.iter().enumerate() {
            require_finite(&format!("windows[{}].x", i), window.x)?;
            require_finite(&format!("windows[{}].y", i), window.y)?;
            require_positive(&format!("windows[{}].width", i), window.width)?;
        }

        Ok(Plan {
            terrain,
            rooms,
            doors,
            windows,
        })
    }

    /// Parse and validate a plan payload.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let input: PlanInput = serde_json::from_str(json).map_err(PlanError::serialization)?;
        input.validate()
    }

    /// Terrain as given in the payload
    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    /// Terrain, falling back to the 15 x 25 m default plot
    pub fn terrain_or_default(&self) -> Terrain {
        self.terrain.unwrap_or_default()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Sum of gross room areas (m²)
    pub fn built_area(&self) -> f64 {
        self.rooms.iter().map(Room::gross_area).sum()
    }
}

fn require_finite(field: &str, value: f64) -> PlanResult<()> {
    if !value.is_finite() {
        return Err(PlanError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> PlanResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(PlanError::invalid_input(field, value.to_string(), "Dimension must be positive"));
    }
    Ok(())
}

fn require<T>(value: Option<T>, field: impl FnOnce() -> String) -> PlanResult<T> {
    value.ok_or_else(|| PlanError::missing_field(field()))
}

// ============================================================================
// Raw payload
// ============================================================================

/// Plan payload as read from JSON, before validation.
///
/// Every field is optional here so that a missing value is reported with
/// its exact path instead of a generic parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanInput {
    #[serde(default)]
    pub terrain: Option<TerrainInput>,
    #[serde(default)]
    pub rooms: Vec<RoomInput>,
    #[serde(default)]
    pub doors: Vec<OpeningInput>,
    #[serde(default)]
    pub windows: Vec<OpeningInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerrainInput {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningInput {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub orientation: Option<Orientation>,
}

impl PlanInput {
    /// Resolve defaults, check required fields, and build the plan.
    pub fn validate(self) -> PlanResult<Plan> {
        // an empty terrain object counts as no terrain
        let terrain = self
            .terrain
            .filter(|t| t.width.is_some() || t.height.is_some())
            .map(|t| Terrain {
                width: t.width.unwrap_or(DEFAULT_TERRAIN_WIDTH),
                height: t.height.unwrap_or(DEFAULT_TERRAIN_HEIGHT),
            });

        let rooms = self
            .rooms
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let field = |name: &str| format!("rooms[{}].{}", i, name);
                Ok(Room {
                    name: require(r.name, || field("name"))?,
                    room_type: r.room_type,
                    x: require(r.x, || field("x"))?,
                    y: require(r.y, || field("y"))?,
                    width: require(r.width, || field("width"))?,
                    height: require(r.height, || field("height"))?,
                })
            })
            .collect::<PlanResult<Vec<_>>>()?;

        let doors = self
            .doors
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                Ok(Door {
                    x: require(d.x, || format!("doors[{}].x", i))?,
                    y: require(d.y, || format!("doors[{}].y", i))?,
                    width: d.width.unwrap_or(DEFAULT_DOOR_WIDTH),
                    orientation: d.orientation.unwrap_or_default(),
                })
            })
            .collect::<PlanResult<Vec<_>>>()?;

        let windows = self
            .windows
            .into_iter()
            .enumerate()
            .map(|(i, w)| {
                Ok(Window {
                    x: require(w.x, || format!("windows[{}].x", i))?,
                    y: require(w.y, || format!("windows[{}].y", i))?,
                    width: w.width.unwrap_or(DEFAULT_WINDOW_WIDTH),
                    orientation: w.orientation.unwrap_or_default(),
                })
            })
            .collect::<PlanResult<Vec<_>>>()?;

        Plan::new(terrain, rooms, doors, windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "terrain": {"width": 15, "height": 25},
        "rooms": [
            {"name": "Salon", "x": 0, "y": 0, "width": 5, "height": 4},
            {"name": "Chambre 1", "type": "chambre", "x": 5, "y": 0, "width": 4, "height": 3.5}
        ],
        "doors": [{"x": 2, "y": 0}],
        "windows": [{"x": 0, "y": 1, "width": 1.5, "orientation": "vertical"}]
    }"#;

    #[test]
    fn test_parse_sample_plan() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        assert_eq!(plan.terrain(), Some(&Terrain { width: 15.0, height: 25.0 }));
        assert_eq!(plan.rooms().len(), 2);
        assert_eq!(plan.rooms()[1].room_type.as_deref(), Some("chambre"));
        assert!((plan.built_area() - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_opening_defaults() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        let door = plan.doors()[0];
        assert_eq!(door.width, DEFAULT_DOOR_WIDTH);
        assert_eq!(door.orientation, Orientation::Horizontal);

        let window = plan.windows()[0];
        assert_eq!(window.width, 1.5);
        assert_eq!(window.orientation, Orientation::Vertical);

        let plan = Plan::from_json(r#"{"windows":[{"x":1,"y":1}]}"#).unwrap();
        assert_eq!(plan.windows()[0].width, DEFAULT_WINDOW_WIDTH);
    }

    #[test]
    fn test_missing_terrain_uses_default_plot() {
        let plan = Plan::from_json(r#"{"rooms":[]}"#).unwrap();
        assert!(plan.terrain().is_none());
        assert_eq!(plan.terrain_or_default(), Terrain { width: 15.0, height: 25.0 });
    }

    #[test]
    fn test_empty_terrain_is_absent() {
        let plan = Plan::from_json(r#"{"terrain":{},"rooms":[]}"#).unwrap();
        assert!(plan.terrain().is_none());
        assert_eq!(plan.terrain_or_default(), Terrain { width: 15.0, height: 25.0 });
    }

    #[test]
    fn test_partial_terrain_fills_defaults() {
        let plan = Plan::from_json(r#"{"terrain":{"width":20}}"#).unwrap();
        assert_eq!(plan.terrain(), Some(&Terrain { width: 20.0, height: 25.0 }));
    }

    #[test]
    fn test_missing_room_field_is_reported_with_path() {
        let err = Plan::from_json(
            r#"{"rooms":[{"name":"A","x":0,"y":0,"width":3,"height":3},{"name":"B","x":0,"y":0,"width":3}]}"#,
        )
        .unwrap_err();
        assert_eq!(err, PlanError::missing_field("rooms[1].height"));
    }

    #[test]
    fn test_missing_room_name() {
        let err = Plan::from_json(r#"{"rooms":[{"x":0,"y":0,"width":3,"height":3}]}"#).unwrap_err();
        assert_eq!(err, PlanError::missing_field("rooms[0].name"));
    }

    #[test]
    fn test_missing_door_position() {
        let err = Plan::from_json(r#"{"doors":[{"x":1}]}"#).unwrap_err();
        assert_eq!(err, PlanError::missing_field("doors[0].y"));
    }

    #[test]
    fn test_non_positive_room_dimension_rejected() {
        let err = Plan::from_json(r#"{"rooms":[{"name":"A","x":0,"y":0,"width":0,"height":3}]}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_duplicate_room_names_rejected() {
        let err = Plan::from_json(
            r#"{"rooms":[{"name":"A","x":0,"y":0,"width":3,"height":3},{"name":"A","x":3,"y":0,"width":3,"height":3}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { ref field, .. } if field == "rooms[1].name"));
    }

    #[test]
    fn test_bad_orientation_is_a_serialization_error() {
        let err = Plan::from_json(r#"{"doors":[{"x":1,"y":1,"orientation":"diagonal"}]}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.is_validation());
    }

    #[test]
    fn test_wrong_type_is_a_serialization_error() {
        let err = Plan::from_json(r#"{"rooms":[{"name":"A","x":0,"y":0,"width":"big","height":3}]}"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_plan_serializes_to_input_shape() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&plan).unwrap();
        let reparsed = Plan::from_json(&json).unwrap();
        assert_eq!(plan, reparsed);
    }

    #[test]
    fn test_room_outline() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        let outline = plan.rooms()[1].outline();
        assert_eq!(outline.points()[2], crate::geometry::Point::new(9.0, 3.5));
    }
}
