//! # Plan Generation
//!
//! Builds a first-draft [`Plan`] from a list of room requirements.
//!
//! ## Algorithm
//!
//! 1. The buildable zone is the terrain minus its setbacks.
//! 2. Requirements are expanded (`count` copies, default names and areas).
//!    Repeated names are numbered so every room name stays unique.
//! 3. Rooms are sorted by area, largest first, and packed left to right in
//!    rows separated by one wall thickness. Packing stops at the first room
//!    that no longer fits in the zone height.
//! 4. A main door goes on the first room's bottom wall, interior doors on
//!    the right wall of rooms followed by a neighbour in the same row.
//! 5. Habitable rooms touching the zone edge get a window on that wall.
//!
//! The result is deterministic. It is a starting point for a designer, not
//! an optimised layout.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "terrain": { "width": 15, "height": 25 },
//!   "requirements": {
//!     "rooms": [
//!       { "type": "salon" },
//!       { "type": "chambre", "count": 2 },
//!       { "type": "cuisine", "min_area": 10 }
//!     ]
//!   }
//! }
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::drawing::DEFAULT_WALL_THICKNESS;
use crate::errors::{PlanError, PlanResult};
use crate::geometry::zoning::{PlanMetrics, Regulations};
use crate::plan::{Door, Orientation, Plan, Room, Terrain, Window, DEFAULT_DOOR_WIDTH, DEFAULT_WINDOW_WIDTH};
use crate::units::round_dp;

/// Upper bound on `count` for a single requirement
pub const MAX_ROOM_COUNT: u32 = 100;
/// Width of the entrance door (m)
pub const MAIN_DOOR_WIDTH: f64 = 1.00;
/// Share of the maximum built area aimed for when no total is requested
const DEFAULT_TARGET_SHARE: f64 = 0.8;
/// Distance under which two edges count as touching (m)
const ADJACENCY_TOLERANCE: f64 = 0.5;
/// Interior doors sit this far above the row's base (m)
const INTERIOR_DOOR_OFFSET: f64 = 0.5;

/// Minimum area of a room type (m²)
pub fn default_min_area(room_type: &str) -> f64 {
    match room_type.to_ascii_lowercase().as_str() {
        "salon" => 20.0,
        "chambre" => 12.0,
        "cuisine" => 9.0,
        "sdb" => 5.0,
        "wc" => 2.5,
        "entree" => 4.0,
        "couloir" => 3.0,
        "bureau" => 10.0,
        "garage" => 15.0,
        _ => 12.0,
    }
}

/// Rooms that never get a window
fn is_windowless(room_type: Option<&str>) -> bool {
    matches!(room_type.map(str::to_ascii_lowercase).as_deref(), Some("sdb" | "wc" | "couloir"))
}

// ============================================================================
// Request
// ============================================================================

/// One line of the programme, e.g. "two bedrooms".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomRequirement {
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub name: Option<String>,
    pub min_area: Option<f64>,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirements {
    /// Desired built area (m²)
    pub total_area: Option<f64>,
    /// Number of storeys, used for CUF
    pub floors: Option<u32>,
    #[serde(default)]
    pub rooms: Vec<RoomRequirement>,
}

/// Generation request payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub terrain: Option<Terrain>,
    pub requirements: Option<Requirements>,
    pub regulations: Option<Regulations>,
}

impl GenerationRequest {
    pub fn from_json(json: &str) -> PlanResult<Self> {
        serde_json::from_str(json).map_err(PlanError::serialization)
    }
}

/// A requirement resolved to a single room to place.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSpec {
    pub name: String,
    pub room_type: String,
    pub area: f64,
}

/// Expand counts and fill in default names and areas.
///
/// Names are unique in the output: a name produced more than once, whether
/// by `count` or by separate requirements, is numbered " 1", " 2", ... in
/// requirement order.
pub fn expand_requirements(requirements: &[RoomRequirement]) -> PlanResult<Vec<RoomSpec>> {
    let mut resolved = Vec::with_capacity(requirements.len());
    let mut totals: HashMap<String, u32> = HashMap::new();

    for (i, req) in requirements.iter().enumerate() {
        let field = |name: &str| format!("requirements.rooms[{}].{}", i, name);

        let room_type = req
            .room_type
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| PlanError::missing_field(field("type")))?;

        let area = match req.min_area {
            Some(a) if !(a.is_finite() && a > 0.0) => {
                return Err(PlanError::invalid_input(field("min_area"), a.to_string(), "Area must be positive"));
            }
            Some(a) => a,
            None => default_min_area(&room_type),
        };

        let count = req.count.unwrap_or(1);
        if count > MAX_ROOM_COUNT {
            return Err(PlanError::invalid_input(
                field("count"),
                count.to_string(),
                format!("At most {} rooms per requirement", MAX_ROOM_COUNT),
            ));
        }

        let base = req.name.clone().unwrap_or_else(|| capitalize(&room_type));
        let total = totals.entry(base.clone()).or_insert(0);
        *total = total.saturating_add(count);
        resolved.push((base, room_type, area, count));
    }

    // names that appear once are kept as is, numbering skips over them
    let taken: HashSet<&str> = totals
        .iter()
        .filter(|(_, total)| **total == 1)
        .map(|(name, _)| name.as_str())
        .collect();
    let mut next_number: HashMap<&str, u32> = HashMap::new();

    let mut specs = Vec::new();
    for (base, room_type, area, count) in &resolved {
        let numbered = totals.get(base).copied().unwrap_or(0) > 1;
        for _ in 0..*count {
            let name = if numbered {
                let n = next_number.entry(base.as_str()).or_insert(0);
                loop {
                    *n += 1;
                    let candidate = format!("{} {}", base, n);
                    if !taken.contains(candidate.as_str()) {
                        break candidate;
                    }
                }
            } else {
                base.clone()
            };
            specs.push(RoomSpec {
                name,
                room_type: room_type.clone(),
                area: *area,
            });
        }
    }
    Ok(specs)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Zone and packing
// ============================================================================

/// Area of the plot where building is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildableZone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BuildableZone {
    /// Terrain minus side setbacks left and right, front at the bottom,
    /// rear at the top.
    pub fn new(terrain: &Terrain, regulations: &Regulations) -> PlanResult<Self> {
        let zone = BuildableZone {
            x: regulations.side_setback,
            y: regulations.front_setback,
            width: terrain.width - 2.0 * regulations.side_setback,
            height: terrain.height - regulations.front_setback - regulations.rear_setback,
        };
        if zone.width <= 0.0 || zone.height <= 0.0 {
            return Err(PlanError::invalid_input(
                "terrain",
                format!("{} x {}", terrain.width, terrain.height),
                "Terrain leaves no buildable area once setbacks are applied",
            ));
        }
        Ok(zone)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// Rectangle of `area` with a comfortable proportion, sides rounded to 10 cm.
///
/// Returns `(width, height)`, width being the longer side.
pub fn room_dimensions(area: f64) -> (f64, f64) {
    let ratio = if area > 15.0 { 1.3 } else { 1.5 };
    let height = (area / ratio).sqrt();
    let width = area / height;
    (round_dp(width, 1), round_dp(height, 1))
}

/// Place rooms in rows inside `zone`, largest first.
pub fn pack_rooms(specs: &[RoomSpec], zone: &BuildableZone, gap: f64) -> Vec<Room> {
    let mut sorted: Vec<&RoomSpec> = specs.iter().collect();
    sorted.sort_by(|a, b| b.area.total_cmp(&a.area));

    let mut placed = Vec::with_capacity(sorted.len());
    let mut x = zone.x;
    let mut y = zone.y;
    let mut row_height: f64 = 0.0;

    for spec in sorted {
        let (width, height) = room_dimensions(spec.area);

        if x > zone.x && x + width > zone.right() {
            x = zone.x;
            y += row_height + gap;
            row_height = 0.0;
        }
        if width > zone.width {
            warn!(room = %spec.name, width, zone_width = zone.width, "room wider than the buildable zone");
        }

        if y + height > zone.top() {
            warn!(room = %spec.name, area = spec.area, "no space left for room");
            break;
        }

        debug!(room = %spec.name, x, y, width, height, "room placed");
        placed.push(Room {
            name: spec.name.clone(),
            room_type: Some(spec.room_type.clone()),
            x,
            y,
            width,
            height,
        });

        row_height = row_height.max(height);
        x += width + gap;
    }

    placed
}

// ============================================================================
// Openings
// ============================================================================

/// Entrance door plus one interior door between row neighbours.
pub fn generate_doors(rooms: &[Room]) -> Vec<Door> {
    let mut doors = Vec::new();

    if let Some(first) = rooms.first() {
        doors.push(Door {
            x: first.x + first.width / 2.0 - MAIN_DOOR_WIDTH / 2.0,
            y: first.y,
            width: MAIN_DOOR_WIDTH,
            orientation: Orientation::Horizontal,
        });
    }

    for pair in rooms.windows(2) {
        let (room, next) = (&pair[0], &pair[1]);
        if (room.y - next.y).abs() < ADJACENCY_TOLERANCE {
            doors.push(Door {
                x: room.x + room.width,
                y: room.y.max(next.y) + INTERIOR_DOOR_OFFSET,
                width: DEFAULT_DOOR_WIDTH,
                orientation: Orientation::Vertical,
            });
        }
    }

    doors
}

/// Windows on the exterior walls of habitable rooms.
pub fn generate_windows(rooms: &[Room], zone: &BuildableZone) -> Vec<Window> {
    let mut windows = Vec::new();

    for room in rooms {
        if is_windowless(room.room_type.as_deref()) {
            continue;
        }

        let mid_y = room.y + room.height / 2.0 - DEFAULT_WINDOW_WIDTH / 2.0;

        if room.y + room.height >= zone.top() - ADJACENCY_TOLERANCE {
            windows.push(Window {
                x: room.x + room.width / 2.0 - DEFAULT_WINDOW_WIDTH / 2.0,
                y: room.y + room.height,
                width: DEFAULT_WINDOW_WIDTH,
                orientation: Orientation::Horizontal,
            });
        }
        if (room.x - zone.x).abs() < ADJACENCY_TOLERANCE {
            windows.push(Window {
                x: room.x,
                y: mid_y,
                width: DEFAULT_WINDOW_WIDTH,
                orientation: Orientation::Vertical,
            });
        }
        if (room.x + room.width - zone.right()).abs() < ADJACENCY_TOLERANCE {
            windows.push(Window {
                x: room.x + room.width,
                y: mid_y,
                width: DEFAULT_WINDOW_WIDTH,
                orientation: Orientation::Vertical,
            });
        }
    }

    windows
}

// ============================================================================
// Entry point
// ============================================================================

/// A generated plan with its zoning figures.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    #[serde(flatten)]
    pub plan: Plan,
    pub wall_thickness: f64,
    /// Built area aimed for (m²), capped by the COS
    pub target_area: f64,
    pub metrics: PlanMetrics,
}

/// Generate a plan from a request.
pub fn generate(request: &GenerationRequest) -> PlanResult<GeneratedPlan> {
    let requirements = request
        .requirements
        .as_ref()
        .ok_or_else(|| PlanError::missing_field("requirements"))?;
    let terrain = request.terrain.unwrap_or_default();
    let regulations = request.regulations.unwrap_or_default();

    let zone = BuildableZone::new(&terrain, &regulations)?;

    let max_built_area = terrain.area() * regulations.cos;
    let target_area = requirements
        .total_area
        .unwrap_or(max_built_area * DEFAULT_TARGET_SHARE)
        .min(max_built_area);

    let specs = expand_requirements(&requirements.rooms)?;
    let rooms = pack_rooms(&specs, &zone, DEFAULT_WALL_THICKNESS);
    let doors = generate_doors(&rooms);
    let windows = generate_windows(&rooms, &zone);

    let plan = Plan::new(Some(terrain), rooms, doors, windows)?;
    let metrics = PlanMetrics::compute(&plan, &regulations, requirements.floors.unwrap_or(1));

    info!(
        requested = specs.len(),
        placed = plan.rooms().len(),
        placed_area = round_dp(plan.built_area(), 1),
        target_area = round_dp(target_area, 1),
        "plan generated"
    );

    Ok(GeneratedPlan {
        plan,
        wall_thickness: DEFAULT_WALL_THICKNESS,
        target_area: round_dp(target_area, 2),
        metrics,
    })
}
