//! # plan_core - Floor Plan Drawing and Pre-Sizing Engine
//!
//! `plan_core` turns a declarative floor plan (terrain, rooms, doors,
//! windows) into two independent outputs:
//!
//! - a 2D vector drawing on the standard architectural layers, written as DXF
//! - a structural feasibility report flagging rooms whose beam would be too
//!   long or too flexible for simplified reinforced-concrete rules
//!
//! It can also generate a first-draft plan from a room programme and compute
//! the plan's zoning ratios (COS, CUF).
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every engine is a pure function of its input
//! - **JSON-First**: inputs, reports and generated plans serialize with serde
//! - **Rich Errors**: only invalid input and I/O are errors, and they name the
//!   offending field
//!
//! ## Quick Start
//!
//! ```rust
//! use plan_core::drawing::{layout, LayoutOptions};
//! use plan_core::loads::BuildingType;
//! use plan_core::plan::Plan;
//! use plan_core::structural::{analyze, BeamOptions};
//!
//! let plan = Plan::from_json(r#"{
//!     "terrain": {"width": 15, "height": 25},
//!     "rooms": [{"name": "Salon", "x": 0, "y": 0, "width": 5, "height": 4}]
//! }"#).unwrap();
//!
//! let primitives = layout(&plan, &LayoutOptions::default());
//! assert_eq!(primitives.len(), 4);
//!
//! let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());
//! assert!(report.global_valid);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Points, polygons, offsets, intersections, zoning ratios
//! - [`plan`] - Validated plan model
//! - [`layers`] - Fixed drawing layer table
//! - [`drawing`] - Layout engine and DXF writer
//! - [`materials`], [`loads`] - Material constants and floor load table
//! - [`structural`] - Beam pre-sizing and the plan report
//! - [`generation`] - Plan generation from requirements
//! - [`render`] - 3D renderer interface
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading payloads and atomic saves

pub mod drawing;
pub mod errors;
pub mod file_io;
pub mod generation;
pub mod geometry;
pub mod layers;
pub mod loads;
pub mod materials;
pub mod plan;
pub mod render;
pub mod structural;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{PlanError, PlanResult};
pub use geometry::{Point, Polygon};
pub use loads::BuildingType;
pub use plan::Plan;
pub use structural::{Report, StructuralResult};
