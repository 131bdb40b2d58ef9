//! # Structural Pre-Sizing
//!
//! Feasibility check of a plan's floors. Each room is carried by one
//! simply-supported reinforced-concrete beam; the beam is sized with the
//! rule-of-thumb formulas in [`beam`] and the results are aggregated into a
//! [`Report`].
//!
//! This is a pre-dimensioning pass, not a finite-element analysis. A failed
//! check is a normal outcome, reported per element, never an error.
//!
//! - [`beam`] - per-beam formulas and pass/fail classification
//! - [`report`] - plan walk and aggregation

pub mod beam;
pub mod report;

pub use beam::{BeamInput, BeamOptions, StructuralResult};
pub use report::{analyze, Report};
