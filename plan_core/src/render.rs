//! 3D rendering seam.
//!
//! A [`Renderer`] turns a plan into a 3D model file inside some external
//! modelling host. No host is bundled: [`UnavailableRenderer`] is the only
//! implementation and always reports the capability as missing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PlanError, PlanResult};
use crate::plan::Plan;

/// Output of a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderArtifact {
    pub path: PathBuf,
}

pub trait Renderer {
    fn render(&self, plan: &Plan) -> PlanResult<RenderArtifact>;
}

/// Renderer used when no 3D host is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRenderer;

impl Renderer for UnavailableRenderer {
    fn render(&self, plan: &Plan) -> PlanResult<RenderArtifact> {
        debug!(rooms = plan.rooms().len(), "3D render requested without a renderer");
        Err(PlanError::not_implemented("3D rendering"))
    }
}
