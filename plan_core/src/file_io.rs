//! # File I/O Module
//!
//! Reading plan and request payloads, writing reports, drawings and
//! generated plans.
//!
//! Every write is atomic: the content goes to a `.tmp` sibling, is synced to
//! disk and renamed over the target, so an interrupted run never leaves a
//! half-written file. Missing parent directories are created.
//!
//! ## Example
//!
//! ```rust,no_run
//! use plan_core::file_io::{load_plan, save_report};
//! use plan_core::loads::BuildingType;
//! use plan_core::structural::{analyze, BeamOptions};
//! use std::path::Path;
//!
//! let plan = load_plan(Path::new("plan.json"))?;
//! let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());
//! save_report(&report, Path::new("out/report.json"))?;
//! # Ok::<(), plan_core::errors::PlanError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::drawing::dxf::write_dxf;
use crate::drawing::Primitive;
use crate::errors::{PlanError, PlanResult};
use crate::generation::{GeneratedPlan, GenerationRequest};
use crate::plan::Plan;
use crate::structural::Report;

/// Load and validate a plan payload.
pub fn load_plan(path: &Path) -> PlanResult<Plan> {
    let contents = read_text(path)?;
    Plan::from_json(&contents).map_err(|e| with_path(e, path))
}

/// Load a plan generation request.
pub fn load_generation_request(path: &Path) -> PlanResult<GenerationRequest> {
    let contents = read_text(path)?;
    GenerationRequest::from_json(&contents).map_err(|e| with_path(e, path))
}

/// Save a structural report as indented UTF-8 JSON.
pub fn save_report(report: &Report, path: &Path) -> PlanResult<()> {
    save_json(report, path)
}

/// Save a generated plan, metrics included, as indented JSON.
pub fn save_plan(generated: &GeneratedPlan, path: &Path) -> PlanResult<()> {
    save_json(generated, path)
}

/// Save laid-out primitives as a DXF drawing.
pub fn save_dxf(primitives: &[Primitive], path: &Path) -> PlanResult<()> {
    let mut buf = Vec::new();
    write_dxf(&mut buf, primitives).map_err(|e| PlanError::Internal {
        message: format!("DXF encoding failed: {}", e),
    })?;
    write_atomic(path, &buf)
}

/// Serialize `value` as pretty JSON and write it atomically.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> PlanResult<()> {
    let mut json = serde_json::to_string_pretty(value).map_err(PlanError::serialization)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

/// Write `bytes` to `path` via a synced temporary file and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> PlanResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PlanError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        PlanError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        PlanError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        PlanError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        PlanError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

/// `report.json` -> `report.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_text(path: &Path) -> PlanResult<String> {
    fs::read_to_string(path).map_err(|e| PlanError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Name the file in JSON syntax errors; validation errors already carry a field path.
fn with_path(err: PlanError, path: &Path) -> PlanError {
    match err {
        PlanError::SerializationError { reason } => PlanError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{layout, LayoutOptions};
    use crate::loads::BuildingType;
    use crate::structural::{analyze, BeamOptions};
    use tempfile::TempDir;

    const PLAN: &str = r#"{
        "terrain": {"width": 15, "height": 25},
        "rooms": [{"name": "Salon", "x": 0, "y": 0, "width": 5, "height": 4}],
        "doors": [{"x": 2, "y": 0}]
    }"#;

    fn write_plan(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("plan.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("out/report.json")), PathBuf::from("out/report.json.tmp"));
    }

    #[test]
    fn test_load_plan() {
        let dir = TempDir::new().unwrap();
        let plan = load_plan(&write_plan(&dir, PLAN)).unwrap();
        assert_eq!(plan.rooms()[0].name, "Salon");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_plan(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json_names_file() {
        let dir = TempDir::new().unwrap();
        let err = load_plan(&write_plan(&dir, "{ not json")).unwrap_err();
        match err {
            PlanError::SerializationError { reason } => assert!(reason.contains("plan.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_load_keeps_field_path() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(&dir, r#"{"rooms":[{"name":"A","x":0,"y":0,"height":3}]}"#);
        assert_eq!(load_plan(&path).unwrap_err(), PlanError::missing_field("rooms[0].width"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let plan = load_plan(&write_plan(&dir, PLAN)).unwrap();
        let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());

        let out = dir.path().join("nested").join("deeper").join("report.json");
        save_report(&report, &out).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("\n  \"project\": \"ArchiGenTN\""));
        assert!(!tmp_path_for(&out).exists());
    }

    #[test]
    fn test_save_report_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let plan = Plan::from_json(r#"{"rooms":[{"name":"Séjour","x":0,"y":0,"width":4,"height":3}]}"#).unwrap();
        let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());

        let out = dir.path().join("report.json");
        save_report(&report, &out).unwrap();
        assert!(fs::read_to_string(&out).unwrap().contains("Beam-Séjour"));
    }

    #[test]
    fn test_save_dxf() {
        let dir = TempDir::new().unwrap();
        let plan = load_plan(&write_plan(&dir, PLAN)).unwrap();
        let out = dir.path().join("plan.dxf");

        save_dxf(&layout(&plan, &LayoutOptions::default()), &out).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("MURS_PORTEURS"));
        assert!(text.ends_with("EOF\n"));
    }

    #[test]
    fn test_overwrite_existing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("data.json");
        save_json(&vec![1, 2, 3], &out).unwrap();
        save_json(&vec![4], &out).unwrap();
        let back: Vec<i32> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(back, vec![4]);
    }

    #[test]
    fn test_load_generation_request() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"requirements":{"rooms":[{"type":"salon"}]}}"#).unwrap();
        let request = load_generation_request(&path).unwrap();
        assert_eq!(request.requirements.unwrap().rooms.len(), 1);
    }
}
