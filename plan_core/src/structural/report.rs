//! Plan-level structural report.
//!
//! One beam per room, in plan order, aggregated into a [`Report`] whose
//! `global_valid` is the AND of every element (true for a plan without
//! rooms).

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::loads::{total_distributed_load, BuildingType};
use crate::plan::Plan;
use crate::structural::beam::{calculate, BeamInput, BeamOptions, StructuralResult};

/// Project name stamped on every report
pub const PROJECT_NAME: &str = "ArchiGenTN";
/// Summary when every element conforms
pub const SUMMARY_OK: &str = "Structure conforme";
/// Summary when at least one element needs revision
pub const SUMMARY_ATTENTION: &str = "Attention: certains elements necessitent revision";

/// Structural feasibility report for a whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub project: String,
    pub building_type: BuildingType,
    /// g + q + partitions (kN/m²)
    pub total_distributed_load: f64,
    /// One result per room, in plan order
    pub elements: Vec<StructuralResult>,
    pub global_valid: bool,
    pub summary: String,
}

impl Report {
    /// Aggregate element results.
    pub fn new(building_type: BuildingType, total_distributed_load: f64, elements: Vec<StructuralResult>) -> Self {
        let global_valid = elements.iter().all(|e| e.is_valid);
        Report {
            project: PROJECT_NAME.to_string(),
            building_type,
            total_distributed_load,
            elements,
            global_valid,
            summary: if global_valid { SUMMARY_OK } else { SUMMARY_ATTENTION }.to_string(),
        }
    }

    /// Elements that failed a check
    pub fn failures(&self) -> impl Iterator<Item = &StructuralResult> {
        self.elements.iter().filter(|e| !e.is_valid)
    }
}

/// Pre-size one beam per room of `plan`.
pub fn analyze(plan: &Plan, building_type: BuildingType, options: &BeamOptions) -> Report {
    let load = total_distributed_load(building_type);

    let elements: Vec<StructuralResult> = plan
        .rooms()
        .iter()
        .map(|room| {
            let result = calculate(&BeamInput::from_room(room, load), options);
            if !result.is_valid {
                warn!(element = %result.element_id, message = %result.message, "element needs revision");
            }
            result
        })
        .collect();

    let report = Report::new(building_type, load, elements);
    info!(
        building_type = %building_type,
        total_distributed_load = load,
        elements = report.elements.len(),
        failures = report.failures().count(),
        global_valid = report.global_valid,
        "structural analysis complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(rooms: &str) -> Plan {
        Plan::from_json(&format!(r#"{{"rooms":[{}]}}"#, rooms)).unwrap()
    }

    #[test]
    fn test_all_conforming() {
        let plan = plan(
            r#"{"name":"Chambre","x":0,"y":0,"width":4,"height":3},
               {"name":"Cuisine","x":4.2,"y":0,"width":3,"height":3}"#,
        );
        let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());

        assert_eq!(report.project, "ArchiGenTN");
        assert_eq!(report.total_distributed_load, 7.5);
        assert_eq!(report.elements.len(), 2);
        assert!(report.global_valid);
        assert_eq!(report.summary, SUMMARY_OK);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_one_failure_flips_global() {
        let plan = plan(
            r#"{"name":"Chambre","x":0,"y":0,"width":4,"height":3},
               {"name":"Garage","x":0,"y":4,"width":10,"height":3},
               {"name":"Cuisine","x":4.2,"y":0,"width":3,"height":3}"#,
        );
        let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());

        assert!(!report.global_valid);
        assert_eq!(report.summary, SUMMARY_ATTENTION);

        // plan order kept, no sorting by severity
        let ids: Vec<_> = report.elements.iter().map(|e| e.element_id.as_str()).collect();
        assert_eq!(ids, ["Beam-Chambre", "Beam-Garage", "Beam-Cuisine"]);

        let failures: Vec<_> = report.failures().map(|e| e.element_id.as_str()).collect();
        assert_eq!(failures, ["Beam-Garage"]);
    }

    #[test]
    fn test_empty_plan_is_valid() {
        let report = analyze(&plan(""), BuildingType::Bureaux, &BeamOptions::default());
        assert!(report.elements.is_empty());
        assert!(report.global_valid);
        assert_eq!(report.summary, SUMMARY_OK);
        assert_eq!(report.total_distributed_load, 8.5);
    }

    #[test]
    fn test_building_type_changes_load() {
        let plan = plan(r#"{"name":"Boutique","x":0,"y":0,"width":6,"height":4}"#);
        let housing = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());
        let retail = analyze(&plan, BuildingType::Commerce, &BeamOptions::default());
        assert!(retail.elements[0].max_moment > housing.elements[0].max_moment);
    }

    #[test]
    fn test_report_json() {
        let plan = plan(r#"{"name":"Séjour","x":0,"y":0,"width":4,"height":3}"#);
        let report = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());
        let json = serde_json::to_string_pretty(&report).unwrap();

        assert!(json.contains("\"building_type\": \"habitation\""));
        assert!(json.contains("\"total_distributed_load\": 7.5"));
        assert!(json.contains("Beam-Séjour"));

        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_deterministic() {
        let plan = plan(r#"{"name":"Salon","x":0,"y":0,"width":7.3,"height":5.1}"#);
        let a = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());
        let b = analyze(&plan, BuildingType::Habitation, &BeamOptions::default());
        assert_eq!(a, b);
    }
}
