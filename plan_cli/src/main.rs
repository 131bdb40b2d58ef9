//! # Archiplan CLI
//!
//! Thin command line over `plan_core`:
//!
//! ```text
//! archiplan dxf      --input plan.json    --output plan.dxf
//! archiplan analyze  --input plan.json    --output report.json [--type habitation|bureaux|commerce]
//! archiplan generate --input request.json --output plan.json
//! archiplan metrics  --input plan.json    [--floors N]
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, or `-v` for debug). On failure the
//! structured error is printed as JSON and the exit code is non-zero.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plan_core::drawing::{layout, LayoutOptions};
use plan_core::file_io::{load_generation_request, load_plan, save_dxf, save_plan, save_report};
use plan_core::generation::generate;
use plan_core::geometry::zoning::{PlanMetrics, Regulations};
use plan_core::loads::BuildingType;
use plan_core::structural::{analyze, BeamOptions, Report};
use plan_core::PlanError;

#[derive(Parser, Debug)]
#[command(name = "archiplan", version)]
#[command(about = "Floor plan DXF export, structural pre-sizing and plan generation")]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a plan and write it as a DXF drawing
    Dxf {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Pre-size one beam per room and write the structural report
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Occupancy: habitation, bureaux or commerce
        #[arg(long = "type", default_value = "habitation")]
        building_type: BuildingType,
    },
    /// Generate a plan from room requirements
    Generate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the zoning ratios of a plan
    Metrics {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 1)]
        floors: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Dxf { input, output } => dxf(&input, &output),
        Command::Analyze {
            input,
            output,
            building_type,
        } => structural(&input, &output, building_type),
        Command::Generate { input, output } => generate_plan(&input, &output),
        Command::Metrics { input, floors } => metrics(&input, floors),
    }
}

fn dxf(input: &Path, output: &Path) -> Result<()> {
    let plan = load_plan(input)?;
    let primitives = layout(&plan, &LayoutOptions::default());
    save_dxf(&primitives, output)?;
    info!(primitives = primitives.len(), output = %output.display(), "drawing written");
    println!("DXF written: {}", output.display());
    Ok(())
}

fn structural(input: &Path, output: &Path, building_type: BuildingType) -> Result<()> {
    let plan = load_plan(input)?;
    let report = analyze(&plan, building_type, &BeamOptions::default());
    save_report(&report, output)?;
    println!("Structural report written: {}", output.display());
    print!("{}", failure_notice(&report));
    Ok(())
}

fn generate_plan(input: &Path, output: &Path) -> Result<()> {
    let request = load_generation_request(input)?;
    let generated = generate(&request)?;
    save_plan(&generated, output)?;
    println!(
        "Plan written: {} ({} rooms, {:.2} m², COS {:.2})",
        output.display(),
        generated.plan.rooms().len(),
        generated.metrics.total_area,
        generated.metrics.cos
    );
    if let Some(message) = &generated.metrics.compliance_message {
        println!("WARNING: {}", message);
    }
    Ok(())
}

fn metrics(input: &Path, floors: u32) -> Result<()> {
    let plan = load_plan(input)?;
    let metrics = PlanMetrics::compute(&plan, &Regulations::default(), floors);
    let json = serde_json::to_string_pretty(&metrics).context("encoding metrics")?;
    println!("{}", json);
    Ok(())
}

/// Lines listing the non-conforming elements, empty when all pass
fn failure_notice(report: &Report) -> String {
    if report.global_valid {
        return String::new();
    }
    let mut notice = String::from("WARNING: some elements need revision!\n");
    for element in report.failures() {
        notice.push_str(&format!("  - {}: {}\n", element.element_id, element.message));
    }
    notice
}

fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<PlanError>() {
        Some(plan_err) => {
            let body = serde_json::json!({
                "error_code": plan_err.error_code(),
                "message": plan_err.to_string(),
                "error": plan_err,
            });
            match serde_json::to_string_pretty(&body) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", plan_err),
            }
        }
        None => eprintln!("Error: {:#}", err),
    }
}
