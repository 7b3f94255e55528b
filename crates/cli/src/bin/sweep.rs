use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thruster_lab::config::{load_or_default, resolve_config_path};
use thruster_lab::export;
use thruster_lab::propulsion::ThrusterKind;
use thruster_lab::sweep::SweepPlan;
use tracing::{error, info};

#[path = "common/logging.rs"]
mod logging;
#[path = "sweep/report.rs"]
mod report;

/// Run parametric sweeps and write CSV (and optionally JSON) tables.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ion engine / Hall thruster parametric sweep generator"
)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML). Falls back to
    /// THRUSTER_LAB_CONFIG, then configs/lab.toml, then built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving ion_sweep.csv / hall_sweep.csv
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Which thruster family to sweep
    #[arg(long, value_enum, default_value_t = ThrusterSelection::Both)]
    thruster: ThrusterSelection,

    /// Restrict the sweep to these gases (repeatable; defaults to configuration)
    #[arg(long = "gas")]
    gases: Vec<String>,

    /// Also write pretty-printed JSON tables next to the CSV files
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq)]
enum ThrusterSelection {
    Ion,
    Hall,
    Both,
}

impl ThrusterSelection {
    fn includes(self, kind: ThrusterKind) -> bool {
        match self {
            ThrusterSelection::Both => true,
            ThrusterSelection::Ion => kind == ThrusterKind::Ion,
            ThrusterSelection::Hall => kind == ThrusterKind::Hall,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match resolve_config_path(cli.config.as_deref()) {
        Some(path) => info!("loading configuration from {}", path.display()),
        None => info!("no configuration file found, using built-in defaults"),
    }
    let config = load_or_default(cli.config.as_deref())?;
    let gas_override = (!cli.gases.is_empty()).then_some(cli.gases.as_slice());
    let plan = SweepPlan::from_config(&config, gas_override)?;

    let mut attempted = 0usize;
    let mut succeeded = 0usize;

    if cli.thruster.includes(ThrusterKind::Ion) {
        attempted += 1;
        match run_ion(&cli, &plan) {
            Ok(()) => succeeded += 1,
            Err(err) => error!("ion engine sweep failed: {err:#}"),
        }
    }

    if cli.thruster.includes(ThrusterKind::Hall) {
        attempted += 1;
        match run_hall(&cli, &plan) {
            Ok(()) => succeeded += 1,
            Err(err) => error!("Hall thruster sweep failed: {err:#}"),
        }
    }

    if succeeded == 0 {
        return Err(anyhow::anyhow!("all {attempted} requested sweeps failed"));
    }
    info!(
        "sweep complete ({succeeded}/{attempted} successful), results in {}",
        cli.output_dir.display()
    );
    Ok(())
}

fn run_ion(cli: &Cli, plan: &SweepPlan) -> anyhow::Result<()> {
    info!("running ion engine sweep ({} points)", plan.ion.len());
    let results = plan.ion.run(&plan.calculator)?;

    let csv_path = cli.output_dir.join("ion_sweep.csv");
    export::ion::write_csv(&csv_path, &results)?;
    info!("saved {} data points to {}", results.len(), csv_path.display());
    if cli.json {
        let json_path = cli.output_dir.join("ion_sweep.json");
        export::json::write_results(&json_path, ThrusterKind::Ion, &results)?;
        info!("saved JSON table to {}", json_path.display());
    }

    report::print_ion_summary(&results);
    Ok(())
}

fn run_hall(cli: &Cli, plan: &SweepPlan) -> anyhow::Result<()> {
    info!("running Hall thruster sweep ({} points)", plan.hall.len());
    let results = plan.hall.run(&plan.calculator)?;

    let csv_path = cli.output_dir.join("hall_sweep.csv");
    export::hall::write_csv(&csv_path, &results)?;
    info!("saved {} data points to {}", results.len(), csv_path.display());
    if cli.json {
        let json_path = cli.output_dir.join("hall_sweep.json");
        export::json::write_results(&json_path, ThrusterKind::Hall, &results)?;
        info!("saved JSON table to {}", json_path.display());
    }

    report::print_hall_summary(&results);
    Ok(())
}
