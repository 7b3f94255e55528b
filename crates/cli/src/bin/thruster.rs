use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thruster_lab::config::load_or_default;
use thruster_lab::physics::units::{kg_s_to_mg_s, mg_s_to_kg_s, n_to_mn};
use thruster_lab::propulsion::PerformanceResult;
use thruster_lab::sweep::calculator_from_config;
use tracing::debug;

#[path = "common/logging.rs"]
mod logging;

/// Evaluate a single ion engine or Hall thruster operating point.
#[derive(Parser, Debug)]
#[command(author, version, about = "Single operating-point thruster calculator")]
struct Cli {
    /// Configuration file (TOML, JSON or YAML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the full result record as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Gridded ion engine
    Ion(IonArgs),
    /// Hall-effect thruster
    Hall(HallArgs),
}

#[derive(Args, Debug)]
struct IonArgs {
    /// Accelerating voltage (V)
    #[arg(long)]
    voltage: f64,

    /// Requested beam current (A)
    #[arg(long)]
    current: f64,

    /// Propellant gas (case-insensitive)
    #[arg(long, default_value = "Xenon")]
    gas: String,

    /// Grid area in m² (defaults to configuration)
    #[arg(long)]
    grid_area: Option<f64>,

    /// Grid gap in m (defaults to configuration)
    #[arg(long)]
    grid_gap: Option<f64>,

    /// Geometric grid transparency (defaults to configuration)
    #[arg(long)]
    tau_geom: Option<f64>,

    /// Ion transmission efficiency (defaults to configuration)
    #[arg(long)]
    tau_trans: Option<f64>,

    /// Divergence model: cos or gaussian (defaults to configuration)
    #[arg(long)]
    divergence_model: Option<String>,

    /// Divergence half-angle in degrees (defaults to configuration)
    #[arg(long)]
    divergence_angle: Option<f64>,
}

#[derive(Args, Debug)]
struct HallArgs {
    /// Discharge voltage (V)
    #[arg(long)]
    voltage: f64,

    /// Anode mass flow in mg/s
    #[arg(long)]
    mass_flow_mg_s: f64,

    /// Propellant gas (case-insensitive)
    #[arg(long, default_value = "Xenon")]
    gas: String,

    /// Acceleration efficiency (defaults to configuration)
    #[arg(long)]
    eta_acc: Option<f64>,

    /// Propellant utilization (defaults to configuration)
    #[arg(long)]
    tau_prop: Option<f64>,

    /// Divergence model: cos or gaussian (defaults to configuration)
    #[arg(long)]
    divergence_model: Option<String>,

    /// Divergence angle in degrees (defaults to configuration)
    #[arg(long)]
    divergence_angle: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = load_or_default(cli.config.as_deref())?;
    let calculator = calculator_from_config(&config)?;
    debug!(gases = calculator.gases().len(), "calculator ready");

    let result: PerformanceResult = match &cli.command {
        Command::Ion(args) => {
            let ion = &config.ion_engine;
            calculator
                .calculate_ion_engine(
                    args.voltage,
                    args.current,
                    &args.gas,
                    args.grid_area.unwrap_or(ion.geometry.grid_area_m2),
                    args.grid_gap.unwrap_or(ion.geometry.grid_gap_m),
                    args.tau_geom.unwrap_or(ion.geometry.tau_geom),
                    args.tau_trans.unwrap_or(ion.losses.tau_trans),
                    args.divergence_model
                        .as_deref()
                        .unwrap_or(ion.divergence_model()),
                    args.divergence_angle.unwrap_or(ion.divergence_angle_deg()),
                )?
                .into()
        }
        Command::Hall(args) => {
            let hall = &config.hall_thruster;
            calculator
                .calculate_hall_thruster(
                    args.voltage,
                    mg_s_to_kg_s(args.mass_flow_mg_s),
                    &args.gas,
                    args.eta_acc.unwrap_or(hall.eta_acc),
                    args.tau_prop.unwrap_or(hall.tau_prop),
                    args.divergence_model
                        .as_deref()
                        .unwrap_or(hall.divergence_model()),
                    args.divergence_angle.unwrap_or(hall.divergence_angle_deg()),
                )?
                .into()
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &PerformanceResult) {
    match result {
        PerformanceResult::Ion(r) => {
            println!("=== Ion Engine ({}) ===", r.gas);
            println!(
                "Operating point : Va = {:.1} V, Ib = {:.3} A",
                r.accel_voltage_v, r.beam_current_a
            );
            println!(
                "Thrust          : {:.3} mN (ideal {:.3} mN, efficiency {:.3})",
                n_to_mn(r.thrust_n),
                n_to_mn(r.ideal_thrust_n),
                r.thrust_efficiency()
            );
            println!("Specific impulse: {:.1} s", r.isp_s);
            println!(
                "Power           : {:.1} W ({:.2} mN/kW)",
                r.power_w,
                r.thrust_to_power_mn_kw()
            );
            println!(
                "Mass flow       : {:.4} mg/s",
                kg_s_to_mg_s(r.mass_flow_kg_s)
            );
            println!(
                "Losses          : tau_geom = {:.3}, tau_trans = {:.3}, tau_imp = {:.3}, eta_div = {:.4}",
                r.tau_geom, r.tau_trans, r.tau_imp, r.eta_div
            );
            println!(
                "Space charge    : I_CL = {:.3} A, J_CL = {:.2} A/m², perveance margin = {:.3} ({})",
                r.space_charge_current_a,
                r.current_density_limit_a_m2,
                r.perveance_margin,
                r.regime.as_str()
            );
        }
        PerformanceResult::Hall(r) => {
            println!("=== Hall Thruster ({}) ===", r.gas);
            println!(
                "Operating point : Vd = {:.1} V, mdot = {:.4} mg/s",
                r.discharge_voltage_v,
                kg_s_to_mg_s(r.mass_flow_kg_s)
            );
            println!("Thrust          : {:.3} mN", n_to_mn(r.thrust_n));
            println!("Specific impulse: {:.1} s", r.isp_s);
            println!(
                "Power (approx.) : {:.1} W ({:.2} mN/kW)",
                r.power_w,
                r.thrust_to_power_mn_kw()
            );
            println!(
                "Losses          : eta_acc = {:.3}, tau_prop = {:.3}, eta_div = {:.4}",
                r.eta_acc, r.tau_prop, r.eta_div
            );
            println!("Equiv. current  : {:.4} A", r.beam_current_a);
        }
    }
}
