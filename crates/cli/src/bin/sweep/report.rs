use thruster_lab::physics::units::n_to_mn;
use thruster_lab::propulsion::{HallPerformance, IonPerformance};
use thruster_lab::sweep::analysis::{OperatingWindow, summarize_hall, summarize_ion};
use tracing::warn;

pub(super) fn print_ion_summary(results: &[IonPerformance]) {
    let window = OperatingWindow::typical_ion();
    let Some(summary) = summarize_ion(results, &window) else {
        warn!(
            "no ion engine points inside the {} summary window",
            window.gas
        );
        return;
    };

    println!(
        "=== Ion Engine Summary ({}, {:.0}-{:.0} V, {:.1}-{:.1} A) ===",
        window.gas, window.voltage_v.0, window.voltage_v.1, window.second_axis.0, window.second_axis.1
    );
    println!("Points            : {}", summary.points);
    println!("Thrust            : {:.1} mN", n_to_mn(summary.thrust_n));
    println!("Isp               : {:.1} s", summary.isp_s);
    println!("Power             : {:.1} W", summary.power_w);
    println!("Perveance margin  : {:.2}", summary.perveance_margin);
    println!("Thrust efficiency : {:.3}", summary.thrust_efficiency);
    if summary.space_charge_limited > 0 {
        warn!(
            "{} of {} summarized points are space-charge limited",
            summary.space_charge_limited, summary.points
        );
    }
}

pub(super) fn print_hall_summary(results: &[HallPerformance]) {
    let window = OperatingWindow::typical_hall();
    let Some(summary) = summarize_hall(results, &window) else {
        warn!(
            "no Hall thruster points inside the {} summary window",
            window.gas
        );
        return;
    };

    println!(
        "=== Hall Thruster Summary ({}, {:.0}-{:.0} V) ===",
        window.gas, window.voltage_v.0, window.voltage_v.1
    );
    println!("Points            : {}", summary.points);
    println!("Thrust            : {:.1} mN", n_to_mn(summary.thrust_n));
    println!("Isp               : {:.1} s", summary.isp_s);
    println!("Power (approx.)   : {:.1} W", summary.power_w);
}
