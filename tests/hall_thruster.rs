use thruster_lab::physics::units::{mg_s_to_kg_s, n_to_mn};
use thruster_lab::propulsion::{
    Divergence, HallThrusterConfig, PerformanceError, PerformanceResult, PropulsionCalculator,
    ThrusterKind,
};

const Q: f64 = 1.602_176_634e-19;
const AMU: f64 = 1.660_539_066_60e-27;
const XENON_AMU: f64 = 131.293;

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    ((a - b) / b).abs() < tol
}

#[test]
fn xenon_reference_thrust_is_exact() {
    let calc = PropulsionCalculator::default();
    let r = calc
        .calculate_hall_thruster(400.0, 5e-6, "Xenon", 0.6, 0.85, "cos", 30.0)
        .expect("hall thruster");

    let m_i = XENON_AMU * AMU;
    let v_e0 = (0.6 * 2.0 * Q * 400.0 / m_i).sqrt();
    let cos30 = 30f64.to_radians().cos();
    assert!(rel_close(r.exhaust_velocity_m_s, v_e0, 1e-12));
    assert!(rel_close(r.thrust_n, 5e-6 * 0.85 * v_e0 * cos30, 1e-12));
    assert!(rel_close(r.isp_s, v_e0 * cos30 / 9.80665, 1e-12));
    assert!(rel_close(r.eta_div, cos30, 1e-12));
}

#[test]
fn power_and_current_follow_mass_flow() {
    let calc = PropulsionCalculator::default();
    let r = calc
        .calculate_hall_thruster(300.0, mg_s_to_kg_s(5.0), "Xenon", 0.6, 0.85, "cos", 30.0)
        .expect("hall thruster");
    let m_i = XENON_AMU * AMU;
    let ib = 5e-6 * Q / m_i;
    assert!(rel_close(r.beam_current_a, ib, 1e-12));
    assert!(rel_close(r.power_w, 300.0 * ib / 0.6, 1e-12));
    // A 5 mg/s xenon thruster at 300 V sits in the tens of millinewtons.
    let thrust_mn = n_to_mn(r.thrust_n);
    assert!(thrust_mn > 10.0 && thrust_mn < 200.0, "thrust {thrust_mn} mN");
    assert!(r.thrust_to_power_mn_kw() > 0.0);
}

#[test]
fn lighter_gas_gives_higher_isp() {
    let calc = PropulsionCalculator::default();
    let divergence = Divergence::parse("cos", 30.0).unwrap();
    let engine = HallThrusterConfig::new(0.6, 0.85, divergence).unwrap();
    let xe = calc.hall_thruster(&engine, 400.0, 5e-6, "Xenon").unwrap();
    let ar = calc.hall_thruster(&engine, 400.0, 5e-6, "Argon").unwrap();
    assert!(ar.isp_s > xe.isp_s);
    // Same mass flow, faster exhaust.
    assert!(ar.thrust_n > xe.thrust_n);
    assert!(ar.power_w > xe.power_w);
}

#[test]
fn efficiencies_out_of_range_are_rejected() {
    let calc = PropulsionCalculator::default();
    for (eta_acc, tau_prop) in [(0.0, 0.85), (1.5, 0.85), (0.6, 0.0), (0.6, 1.01)] {
        let err = calc
            .calculate_hall_thruster(400.0, 5e-6, "Xenon", eta_acc, tau_prop, "cos", 30.0)
            .unwrap_err();
        assert!(matches!(err, PerformanceError::InvalidPhysicalParameter { .. }));
    }
    assert!(
        calc.calculate_hall_thruster(400.0, 0.0, "Xenon", 0.6, 0.85, "cos", 30.0)
            .is_err()
    );
    assert!(
        calc.calculate_hall_thruster(-400.0, 5e-6, "Xenon", 0.6, 0.85, "cos", 30.0)
            .is_err()
    );
}

#[test]
fn gaussian_model_is_accepted() {
    let calc = PropulsionCalculator::default();
    let r = calc
        .calculate_hall_thruster(400.0, 5e-6, "Krypton", 0.6, 0.85, "gaussian", 30.0)
        .expect("hall thruster");
    let theta = 30f64.to_radians();
    assert!(rel_close(r.eta_div, (-theta * theta / 2.0).exp(), 1e-12));
}

#[test]
fn result_enum_exposes_common_fields() {
    let calc = PropulsionCalculator::default();
    let hall: PerformanceResult = calc
        .calculate_hall_thruster(400.0, 5e-6, "Xenon", 0.6, 0.85, "cos", 30.0)
        .unwrap()
        .into();
    assert_eq!(hall.kind(), ThrusterKind::Hall);
    assert_eq!(hall.gas(), "Xenon");
    assert!(hall.thrust_n() > 0.0);
    assert!(hall.isp_s() > 0.0);
}

#[test]
fn unknown_gas_is_reported() {
    let calc = PropulsionCalculator::default();
    let err = calc
        .calculate_hall_thruster(400.0, 5e-6, "Unobtainium", 0.6, 0.85, "cos", 30.0)
        .unwrap_err();
    assert_eq!(err, PerformanceError::UnknownGas("Unobtainium".into()));
}

#[test]
fn right_angle_cosine_divergence_is_rejected() {
    let calc = PropulsionCalculator::default();
    let err = calc
        .calculate_hall_thruster(400.0, 5e-6, "Xenon", 0.6, 0.85, "cos", 90.0)
        .unwrap_err();
    assert!(matches!(
        err,
        PerformanceError::InvalidPhysicalParameter {
            name: "divergence_angle_deg",
            ..
        }
    ));
}

#[test]
fn validated_config_reports_its_inputs() {
    let engine = HallThrusterConfig::new(0.6, 0.85, Divergence::parse("gauss", 15.0).unwrap())
        .unwrap();
    assert_eq!(engine.eta_acc(), 0.6);
    assert_eq!(engine.tau_prop(), 0.85);
    assert_eq!(engine.divergence().angle_deg(), 15.0);
}
