use proptest::prelude::*;
use thruster_propulsion::{
    Divergence, DivergenceModel, HallThrusterConfig, IonEngineConfig, PropulsionCalculator,
};

fn ion_config(tau_geom: f64, tau_trans: f64, model: DivergenceModel, angle: f64) -> IonEngineConfig {
    let divergence = Divergence::new(model, angle).expect("divergence");
    IonEngineConfig::new(0.01, 0.002, tau_geom, tau_trans, divergence).expect("config")
}

fn model() -> impl Strategy<Value = DivergenceModel> {
    prop_oneof![Just(DivergenceModel::Cosine), Just(DivergenceModel::Gaussian)]
}

proptest! {
    #[test]
    fn ion_losses_never_increase_thrust(
        va in 100.0f64..10_000.0,
        ib in 0.01f64..20.0,
        tau_geom in 0.05f64..=1.0,
        tau_trans in 0.05f64..=1.0,
        angle in 0.0f64..80.0,
        model in model(),
    ) {
        let calc = PropulsionCalculator::default();
        let config = ion_config(tau_geom, tau_trans, model, angle);
        let r = calc.ion_engine(&config, va, ib, "Xenon").unwrap();
        prop_assert!(r.thrust_n > 0.0);
        prop_assert!(r.thrust_n <= r.ideal_thrust_n * (1.0 + 1e-12));
        prop_assert!(r.tau_imp > 0.0 && r.tau_imp <= 1.0);
        prop_assert!(r.eta_div > 0.0 && r.eta_div <= 1.0);
        prop_assert!(r.effective_beam_current_a <= r.beam_current_a);
    }

    #[test]
    fn ion_isp_non_decreasing_in_voltage(
        va in 100.0f64..8_000.0,
        dv in 0.0f64..2_000.0,
        ib in 0.01f64..20.0,
        gas in prop_oneof![Just("Xenon"), Just("Krypton"), Just("Argon")],
    ) {
        let calc = PropulsionCalculator::default();
        let config = ion_config(0.7, 0.95, DivergenceModel::Cosine, 5.0);
        let low = calc.ion_engine(&config, va, ib, gas).unwrap();
        let high = calc.ion_engine(&config, va + dv, ib, gas).unwrap();
        prop_assert!(high.isp_s >= low.isp_s * (1.0 - 1e-12));
    }

    #[test]
    fn impingement_is_unity_below_limit_and_ratio_above(
        va in 100.0f64..5_000.0,
        ib in 0.001f64..50.0,
    ) {
        let calc = PropulsionCalculator::default();
        let config = ion_config(0.7, 0.95, DivergenceModel::Gaussian, 10.0);
        let r = calc.ion_engine(&config, va, ib, "Argon").unwrap();
        if ib <= r.space_charge_current_a {
            prop_assert_eq!(r.tau_imp, 1.0);
            prop_assert!(!r.is_space_charge_limited());
        } else {
            prop_assert!(r.tau_imp < 1.0);
            prop_assert!((r.tau_imp - r.space_charge_current_a / ib).abs() < 1e-15);
            prop_assert!(r.is_space_charge_limited());
        }
    }

    #[test]
    fn hall_isp_increases_with_discharge_voltage(
        vd in 50.0f64..1_500.0,
        dv in 1.0f64..500.0,
        mdot in 1e-7f64..1e-4,
    ) {
        let calc = PropulsionCalculator::default();
        let divergence = Divergence::new(DivergenceModel::Cosine, 30.0).unwrap();
        let config = HallThrusterConfig::new(0.6, 0.85, divergence).unwrap();
        let low = calc.hall_thruster(&config, vd, mdot, "Xenon").unwrap();
        let high = calc.hall_thruster(&config, vd + dv, mdot, "Xenon").unwrap();
        prop_assert!(high.isp_s > low.isp_s);
        prop_assert!(high.thrust_n > low.thrust_n);
    }
}
