mod common;

use common::{
    SEED_CAPITAL, baseline_consumer, baseline_parameters, market_with_adjustment_cost,
    parameters_with_adjustment_cost, renewable_technology,
};
use energy_transition::ModelError;
use energy_transition::consumer::Consumer;
use energy_transition::sectors::{RenewableCapital, renewable};
use energy_transition::sim::{Simulator, run, steady_state};

#[test]
fn renewable_reference_values() {
    let tech = renewable_technology();
    let market = market_with_adjustment_cost(0.2);

    let k = renewable::capital_demand(1.0, market.gross_interest_rate(), &tech).unwrap();
    assert!((k - 1.023146409367968).abs() < 1e-9, "capital demand {k}");

    let pi = renewable::profits(1.0, 1.0, market.gross_interest_rate(), &tech).unwrap();
    assert!((pi - 2.602).abs() < 1e-9, "profits {pi}");
}

#[test]
fn baseline_run_stays_finite_and_clears_every_period() {
    let consumer = baseline_consumer();
    let out = Simulator::new(consumer, baseline_parameters())
        .run(50, SEED_CAPITAL)
        .unwrap();

    assert_eq!(out.trajectory.len(), 50);
    assert_eq!(out.periods.len(), 48);
    for (i, k) in out.trajectory.as_slice().iter().enumerate() {
        assert!(k.is_finite() && *k >= 0.0, "capital at {i} is {k}");
    }
    for r in &out.periods {
        let supplied = r.renewable.output + r.non_renewable.output;
        assert!(
            (supplied - consumer.demand()).abs() < 1e-6,
            "period {} supplied {supplied}",
            r.period
        );
        assert!(r.energy_price > 0.0);
        assert_eq!(out.trajectory.get(r.period), Some(r.capital));
    }
}

#[test]
fn baseline_oscillates_around_steady_state() {
    let params = baseline_parameters();
    let ss = steady_state(&baseline_consumer(), &params, RenewableCapital::Flexible).unwrap();
    let trajectory = run(50, SEED_CAPITAL, baseline_consumer(), &params).unwrap();

    let levels = trajectory.as_slice();
    let min = levels.iter().copied().fold(f64::INFINITY, f64::min);
    let max = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(min < ss.capital && ss.capital < max);
    assert!(min > 550.0 && max < 660.0, "range [{min}, {max}]");
}

#[test]
fn steady_state_is_a_fixed_point_of_the_dynamics() {
    let params = baseline_parameters();
    let ss = steady_state(&baseline_consumer(), &params, RenewableCapital::Flexible).unwrap();

    let trajectory = run(50, [ss.capital, ss.capital], baseline_consumer(), &params).unwrap();
    for k in trajectory.as_slice() {
        assert!((k - ss.capital).abs() < 1e-3, "drifted to {k}");
    }
}

#[test]
fn prohibitive_adjustment_cost_freezes_capital() {
    let params = parameters_with_adjustment_cost(1e6);
    let trajectory = run(50, SEED_CAPITAL, baseline_consumer(), &params).unwrap();
    for k in trajectory.as_slice() {
        assert!((k - 600.0).abs() < 1e-4, "moved to {k}");
    }
}

#[test]
fn installed_renewables_keep_the_run_bounded() {
    let out = Simulator::new(baseline_consumer(), baseline_parameters())
        .with_renewable_capital(RenewableCapital::Installed(50.0))
        .unwrap()
        .run(50, SEED_CAPITAL)
        .unwrap();
    for r in &out.periods {
        assert_eq!(r.renewable_capital, 50.0);
        assert!(r.capital > 550.0 && r.capital < 660.0);
    }
}

#[test]
fn oversized_renewables_have_no_equilibrium() {
    let err = Simulator::new(baseline_consumer(), baseline_parameters())
        .with_renewable_capital(RenewableCapital::Installed(1e9))
        .unwrap()
        .run(10, SEED_CAPITAL)
        .unwrap_err();
    assert!(matches!(err, ModelError::NoEquilibrium { .. }), "{err:?}");
}
