//! End-to-end properties of the simulation core.
//!
//! Covers the contract the playback layer relies on: determinism, sample
//! counts, velocity bounds, reset semantics, RK4 order of convergence and
//! mechanical-energy conservation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use crane_core::energy::total_energy;
use crane_core::{CraneSimulation, Rk4Integrator, RunState};
use crane_types::{Axis, CraneParameters, StateVector};

/// Parameters with every velocity cap removed.
fn uncapped(params: &mut CraneParameters) {
    for axis in Axis::ALL {
        params.set_velocity_cap(axis, f64::INFINITY).unwrap();
    }
}

// ============================================================================
// Example scenario: a crane at rest stays at rest
// ============================================================================

#[test]
fn test_rest_scenario_produces_101_zero_samples() {
    let mut sim = CraneSimulation::new();
    sim.params_mut().set_target_time(1.0).unwrap();
    for axis in Axis::ALL {
        sim.params_mut().set_torque(axis, 0.0).unwrap();
    }
    sim.run().unwrap();

    assert_eq!(sim.times().len(), 101);
    assert_eq!(sim.times()[0], 0.0);
    for i in 0..sim.times().len() {
        assert_eq!(sim.theta()[i], 0.0);
        assert_eq!(sim.phi()[i], 0.0);
        assert_eq!(sim.psi()[i], 0.0);
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_parameters_give_bit_identical_trajectories() {
    let configure = || {
        let mut sim = CraneSimulation::new();
        sim.params_mut().set_target_time(2.0).unwrap();
        sim.params_mut().set_torque(Axis::Slew, 240.0).unwrap();
        sim.params_mut().set_torque(Axis::Luff, -90.0).unwrap();
        sim.params_mut().set_torque(Axis::Hoist, 15.0).unwrap();
        sim.run().unwrap();
        sim
    };

    let first = configure();
    let second = configure();

    assert_eq!(first.times().len(), second.times().len());
    for ((ta, sa), (tb, sb)) in first.trajectory().iter().zip(second.trajectory().iter()) {
        assert_eq!(ta.to_bits(), tb.to_bits());
        for (x, y) in sa.to_vector().iter().zip(sb.to_vector().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}

// ============================================================================
// Velocity bound
// ============================================================================

#[test]
fn test_every_sample_honors_velocity_caps() {
    let mut sim = CraneSimulation::new();
    sim.params_mut().set_target_time(2.0).unwrap();
    // Torques far above what the drives could sustain at rated speed.
    sim.params_mut().set_torque(Axis::Slew, 50_000.0).unwrap();
    sim.params_mut().set_torque(Axis::Luff, 40_000.0).unwrap();
    sim.params_mut().set_torque(Axis::Hoist, 8_000.0).unwrap();
    sim.run().unwrap();

    let thetad_max = sim.params().velocity_cap(Axis::Slew);
    let phid_max = sim.params().velocity_cap(Axis::Luff);
    let psid_max = sim.params().velocity_cap(Axis::Hoist);
    assert!(thetad_max.is_finite());

    let mut saturated = false;
    for (_, state) in sim.trajectory().iter() {
        assert!(state.theta_dot.abs() <= thetad_max);
        assert!(state.phi_dot.abs() <= phid_max);
        assert!(state.psi_dot.abs() <= psid_max);
        if state.theta_dot.abs() == thetad_max {
            saturated = true;
        }
    }
    assert!(saturated, "these torques should drive the slew into its cap");
}

// ============================================================================
// Sample count
// ============================================================================

#[test]
fn test_sample_count_is_floor_quotient_plus_one() {
    for &(target_time, dt, expected) in &[
        (1.0, 0.01, 101_usize),
        (2.0, 0.25, 9),
        (1.0, 0.3, 4),
        (10.0, 0.01, 1001),
    ] {
        let mut sim = CraneSimulation::new();
        sim.params_mut().set_dt(dt).unwrap();
        sim.params_mut().set_target_time(target_time).unwrap();
        sim.run().unwrap();

        assert_eq!(
            sim.times().len(),
            expected,
            "target_time={target_time}, dt={dt}"
        );
        assert_eq!(sim.times()[0], 0.0);
        let last = *sim.times().last().unwrap();
        assert!(last >= target_time - dt - 1e-12);
        assert!(last <= target_time + 1e-12);
    }
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_empties_trajectory_and_returns_idle() {
    let mut sim = CraneSimulation::new();
    sim.params_mut().set_target_time(0.5).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.state(), RunState::Complete);

    sim.reset();
    assert_eq!(sim.state(), RunState::Idle);
    assert!(sim.trajectory().is_empty());
    assert!(sim.reactions().is_empty());

    // A fresh run starts over from the canonical zero state.
    sim.run().unwrap();
    assert_eq!(sim.state(), RunState::Complete);
}

// ============================================================================
// Config rejection
// ============================================================================

#[test]
fn test_bad_values_are_rejected_and_prior_values_kept() {
    let mut sim = CraneSimulation::new();
    let dt = sim.params().dt();
    let m1 = sim.params().mass(Axis::Slew);

    assert!(sim.params_mut().set_dt(0.0).unwrap_err().is_config_error());
    assert!(sim
        .params_mut()
        .set_target_time(0.0)
        .unwrap_err()
        .is_config_error());
    assert!(sim
        .params_mut()
        .set_mass(Axis::Slew, -1.0)
        .unwrap_err()
        .is_config_error());

    assert_eq!(sim.params().dt(), dt);
    assert_eq!(sim.params().mass(Axis::Slew), m1);
    // The untouched parameters still run.
    sim.run().unwrap();
}

// ============================================================================
// Divergence
// ============================================================================

#[test]
fn test_diverged_run_leaves_no_partial_trajectory() {
    let mut sim = CraneSimulation::new();
    uncapped(sim.params_mut());
    sim.params_mut().set_torque(Axis::Slew, 1e300).unwrap();

    let err = sim.run().unwrap_err();
    assert!(err.is_diverged());
    assert!(sim.trajectory().is_empty());
    assert!(sim.reactions().is_empty());
    assert_eq!(sim.state(), RunState::Idle);
}

// ============================================================================
// Accuracy: RK4 order of convergence
// ============================================================================

/// Final swing angle of a free run from a displaced payload.
fn run_swing(dt: f64, t_final: f64) -> f64 {
    let mut params = CraneParameters::default();
    params.set_dt(dt).unwrap();
    params.set_target_time(t_final).unwrap();
    uncapped(&mut params);

    let mut integrator = Rk4Integrator::new();
    let initial = StateVector::new(0.0, 0.0, 0.1, 0.0, 0.0, 0.0);
    integrator.run(&params, initial).unwrap();
    let trajectory = integrator.trajectory();
    trajectory.state(trajectory.len() - 1).unwrap().psi
}

/// Halving the step should cut the global error by ~2⁴ = 16.
#[test]
fn test_rk4_order_of_convergence() {
    let t_final = 1.0;

    // Fine-step reference as ground truth.
    let reference = run_swing(1e-4, t_final);

    let err_h1 = (run_swing(0.01, t_final) - reference).abs();
    let err_h2 = (run_swing(0.005, t_final) - reference).abs();

    let ratio = err_h1 / err_h2;
    assert!(
        ratio > 10.0 && ratio < 25.0,
        "RK4 convergence ratio should be ~16 (O(dt⁴)), got {ratio:.2} \
         (err_h1={err_h1:.2e}, err_h2={err_h2:.2e})"
    );
}

// ============================================================================
// Conservation
// ============================================================================

/// Zero torque, zero gravity, uncapped rates: total mechanical energy must
/// hold to within integration error across the whole run.
#[test]
fn test_energy_conservation_without_torque_and_gravity() {
    let mut params = CraneParameters::default();
    params.set_gravity(0.0).unwrap();
    params.set_target_time(2.0).unwrap();
    uncapped(&mut params);

    let initial = StateVector::new(0.0, 0.2, 0.3, 0.3, 0.1, 0.2);
    let mut integrator = Rk4Integrator::new();
    integrator.run(&params, initial).unwrap();

    let e0 = total_energy(&initial, &params);
    assert!(e0 > 0.0);
    for (t, state) in integrator.trajectory().iter() {
        let e = total_energy(&state, &params);
        assert!(
            ((e - e0) / e0).abs() < 1e-8,
            "energy drifted at t={t}: {e} vs {e0}"
        );
    }
}

/// With gravity back on, energy is still conserved in free swing (no torque,
/// no caps) — the gravity terms derive from the same potential the energy
/// query integrates.
#[test]
fn test_energy_conservation_in_free_swing() {
    let mut params = CraneParameters::default();
    params.set_target_time(2.0).unwrap();
    uncapped(&mut params);

    let initial = StateVector::new(0.0, 0.0, 0.4, 0.0, 0.0, 0.0);
    let mut integrator = Rk4Integrator::new();
    integrator.run(&params, initial).unwrap();

    let e0 = total_energy(&initial, &params);
    for (t, state) in integrator.trajectory().iter() {
        let e = total_energy(&state, &params);
        assert!(
            ((e - e0) / e0).abs() < 1e-8,
            "energy drifted at t={t}: {e} vs {e0}"
        );
    }
}

// ============================================================================
// Reaction series
// ============================================================================

#[test]
fn test_reactions_track_weight_at_rest() {
    let mut sim = CraneSimulation::new();
    sim.params_mut().set_target_time(0.5).unwrap();
    sim.run().unwrap();

    let total_mass = sim.params().mass(Axis::Slew)
        + sim.params().mass(Axis::Luff)
        + sim.params().mass(Axis::Hoist);
    let weight = total_mass * sim.params().g();

    assert_eq!(sim.reactions().len(), sim.times().len());
    for sample in sim.reactions() {
        assert_relative_eq!(sample.force.z, weight, epsilon = 1e-6);
        assert_relative_eq!(sample.force.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(sample.force.y, 0.0, epsilon = 1e-9);
    }
}
