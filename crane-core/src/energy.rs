//! Energy queries — kinetic and potential energy of a crane state.
//!
//! Used as a diagnostic and by the conservation tests: with zero applied
//! torque and zero gravity the continuous-time model keeps
//! [`total_energy`] constant, and RK4 tracks it to within integration error.

use crate::dynamics::mass_matrix;
use crane_types::{Axis, CraneParameters, StateVector};

/// Kinetic energy `½·q̇ᵀ·M(q)·q̇` (J).
#[must_use]
pub fn kinetic_energy(state: &StateVector, params: &CraneParameters) -> f64 {
    let m = mass_matrix(state, params);
    0.5 * m.slew * state.theta_dot * state.theta_dot
        + 0.5 * m.luff * state.phi_dot * state.phi_dot
        + 0.5 * m.swing * state.psi_dot * state.psi_dot
        + m.coupling * state.phi_dot * state.psi_dot
}

/// Gravitational potential energy (J).
///
/// The slew assembly's center of mass never changes height, so only the boom
/// and the payload contribute.
#[must_use]
pub fn potential_energy(state: &StateVector, params: &CraneParameters) -> f64 {
    let m2 = params.mass(Axis::Luff);
    let m3 = params.mass(Axis::Hoist);
    let z2 = params.h() + params.b() * state.phi.cos();
    let z3 = params.h() + params.l1() * state.phi.cos() - params.l2() * state.psi.cos();
    params.g() * (m2 * z2 + m3 * z3)
}

/// Total mechanical energy (J).
#[must_use]
pub fn total_energy(state: &StateVector, params: &CraneParameters) -> f64 {
    kinetic_energy(state, params) + potential_energy(state, params)
}
