//! Equations of motion for the three-link crane.
//!
//! The crane is modeled as three coupled rigid bodies in generalized
//! coordinates `q = (θ, φ, ψ)`:
//!
//! - the slew assembly (tower head, deck and counterweight) turning about the
//!   vertical base axis,
//! - the boom, pivoted at slew-frame point `(a, 0, h)` with inclination φ
//!   measured from the vertical,
//! - the payload/hook block, suspended from the boom tip by a line of length
//!   `l2`, swinging by ψ from plumb in the boom's vertical plane.
//!
//! The manipulator equation `M(q)·q̈ + c(q, q̇) + G(q) = τ` is evaluated in
//! closed form: [`mass_matrix`] builds `M`, [`bias_forces`] the Coriolis/
//! centrifugal vector derived from the Christoffel symbols of `M`, and
//! [`gravity_forces`] the gradient of the potential. The slew row of `M` is
//! decoupled (`M_θφ = M_θψ = 0` — every center of mass moves azimuthally when
//! the crane slews, radially/vertically when it luffs or swings), so
//! [`forward_dynamics`] solves one scalar row and one 2×2 block.
//!
//! Everything here is stateless and deterministic: identical inputs produce
//! identical outputs, bit for bit.

use crane_types::{Axis, CraneError, CraneParameters, Result, StateVector};
use nalgebra::Vector3;

/// Divisors below this magnitude are reported as a degenerate configuration.
pub(crate) const SINGULAR_EPS: f64 = 1e-12;

/// Generalized mass matrix in `(θ, φ, ψ)` coordinates.
///
/// Only four entries are distinct: the decoupled slew inertia, the luff and
/// swing diagonal terms, and the luff↔swing coupling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassMatrix {
    /// `M_θθ` — inertia about the slew axis (configuration dependent).
    pub slew: f64,
    /// `M_φφ` — luff inertia (constant for fixed parameters).
    pub luff: f64,
    /// `M_ψψ` — swing inertia (constant for fixed parameters).
    pub swing: f64,
    /// `M_φψ = M_ψφ` — luff↔swing coupling.
    pub coupling: f64,
}

impl MassMatrix {
    /// Determinant of the luff/swing 2×2 block.
    #[must_use]
    pub fn luff_swing_det(&self) -> f64 {
        self.luff * self.swing - self.coupling * self.coupling
    }
}

/// Radial coordinates of the boom and payload centers of mass in the
/// slewing vertical plane.
fn radial_arms(state: &StateVector, params: &CraneParameters) -> (f64, f64) {
    let rho2 = params.a() + params.b() * state.phi.sin();
    let rho3 = params.a() + params.l1() * state.phi.sin() + params.l2() * state.psi.sin();
    (rho2, rho3)
}

/// Build the generalized mass matrix at `state`.
#[must_use]
pub fn mass_matrix(state: &StateVector, params: &CraneParameters) -> MassMatrix {
    let (m1, m2, m3) = (
        params.mass(Axis::Slew),
        params.mass(Axis::Luff),
        params.mass(Axis::Hoist),
    );
    let (r1, r2, r3) = (
        params.radius(Axis::Slew),
        params.radius(Axis::Luff),
        params.radius(Axis::Hoist),
    );
    let (rho2, rho3) = radial_arms(state, params);

    MassMatrix {
        slew: m1 * (r1 * r1 + params.c() * params.c())
            + m2 * (r2 * r2 + rho2 * rho2)
            + m3 * (r3 * r3 + rho3 * rho3),
        luff: m2 * (params.b() * params.b() + r2 * r2) + m3 * params.l1() * params.l1(),
        swing: m3 * (params.l2() * params.l2() + r3 * r3),
        coupling: m3 * params.l1() * params.l2() * (state.phi + state.psi).cos(),
    }
}

/// Partial derivatives of the slew inertia `M_θθ` with respect to (φ, ψ).
fn slew_inertia_gradient(state: &StateVector, params: &CraneParameters) -> (f64, f64) {
    let m2 = params.mass(Axis::Luff);
    let m3 = params.mass(Axis::Hoist);
    let (rho2, rho3) = radial_arms(state, params);
    let d_phi = 2.0 * state.phi.cos() * (m2 * params.b() * rho2 + m3 * params.l1() * rho3);
    let d_psi = 2.0 * m3 * params.l2() * state.psi.cos() * rho3;
    (d_phi, d_psi)
}

/// Coriolis and centrifugal torques `c(q, q̇)`.
///
/// Derived from the Christoffel symbols of the mass matrix, so the bias is
/// exactly consistent with [`mass_matrix`] and the model conserves energy
/// under zero torque and zero gravity. Zero whenever all rates are zero.
#[must_use]
pub fn bias_forces(state: &StateVector, params: &CraneParameters) -> Vector3<f64> {
    let (d_phi, d_psi) = slew_inertia_gradient(state, params);
    let k = params.mass(Axis::Hoist)
        * params.l1()
        * params.l2()
        * (state.phi + state.psi).sin();

    Vector3::new(
        (d_phi * state.phi_dot + d_psi * state.psi_dot) * state.theta_dot,
        -k * state.psi_dot * state.psi_dot - 0.5 * d_phi * state.theta_dot * state.theta_dot,
        -k * state.phi_dot * state.phi_dot - 0.5 * d_psi * state.theta_dot * state.theta_dot,
    )
}

/// Gravity torques `G(q)`.
///
/// The slew axis is vertical, so gravity never torques θ. At the all-zero
/// configuration (boom parked vertically, payload plumb) both remaining
/// components vanish: the zero state is an exact equilibrium.
#[must_use]
pub fn gravity_forces(state: &StateVector, params: &CraneParameters) -> Vector3<f64> {
    let m2 = params.mass(Axis::Luff);
    let m3 = params.mass(Axis::Hoist);
    Vector3::new(
        0.0,
        -(m2 * params.b() + m3 * params.l1()) * params.g() * state.phi.sin(),
        m3 * params.g() * params.l2() * state.psi.sin(),
    )
}

/// Solve `M·q̈ = rhs` for the generalized accelerations.
pub(crate) fn solve(m: &MassMatrix, rhs: Vector3<f64>) -> Result<Vector3<f64>> {
    if m.slew.abs() < SINGULAR_EPS {
        return Err(CraneError::SingularInertia {
            determinant: m.slew,
        });
    }
    let det = m.luff_swing_det();
    if det.abs() < SINGULAR_EPS {
        return Err(CraneError::SingularInertia { determinant: det });
    }
    Ok(Vector3::new(
        rhs.x / m.slew,
        (m.swing * rhs.y - m.coupling * rhs.z) / det,
        (m.luff * rhs.z - m.coupling * rhs.y) / det,
    ))
}

/// Generalized accelerations `(θ̈, φ̈, ψ̈)` under the applied torques.
pub fn forward_dynamics(state: &StateVector, params: &CraneParameters) -> Result<Vector3<f64>> {
    let m = mass_matrix(state, params);
    let tau = Vector3::new(
        params.torque(Axis::Slew),
        params.torque(Axis::Luff),
        params.torque(Axis::Hoist),
    );
    let rhs = tau - bias_forces(state, params) - gravity_forces(state, params);
    solve(&m, rhs)
}

/// State derivative `(θ̇, φ̇, ψ̇, θ̈, φ̈, ψ̈)` — the right-hand side handed to
/// the integrator.
pub fn derivative(state: &StateVector, params: &CraneParameters) -> Result<StateVector> {
    let accel = forward_dynamics(state, params)?;
    Ok(StateVector::new(
        state.theta_dot,
        state.phi_dot,
        state.psi_dot,
        accel.x,
        accel.y,
        accel.z,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> CraneParameters {
        CraneParameters::default()
    }

    #[test]
    fn test_mass_matrix_positive_definite() {
        let p = params();
        for &(phi, psi) in &[
            (0.0, 0.0),
            (0.3, -0.2),
            (1.2, 0.8),
            (-0.7, 2.0),
            (std::f64::consts::FRAC_PI_2, std::f64::consts::PI),
        ] {
            let state = StateVector::new(0.0, phi, psi, 0.0, 0.0, 0.0);
            let m = mass_matrix(&state, &p);
            assert!(m.slew > 0.0, "slew inertia must be positive");
            assert!(m.luff > 0.0);
            assert!(m.swing > 0.0);
            assert!(
                m.luff_swing_det() > 0.0,
                "luff/swing block must stay positive definite, det = {}",
                m.luff_swing_det()
            );
        }
    }

    #[test]
    fn test_zero_state_is_equilibrium() {
        let p = params();
        let state = StateVector::zero();
        let g = gravity_forces(&state, &p);
        let c = bias_forces(&state, &p);
        assert_relative_eq!(g.norm(), 0.0);
        assert_relative_eq!(c.norm(), 0.0);

        let d = derivative(&state, &p).unwrap();
        assert_eq!(d, StateVector::zero());
    }

    #[test]
    fn test_bias_vanishes_at_rest() {
        let p = params();
        let state = StateVector::new(0.4, 0.9, -0.3, 0.0, 0.0, 0.0);
        assert_relative_eq!(bias_forces(&state, &p).norm(), 0.0);
    }

    #[test]
    fn test_swing_reduces_to_pendulum() {
        // With the boom and slew frozen at zero rates, the swing equation is
        // m3·(l2² + r3²)·ψ̈ = −m3·g·l2·sinψ + coupling into the luff row.
        let p = params();
        let psi = 0.2;
        let state = StateVector::new(0.0, 0.0, psi, 0.0, 0.0, 0.0);

        let m = mass_matrix(&state, &p);
        let g = gravity_forces(&state, &p);
        // Direct 2x2 solve against the closed-form inverse.
        let accel = forward_dynamics(&state, &p).unwrap();
        let det = m.luff_swing_det();
        let expected_psi_dd = (m.luff * (-g.z) - m.coupling * (-g.y)) / det;
        assert_relative_eq!(accel.z, expected_psi_dd, epsilon = 1e-12);

        // Restoring: displaced positive, accelerates negative.
        assert!(accel.z < 0.0);
        // Slew stays untouched.
        assert_relative_eq!(accel.x, 0.0);
    }

    #[test]
    fn test_centrifugal_swing_out() {
        // Spinning the crane throws the payload outward: positive ψ̈ from a
        // pure slew rate at the hanging configuration.
        let mut p = params();
        p.set_gravity(0.0).unwrap();
        let state = StateVector::new(0.0, 0.6, 0.0, 1.0, 0.0, 0.0);
        let accel = forward_dynamics(&state, &p).unwrap();
        assert!(
            accel.z > 0.0,
            "centrifugal term should swing the payload outward, got {}",
            accel.z
        );
    }

    #[test]
    fn test_torque_accelerates_slew() {
        let mut p = params();
        p.set_torque(Axis::Slew, 500.0).unwrap();
        let state = StateVector::zero();
        let accel = forward_dynamics(&state, &p).unwrap();
        let m = mass_matrix(&state, &p);
        assert_relative_eq!(accel.x, 500.0 / m.slew, epsilon = 1e-12);
        assert_relative_eq!(accel.y, 0.0);
        assert_relative_eq!(accel.z, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut p = params();
        p.set_torque(Axis::Luff, 120.0).unwrap();
        let state = StateVector::new(0.1, 0.2, 0.3, 0.4, 0.5, 0.6);
        let a = derivative(&state, &p).unwrap();
        let b = derivative(&state, &p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_singular_block_is_reported() {
        let m = MassMatrix {
            slew: 100.0,
            luff: 1.0,
            swing: 1.0,
            coupling: 1.0, // det == 0
        };
        let err = solve(&m, Vector3::zeros()).unwrap_err();
        assert!(matches!(err, CraneError::SingularInertia { .. }));
        assert!(err.is_config_error());

        let m = MassMatrix {
            slew: 0.0,
            luff: 1.0,
            swing: 1.0,
            coupling: 0.0,
        };
        assert!(solve(&m, Vector3::zeros()).is_err());
    }
}
