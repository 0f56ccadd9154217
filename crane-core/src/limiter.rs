//! Actuator rate limiting.
//!
//! Real slew, luff and hoist drives cannot exceed their rated speeds; the
//! limiter approximates this with a hard per-axis clamp on angular velocity,
//! sign-preserving and independent of the other axes. The clamp is applied
//! to the candidate derivative inside every RK4 stage and to the velocity
//! components of the accepted state, so stored samples always satisfy the
//! configured bounds.

use crane_types::{Axis, CraneParameters, StateVector};

/// Per-axis angular-velocity clamp.
///
/// A cap of `f64::INFINITY` disables the clamp for that axis; a cap of `0`
/// freezes the coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityLimiter {
    thetad_max: f64,
    phid_max: f64,
    psid_max: f64,
}

impl VelocityLimiter {
    /// Build a limiter from the configured velocity caps.
    #[must_use]
    pub fn from_params(params: &CraneParameters) -> Self {
        Self {
            thetad_max: params.velocity_cap(Axis::Slew),
            phid_max: params.velocity_cap(Axis::Luff),
            psid_max: params.velocity_cap(Axis::Hoist),
        }
    }

    /// A limiter that never clamps.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            thetad_max: f64::INFINITY,
            phid_max: f64::INFINITY,
            psid_max: f64::INFINITY,
        }
    }

    fn clamp_rates(&self, theta_dot: f64, phi_dot: f64, psi_dot: f64) -> (f64, f64, f64) {
        (
            theta_dot.clamp(-self.thetad_max, self.thetad_max),
            phi_dot.clamp(-self.phid_max, self.phid_max),
            psi_dot.clamp(-self.psid_max, self.psid_max),
        )
    }

    /// Clamp the angular-velocity components of a state *derivative*.
    ///
    /// In a derivative the angle slots carry the angular velocities; the
    /// acceleration slots pass through untouched.
    #[must_use]
    pub fn limit_derivative(&self, derivative: StateVector) -> StateVector {
        let (theta_dot, phi_dot, psi_dot) =
            self.clamp_rates(derivative.theta, derivative.phi, derivative.psi);
        StateVector::new(
            theta_dot,
            phi_dot,
            psi_dot,
            derivative.theta_dot,
            derivative.phi_dot,
            derivative.psi_dot,
        )
    }

    /// Clamp the angular-velocity components of a state.
    #[must_use]
    pub fn limit_state(&self, state: StateVector) -> StateVector {
        let (theta_dot, phi_dot, psi_dot) =
            self.clamp_rates(state.theta_dot, state.phi_dot, state.psi_dot);
        StateVector::new(
            state.theta,
            state.phi,
            state.psi,
            theta_dot,
            phi_dot,
            psi_dot,
        )
    }
}
