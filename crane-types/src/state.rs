//! Instantaneous state of the crane's three rotational degrees of freedom.

use nalgebra::Vector6;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angular positions and velocities at one instant.
///
/// A plain value type: a `StateVector` has no identity beyond its position in
/// a trajectory. The same layout doubles as a state *derivative*, in which
/// case the angle slots carry angular velocities and the rate slots carry
/// angular accelerations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVector {
    /// Slew angle θ (rad).
    pub theta: f64,
    /// Luff angle φ, from the vertical (rad).
    pub phi: f64,
    /// Hoist swing angle ψ, from plumb (rad).
    pub psi: f64,
    /// Slew rate θ̇ (rad/s).
    pub theta_dot: f64,
    /// Luff rate φ̇ (rad/s).
    pub phi_dot: f64,
    /// Swing rate ψ̇ (rad/s).
    pub psi_dot: f64,
}

impl StateVector {
    /// Create a state from explicit components.
    #[must_use]
    #[allow(clippy::similar_names)]
    pub const fn new(
        theta: f64,
        phi: f64,
        psi: f64,
        theta_dot: f64,
        phi_dot: f64,
        psi_dot: f64,
    ) -> Self {
        Self {
            theta,
            phi,
            psi,
            theta_dot,
            phi_dot,
            psi_dot,
        }
    }

    /// The canonical initial state: all angles and rates zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Check that every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.theta.is_finite()
            && self.phi.is_finite()
            && self.psi.is_finite()
            && self.theta_dot.is_finite()
            && self.phi_dot.is_finite()
            && self.psi_dot.is_finite()
    }

    /// Pack into a 6-vector `(θ, φ, ψ, θ̇, φ̇, ψ̇)` for integration math.
    #[must_use]
    pub fn to_vector(self) -> Vector6<f64> {
        Vector6::new(
            self.theta,
            self.phi,
            self.psi,
            self.theta_dot,
            self.phi_dot,
            self.psi_dot,
        )
    }

    /// Unpack from a 6-vector produced by [`to_vector`](Self::to_vector).
    #[must_use]
    pub fn from_vector(v: Vector6<f64>) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}
