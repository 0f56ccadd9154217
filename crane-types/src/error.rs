//! Error types for simulation operations.

use thiserror::Error;

/// Errors that can occur while configuring or running the simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CraneError {
    /// Invalid parameter value supplied to a setter.
    ///
    /// The offending value is rejected before any state is mutated; the
    /// previously configured value remains in effect.
    #[error("invalid value for {parameter}: {value} ({reason})")]
    InvalidConfig {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The configured geometry produced a near-singular inertia matrix.
    ///
    /// Forward dynamics would divide by this determinant; the run is refused
    /// instead of producing `NaN`/`Inf`.
    #[error("singular inertia matrix: determinant {determinant:.3e}")]
    SingularInertia {
        /// The offending determinant (or diagonal term).
        determinant: f64,
    },

    /// Integration produced a non-finite state.
    ///
    /// The partial trajectory is discarded so a diverged run can never be
    /// mistaken for a complete one.
    #[error("simulation diverged at t = {time}: {reason}")]
    Diverged {
        /// Sample time at which the non-finite value appeared.
        time: f64,
        /// Description of what went non-finite.
        reason: &'static str,
    },

    /// Operation requested while the integrator is in the wrong state.
    #[error("cannot {operation} while integrator is {state}")]
    InvalidState {
        /// The requested operation.
        operation: &'static str,
        /// The integrator state that refused it.
        state: &'static str,
    },
}

impl CraneError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfig {
            parameter,
            value,
            reason,
        }
    }

    /// Create a divergence error.
    #[must_use]
    pub fn diverged(time: f64, reason: &'static str) -> Self {
        Self::Diverged { time, reason }
    }

    /// Check if this is a configuration error (bad value or degenerate geometry).
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. } | Self::SingularInertia { .. }
        )
    }

    /// Check if this is a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Check if this is a wrong-state error.
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}
