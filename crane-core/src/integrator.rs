//! Fixed-step RK4 integration of the crane dynamics.
//!
//! The integrator is a small state machine (`Idle → Running → Complete`,
//! `reset` back to `Idle`) around an eager batch loop: a run computes every
//! sample before returning, so playback only ever reads a finished,
//! immutable trajectory and simulation cost is decoupled from frame rate.
//!
//! Per step of size `h = dt`:
//!
//! ```text
//! k1 = limit(f(s));           k2 = limit(f(s + h/2·k1))
//! k3 = limit(f(s + h/2·k2));  k4 = limit(f(s + h·k3))
//! s' = limit(s + h/6·(k1 + 2·k2 + 2·k3 + k4))
//! ```
//!
//! where `f` is [`dynamics::derivative`] and `limit` the per-axis velocity
//! clamp — applied inside every stage, and to the rate components of the
//! accepted state so stored samples honor the caps exactly.
//!
//! The parameters are snapshotted by value at run start: setter calls made
//! while a trajectory exists cannot alter it. Sample times are computed as
//! `k·dt` rather than accumulated, keeping runs bit-for-bit reproducible.

use crate::dynamics;
use crate::limiter::VelocityLimiter;
use crane_types::{CraneError, CraneParameters, Result, StateVector, Trajectory};
use tracing::{debug, warn};

/// Lifecycle of the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No trajectory; ready to run.
    Idle,
    /// A run is stepping toward `target_time`.
    Running,
    /// The trajectory spans the full interval.
    Complete,
}

impl RunState {
    /// Lower-case name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of RK4 steps covering `[0, target_time]`.
///
/// Mathematically `floor(target_time/dt)`; a small absolute slack on the
/// quotient keeps binary representation error (e.g. `1.0/0.01`) from
/// dropping the final sample.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_count(target_time: f64, dt: f64) -> usize {
    (target_time / dt + 1e-9).floor() as usize
}

/// Classical fourth-order Runge-Kutta integrator for the crane.
#[derive(Debug, Clone, Default)]
pub struct Rk4Integrator {
    state: RunState,
    trajectory: Trajectory,
    snapshot: Option<CraneParameters>,
}

impl Rk4Integrator {
    /// Create an idle integrator with no trajectory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The trajectory produced by the last completed run (empty while idle).
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// The parameter snapshot the last completed run was integrated with.
    #[must_use]
    pub fn snapshot(&self) -> Option<&CraneParameters> {
        self.snapshot.as_ref()
    }

    /// Discard any trajectory and return to `Idle`.
    pub fn reset(&mut self) {
        self.trajectory.clear();
        self.snapshot = None;
        self.state = RunState::Idle;
    }

    /// Integrate from `initial` at `t = 0` to `target_time`, eagerly.
    ///
    /// Only legal from `Idle`; call [`reset`](Self::reset) to discard a
    /// previous trajectory first. On success the trajectory holds
    /// `floor(target_time/dt) + 1` samples and the state is `Complete`. On
    /// any error the partial trajectory is discarded and the integrator
    /// returns to `Idle`.
    ///
    /// # Errors
    ///
    /// - [`CraneError::InvalidState`] if not idle,
    /// - [`CraneError::InvalidConfig`] if the parameter snapshot fails
    ///   validation,
    /// - [`CraneError::SingularInertia`] from the evaluator,
    /// - [`CraneError::Diverged`] if a step produces a non-finite state.
    pub fn run(&mut self, params: &CraneParameters, initial: StateVector) -> Result<()> {
        if self.state != RunState::Idle {
            return Err(CraneError::InvalidState {
                operation: "run",
                state: self.state.name(),
            });
        }

        // Snapshot: later setter calls must not touch this run.
        let params = params.clone();
        params.validate()?;

        let limiter = VelocityLimiter::from_params(&params);
        let dt = params.dt();
        let steps = step_count(params.target_time(), dt);
        debug!(steps, dt, "starting integration run");

        self.state = RunState::Running;
        self.trajectory = Trajectory::with_capacity(steps + 1);

        let mut state = limiter.limit_state(initial);
        self.trajectory.push(0.0, state);

        for k in 1..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 * dt;
            state = match rk4_step(&state, &params, &limiter, dt) {
                Ok(next) if next.is_finite() => next,
                Ok(_) => {
                    warn!(time = t, "integration diverged, discarding trajectory");
                    self.reset();
                    return Err(CraneError::diverged(t, "non-finite state"));
                }
                Err(err) => {
                    self.reset();
                    return Err(err);
                }
            };
            self.trajectory.push(t, state);
        }

        self.snapshot = Some(params);
        self.state = RunState::Complete;
        debug!(samples = self.trajectory.len(), "integration run complete");
        Ok(())
    }
}

/// One RK4 step of size `h` from `state`.
fn rk4_step(
    state: &StateVector,
    params: &CraneParameters,
    limiter: &VelocityLimiter,
    h: f64,
) -> Result<StateVector> {
    let s = state.to_vector();

    let k1 = limiter
        .limit_derivative(dynamics::derivative(state, params)?)
        .to_vector();
    let k2 = limiter
        .limit_derivative(dynamics::derivative(
            &StateVector::from_vector(s + k1 * (0.5 * h)),
            params,
        )?)
        .to_vector();
    let k3 = limiter
        .limit_derivative(dynamics::derivative(
            &StateVector::from_vector(s + k2 * (0.5 * h)),
            params,
        )?)
        .to_vector();
    let k4 = limiter
        .limit_derivative(dynamics::derivative(
            &StateVector::from_vector(s + k3 * h),
            params,
        )?)
        .to_vector();

    let next = s + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0);
    Ok(limiter.limit_state(StateVector::from_vector(next)))
}
