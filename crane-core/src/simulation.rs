//! The simulation facade consumed by settings and playback layers.
//!
//! [`CraneSimulation`] owns the parameter store and the results of the most
//! recent run, and enforces the two-phase contract: batch-compute a full
//! trajectory, then expose it (and the derived reaction series) read-only.
//! Parameters are edited through the validated setter surface of
//! [`CraneParameters`]; a run integrates a by-value snapshot, so edits made
//! during playback never bleed into the stored result.

use crate::integrator::{Rk4Integrator, RunState};
use crate::reaction::compute_reactions;
use crane_types::{
    CraneParameters, ReactionForceSample, Result, StateVector, Trajectory,
};
use tracing::info;

/// One simulation session: parameters in, trajectory and reactions out.
///
/// # Example
///
/// ```
/// use crane_core::CraneSimulation;
/// use crane_types::Axis;
///
/// let mut sim = CraneSimulation::new();
/// sim.params_mut().set_target_time(1.0)?;
/// sim.params_mut().set_torque(Axis::Slew, 200.0)?;
/// sim.run()?;
///
/// // Index-aligned series for the playback layer.
/// assert_eq!(sim.times().len(), 101);
/// assert_eq!(sim.theta().len(), sim.reactions().len());
/// assert!(sim.theta().last().copied().unwrap_or(0.0) > 0.0);
/// # Ok::<(), crane_types::CraneError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CraneSimulation {
    params: CraneParameters,
    integrator: Rk4Integrator,
    reactions: Vec<ReactionForceSample>,
}

impl CraneSimulation {
    /// Create a session with default parameters and no results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from existing parameters.
    #[must_use]
    pub fn with_params(params: CraneParameters) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// The current parameters.
    #[must_use]
    pub fn params(&self) -> &CraneParameters {
        &self.params
    }

    /// Mutable access to the parameters, via their validated setters.
    ///
    /// Fields are private, so this cannot bypass validation. Mutations do not
    /// affect stored results; the next [`run`](Self::run) picks them up.
    pub fn params_mut(&mut self) -> &mut CraneParameters {
        &mut self.params
    }

    /// Current integrator state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.integrator.state()
    }

    /// Integrate from the canonical all-zero state, replacing any prior
    /// results, and post-process the reaction series.
    ///
    /// # Errors
    ///
    /// Configuration, singular-inertia and divergence errors propagate from
    /// the integrator and evaluator; on any error the session holds no
    /// results and is back in `Idle`.
    pub fn run(&mut self) -> Result<()> {
        self.reset();
        self.integrator.run(&self.params, StateVector::zero())?;

        let reactions = match self.integrator.snapshot() {
            Some(snapshot) => compute_reactions(self.integrator.trajectory(), snapshot),
            None => Ok(Vec::new()),
        };
        match reactions {
            Ok(reactions) => {
                self.reactions = reactions;
                info!(samples = self.reactions.len(), "simulation run stored");
                Ok(())
            }
            Err(err) => {
                // No half-results: a failed post-process discards the run.
                self.reset();
                Err(err)
            }
        }
    }

    /// Discard any results and return to `Idle`. Never fails.
    pub fn reset(&mut self) {
        self.integrator.reset();
        self.reactions.clear();
    }

    /// The stored trajectory (empty while idle).
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        self.integrator.trajectory()
    }

    /// The reaction series, index-aligned with the trajectory.
    #[must_use]
    pub fn reactions(&self) -> &[ReactionForceSample] {
        &self.reactions
    }

    /// Sample times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.trajectory().times()
    }

    /// Slew angle series θ, index-aligned with [`times`](Self::times).
    #[must_use]
    pub fn theta(&self) -> &[f64] {
        self.trajectory().theta()
    }

    /// Luff angle series φ, index-aligned with [`times`](Self::times).
    #[must_use]
    pub fn phi(&self) -> &[f64] {
        self.trajectory().phi()
    }

    /// Swing angle series ψ, index-aligned with [`times`](Self::times).
    #[must_use]
    pub fn psi(&self) -> &[f64] {
        self.trajectory().psi()
    }
}
