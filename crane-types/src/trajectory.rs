//! Sampled simulation results: the trajectory and the reaction-force series.

use crate::state::StateVector;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered series of sampled states spanning one integration run.
///
/// Samples are stored column-wise so the playback layer can read the time and
/// angle series as plain index-aligned slices without copying. The trajectory
/// is append-only while a run is in progress and cleared before the next run
/// begins; readers only ever see a finished series.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    times: Vec<f64>,
    theta: Vec<f64>,
    phi: Vec<f64>,
    psi: Vec<f64>,
    theta_dot: Vec<f64>,
    phi_dot: Vec<f64>,
    psi_dot: Vec<f64>,
}

impl Trajectory {
    /// Create an empty trajectory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trajectory with room for `capacity` samples.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            theta: Vec::with_capacity(capacity),
            phi: Vec::with_capacity(capacity),
            psi: Vec::with_capacity(capacity),
            theta_dot: Vec::with_capacity(capacity),
            phi_dot: Vec::with_capacity(capacity),
            psi_dot: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, time: f64, state: StateVector) {
        self.times.push(time);
        self.theta.push(state.theta);
        self.phi.push(state.phi);
        self.psi.push(state.psi);
        self.theta_dot.push(state.theta_dot);
        self.phi_dot.push(state.phi_dot);
        self.psi_dot.push(state.psi_dot);
    }

    /// Discard all samples.
    pub fn clear(&mut self) {
        self.times.clear();
        self.theta.clear();
        self.phi.clear();
        self.psi.clear();
        self.theta_dot.clear();
        self.phi_dot.clear();
        self.psi_dot.clear();
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the trajectory holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample time at `index`.
    #[must_use]
    pub fn time(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied()
    }

    /// Full state at `index`.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<StateVector> {
        if index >= self.len() {
            return None;
        }
        Some(StateVector::new(
            self.theta[index],
            self.phi[index],
            self.psi[index],
            self.theta_dot[index],
            self.phi_dot[index],
            self.psi_dot[index],
        ))
    }

    /// Sample times, index-aligned with the angle series.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Slew angle series θ.
    #[must_use]
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// Luff angle series φ.
    #[must_use]
    pub fn phi(&self) -> &[f64] {
        &self.phi
    }

    /// Swing angle series ψ.
    #[must_use]
    pub fn psi(&self) -> &[f64] {
        &self.psi
    }

    /// Slew rate series θ̇.
    #[must_use]
    pub fn theta_dot(&self) -> &[f64] {
        &self.theta_dot
    }

    /// Luff rate series φ̇.
    #[must_use]
    pub fn phi_dot(&self) -> &[f64] {
        &self.phi_dot
    }

    /// Swing rate series ψ̇.
    #[must_use]
    pub fn psi_dot(&self) -> &[f64] {
        &self.psi_dot
    }

    /// Iterate over `(time, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, StateVector)> + '_ {
        (0..self.len()).map(move |i| {
            (
                self.times[i],
                StateVector::new(
                    self.theta[i],
                    self.phi[i],
                    self.psi[i],
                    self.theta_dot[i],
                    self.phi_dot[i],
                    self.psi_dot[i],
                ),
            )
        })
    }
}

/// Inertial-frame reaction force and moment for one trajectory sample.
///
/// The force and moment the foundation exerts on the crane, resolved into the
/// fixed inertial axes, with the moment taken about the base origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReactionForceSample {
    /// Support force (N).
    pub force: Vector3<f64>,
    /// Support moment about the base origin (N·m).
    pub moment: Vector3<f64>,
}

impl ReactionForceSample {
    /// Create a sample from explicit vectors.
    #[must_use]
    pub fn new(force: Vector3<f64>, moment: Vector3<f64>) -> Self {
        Self { force, moment }
    }

    /// A zero sample.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            force: Vector3::zeros(),
            moment: Vector3::zeros(),
        }
    }

    /// Magnitude of the support force.
    #[must_use]
    pub fn force_magnitude(&self) -> f64 {
        self.force.norm()
    }

    /// Magnitude of the support moment.
    #[must_use]
    pub fn moment_magnitude(&self) -> f64 {
        self.moment.norm()
    }
}

impl Default for ReactionForceSample {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_push_and_read_back() {
        let mut trajectory = Trajectory::new();
        assert!(trajectory.is_empty());

        let s0 = StateVector::zero();
        let s1 = StateVector::new(0.1, 0.2, 0.3, 1.0, 2.0, 3.0);
        trajectory.push(0.0, s0);
        trajectory.push(0.01, s1);

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.time(1), Some(0.01));
        assert_eq!(trajectory.state(1), Some(s1));
        assert_eq!(trajectory.state(2), None);
        assert_eq!(trajectory.theta(), &[0.0, 0.1]);
        assert_eq!(trajectory.psi_dot(), &[0.0, 3.0]);
    }

    #[test]
    fn test_series_stay_index_aligned() {
        let mut trajectory = Trajectory::with_capacity(8);
        for i in 0..8 {
            let t = f64::from(i) * 0.5;
            trajectory.push(t, StateVector::new(t, -t, 2.0 * t, 0.0, 0.0, 0.0));
        }
        assert_eq!(trajectory.times().len(), trajectory.theta().len());
        assert_eq!(trajectory.times().len(), trajectory.psi().len());
        for (i, (t, state)) in trajectory.iter().enumerate() {
            assert_relative_eq!(t, f64::from(i as u32) * 0.5);
            assert_relative_eq!(state.theta, t);
            assert_relative_eq!(state.phi, -t);
        }
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut trajectory = Trajectory::new();
        trajectory.push(0.0, StateVector::zero());
        trajectory.clear();
        assert!(trajectory.is_empty());
        assert!(trajectory.times().is_empty());
        assert!(trajectory.state(0).is_none());
    }

    #[test]
    fn test_reaction_sample_magnitudes() {
        let sample = ReactionForceSample::new(
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(0.0, 0.0, 5.0),
        );
        assert_relative_eq!(sample.force_magnitude(), 5.0);
        assert_relative_eq!(sample.moment_magnitude(), 5.0);
        assert_eq!(ReactionForceSample::default(), ReactionForceSample::zero());
    }
}
