//! Simulation core for a three-degree-of-freedom crane.
//!
//! Computes the time-evolution of a crane's slew (θ), luff (φ) and hoist
//! swing (ψ) angles under applied actuator torques and gravity, producing a
//! sampled trajectory and a derived reaction-force series for a playback
//! layer to index into.
//!
//! # Architecture
//!
//! - [`dynamics`] - closed-form equations of motion (`M(q)·q̈ + c + G = τ`)
//! - [`limiter`] - per-axis actuator rate clamp
//! - [`integrator`] - eager fixed-step RK4 with an `Idle/Running/Complete`
//!   state machine
//! - [`reaction`] - inertial-frame base force/moment post-processor
//! - [`energy`] - kinetic/potential diagnostics
//! - [`simulation`] - the [`CraneSimulation`] facade tying it together
//!
//! The computation is single-threaded, synchronous and deterministic: a run
//! executes to completion before returning, and two runs with identical
//! parameters produce bit-identical trajectories.
//!
//! # Example
//!
//! ```
//! use crane_core::CraneSimulation;
//! use crane_types::Axis;
//!
//! let mut sim = CraneSimulation::new();
//! sim.params_mut().set_target_time(2.0)?;
//! sim.params_mut().set_torque(Axis::Slew, 180.0)?;
//! sim.run()?;
//!
//! // floor(2.0 / 0.01) + 1 samples, starting at t = 0.
//! assert_eq!(sim.times().len(), 201);
//! assert_eq!(sim.times()[0], 0.0);
//! # Ok::<(), crane_types::CraneError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod dynamics;
pub mod energy;
pub mod integrator;
pub mod limiter;
pub mod reaction;
pub mod simulation;

pub use integrator::{Rk4Integrator, RunState};
pub use limiter::VelocityLimiter;
pub use reaction::compute_reactions;
pub use simulation::CraneSimulation;

// Re-export the data crate so consumers need only one dependency.
pub use crane_types;
