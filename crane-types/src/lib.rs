//! Core types for the crane simulation core.
//!
//! This crate provides the foundational types shared by the simulation core
//! and its consumers:
//!
//! - [`CraneParameters`] - validated, versioned physical/simulation constants
//! - [`StateVector`] - angular positions and velocities at one instant
//! - [`Trajectory`] - the sampled result of one integration run
//! - [`ReactionForceSample`] - inertial-frame support force/moment per sample
//! - [`CraneError`] - the configuration/divergence/state error taxonomy
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no physics and no integration.
//! They're the common language between:
//!
//! - The simulation core (`crane-core`)
//! - Settings UIs mutating parameters through the validated setters
//! - Playback/rendering layers indexing into the finished series
//! - Logging and replay (serialized trajectories, behind the `serde` feature)
//!
//! # Coordinate System
//!
//! - Z: up along the slew axis
//! - X, Y: horizontal, right-handed
//! - θ slews about Z; φ is the boom's inclination from the vertical; ψ is the
//!   payload swing from plumb, in the boom's vertical plane
//!
//! # Example
//!
//! ```
//! use crane_types::{Axis, CraneParameters, StateVector};
//!
//! let mut params = CraneParameters::default();
//! params.set_torque(Axis::Slew, 150.0)?;
//! assert_eq!(params.torque(Axis::Slew), 150.0);
//!
//! // Bad values are rejected before mutating state.
//! assert!(params.set_mass(Axis::Hoist, 0.0).is_err());
//!
//! let initial = StateVector::zero();
//! assert!(initial.is_finite());
//! # Ok::<(), crane_types::CraneError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic for type definitions
#![allow(
    clippy::missing_const_for_fn,  // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,    // Error docs added where non-obvious
    clippy::must_use_candidate
)]

mod axis;
mod error;
mod params;
mod state;
mod trajectory;

pub use axis::Axis;
pub use error::CraneError;
pub use params::{defaults, CraneParameters};
pub use state::StateVector;
pub use trajectory::{ReactionForceSample, Trajectory};

// Re-export math types for convenience
pub use nalgebra::{Vector3, Vector6};

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, CraneError>;
