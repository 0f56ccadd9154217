//! Reaction forces at the crane base.
//!
//! Post-processes a completed trajectory into the force and moment the
//! foundation must exert, per sample, resolved into the fixed inertial axes
//! with the moment taken about the base origin. Newton's second law is
//! applied to each body: the support supplies `Σ mᵢ·(aᵢ + g·ẑ)` plus the
//! angular-momentum rates of the three rotary inertias.
//!
//! Accelerations are recomputed from the same parameter snapshot the
//! trajectory was integrated with, so the series is as deterministic as the
//! trajectory itself.

use crate::dynamics;
use crane_types::{
    Axis, CraneParameters, ReactionForceSample, Result, StateVector, Trajectory, Vector3,
};

/// In-plane kinematics of one center of mass: position, velocity and
/// acceleration in the slewing vertical plane (x radial, z up).
struct PlanarPoint {
    x: f64,
    z: f64,
    xd: f64,
    xdd: f64,
    zdd: f64,
}

impl PlanarPoint {
    /// A point rigidly attached to the slew frame.
    fn fixed(x: f64, z: f64) -> Self {
        Self {
            x,
            z,
            xd: 0.0,
            xdd: 0.0,
            zdd: 0.0,
        }
    }
}

/// Inertial position and acceleration of a planar point carried by the
/// slewing frame, with slew angle θ and its rates.
///
/// In the rotating frame the acceleration picks up centripetal, Coriolis and
/// Euler terms: `a' = (ẍ − θ̇²·x, 2·θ̇·ẋ + θ̈·x, z̈)`.
fn inertial_kinematics(
    p: &PlanarPoint,
    sin_t: f64,
    cos_t: f64,
    theta_dot: f64,
    theta_dd: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let position = Vector3::new(p.x * cos_t, p.x * sin_t, p.z);
    let ax = p.xdd - theta_dot * theta_dot * p.x;
    let ay = 2.0 * theta_dot * p.xd + theta_dd * p.x;
    let acceleration = Vector3::new(ax * cos_t - ay * sin_t, ax * sin_t + ay * cos_t, p.zdd);
    (position, acceleration)
}

/// Support force and moment for a single state.
fn sample_reaction(
    state: &StateVector,
    params: &CraneParameters,
) -> Result<ReactionForceSample> {
    let accel = dynamics::forward_dynamics(state, params)?;
    let (theta_dd, phi_dd, psi_dd) = (accel.x, accel.y, accel.z);

    let (sin_t, cos_t) = state.theta.sin_cos();
    let (sin_phi, cos_phi) = state.phi.sin_cos();
    let (sin_psi, cos_psi) = state.psi.sin_cos();
    let (td, pd, sd) = (state.theta_dot, state.phi_dot, state.psi_dot);

    let (a, b, c, h) = (params.a(), params.b(), params.c(), params.h());
    let (l1, l2) = (params.l1(), params.l2());

    // Counterweight side of the deck, at pivot height.
    let body1 = PlanarPoint::fixed(-c, h);

    let body2 = PlanarPoint {
        x: a + b * sin_phi,
        z: h + b * cos_phi,
        xd: b * cos_phi * pd,
        xdd: b * (cos_phi * phi_dd - sin_phi * pd * pd),
        zdd: -b * (sin_phi * phi_dd + cos_phi * pd * pd),
    };

    let body3 = PlanarPoint {
        x: a + l1 * sin_phi + l2 * sin_psi,
        z: h + l1 * cos_phi - l2 * cos_psi,
        xd: l1 * cos_phi * pd + l2 * cos_psi * sd,
        xdd: l1 * (cos_phi * phi_dd - sin_phi * pd * pd)
            + l2 * (cos_psi * psi_dd - sin_psi * sd * sd),
        zdd: -l1 * (sin_phi * phi_dd + cos_phi * pd * pd)
            + l2 * (sin_psi * psi_dd + cos_psi * sd * sd),
    };

    let gravity = Vector3::new(0.0, 0.0, params.g());
    let mut force = Vector3::zeros();
    let mut moment = Vector3::zeros();
    for (axis, body) in [
        (Axis::Slew, &body1),
        (Axis::Luff, &body2),
        (Axis::Hoist, &body3),
    ] {
        let mass = params.mass(axis);
        let (position, acceleration) = inertial_kinematics(body, sin_t, cos_t, td, theta_dd);
        let load = (acceleration + gravity) * mass;
        force += load;
        moment += position.cross(&load);
    }

    // Angular-momentum rates of the rotary inertias. The luff axis is the
    // slew-frame ŷ; the swing turns about −ŷ.
    let x_hat = Vector3::new(cos_t, sin_t, 0.0);
    let y_hat = Vector3::new(-sin_t, cos_t, 0.0);
    let z_hat = Vector3::z();

    let i1 = params.mass(Axis::Slew) * params.radius(Axis::Slew).powi(2);
    let i2 = params.mass(Axis::Luff) * params.radius(Axis::Luff).powi(2);
    let i3 = params.mass(Axis::Hoist) * params.radius(Axis::Hoist).powi(2);
    moment += z_hat * (i1 + i2 + i3) * theta_dd;
    moment += y_hat * (i2 * phi_dd - i3 * psi_dd);
    moment += x_hat * (i3 * sd - i2 * pd) * td;

    Ok(ReactionForceSample::new(force, moment))
}

/// Compute the reaction series for a completed trajectory.
///
/// Output is index-aligned 1:1 with the trajectory samples. `params` must be
/// the snapshot the trajectory was integrated with.
///
/// # Errors
///
/// Propagates [`crane_types::CraneError::SingularInertia`] from the
/// evaluator.
pub fn compute_reactions(
    trajectory: &Trajectory,
    params: &CraneParameters,
) -> Result<Vec<ReactionForceSample>> {
    let mut samples = Vec::with_capacity(trajectory.len());
    for (_, state) in trajectory.iter() {
        samples.push(sample_reaction(&state, params)?);
    }
    Ok(samples)
}
