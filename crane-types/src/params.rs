//! Simulation parameters: physical constants, geometry, actuation and run control.
//!
//! [`CraneParameters`] is the single owned configuration object of the
//! simulation core. Fields are private; every mutation goes through a named
//! setter that validates its argument and rejects bad values *before* touching
//! state, so a failed set leaves the previous value in effect. Each accepted
//! mutation bumps a monotonic revision counter, and the integrator captures a
//! by-value snapshot at run start, so later edits can never retroactively
//! alter a run.

use crate::axis::Axis;
use crate::error::CraneError;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Documented default parameter values.
///
/// These describe a mid-size luffing tower crane: an 18 m tower, a 14 m boom
/// parked vertically, and a 60 kg hook-plus-payload block on a 9 m hoist line.
pub mod defaults {
    /// Gravitational acceleration (m/s²).
    pub const GRAVITY: f64 = 9.81;
    /// Default actuator torques — motors idle (N·m).
    pub const TORQUE: f64 = 0.0;
    /// Mass of the slew assembly: tower head, deck and counterweight (kg).
    pub const M1: f64 = 1200.0;
    /// Mass of the boom (kg).
    pub const M2: f64 = 320.0;
    /// Mass of the payload and hook block (kg).
    pub const M3: f64 = 60.0;
    /// Horizontal offset from the slew axis to the boom pivot (m).
    pub const A: f64 = 1.6;
    /// Distance from the boom pivot to the boom's center of mass (m).
    pub const B: f64 = 5.5;
    /// Radial arm of the counterweight center of mass (m).
    pub const C: f64 = 2.4;
    /// Height of the boom pivot above the base (m).
    pub const H: f64 = 18.0;
    /// Distance from the boom pivot to the suspension point (m).
    pub const L1: f64 = 14.0;
    /// Length of the hoist line (m).
    pub const L2: f64 = 9.0;
    /// Radius of gyration of the slew assembly (m).
    pub const R1: f64 = 1.1;
    /// Transverse radius of gyration of the boom (m).
    pub const R2: f64 = 4.0;
    /// Radius of gyration of the hook block (m).
    pub const R3: f64 = 0.35;
    /// Run duration (s).
    pub const TARGET_TIME: f64 = 10.0;
    /// Integration step (s).
    pub const DT: f64 = 0.01;
    /// Slew rate cap (rad/s).
    pub const THETAD_MAX: f64 = 0.5;
    /// Luff rate cap (rad/s).
    pub const PHID_MAX: f64 = 0.35;
    /// Swing rate cap (rad/s).
    pub const PSID_MAX: f64 = 2.5;
}

/// Physical and simulation constants for one crane.
///
/// See the [module docs](self) for the mutation contract and [`defaults`] for
/// the documented default values.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CraneParameters {
    g: f64,
    t1: f64,
    t2: f64,
    t3: f64,
    m1: f64,
    m2: f64,
    m3: f64,
    a: f64,
    b: f64,
    c: f64,
    h: f64,
    l1: f64,
    l2: f64,
    r1: f64,
    r2: f64,
    r3: f64,
    target_time: f64,
    dt: f64,
    thetad_max: f64,
    phid_max: f64,
    psid_max: f64,
    revision: u64,
}

impl Default for CraneParameters {
    fn default() -> Self {
        Self {
            g: defaults::GRAVITY,
            t1: defaults::TORQUE,
            t2: defaults::TORQUE,
            t3: defaults::TORQUE,
            m1: defaults::M1,
            m2: defaults::M2,
            m3: defaults::M3,
            a: defaults::A,
            b: defaults::B,
            c: defaults::C,
            h: defaults::H,
            l1: defaults::L1,
            l2: defaults::L2,
            r1: defaults::R1,
            r2: defaults::R2,
            r3: defaults::R3,
            target_time: defaults::TARGET_TIME,
            dt: defaults::DT,
            thetad_max: defaults::THETAD_MAX,
            phid_max: defaults::PHID_MAX,
            psid_max: defaults::PSID_MAX,
            revision: 0,
        }
    }
}

/// Reject non-finite or non-positive values.
fn positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CraneError::invalid_config(
            parameter,
            value,
            "must be positive and finite",
        ))
    }
}

/// Reject non-finite values (any sign allowed).
fn finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CraneError::invalid_config(parameter, value, "must be finite"))
    }
}

/// Reject negative or `NaN` caps. `+∞` is the documented "uncapped" value.
fn cap(parameter: &'static str, value: f64) -> Result<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CraneError::invalid_config(
            parameter,
            value,
            "must be non-negative (or +inf for uncapped)",
        ))
    }
}

impl CraneParameters {
    /// Create parameters with the documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its documented default.
    pub fn reset_to_defaults(&mut self) {
        let revision = self.revision;
        *self = Self::default();
        self.revision = revision;
        self.bump();
    }

    /// Revision counter, bumped on every accepted mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    // ---- actuation -------------------------------------------------------

    /// Gravitational acceleration (m/s²).
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Applied torque on one axis (N·m).
    #[must_use]
    pub fn torque(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Slew => self.t1,
            Axis::Luff => self.t2,
            Axis::Hoist => self.t3,
        }
    }

    /// Set the gravitational acceleration. Zero is allowed (free space).
    pub fn set_gravity(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(CraneError::invalid_config(
                "g",
                value,
                "must be non-negative and finite",
            ));
        }
        self.g = value;
        self.bump();
        Ok(())
    }

    /// Set the applied torque on one axis.
    pub fn set_torque(&mut self, axis: Axis, value: f64) -> Result<()> {
        let value = match axis {
            Axis::Slew => finite("t1", value)?,
            Axis::Luff => finite("t2", value)?,
            Axis::Hoist => finite("t3", value)?,
        };
        match axis {
            Axis::Slew => self.t1 = value,
            Axis::Luff => self.t2 = value,
            Axis::Hoist => self.t3 = value,
        }
        self.bump();
        Ok(())
    }

    // ---- inertia ---------------------------------------------------------

    /// Mass of one body (kg): slew assembly, boom, or payload block.
    #[must_use]
    pub fn mass(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Slew => self.m1,
            Axis::Luff => self.m2,
            Axis::Hoist => self.m3,
        }
    }

    /// Set the mass of one body.
    pub fn set_mass(&mut self, axis: Axis, value: f64) -> Result<()> {
        let value = match axis {
            Axis::Slew => positive("m1", value)?,
            Axis::Luff => positive("m2", value)?,
            Axis::Hoist => positive("m3", value)?,
        };
        match axis {
            Axis::Slew => self.m1 = value,
            Axis::Luff => self.m2 = value,
            Axis::Hoist => self.m3 = value,
        }
        self.bump();
        Ok(())
    }

    /// Radius of gyration of one body (m).
    #[must_use]
    pub fn radius(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Slew => self.r1,
            Axis::Luff => self.r2,
            Axis::Hoist => self.r3,
        }
    }

    /// Set the radius of gyration of one body.
    pub fn set_radius(&mut self, axis: Axis, value: f64) -> Result<()> {
        let value = match axis {
            Axis::Slew => positive("r1", value)?,
            Axis::Luff => positive("r2", value)?,
            Axis::Hoist => positive("r3", value)?,
        };
        match axis {
            Axis::Slew => self.r1 = value,
            Axis::Luff => self.r2 = value,
            Axis::Hoist => self.r3 = value,
        }
        self.bump();
        Ok(())
    }

    // ---- geometry --------------------------------------------------------

    /// Horizontal offset from the slew axis to the boom pivot (m).
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Distance from the boom pivot to the boom's center of mass (m).
    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Radial arm of the counterweight center of mass (m).
    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Height of the boom pivot above the base (m).
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Distance from the boom pivot to the suspension point (m).
    #[must_use]
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// Length of the hoist line (m).
    #[must_use]
    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Set the slew-axis-to-pivot offset.
    pub fn set_a(&mut self, value: f64) -> Result<()> {
        self.a = positive("a", value)?;
        self.bump();
        Ok(())
    }

    /// Set the pivot-to-boom-COM distance.
    pub fn set_b(&mut self, value: f64) -> Result<()> {
        self.b = positive("b", value)?;
        self.bump();
        Ok(())
    }

    /// Set the counterweight arm.
    pub fn set_c(&mut self, value: f64) -> Result<()> {
        self.c = positive("c", value)?;
        self.bump();
        Ok(())
    }

    /// Set the boom pivot height.
    pub fn set_h(&mut self, value: f64) -> Result<()> {
        self.h = positive("h", value)?;
        self.bump();
        Ok(())
    }

    /// Set the pivot-to-suspension-point distance.
    pub fn set_l1(&mut self, value: f64) -> Result<()> {
        self.l1 = positive("l1", value)?;
        self.bump();
        Ok(())
    }

    /// Set the hoist line length.
    pub fn set_l2(&mut self, value: f64) -> Result<()> {
        self.l2 = positive("l2", value)?;
        self.bump();
        Ok(())
    }

    // ---- run control -----------------------------------------------------

    /// Integration step (s).
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Run duration (s).
    #[must_use]
    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    /// Set the integration step. Must stay below the run duration.
    pub fn set_dt(&mut self, value: f64) -> Result<()> {
        let value = positive("dt", value)?;
        if value >= self.target_time {
            return Err(CraneError::invalid_config(
                "dt",
                value,
                "must be less than target_time",
            ));
        }
        self.dt = value;
        self.bump();
        Ok(())
    }

    /// Set the run duration. Must exceed the integration step.
    pub fn set_target_time(&mut self, value: f64) -> Result<()> {
        let value = positive("target_time", value)?;
        if value <= self.dt {
            return Err(CraneError::invalid_config(
                "target_time",
                value,
                "must exceed dt",
            ));
        }
        self.target_time = value;
        self.bump();
        Ok(())
    }

    // ---- velocity caps ---------------------------------------------------

    /// Angular-rate cap for one axis (rad/s, `+∞` = uncapped).
    #[must_use]
    pub fn velocity_cap(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Slew => self.thetad_max,
            Axis::Luff => self.phid_max,
            Axis::Hoist => self.psid_max,
        }
    }

    /// Set the angular-rate cap for one axis.
    pub fn set_velocity_cap(&mut self, axis: Axis, value: f64) -> Result<()> {
        let value = match axis {
            Axis::Slew => cap("thetad_max", value)?,
            Axis::Luff => cap("phid_max", value)?,
            Axis::Hoist => cap("psid_max", value)?,
        };
        match axis {
            Axis::Slew => self.thetad_max = value,
            Axis::Luff => self.phid_max = value,
            Axis::Hoist => self.psid_max = value,
        }
        self.bump();
        Ok(())
    }

    // ---- whole-struct validation ----------------------------------------

    /// Validate every invariant, including cross-field ones.
    ///
    /// The integrator runs this on its snapshot before a run.
    pub fn validate(&self) -> Result<()> {
        if !self.g.is_finite() || self.g < 0.0 {
            return Err(CraneError::invalid_config(
                "g",
                self.g,
                "must be non-negative and finite",
            ));
        }
        finite("t1", self.t1)?;
        finite("t2", self.t2)?;
        finite("t3", self.t3)?;
        positive("m1", self.m1)?;
        positive("m2", self.m2)?;
        positive("m3", self.m3)?;
        positive("a", self.a)?;
        positive("b", self.b)?;
        positive("c", self.c)?;
        positive("h", self.h)?;
        positive("l1", self.l1)?;
        positive("l2", self.l2)?;
        positive("r1", self.r1)?;
        positive("r2", self.r2)?;
        positive("r3", self.r3)?;
        positive("dt", self.dt)?;
        positive("target_time", self.target_time)?;
        if self.target_time <= self.dt {
            return Err(CraneError::invalid_config(
                "target_time",
                self.target_time,
                "must exceed dt",
            ));
        }
        cap("thetad_max", self.thetad_max)?;
        cap("phid_max", self.phid_max)?;
        cap("psid_max", self.psid_max)?;
        Ok(())
    }
}
