//! The three actuated axes of the crane.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the crane's three rotational degrees of freedom.
///
/// Torques, masses and velocity caps are addressed per axis: the slew drive
/// turns the whole crane about the vertical base axis (θ), the luff drive
/// raises and lowers the boom (φ), and the hoist axis carries the swing of
/// the suspended payload (ψ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Rotation of the crane about the vertical base axis (θ).
    Slew,
    /// Inclination of the boom, measured from the vertical (φ).
    Luff,
    /// In-plane swing of the hoisted payload, measured from plumb (ψ).
    Hoist,
}

impl Axis {
    /// All three axes in generalized-coordinate order (θ, φ, ψ).
    pub const ALL: [Self; 3] = [Self::Slew, Self::Luff, Self::Hoist];

    /// Index of this axis in generalized-coordinate order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Slew => 0,
            Self::Luff => 1,
            Self::Hoist => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slew => write!(f, "slew"),
            Self::Luff => write!(f, "luff"),
            Self::Hoist => write!(f, "hoist"),
        }
    }
}
