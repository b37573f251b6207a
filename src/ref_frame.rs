//! # Reference frames
//!
//! Minimal frame tagging for orbital states. The analytical theories
//! (Brouwer-Lyddane, Eckstein-Hechler, DSST zonal) operate in the inertial
//! EME2000 frame, while the TLE low-order theory produces states in TEME,
//! consistent with general-perturbations element sets.
//!
//! No frame transformation is provided: a Cartesian state handed to a
//! converter must already be expressed in the frame its theory expects, and
//! the mismatch is rejected at construction time.

use std::fmt;

/// Inertial reference frame of a Cartesian or element state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Earth Mean Equator and Equinox of J2000.
    Eme2000,
    /// True Equator Mean Equinox, the native frame of TLE element sets.
    Teme,
}

impl Frame {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frame::Eme2000 => "EME2000",
            Frame::Teme => "TEME",
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
