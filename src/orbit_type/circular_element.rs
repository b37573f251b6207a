//! # Circular orbital elements
//!
//! Element set `(a, ex, ey, i, Ω, α)` used for near-circular orbits, where
//!
//! - `ex = e·cos ω`, `ey = e·sin ω` form the eccentricity vector in the
//!   orbital plane,
//! - `α = ω + M` is the mean argument of latitude.
//!
//! The set is non-singular in eccentricity (but keeps the ascending node
//! explicit, so it remains singular for strictly equatorial orbits). It is
//! the natural state representation of the Eckstein-Hechler theory, which is
//! built for orbits with `e ≲ 0.1`.

use hifitime::Epoch;
use nalgebra::Vector6;
use std::fmt;

use crate::kepler::principal_angle;
use crate::orbit_type::keplerian_element::KeplerianElements;

/// Circular orbital elements.
///
/// Units
/// -----
/// * `reference_epoch`: [`Epoch`].
/// * `semi_major_axis`: meters.
/// * `eccentricity_x`, `eccentricity_y`: dimensionless (e·cos ω, e·sin ω).
/// * `inclination`: radians.
/// * `ascending_node_longitude`: radians (Ω).
/// * `latitude_argument`: radians (α = ω + M, mean argument of latitude).
#[derive(Debug, PartialEq, Clone)]
pub struct CircularElements {
    pub reference_epoch: Epoch,
    pub semi_major_axis: f64,
    pub eccentricity_x: f64,
    pub eccentricity_y: f64,
    pub inclination: f64,
    pub ascending_node_longitude: f64,
    pub latitude_argument: f64,
}

impl CircularElements {
    /// Eccentricity magnitude `e = √(ex² + ey²)`.
    pub fn eccentricity(&self) -> f64 {
        (self.eccentricity_x.powi(2) + self.eccentricity_y.powi(2)).sqrt()
    }

    /// Raw vector view `[a, ex, ey, i, Ω, α]`.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.semi_major_axis,
            self.eccentricity_x,
            self.eccentricity_y,
            self.inclination,
            self.ascending_node_longitude,
            self.latitude_argument,
        )
    }

    /// Rebuild elements from the raw vector layout `[a, ex, ey, i, Ω, α]`.
    pub fn from_vector(reference_epoch: Epoch, v: &Vector6<f64>) -> Self {
        Self {
            reference_epoch,
            semi_major_axis: v[0],
            eccentricity_x: v[1],
            eccentricity_y: v[2],
            inclination: principal_angle(v[3]),
            ascending_node_longitude: principal_angle(v[4]),
            latitude_argument: principal_angle(v[5]),
        }
    }
}

impl From<&KeplerianElements> for CircularElements {
    fn from(k: &KeplerianElements) -> Self {
        CircularElements {
            reference_epoch: k.reference_epoch,
            semi_major_axis: k.semi_major_axis,
            eccentricity_x: k.eccentricity * k.periapsis_argument.cos(),
            eccentricity_y: k.eccentricity * k.periapsis_argument.sin(),
            inclination: k.inclination,
            ascending_node_longitude: k.ascending_node_longitude,
            latitude_argument: principal_angle(k.periapsis_argument + k.mean_anomaly),
        }
    }
}

impl From<&CircularElements> for KeplerianElements {
    fn from(c: &CircularElements) -> Self {
        let eps = 1.0e-12; // small value for the near-circular convention
        let ecc = c.eccentricity();

        // ω is undefined for e ≈ 0; set to 0 by convention.
        let periapsis_argument = if ecc < eps {
            0.0
        } else {
            principal_angle(c.eccentricity_y.atan2(c.eccentricity_x))
        };

        KeplerianElements {
            reference_epoch: c.reference_epoch,
            semi_major_axis: c.semi_major_axis,
            eccentricity: ecc,
            inclination: c.inclination,
            ascending_node_longitude: c.ascending_node_longitude,
            periapsis_argument,
            mean_anomaly: principal_angle(c.latitude_argument - periapsis_argument),
        }
    }
}

impl fmt::Display for CircularElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "epoch      : {}", self.reference_epoch)?;
        writeln!(f, "a [m]      : {:.3}", self.semi_major_axis)?;
        writeln!(f, "ex         : {:.9}", self.eccentricity_x)?;
        writeln!(f, "ey         : {:.9}", self.eccentricity_y)?;
        writeln!(f, "i [rad]    : {:.9}", self.inclination)?;
        writeln!(f, "raan [rad] : {:.9}", self.ascending_node_longitude)?;
        writeln!(f, "alpha [rad]: {:.9}", self.latitude_argument)
    }
}
