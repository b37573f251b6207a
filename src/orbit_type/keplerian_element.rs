//! # Keplerian orbital elements
//!
//! This module defines the [`KeplerianElements`] struct, providing the
//! **classical orbital element representation** widely used in celestial mechanics.
//!
//! ## What are Keplerian elements?
//!
//! The six Keplerian elements are:
//!
//! 1. **a** – Semi-major axis (meters)
//! 2. **e** – Eccentricity (unitless)
//! 3. **i** – Inclination (radians)
//! 4. **Ω** – Longitude of ascending node (radians)
//! 5. **ω** – Argument of periapsis (radians)
//! 6. **M** – Mean anomaly at epoch (radians)
//!
//! Together with the reference epoch, these parameters fully describe an
//! elliptic orbit under the two-body approximation.
//!
//! ## Degeneracies
//!
//! Classical Keplerian elements suffer from singularities:
//!
//! - **Circular orbits (`e → 0`)**: periapsis argument ω becomes undefined.
//!   → conventionally set to `0.0` during conversion.
//! - **Equatorial orbits (`i → 0`)**: ascending node Ω becomes undefined.
//!   → conventionally set to `0.0` during conversion.
//!
//! The [`CircularElements`](crate::orbit_type::circular_element::CircularElements) and
//! [`EquinoctialElements`](crate::orbit_type::equinoctial_element::EquinoctialElements)
//! representations avoid these singularities and are preferred by the
//! averaging theories that operate near them.

use hifitime::Epoch;
use nalgebra::Vector6;
use std::fmt;

use crate::kepler::principal_angle;

/// Keplerian orbital elements (osculating or mean, two-body parameterization).
///
/// Units
/// -----
/// * `reference_epoch`: [`Epoch`].
/// * `semi_major_axis`: meters.
/// * `eccentricity`: unitless.
/// * `inclination`: radians.
/// * `ascending_node_longitude`: radians (Ω).
/// * `periapsis_argument`: radians (ω).
/// * `mean_anomaly`: radians (M).
#[derive(Debug, PartialEq, Clone)]
pub struct KeplerianElements {
    pub reference_epoch: Epoch,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node_longitude: f64,
    pub periapsis_argument: f64,
    pub mean_anomaly: f64,
}

impl KeplerianElements {
    /// Raw vector view `[a, e, i, Ω, ω, M]`.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.ascending_node_longitude,
            self.periapsis_argument,
            self.mean_anomaly,
        )
    }

    /// Rebuild elements from the raw vector layout `[a, e, i, Ω, ω, M]`.
    ///
    /// Angular components are normalized to [0, 2π).
    pub fn from_vector(reference_epoch: Epoch, v: &Vector6<f64>) -> Self {
        Self {
            reference_epoch,
            semi_major_axis: v[0],
            eccentricity: v[1],
            inclination: principal_angle(v[2]),
            ascending_node_longitude: principal_angle(v[3]),
            periapsis_argument: principal_angle(v[4]),
            mean_anomaly: principal_angle(v[5]),
        }
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "epoch     : {}", self.reference_epoch)?;
        writeln!(f, "a [m]     : {:.3}", self.semi_major_axis)?;
        writeln!(f, "e         : {:.9}", self.eccentricity)?;
        writeln!(f, "i [rad]   : {:.9}", self.inclination)?;
        writeln!(f, "raan [rad]: {:.9}", self.ascending_node_longitude)?;
        writeln!(f, "argp [rad]: {:.9}", self.periapsis_argument)?;
        writeln!(f, "M [rad]   : {:.9}", self.mean_anomaly)
    }
}

#[cfg(test)]
mod test_keplerian_element {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vector_round_trip() {
        let kep = KeplerianElements {
            reference_epoch: Epoch::from_mjd_utc(59000.0),
            semi_major_axis: 6.878e6,
            eccentricity: 0.001,
            inclination: 1.7,
            ascending_node_longitude: 0.3,
            periapsis_argument: 1.2,
            mean_anomaly: 2.5,
        };

        let v = kep.to_vector();
        let back = KeplerianElements::from_vector(kep.reference_epoch, &v);
        assert_eq!(back, kep);

        // Angles outside [0, 2π) are normalized on reconstruction.
        let mut v_shift = v;
        v_shift[5] += crate::constants::DPI;
        let back = KeplerianElements::from_vector(kep.reference_epoch, &v_shift);
        assert_abs_diff_eq!(back.mean_anomaly, kep.mean_anomaly, epsilon = 1e-12);
    }
}
