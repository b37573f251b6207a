//! # Equinoctial orbital elements
//!
//! Element set `(a, h, k, p, q, λ)` where
//!
//! - `h = e·sin(Ω + ω)`, `k = e·cos(Ω + ω)` – eccentricity vector,
//! - `p = tan(i/2)·sin Ω`, `q = tan(i/2)·cos Ω` – inclination vector,
//! - `λ = Ω + ω + M` – mean longitude.
//!
//! This **non-singular formulation** is well suited for averaging and orbit
//! determination near zero eccentricity or inclination, and is the state
//! representation carried by the DSST zonal theory.

use hifitime::Epoch;
use nalgebra::Vector6;
use std::fmt;

use crate::kepler::principal_angle;
use crate::orbit_type::keplerian_element::KeplerianElements;

/// Equinoctial orbital elements.
///
/// Units
/// -----
/// * `reference_epoch`: [`Epoch`].
/// * `semi_major_axis`: meters.
/// * `eccentricity_sin_lon`, `eccentricity_cos_lon`: dimensionless (h, k).
/// * `tan_half_incl_sin_node`, `tan_half_incl_cos_node`: dimensionless (p, q).
/// * `mean_longitude`: radians (λ).
#[derive(Debug, PartialEq, Clone)]
pub struct EquinoctialElements {
    pub reference_epoch: Epoch,
    pub semi_major_axis: f64,
    pub eccentricity_sin_lon: f64,   // h = e * sin(Ω + ω)
    pub eccentricity_cos_lon: f64,   // k = e * cos(Ω + ω)
    pub tan_half_incl_sin_node: f64, // p = tan(i/2) * sin(Ω)
    pub tan_half_incl_cos_node: f64, // q = tan(i/2) * cos(Ω)
    pub mean_longitude: f64,         // λ = Ω + ω + M
}

impl EquinoctialElements {
    /// Eccentricity magnitude `e = √(h² + k²)`.
    pub fn eccentricity(&self) -> f64 {
        (self.eccentricity_sin_lon.powi(2) + self.eccentricity_cos_lon.powi(2)).sqrt()
    }

    /// Raw vector view `[a, h, k, p, q, λ]`.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.semi_major_axis,
            self.eccentricity_sin_lon,
            self.eccentricity_cos_lon,
            self.tan_half_incl_sin_node,
            self.tan_half_incl_cos_node,
            self.mean_longitude,
        )
    }

    /// Rebuild elements from the raw vector layout `[a, h, k, p, q, λ]`.
    pub fn from_vector(reference_epoch: Epoch, v: &Vector6<f64>) -> Self {
        Self {
            reference_epoch,
            semi_major_axis: v[0],
            eccentricity_sin_lon: v[1],
            eccentricity_cos_lon: v[2],
            tan_half_incl_sin_node: v[3],
            tan_half_incl_cos_node: v[4],
            mean_longitude: principal_angle(v[5]),
        }
    }
}

impl From<&KeplerianElements> for EquinoctialElements {
    fn from(k: &KeplerianElements) -> Self {
        let lon_periapsis = k.ascending_node_longitude + k.periapsis_argument;
        let tan_half_incl = (k.inclination / 2.0).tan();

        EquinoctialElements {
            reference_epoch: k.reference_epoch,
            semi_major_axis: k.semi_major_axis,
            eccentricity_sin_lon: k.eccentricity * lon_periapsis.sin(),
            eccentricity_cos_lon: k.eccentricity * lon_periapsis.cos(),
            tan_half_incl_sin_node: tan_half_incl * k.ascending_node_longitude.sin(),
            tan_half_incl_cos_node: tan_half_incl * k.ascending_node_longitude.cos(),
            mean_longitude: principal_angle(lon_periapsis + k.mean_anomaly),
        }
    }
}

impl From<&EquinoctialElements> for KeplerianElements {
    fn from(equinoctial: &EquinoctialElements) -> Self {
        let eps = 1.0e-12; // small value for near-circular/near-equatorial tests
        let ecc = equinoctial.eccentricity();

        // Longitude of periapsis ϖ = Ω + ω (or 0 if eccentricity ≈ 0)
        let dig = if ecc < eps {
            0.0
        } else {
            equinoctial
                .eccentricity_sin_lon
                .atan2(equinoctial.eccentricity_cos_lon)
        };

        let tgi2 = (equinoctial.tan_half_incl_sin_node.powi(2)
            + equinoctial.tan_half_incl_cos_node.powi(2))
        .sqrt();

        // Ascending node longitude (or 0 if the orbit is equatorial)
        let omega_node = if tgi2 < eps {
            0.0
        } else {
            equinoctial
                .tan_half_incl_sin_node
                .atan2(equinoctial.tan_half_incl_cos_node)
        };

        let inclination = 2.0 * tgi2.atan();

        KeplerianElements {
            reference_epoch: equinoctial.reference_epoch,
            semi_major_axis: equinoctial.semi_major_axis,
            eccentricity: ecc,
            inclination,
            ascending_node_longitude: principal_angle(omega_node),
            periapsis_argument: principal_angle(dig - omega_node),
            mean_anomaly: principal_angle(equinoctial.mean_longitude - dig),
        }
    }
}

impl fmt::Display for EquinoctialElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "epoch       : {}", self.reference_epoch)?;
        writeln!(f, "a [m]       : {:.3}", self.semi_major_axis)?;
        writeln!(f, "h           : {:.9}", self.eccentricity_sin_lon)?;
        writeln!(f, "k           : {:.9}", self.eccentricity_cos_lon)?;
        writeln!(f, "p           : {:.9}", self.tan_half_incl_sin_node)?;
        writeln!(f, "q           : {:.9}", self.tan_half_incl_cos_node)?;
        writeln!(f, "lambda [rad]: {:.9}", self.mean_longitude)
    }
}
