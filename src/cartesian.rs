//! # Cartesian orbital states
//!
//! This module defines [`CartesianState`], a position/velocity pair at an
//! epoch in a tagged reference frame, together with the two-body conversions
//! to and from [`KeplerianElements`].
//!
//! ## Conventions
//!
//! - Position in meters, velocity in meters per second.
//! - Only elliptic states convert to elements; parabolic and hyperbolic
//!   states are rejected with [`OsmeanError::NonEllipticOrbit`] since mean
//!   element theories are undefined there.
//! - Near-circular and near-equatorial degeneracies follow the same
//!   convention as the element sets: the undefined angle is set to zero and
//!   the defined combinations (ω + M, Ω + ω) stay continuous.

use hifitime::Epoch;
use nalgebra::{Matrix3, Vector3};
use std::fmt;

use crate::constants::EARTH_MU;
use crate::kepler::{eccentric_to_mean, principal_angle, solve_elliptic_kepler, true_to_eccentric};
use crate::orbit_type::keplerian_element::KeplerianElements;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;

/// Rotation matrix from the perifocal frame to the inertial frame,
/// R3(-Ω) · R1(-i) · R3(-ω).
fn perifocal_to_inertial(node: f64, inclination: f64, periapsis: f64) -> Matrix3<f64> {
    let (sin_node, cos_node) = node.sin_cos();
    let (sin_incl, cos_incl) = inclination.sin_cos();
    let (sin_peri, cos_peri) = periapsis.sin_cos();

    Matrix3::new(
        cos_node * cos_peri - sin_node * sin_peri * cos_incl,
        -cos_node * sin_peri - sin_node * cos_peri * cos_incl,
        sin_node * sin_incl,
        sin_node * cos_peri + cos_node * sin_peri * cos_incl,
        -sin_node * sin_peri + cos_node * cos_peri * cos_incl,
        -cos_node * sin_incl,
        sin_peri * sin_incl,
        cos_peri * sin_incl,
        cos_incl,
    )
}

/// Cartesian orbital state: position and velocity at an epoch in a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianState {
    pub epoch: Epoch,
    pub frame: Frame,
    /// Position vector, meters.
    pub position: Vector3<f64>,
    /// Velocity vector, meters per second.
    pub velocity: Vector3<f64>,
}

impl CartesianState {
    pub fn new(epoch: Epoch, frame: Frame, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            epoch,
            frame,
            position,
            velocity,
        }
    }

    /// Materialize a Cartesian state from osculating Keplerian elements.
    ///
    /// Arguments
    /// -----------------
    /// * `elements`: osculating Keplerian elements at their reference epoch.
    /// * `frame`: frame tag carried by the resulting state.
    /// * `mu`: gravitational parameter, m³/s².
    ///
    /// Return
    /// ----------
    /// * The position/velocity state at `elements.reference_epoch`, or a
    ///   Kepler-solver error for pathological eccentricities.
    pub fn from_keplerian(
        elements: &KeplerianElements,
        frame: Frame,
        mu: f64,
    ) -> Result<Self, OsmeanError> {
        let a = elements.semi_major_axis;
        let e = elements.eccentricity;
        if !(a > 0.0 && (0.0..1.0).contains(&e)) {
            return Err(OsmeanError::NonEllipticOrbit);
        }

        let ecc_anom = solve_elliptic_kepler(elements.mean_anomaly, e)?;
        let (sin_e, cos_e) = ecc_anom.sin_cos();
        let eta = (1.0 - e * e).sqrt();

        let radius = a * (1.0 - e * cos_e);
        let mean_motion = (mu / a.powi(3)).sqrt();

        // Perifocal position and velocity.
        let x = a * (cos_e - e);
        let y = a * eta * sin_e;
        let vx = -mean_motion * a.powi(2) / radius * sin_e;
        let vy = mean_motion * a.powi(2) / radius * eta * cos_e;

        let rot = perifocal_to_inertial(
            elements.ascending_node_longitude,
            elements.inclination,
            elements.periapsis_argument,
        );

        Ok(Self {
            epoch: elements.reference_epoch,
            frame,
            position: rot * Vector3::new(x, y, 0.0),
            velocity: rot * Vector3::new(vx, vy, 0.0),
        })
    }

    /// Convert the state to osculating Keplerian elements.
    ///
    /// Arguments
    /// -----------------
    /// * `mu`: gravitational parameter, m³/s².
    ///
    /// Return
    /// ----------
    /// * Osculating [`KeplerianElements`] at the state's epoch, or
    ///   [`OsmeanError::NonEllipticOrbit`] when the specific energy is
    ///   non-negative.
    pub fn to_keplerian(&self, mu: f64) -> Result<KeplerianElements, OsmeanError> {
        let eps = 1.0e-11;
        let r = self.position;
        let v = self.velocity;
        let r_norm = r.norm();

        if !(r_norm.is_finite() && v.norm().is_finite()) || r_norm == 0.0 {
            return Err(OsmeanError::NonFiniteState(
                "Cartesian position/velocity".into(),
            ));
        }

        // Angular momentum and node vector.
        let h = r.cross(&v);
        let h_norm = h.norm();
        let node_vec = Vector3::new(-h[1], h[0], 0.0);
        let node_norm = node_vec.norm();

        // Eccentricity vector and specific energy.
        let ecc_vec = (v.cross(&h) / mu) - r / r_norm;
        let ecc = ecc_vec.norm();
        let energy = v.norm_squared() / 2.0 - mu / r_norm;

        if energy >= 0.0 || ecc >= 1.0 {
            return Err(OsmeanError::NonEllipticOrbit);
        }

        let a = -mu / (2.0 * energy);
        let inclination = (h[2] / h_norm).acos();

        // Ascending node longitude (0 by convention for equatorial orbits).
        let node = if node_norm < eps * h_norm {
            0.0
        } else {
            principal_angle(node_vec[1].atan2(node_vec[0]))
        };

        // Argument of periapsis and true anomaly, with circular/equatorial conventions.
        let (periapsis, true_anom) = if ecc < eps {
            // Circular orbit: measure the latitude argument from the node and
            // fold it entirely into the anomaly.
            let u = if node_norm < eps * h_norm {
                principal_angle(r[1].atan2(r[0]))
            } else {
                let cos_u = node_vec.dot(&r) / (node_norm * r_norm);
                let u = cos_u.clamp(-1.0, 1.0).acos();
                if r[2] < 0.0 {
                    principal_angle(-u)
                } else {
                    u
                }
            };
            (0.0, u)
        } else {
            let periapsis = if node_norm < eps * h_norm {
                principal_angle(ecc_vec[1].atan2(ecc_vec[0]))
            } else {
                let cos_w = node_vec.dot(&ecc_vec) / (node_norm * ecc);
                let w = cos_w.clamp(-1.0, 1.0).acos();
                if ecc_vec[2] < 0.0 {
                    principal_angle(-w)
                } else {
                    w
                }
            };

            let cos_f = ecc_vec.dot(&r) / (ecc * r_norm);
            let f = cos_f.clamp(-1.0, 1.0).acos();
            let true_anom = if r.dot(&v) < 0.0 {
                principal_angle(-f)
            } else {
                f
            };
            (periapsis, true_anom)
        };

        let ecc_anom = true_to_eccentric(true_anom, ecc);
        let mean_anomaly = eccentric_to_mean(ecc_anom, ecc);

        Ok(KeplerianElements {
            reference_epoch: self.epoch,
            semi_major_axis: a,
            eccentricity: ecc,
            inclination,
            ascending_node_longitude: node,
            periapsis_argument: periapsis,
            mean_anomaly,
        })
    }

    /// Convert to elements with the Earth gravitational parameter.
    pub fn to_keplerian_earth(&self) -> Result<KeplerianElements, OsmeanError> {
        self.to_keplerian(EARTH_MU)
    }
}

impl fmt::Display for CartesianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "epoch    : {}", self.epoch)?;
        writeln!(f, "frame    : {}", self.frame)?;
        writeln!(
            f,
            "r [m]    : [{:.3}, {:.3}, {:.3}]",
            self.position[0], self.position[1], self.position[2]
        )?;
        writeln!(
            f,
            "v [m/s]  : [{:.6}, {:.6}, {:.6}]",
            self.velocity[0], self.velocity[1], self.velocity[2]
        )
    }
}
