//! # DSST zonal averaging theory
//!
//! J2 zonal short-period mapping carried in **equinoctial elements**, in the
//! spirit of the semi-analytical satellite theory: the mean state is the
//! averaged equinoctial element set, and the osculating state is recovered by
//! adding the zonal short-periodic contribution.
//!
//! Unlike the Brouwer-Lyddane closed form, the periodic series here is
//! **expanded in eccentricity**: the semi-major axis term is kept exact while
//! the remaining components are truncated at zeroth order in `e`, with every
//! harmonic expressed in the mean longitude. This keeps the mapping regular
//! at `e = 0` and `i = 0`, which is the point of the equinoctial
//! formulation. Long-period zonal terms (J3-driven) are not part of this
//! stage.
//!
//! ## Validity
//!
//! Eccentricities up to 0.3; beyond that the truncation error dominates the
//! J2 signal and the input is rejected.

use hifitime::Epoch;
use nalgebra::Vector6;

use crate::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_J2, EARTH_MU};
use crate::kepler::{eccentric_to_true, principal_angle, solve_elliptic_kepler};
use crate::orbit_type::ElementSetKind;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;
use crate::theory::MeanTheory;

/// Maximum eccentricity magnitude accepted by the truncated series.
const MAX_ECCENTRICITY: f64 = 0.3;

/// DSST-style J2 zonal theory on equinoctial elements.
#[derive(Debug, Clone, Copy)]
pub struct DsstZonal {
    mu: f64,
    equatorial_radius: f64,
    j2: f64,
}

impl Default for DsstZonal {
    fn default() -> Self {
        Self {
            mu: EARTH_MU,
            equatorial_radius: EARTH_EQUATORIAL_RADIUS,
            j2: EARTH_J2,
        }
    }
}

impl DsstZonal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the theory for a non-default gravity field.
    pub fn with_gravity(mu: f64, equatorial_radius: f64, j2: f64) -> Self {
        Self {
            mu,
            equatorial_radius,
            j2,
        }
    }
}

impl MeanTheory for DsstZonal {
    fn name(&self) -> &'static str {
        "DSST zonal"
    }

    fn element_set(&self) -> ElementSetKind {
        ElementSetKind::Equinoctial
    }

    fn frame(&self) -> Frame {
        Frame::Eme2000
    }

    fn gravitational_parameter(&self) -> f64 {
        self.mu
    }

    fn check_admissible(&self, mean: &Vector6<f64>) -> Result<(), OsmeanError> {
        let a = mean[0];
        let ecc = (mean[1].powi(2) + mean[2].powi(2)).sqrt();

        if !(a > self.equatorial_radius) {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("semi-major axis {a:.1} m is below the equatorial radius"),
            });
        }
        if ecc > MAX_ECCENTRICITY {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!(
                    "eccentricity {ecc:.6} exceeds the truncation bound {MAX_ECCENTRICITY}"
                ),
            });
        }
        Ok(())
    }

    fn osculating_from_mean(
        &self,
        mean: &Vector6<f64>,
        _epoch: Epoch,
    ) -> Result<Vector6<f64>, OsmeanError> {
        self.check_admissible(mean)?;

        let eps = 1.0e-12;
        let (a, h, k) = (mean[0], mean[1], mean[2]);
        let (p, q, lambda) = (mean[3], mean[4], mean[5]);

        let ecc = (h * h + k * k).sqrt();
        let tgi2 = (p * p + q * q).sqrt();
        let i = 2.0 * tgi2.atan();
        let raan = if tgi2 < eps { 0.0 } else { p.atan2(q) };
        let lon_periapsis = if ecc < eps { 0.0 } else { h.atan2(k) };

        let gamma = 0.5 * self.j2 * (self.equatorial_radius / a).powi(2);
        let theta = i.cos();
        let theta2 = theta * theta;
        let s2 = 1.0 - theta2;
        let eta = (1.0 - ecc * ecc).sqrt();

        // Exact zonal semi-major axis term: non-singular in e, so there is no
        // reason to truncate it.
        let mean_anom = lambda - lon_periapsis;
        let ecc_anom = solve_elliptic_kepler(mean_anom, ecc)?;
        let f = eccentric_to_true(ecc_anom, ecc);
        let a_r = (1.0 + ecc * f.cos()) / (eta * eta);
        let two_u_exact = 2.0 * (lon_periapsis - raan) + 2.0 * f;
        let a_osc = a
            + a * gamma
                * ((3.0 * theta2 - 1.0) * (a_r.powi(3) - eta.powi(-3))
                    + 3.0 * s2 * a_r.powi(3) * two_u_exact.cos());

        // Remaining components at zeroth order in e: harmonics of the mean
        // longitude and of the node.
        let a1 = 1.5 * gamma * (3.0 * theta2 - 1.0);
        let b1 = 0.75 * gamma * s2;
        let c1 = 1.75 * gamma * s2;

        let k_osc = k + a1 * lambda.cos()
            + b1 * (lambda - 2.0 * raan).cos()
            + c1 * (3.0 * lambda - 2.0 * raan).cos();
        let h_osc = h + a1 * lambda.sin() - b1 * (lambda - 2.0 * raan).sin()
            + c1 * (3.0 * lambda - 2.0 * raan).sin();

        let two_u = 2.0 * (lambda - raan);
        let di = 1.5 * gamma * theta * s2.sqrt() * two_u.cos();
        let draan = 1.5 * gamma * theta * two_u.sin();
        let dlambda = 0.75 * gamma * (3.0 - 5.0 * theta2) * two_u.sin() + draan;

        // Push the (i, Ω) corrections through the inclination-vector mapping.
        let half_cos2 = (i / 2.0).cos().powi(2);
        let dtgi2 = di / (2.0 * half_cos2);
        let p_osc = p + dtgi2 * raan.sin() + tgi2 * raan.cos() * draan;
        let q_osc = q + dtgi2 * raan.cos() - tgi2 * raan.sin() * draan;

        let osc = Vector6::new(
            a_osc,
            h_osc,
            k_osc,
            p_osc,
            q_osc,
            principal_angle(lambda + dlambda),
        );
        if osc.iter().all(|x| x.is_finite()) {
            Ok(osc)
        } else {
            Err(OsmeanError::NonFiniteState(
                "DSST zonal osculating elements".into(),
            ))
        }
    }

    fn mean_rates(&self, mean: &Vector6<f64>) -> Result<Vector6<f64>, OsmeanError> {
        self.check_admissible(mean)?;

        let (a, h, k, p, q) = (mean[0], mean[1], mean[2], mean[3], mean[4]);
        let ecc2 = h * h + k * k;
        let eta = (1.0 - ecc2).sqrt();
        let tgi2 = (p * p + q * q).sqrt();
        let i = 2.0 * tgi2.atan();
        let theta = i.cos();
        let theta2 = theta * theta;

        let n = (self.mu / a.powi(3)).sqrt();
        let slr = a * eta * eta;
        let k2 = 1.5 * self.j2 * (self.equatorial_radius / slr).powi(2) * n;

        let raan_dot = -k2 * theta;
        let argp_dot = 0.5 * k2 * (5.0 * theta2 - 1.0);
        let m_dot = n + 0.5 * k2 * eta * (3.0 * theta2 - 1.0);

        // The eccentricity vector rotates at ϖ̇, the inclination vector at Ω̇.
        let lon_periapsis_dot = raan_dot + argp_dot;
        Ok(Vector6::new(
            0.0,
            k * lon_periapsis_dot,
            -h * lon_periapsis_dot,
            q * raan_dot,
            -p * raan_dot,
            lon_periapsis_dot + m_dot,
        ))
    }
}
