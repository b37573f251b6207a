//! # Eckstein-Hechler averaging theory
//!
//! First-order J2 mapping between mean and osculating **circular elements**,
//! after Eckstein & Hechler's analytical theory for near-circular orbits.
//! The short-period series is truncated at zeroth order in eccentricity,
//! which keeps every term regular as `e → 0` – the regime the classical
//! Keplerian formulation cannot handle.
//!
//! ## Validity
//!
//! - Near-circular orbits: the eccentricity magnitude `√(ex² + ey²)` must not
//!   exceed 0.1; accuracy degrades smoothly as the bound is approached.
//! - Any inclination; for strictly equatorial orbits the ascending node is
//!   carried conventionally, as in the element set itself.

use hifitime::Epoch;
use nalgebra::Vector6;

use crate::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_J2, EARTH_MU};
use crate::kepler::principal_angle;
use crate::orbit_type::ElementSetKind;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;
use crate::theory::MeanTheory;

/// Maximum eccentricity magnitude accepted by the theory.
const MAX_ECCENTRICITY: f64 = 0.1;

/// Eckstein-Hechler first-order J2 theory on circular elements.
#[derive(Debug, Clone, Copy)]
pub struct EcksteinHechler {
    mu: f64,
    equatorial_radius: f64,
    j2: f64,
}

impl Default for EcksteinHechler {
    fn default() -> Self {
        Self {
            mu: EARTH_MU,
            equatorial_radius: EARTH_EQUATORIAL_RADIUS,
            j2: EARTH_J2,
        }
    }
}

impl EcksteinHechler {
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

impl MeanTheory for EcksteinHechler {
    fn name(&self) -> &'static str {
        "Eckstein-Hechler"
    }

    fn element_set(&self) -> ElementSetKind {
        ElementSetKind::Circular
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
                    "eccentricity {ecc:.6} exceeds the near-circular bound {MAX_ECCENTRICITY}"
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

        let (a, ex, ey) = (mean[0], mean[1], mean[2]);
        let (i, raan, alpha) = (mean[3], mean[4], mean[5]);

        let gamma = 0.5 * self.j2 * (self.equatorial_radius / a).powi(2);
        let theta = i.cos();
        let theta2 = theta * theta;
        let s2 = 1.0 - theta2;

        // Argument of latitude; the series is truncated at O(e), so the mean
        // value is used directly inside the harmonics.
        let u = alpha;
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_2u, cos_2u) = (2.0 * u).sin_cos();
        let (sin_3u, cos_3u) = (3.0 * u).sin_cos();

        let a_osc = a * (1.0 + 3.0 * gamma * s2 * cos_2u);

        let ex_osc = ex + gamma * ((3.0 - 3.75 * s2) * cos_u + 1.75 * s2 * cos_3u);
        let ey_osc = ey + gamma * ((3.0 - 5.25 * s2) * sin_u + 1.75 * s2 * sin_3u);

        let i_osc = i + 1.5 * gamma * theta * s2.sqrt() * cos_2u;
        let raan_osc = principal_angle(raan + 1.5 * gamma * theta * sin_2u);
        let alpha_osc = principal_angle(alpha + 0.75 * gamma * (3.0 - 5.0 * theta2) * sin_2u);

        let osc = Vector6::new(a_osc, ex_osc, ey_osc, i_osc, raan_osc, alpha_osc);
        if osc.iter().all(|x| x.is_finite()) {
            Ok(osc)
        } else {
            Err(OsmeanError::NonFiniteState(
                "Eckstein-Hechler osculating elements".into(),
            ))
        }
    }

    fn mean_rates(&self, mean: &Vector6<f64>) -> Result<Vector6<f64>, OsmeanError> {
        self.check_admissible(mean)?;

        let (a, ex, ey, i) = (mean[0], mean[1], mean[2], mean[3]);
        let n = (self.mu / a.powi(3)).sqrt();
        let k2 = 1.5 * self.j2 * (self.equatorial_radius / a).powi(2) * n;
        let theta = i.cos();
        let theta2 = theta * theta;

        // The eccentricity vector rotates at the perigee drift rate.
        let argp_dot = 0.5 * k2 * (5.0 * theta2 - 1.0);
        let raan_dot = -k2 * theta;
        let alpha_dot = n + k2 * (4.0 * theta2 - 1.0);

        Ok(Vector6::new(
            0.0,
            -argp_dot * ey,
            argp_dot * ex,
            0.0,
            raan_dot,
            alpha_dot,
        ))
    }
}
