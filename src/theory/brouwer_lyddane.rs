//! # Brouwer-Lyddane averaging theory
//!
//! First-order J2 mapping between mean and osculating **Keplerian elements**,
//! following Brouwer's artificial-satellite theory (1959) with Lyddane's
//! recombination of the angular corrections. Short-period terms are kept in
//! closed form in the eccentricity; the J2-squared and higher zonal
//! contributions are not modeled.
//!
//! ## Validity
//!
//! - Elliptic orbits with `1e-4 ≤ e ≤ 0.9`: the anomaly correction carries a
//!   `1/e` factor, so the theory is singular for circular orbits (use
//!   Eckstein-Hechler or DSST zonal there).
//! - Inclinations away from 0 and π (the `tan i` divisor) and away from the
//!   **critical inclination** `i ≈ 63.43°` where the `1 − 5cos²i` divisors of
//!   the long-period terms vanish. Precision degrades as the divisor shrinks;
//!   inputs inside a small guard band are rejected outright.

use hifitime::Epoch;
use nalgebra::Vector6;

use crate::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_J2, EARTH_MU};
use crate::kepler::{angle_diff, eccentric_to_true, principal_angle, solve_elliptic_kepler};
use crate::orbit_type::ElementSetKind;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;
use crate::theory::MeanTheory;

/// Guard band around the critical-inclination divisor `1 - 5cos²i`.
const CRITICAL_INCL_GUARD: f64 = 1.0e-3;

/// Brouwer-Lyddane first-order J2 theory on Keplerian elements.
#[derive(Debug, Clone, Copy)]
pub struct BrouwerLyddane {
    mu: f64,
    equatorial_radius: f64,
    j2: f64,
}

impl Default for BrouwerLyddane {
    fn default() -> Self {
        Self {
            mu: EARTH_MU,
            equatorial_radius: EARTH_EQUATORIAL_RADIUS,
            j2: EARTH_J2,
        }
    }
}

impl BrouwerLyddane {
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

impl MeanTheory for BrouwerLyddane {
    fn name(&self) -> &'static str {
        "Brouwer-Lyddane"
    }

    fn element_set(&self) -> ElementSetKind {
        ElementSetKind::Keplerian
    }

    fn frame(&self) -> Frame {
        Frame::Eme2000
    }

    fn gravitational_parameter(&self) -> f64 {
        self.mu
    }

    fn check_admissible(&self, mean: &Vector6<f64>) -> Result<(), OsmeanError> {
        let (a, e, i) = (mean[0], mean[1], mean[2]);

        if !(a > self.equatorial_radius) {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("semi-major axis {a:.1} m is below the equatorial radius"),
            });
        }
        if !(1.0e-4..=0.9).contains(&e) {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("eccentricity {e:.6} outside the supported range [1e-4, 0.9]"),
            });
        }
        let theta2 = i.cos().powi(2);
        if (1.0 - 5.0 * theta2).abs() < CRITICAL_INCL_GUARD {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("inclination {i:.6} rad is inside the critical-inclination band"),
            });
        }
        if i.sin().abs() < 1.0e-3 {
            return Err(OsmeanError::UnsupportedOrbitRegime {
                theory: self.name(),
                reason: format!("inclination {i:.6} rad is too close to equatorial"),
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

        let (a, e, i) = (mean[0], mean[1], mean[2]);
        let (raan, argp, mean_anom) = (mean[3], mean[4], mean[5]);

        let eta = (1.0 - e * e).sqrt();
        let gm2 = 0.5 * self.j2 * (self.equatorial_radius / a).powi(2);
        let gm2p = gm2 / eta.powi(4);

        let ecc_anom = solve_elliptic_kepler(mean_anom, e)?;
        let f = eccentric_to_true(ecc_anom, e);
        let (sin_f, cos_f) = f.sin_cos();

        // a/r from the orbit equation; (a/r)·η recurs in the anomaly terms.
        let a_r = (1.0 + e * cos_f) / (eta * eta);
        let ar_eta2 = (a_r * eta).powi(2);

        let theta = i.cos();
        let theta2 = theta * theta;
        let theta4 = theta2 * theta2;
        let s2 = 1.0 - theta2;
        let crit = 1.0 - 5.0 * theta2;

        let two_u = 2.0 * argp + 2.0 * f;
        let eq_center = angle_diff(f, mean_anom) + e * sin_f;

        // Semi-major axis, closed form in e.
        let a_osc = a
            + a * gm2
                * ((3.0 * theta2 - 1.0) * (a_r.powi(3) - eta.powi(-3))
                    + 3.0 * s2 * a_r.powi(3) * two_u.cos());

        // Long-period eccentricity term, shared by the δe and δi corrections.
        let de1 = gm2p / 8.0
            * e
            * eta.powi(2)
            * (1.0 - 11.0 * theta2 - 40.0 * theta4 / crit)
            * (2.0 * argp).cos();

        let de = de1
            + eta.powi(2) / 2.0
                * (gm2
                    * ((3.0 * theta2 - 1.0) / eta.powi(6)
                        * (e * eta
                            + e / (1.0 + eta)
                            + 3.0 * cos_f
                            + 3.0 * e * cos_f.powi(2)
                            + e * e * cos_f.powi(3))
                        + 3.0 * s2 / eta.powi(6)
                            * (e + 3.0 * cos_f + 3.0 * e * cos_f.powi(2) + e * e * cos_f.powi(3))
                            * two_u.cos())
                    - gm2p
                        * s2
                        * (3.0 * (2.0 * argp + f).cos() + (2.0 * argp + 3.0 * f).cos()));

        let di = -e * de1 / (eta.powi(2) * i.tan())
            + gm2p / 2.0
                * theta
                * s2.sqrt()
                * (3.0 * two_u.cos()
                    + 3.0 * e * (2.0 * argp + f).cos()
                    + e * (2.0 * argp + 3.0 * f).cos());

        // Anomaly correction, recovered from e·δM (Lyddane's combination).
        let e_dm = gm2p / 8.0
            * e
            * eta.powi(3)
            * (1.0 - 11.0 * theta2 - 40.0 * theta4 / crit)
            * (2.0 * argp).sin()
            - gm2p / 4.0
                * eta.powi(3)
                * (2.0 * (3.0 * theta2 - 1.0) * (ar_eta2 + a_r + 1.0) * sin_f
                    + 3.0 * s2
                        * ((-ar_eta2 - a_r + 1.0) * (2.0 * argp + f).sin()
                            + (ar_eta2 + a_r + 1.0 / 3.0) * (2.0 * argp + 3.0 * f).sin()));
        let dm = e_dm / e;

        let draan = -gm2p / 8.0
            * e
            * e
            * theta
            * (11.0 + 80.0 * theta2 / crit + 200.0 * theta4 / (crit * crit))
            * (2.0 * argp).sin()
            - gm2p / 2.0
                * theta
                * (6.0 * eq_center
                    - 3.0 * two_u.sin()
                    - 3.0 * e * (2.0 * argp + f).sin()
                    - e * (2.0 * argp + 3.0 * f).sin());

        // Combined correction on M + ω + Ω.
        let dl = gm2p / 8.0
            * eta.powi(3)
            * (1.0 - 11.0 * theta2 - 40.0 * theta4 / crit)
            * (2.0 * argp).sin()
            - gm2p / 16.0
                * (2.0 + e * e
                    - 11.0 * (2.0 + 3.0 * e * e) * theta2
                    - 40.0 * (2.0 + 5.0 * e * e) * theta4 / crit
                    - 400.0 * e * e * theta4 * theta2 / (crit * crit))
                * (2.0 * argp).sin()
            + gm2p / 4.0
                * (-6.0 * crit * eq_center
                    + (3.0 - 5.0 * theta2)
                        * (3.0 * two_u.sin()
                            + 3.0 * e * (2.0 * argp + f).sin()
                            + e * (2.0 * argp + 3.0 * f).sin()))
            + gm2p / 8.0
                * e
                * e
                * theta
                * (11.0 + 80.0 * theta2 / crit + 200.0 * theta4 / (crit * crit))
                * (2.0 * argp).sin()
            - gm2p / 2.0
                * theta
                * (6.0 * eq_center
                    - 3.0 * two_u.sin()
                    - 3.0 * e * (2.0 * argp + f).sin()
                    - e * (2.0 * argp + 3.0 * f).sin());

        let m_osc = principal_angle(mean_anom + dm);
        let raan_osc = principal_angle(raan + draan);
        let argp_osc = principal_angle(mean_anom + argp + raan + dl - m_osc - raan_osc);

        let osc = Vector6::new(a_osc, e + de, i + di, raan_osc, argp_osc, m_osc);
        if osc.iter().all(|x| x.is_finite()) {
            Ok(osc)
        } else {
            Err(OsmeanError::NonFiniteState(
                "Brouwer-Lyddane osculating elements".into(),
            ))
        }
    }

    fn mean_rates(&self, mean: &Vector6<f64>) -> Result<Vector6<f64>, OsmeanError> {
        self.check_admissible(mean)?;

        let (a, e, i) = (mean[0], mean[1], mean[2]);
        let eta = (1.0 - e * e).sqrt();
        let n = (self.mu / a.powi(3)).sqrt();
        let p = a * eta * eta;
        let k2 = 1.5 * self.j2 * (self.equatorial_radius / p).powi(2) * n;
        let theta = i.cos();

        let raan_dot = -k2 * theta;
        let argp_dot = 0.5 * k2 * (5.0 * theta * theta - 1.0);
        let m_dot = n + 0.5 * k2 * eta * (3.0 * theta * theta - 1.0);

        Ok(Vector6::new(0.0, 0.0, 0.0, raan_dot, argp_dot, m_dot))
    }
}

#[cfg(test)]
mod brouwer_lyddane_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn leo_mean() -> Vector6<f64> {
        // a = 7200 km, e = 0.01, i = 98.7° (sun-synchronous-like)
        Vector6::new(7.2e6, 0.01, 1.7226, 0.5, 1.1, 2.3)
    }

    #[test]
    fn test_osculating_magnitude() {
        let theory = BrouwerLyddane::new();
        let epoch = Epoch::from_mjd_utc(60000.0);
        let mean = leo_mean();

        let osc = theory.osculating_from_mean(&mean, epoch).unwrap();

        // J2 short-periodics move the LEO semi-major axis by a few km at most,
        // and always by more than a few meters away from the nodes.
        let da = (osc[0] - mean[0]).abs();
        assert!(da < 3.0e4, "da = {da}");
        assert!((osc[1] - mean[1]).abs() < 5.0e-3);
        assert!((osc[2] - mean[2]).abs() < 5.0e-3);
    }

    #[test]
    fn test_purity() {
        let theory = BrouwerLyddane::new();
        let epoch = Epoch::from_mjd_utc(60000.0);
        let mean = leo_mean();

        let first = theory.osculating_from_mean(&mean, epoch).unwrap();
        let second = theory.osculating_from_mean(&mean, epoch).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_near_circular() {
        let theory = BrouwerLyddane::new();
        let mut mean = leo_mean();
        mean[1] = 1.0e-6;
        assert!(theory.check_admissible(&mean).is_err());
    }

    #[test]
    fn test_rejects_critical_inclination() {
        let theory = BrouwerLyddane::new();
        let mut mean = leo_mean();
        // cos²i = 1/5 exactly
        mean[2] = (1.0f64 / 5.0f64).sqrt().acos();
        assert!(theory.check_admissible(&mean).is_err());
    }

    #[test]
    fn test_secular_rates_sun_synchronous_sign() {
        let theory = BrouwerLyddane::new();
        let rates = theory.mean_rates(&leo_mean()).unwrap();

        // Retrograde orbit: the node precesses eastward (positive rate).
        assert!(rates[3] > 0.0);
        // Keplerian part dominates the anomaly rate.
        let n = (EARTH_MU / 7.2e6f64.powi(3)).sqrt();
        assert_abs_diff_eq!(rates[5], n, epsilon = 1e-5);
        assert_eq!(rates[0], 0.0);
        assert_eq!(rates[1], 0.0);
        assert_eq!(rates[2], 0.0);
    }
}
