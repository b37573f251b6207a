//! # Kepler equation solvers and angle utilities
//!
//! Elliptic two-body relations shared by the averaging theories and the
//! Cartesian/element conversions:
//!
//! - [`principal_angle`] / [`angle_diff`] – normalization of angular elements,
//! - [`solve_elliptic_kepler`] – Newton–Raphson solution of `M = E - e·sin E`,
//! - anomaly conversions (`E ↔ f`, `E → M`).
//!
//! All angles are in radians. The Kepler solver relies on the `roots` crate
//! with a tight convergence criterion (~2e-14), which is sufficient for the
//! fixed-point and least-squares converters built on top of it.

use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::constants::DPI;
use crate::osmean_errors::OsmeanError;
use std::f64::consts::PI;

/// Return the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Return the principal difference between two angles, in [-π, π].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let a = principal_angle(a);
    let b = principal_angle(b);

    let mut diff = a - b;

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Solve the elliptic Kepler equation `M = E - e·sin E` for the eccentric anomaly `E`.
///
/// Arguments
/// -----------------
/// * `mean_anomaly`: mean anomaly M (radians).
/// * `eccentricity`: orbit eccentricity, must satisfy `0 <= e < 1`.
///
/// Return
/// ----------
/// * The eccentric anomaly E (radians), or an error if the Newton iteration
///   fails to converge.
pub fn solve_elliptic_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, OsmeanError> {
    let m = principal_angle(mean_anomaly);

    // Residual R(E) = E - e·sin(E) - M and derivative R'(E)
    let f = |e_anom: f64| -> f64 { e_anom - eccentricity * e_anom.sin() - m };
    let df = |e_anom: f64| -> f64 { 1.0 - eccentricity * e_anom.cos() };

    // Starting point E0 = M + e·sin(M) is within the convergence basin for e < 1.
    let x0 = m + eccentricity * m.sin();

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2, // ~2e-14
        max_iter: 50,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Convert an eccentric anomaly to the true anomaly.
///
/// Uses the half-angle atan2 form, valid in every quadrant for `e < 1`.
pub fn eccentric_to_true(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    principal_angle(
        2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
            .atan2((1.0 - eccentricity).sqrt() * half.cos()),
    )
}

/// Convert a true anomaly to the eccentric anomaly.
pub fn true_to_eccentric(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = true_anomaly / 2.0;
    principal_angle(
        2.0 * ((1.0 - eccentricity).sqrt() * half.sin())
            .atan2((1.0 + eccentricity).sqrt() * half.cos()),
    )
}

/// Convert an eccentric anomaly to the mean anomaly (Kepler equation, direct way).
pub fn eccentric_to_mean(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    principal_angle(eccentric_anomaly - eccentricity * eccentric_anomaly.sin())
}
