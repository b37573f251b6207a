use std::f64::consts::PI;

use hifitime::Epoch;
use osmean::orbit_type::keplerian_element::KeplerianElements;

/// Principal angular difference in [-π, π].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut d = (a - b).rem_euclid(two_pi);
    if d > PI {
        d -= two_pi;
    }
    d
}

/// Assert that two Keplerian element sets describe the same orbit, with a
/// metric tolerance on the semi-major axis and an angular tolerance on the
/// remaining components (eccentricity uses the angular tolerance as an
/// absolute bound).
pub fn assert_keplerian_close(
    actual: &KeplerianElements,
    expected: &KeplerianElements,
    sma_tol: f64,
    angle_tol: f64,
) {
    assert!(
        (actual.semi_major_axis - expected.semi_major_axis).abs() < sma_tol,
        "semi-major axis: {} vs {}",
        actual.semi_major_axis,
        expected.semi_major_axis
    );
    assert!(
        (actual.eccentricity - expected.eccentricity).abs() < angle_tol,
        "eccentricity: {} vs {}",
        actual.eccentricity,
        expected.eccentricity
    );
    assert!(
        (actual.inclination - expected.inclination).abs() < angle_tol,
        "inclination: {} vs {}",
        actual.inclination,
        expected.inclination
    );
    for (name, a, b) in [
        (
            "raan",
            actual.ascending_node_longitude,
            expected.ascending_node_longitude,
        ),
        (
            "argp",
            actual.periapsis_argument,
            expected.periapsis_argument,
        ),
        ("mean anomaly", actual.mean_anomaly, expected.mean_anomaly),
    ] {
        assert!(
            angle_diff(a, b).abs() < angle_tol,
            "{name}: {a} vs {b}"
        );
    }
}

/// Moderately eccentric LEO used across the integration tests.
pub fn leo_keplerian(epoch: Epoch) -> KeplerianElements {
    KeplerianElements {
        reference_epoch: epoch,
        semi_major_axis: 7.3e6,
        eccentricity: 0.015,
        inclination: 0.95,
        ascending_node_longitude: 0.4,
        periapsis_argument: 1.3,
        mean_anomaly: 2.7,
    }
}
