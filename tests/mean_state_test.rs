//! Semi-analytical propagation of mean states obtained from a conversion.

mod common;

use hifitime::{Duration, Epoch};
use osmean::constants::{EARTH_EQUATORIAL_RADIUS, EARTH_J2, EARTH_MU};
use osmean::conversion::fixed_point::FixedPointConverter;
use osmean::orbit_type::OrbitalElements;
use osmean::theory::brouwer_lyddane::BrouwerLyddane;

use crate::common::angle_diff;

#[test]
fn propagated_mean_state_follows_secular_node_drift() {
    let epoch = Epoch::from_mjd_utc(60500.0);
    let osc = OrbitalElements::Keplerian(common::leo_keplerian(epoch));

    let converter = FixedPointConverter::new(BrouwerLyddane::new());
    let (mean, _) = converter.to_mean_from_elements(&osc).unwrap();

    let day = Duration::from_seconds(86_400.0);
    let advanced = mean.propagate_to(mean.epoch() + day).unwrap();

    let before = mean.elements().to_keplerian();
    let after = advanced.elements().to_keplerian();

    // Analytical J2 node regression for this orbit.
    let n = (EARTH_MU / before.semi_major_axis.powi(3)).sqrt();
    let p = before.semi_major_axis * (1.0 - before.eccentricity.powi(2));
    let expected_rate =
        -1.5 * EARTH_J2 * (EARTH_EQUATORIAL_RADIUS / p).powi(2) * n * before.inclination.cos();

    let measured = angle_diff(
        after.ascending_node_longitude,
        before.ascending_node_longitude,
    ) / 86_400.0;
    assert!(
        (measured - expected_rate).abs() < expected_rate.abs() * 1.0e-9,
        "node rate {measured} vs {expected_rate}"
    );

    // Shape elements carry no secular drift.
    assert!((after.semi_major_axis - before.semi_major_axis).abs() < 1.0e-6);
    assert!((after.eccentricity - before.eccentricity).abs() < 1.0e-12);
    assert!((after.inclination - before.inclination).abs() < 1.0e-12);
}

#[test]
fn propagated_mean_state_still_materializes() {
    let epoch = Epoch::from_mjd_utc(60500.0);
    let osc = OrbitalElements::Keplerian(common::leo_keplerian(epoch));

    let converter = FixedPointConverter::new(BrouwerLyddane::new());
    let (mean, _) = converter.to_mean_from_elements(&osc).unwrap();

    let kep = mean.elements().to_keplerian();
    let advanced = mean
        .propagate_to(mean.epoch() + Duration::from_seconds(5_400.0))
        .unwrap();
    let orbit = advanced.to_osculating_orbit().unwrap();

    let r = orbit.position.norm();
    let upper = kep.semi_major_axis * (1.0 + kep.eccentricity) + 3.0e4;
    let lower = kep.semi_major_axis * (1.0 - kep.eccentricity) - 3.0e4;
    assert!(r > lower && r < upper, "radius {r} outside [{lower}, {upper}]");
}
