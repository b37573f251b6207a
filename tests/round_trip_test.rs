//! Round-trip and idempotence properties of the osculating/mean converters,
//! exercised for every averaging theory.

mod common;

use hifitime::Epoch;
use osmean::conversion::fixed_point::FixedPointConverter;
use osmean::conversion::least_squares::LeastSquaresConverter;
use osmean::orbit_type::keplerian_element::KeplerianElements;
use osmean::orbit_type::OrbitalElements;
use osmean::theory::brouwer_lyddane::BrouwerLyddane;
use osmean::theory::dsst_zonal::DsstZonal;
use osmean::theory::eckstein_hechler::EcksteinHechler;
use osmean::theory::tle_gp::TleGp;
use osmean::theory::MeanTheory;

use crate::common::angle_diff;

fn epoch() -> Epoch {
    Epoch::from_mjd_utc(60250.0)
}

/// Component-wise residual check against the theory's angular mask.
fn assert_vectors_close<T: MeanTheory>(
    theory: &T,
    actual: &nalgebra::Vector6<f64>,
    expected: &nalgebra::Vector6<f64>,
    sma_tol: f64,
    tol: f64,
) {
    let mask = theory.element_set().angular_mask();
    let names = theory.element_set().component_names();
    for j in 0..6 {
        let d = if mask[j] {
            angle_diff(actual[j], expected[j]).abs()
        } else {
            (actual[j] - expected[j]).abs()
        };
        let bound = if j == 0 { sma_tol } else { tol };
        assert!(
            d < bound,
            "{} ({}): |{} - {}| = {d} >= {bound}",
            names[j],
            theory.name(),
            actual[j],
            expected[j]
        );
    }
}

fn check_round_trip<T: MeanTheory + Clone>(theory: T, osculating: &OrbitalElements) {
    let target = osculating
        .to_kind(theory.element_set())
        .to_vector();

    // Fixed point: theory(convert(osc)) must land back on osc.
    let fp = FixedPointConverter::new(theory.clone());
    let (mean_fp, report_fp) = fp.to_mean_from_elements(osculating).unwrap();
    assert!(report_fp.iterations < fp.params().max_iterations);
    let reproduced = mean_fp.to_osculating_elements().unwrap().to_vector();
    assert_vectors_close(&theory, &reproduced, &target, 1.0e-5, 1.0e-11);

    // Same property for the least-squares converter.
    let ls = LeastSquaresConverter::new(theory.clone());
    let (mean_ls, report_ls) = ls.to_mean_from_elements(osculating).unwrap();
    assert!(report_ls.iterations < ls.params().max_iterations);
    let reproduced = mean_ls.to_osculating_elements().unwrap().to_vector();
    assert_vectors_close(&theory, &reproduced, &target, 1.0e-5, 1.0e-11);

    // Idempotence: re-converting the reproduced osculating state must give
    // back the same mean elements.
    let osc_again = mean_fp.to_osculating_elements().unwrap();
    let (mean_again, _) = fp.to_mean_from_elements(&osc_again).unwrap();
    assert_vectors_close(
        &theory,
        &mean_again.elements().to_vector(),
        &mean_fp.elements().to_vector(),
        1.0e-4,
        1.0e-10,
    );
}

#[test]
fn round_trip_brouwer_lyddane() {
    let osc = OrbitalElements::Keplerian(common::leo_keplerian(epoch()));
    check_round_trip(BrouwerLyddane::new(), &osc);
}

#[test]
fn round_trip_eckstein_hechler() {
    let kep = KeplerianElements {
        reference_epoch: epoch(),
        semi_major_axis: 7.078e6,
        eccentricity: 0.002,
        inclination: 1.71,
        ascending_node_longitude: 2.9,
        periapsis_argument: 0.3,
        mean_anomaly: 5.1,
    };
    check_round_trip(EcksteinHechler::new(), &OrbitalElements::Keplerian(kep));
}

#[test]
fn round_trip_dsst_zonal() {
    let kep = KeplerianElements {
        reference_epoch: epoch(),
        semi_major_axis: 1.2e7,
        eccentricity: 0.1,
        inclination: 0.4,
        ascending_node_longitude: 1.9,
        periapsis_argument: 4.0,
        mean_anomaly: 0.6,
    };
    check_round_trip(DsstZonal::new(), &OrbitalElements::Keplerian(kep));
}

#[test]
fn round_trip_tle_gp() {
    let kep = KeplerianElements {
        reference_epoch: epoch(),
        semi_major_axis: 6.88e6,
        eccentricity: 0.01,
        inclination: 0.9,
        ascending_node_longitude: 3.3,
        periapsis_argument: 1.0,
        mean_anomaly: 2.0,
    };
    check_round_trip(TleGp::new(), &OrbitalElements::Keplerian(kep));
}

#[test]
fn round_trip_from_cartesian_state() {
    use osmean::cartesian::CartesianState;
    use osmean::ref_frame::Frame;

    let theory = BrouwerLyddane::new();
    let kep = common::leo_keplerian(epoch());
    let state =
        CartesianState::from_keplerian(&kep, Frame::Eme2000, theory.gravitational_parameter())
            .unwrap();

    let converter = FixedPointConverter::new(theory);
    let (mean, _) = converter.to_mean(&state).unwrap();
    let rebuilt = mean.to_osculating_orbit().unwrap();

    let dr = (rebuilt.position - state.position).norm();
    let dv = (rebuilt.velocity - state.velocity).norm();
    assert!(dr < 1.0e-3, "position residual {dr} m");
    assert!(dv < 1.0e-6, "velocity residual {dv} m/s");
}
