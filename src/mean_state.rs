//! # Mean orbital state
//!
//! [`MeanOrbitalState`] bundles a set of **averaged elements** with the epoch
//! they refer to, the frame they are expressed in, and the averaging theory
//! that gives them meaning. It is the value produced by the converters and
//! the entry point for materializing an osculating orbit or propagating the
//! mean elements semi-analytically.
//!
//! A state can only be built from elements the theory accepts: element-set
//! kind, frame, and orbit regime are all validated at construction, so a
//! [`MeanOrbitalState`] in hand is always consistent with its theory.

use hifitime::Epoch;
use std::fmt;

use crate::cartesian::CartesianState;
use crate::orbit_type::OrbitalElements;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;
use crate::theory::MeanTheory;

/// Averaged elements + epoch + frame + theory.
///
/// The epoch is carried by the element set itself; `epoch()` exposes it.
#[derive(Debug, Clone)]
pub struct MeanOrbitalState<T: MeanTheory> {
    frame: Frame,
    elements: OrbitalElements,
    theory: T,
}

impl<T: MeanTheory> MeanOrbitalState<T> {
    /// Build a mean state, validating it against the theory.
    ///
    /// Errors
    /// ------
    /// * [`OsmeanError::UnsupportedElementSet`] when the element
    ///   representation is not the one the theory is formulated in.
    /// * [`OsmeanError::UnsupportedFrame`] when the frame does not match.
    /// * [`OsmeanError::UnsupportedOrbitRegime`] when the elements lie
    ///   outside the theory's domain (regime checks are theory-specific).
    pub fn new(elements: OrbitalElements, frame: Frame, theory: T) -> Result<Self, OsmeanError> {
        if elements.kind() != theory.element_set() {
            return Err(OsmeanError::UnsupportedElementSet {
                theory: theory.name(),
                expected: theory.element_set().as_str(),
                found: elements.kind().as_str(),
            });
        }
        if frame != theory.frame() {
            return Err(OsmeanError::UnsupportedFrame {
                theory: theory.name(),
                expected: theory.frame().as_str(),
                found: frame.as_str(),
            });
        }
        theory.check_admissible(&elements.to_vector())?;

        Ok(Self {
            frame,
            elements,
            theory,
        })
    }

    /// Epoch the averaged elements refer to.
    pub fn epoch(&self) -> Epoch {
        self.elements.reference_epoch()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// The averaged elements.
    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn theory(&self) -> &T {
        &self.theory
    }

    /// Osculating elements reproducing the instantaneous state at the epoch.
    pub fn to_osculating_elements(&self) -> Result<OrbitalElements, OsmeanError> {
        let osc = self
            .theory
            .osculating_from_mean(&self.elements.to_vector(), self.epoch())?;
        Ok(OrbitalElements::from_vector(
            self.theory.element_set(),
            self.epoch(),
            &osc,
        ))
    }

    /// Materialize the osculating position/velocity state at the epoch.
    pub fn to_osculating_orbit(&self) -> Result<CartesianState, OsmeanError> {
        let osc = self.to_osculating_elements()?.to_keplerian();
        CartesianState::from_keplerian(&osc, self.frame, self.theory.gravitational_parameter())
    }
}

impl<T: MeanTheory + Clone> MeanOrbitalState<T> {
    /// Advance the mean elements to `epoch` using the theory's secular rates.
    ///
    /// This is the semi-analytical propagation step: short-period variations
    /// stay folded in the theory, only the secular drift is applied.
    pub fn propagate_to(&self, epoch: Epoch) -> Result<Self, OsmeanError> {
        let dt = (epoch - self.epoch()).to_seconds();
        let v = self.elements.to_vector();
        let rates = self.theory.mean_rates(&v)?;

        let advanced = v + rates * dt;
        Ok(Self {
            frame: self.frame,
            elements: OrbitalElements::from_vector(self.theory.element_set(), epoch, &advanced),
            theory: self.theory.clone(),
        })
    }
}

impl<T: MeanTheory> fmt::Display for MeanOrbitalState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean state ({} / {})", self.theory.name(), self.frame)?;
        write!(f, "{}", self.elements)
    }
}

#[cfg(test)]
mod mean_state_test {
    use super::*;
    use crate::orbit_type::keplerian_element::KeplerianElements;
    use crate::theory::brouwer_lyddane::BrouwerLyddane;
    use approx::assert_abs_diff_eq;

    fn mean_keplerian() -> KeplerianElements {
        KeplerianElements {
            reference_epoch: Epoch::from_mjd_utc(60000.0),
            semi_major_axis: 7.2e6,
            eccentricity: 0.01,
            inclination: 1.2,
            ascending_node_longitude: 0.5,
            periapsis_argument: 1.1,
            mean_anomaly: 2.3,
        }
    }

    #[test]
    fn test_construction_validates_kind_and_frame() {
        let kep = mean_keplerian();

        let bad_kind = MeanOrbitalState::new(
            OrbitalElements::Equinoctial((&kep).into()),
            Frame::Eme2000,
            BrouwerLyddane::new(),
        );
        assert!(matches!(
            bad_kind,
            Err(OsmeanError::UnsupportedElementSet { .. })
        ));

        let bad_frame = MeanOrbitalState::new(
            OrbitalElements::Keplerian(kep.clone()),
            Frame::Teme,
            BrouwerLyddane::new(),
        );
        assert!(matches!(bad_frame, Err(OsmeanError::UnsupportedFrame { .. })));

        assert!(MeanOrbitalState::new(
            OrbitalElements::Keplerian(kep),
            Frame::Eme2000,
            BrouwerLyddane::new(),
        )
        .is_ok());
    }

    #[test]
    fn test_osculating_orbit_matches_theory() {
        let kep = mean_keplerian();
        let state = MeanOrbitalState::new(
            OrbitalElements::Keplerian(kep.clone()),
            Frame::Eme2000,
            BrouwerLyddane::new(),
        )
        .unwrap();

        let orbit = state.to_osculating_orbit().unwrap();
        assert_eq!(orbit.frame, Frame::Eme2000);
        assert_eq!(orbit.epoch, kep.reference_epoch);

        // The osculating radius stays within the short-periodic envelope.
        let r = orbit.position.norm();
        let bound = kep.semi_major_axis * (1.0 + kep.eccentricity + 1.0e-2);
        assert!(r < bound && r > kep.semi_major_axis * (1.0 - kep.eccentricity - 1.0e-2));
    }

    #[test]
    fn test_propagation_moves_the_anomaly() {
        let kep = mean_keplerian();
        let state = MeanOrbitalState::new(
            OrbitalElements::Keplerian(kep.clone()),
            Frame::Eme2000,
            BrouwerLyddane::new(),
        )
        .unwrap();

        let later = state.epoch() + hifitime::Duration::from_seconds(600.0);
        let advanced = state.propagate_to(later).unwrap();

        assert_eq!(advanced.epoch(), later);
        let before = state.elements().to_keplerian();
        let after = advanced.elements().to_keplerian();

        // Semi-major axis has no secular drift; the anomaly advances by ~n·dt.
        assert_abs_diff_eq!(after.semi_major_axis, before.semi_major_axis, epsilon = 1e-6);
        let n = (crate::constants::EARTH_MU / before.semi_major_axis.powi(3)).sqrt();
        let dm = crate::kepler::angle_diff(after.mean_anomaly, before.mean_anomaly);
        assert_abs_diff_eq!(dm, n * 600.0, epsilon = 1e-3);
    }
}
