//! # Orbital element representations
//!
//! This module defines multiple **canonical orbital element sets** and the
//! associated conversions between them:
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element) – Classical Keplerian elements `(a, e, i, Ω, ω, M)`,
//!   the user-facing representation for eccentric orbits.
//! - [`circular_element`](crate::orbit_type::circular_element) – Circular elements `(a, ex, ey, i, Ω, α)`,
//!   a **non-singular-in-eccentricity formulation** used by the Eckstein-Hechler theory.
//! - [`equinoctial_element`](crate::orbit_type::equinoctial_element) – Equinoctial elements `(a, h, k, p, q, λ)`,
//!   a fully non-singular formulation used by the DSST zonal theory.
//!
//! The [`OrbitalElements`](crate::orbit_type::OrbitalElements) enum acts as a **type-erased wrapper** that can hold
//! any of these three representations, while providing uniform conversion methods.
//!
//! All element sets are elliptic-only: they are produced either directly by the
//! caller or by [`CartesianState::to_keplerian`](crate::cartesian::CartesianState::to_keplerian),
//! which rejects parabolic and hyperbolic states before an element set is ever built.
//!
//! ## Vector form
//!
//! The fixed-point and least-squares converters iterate on a raw
//! `Vector6<f64>` view of the elements. [`ElementSetKind`] describes the
//! layout of that vector for each representation, in particular which
//! components are angles – residuals on those components must be wrapped to
//! [-π, π] before being compared to a convergence threshold.

use nalgebra::Vector6;

use hifitime::Epoch;

use crate::orbit_type::{
    circular_element::CircularElements, equinoctial_element::EquinoctialElements,
    keplerian_element::KeplerianElements,
};

/// Classical Keplerian elements structure and utilities.
pub mod keplerian_element;

/// Circular (non-singular in eccentricity) orbital elements.
pub mod circular_element;

/// Equinoctial (fully non-singular) orbital elements.
pub mod equinoctial_element;

/// Layout descriptor of the 6-component vector form of an element set.
///
/// Each averaging theory declares the element set it works in; the converters
/// use this descriptor to pack/unpack states and to wrap angular residuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSetKind {
    /// `[a, e, i, Ω, ω, M]`
    Keplerian,
    /// `[a, ex, ey, i, Ω, α]`
    Circular,
    /// `[a, h, k, p, q, λ]`
    Equinoctial,
}

impl ElementSetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementSetKind::Keplerian => "Keplerian",
            ElementSetKind::Circular => "Circular",
            ElementSetKind::Equinoctial => "Equinoctial",
        }
    }

    /// Mask of the components that are angles, wrapped to [0, 2π).
    pub fn angular_mask(&self) -> [bool; 6] {
        match self {
            ElementSetKind::Keplerian => [false, false, true, true, true, true],
            ElementSetKind::Circular => [false, false, false, true, true, true],
            ElementSetKind::Equinoctial => [false, false, false, false, false, true],
        }
    }

    /// Human-readable component names, used in diagnostics.
    pub fn component_names(&self) -> [&'static str; 6] {
        match self {
            ElementSetKind::Keplerian => ["a", "e", "i", "raan", "argp", "mean_anomaly"],
            ElementSetKind::Circular => ["a", "ex", "ey", "i", "raan", "alpha"],
            ElementSetKind::Equinoctial => ["a", "h", "k", "p", "q", "lambda"],
        }
    }
}

impl std::fmt::Display for ElementSetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical orbital elements in multiple representations.
///
/// This enum acts as a sum type over several orbital-element parameterizations.
/// It lets callers request or carry elements without committing to a single
/// representation at the type level.
///
/// Variants
/// --------
/// * `Keplerian`   – Classical elements `(a, e, i, Ω, ω, M)`; best for eccentric orbits.
/// * `Circular`    – Elements `(a, ex, ey, i, Ω, α)`; robust near e≈0.
/// * `Equinoctial` – Non-singular elements `(a, h, k, p, q, λ)`; robust near e≈0 and i≈0.
#[derive(Debug, Clone, PartialEq)]
pub enum OrbitalElements {
    Keplerian(KeplerianElements),
    Circular(CircularElements),
    Equinoctial(EquinoctialElements),
}

impl OrbitalElements {
    /// Representation held by this value.
    pub fn kind(&self) -> ElementSetKind {
        match self {
            OrbitalElements::Keplerian(_) => ElementSetKind::Keplerian,
            OrbitalElements::Circular(_) => ElementSetKind::Circular,
            OrbitalElements::Equinoctial(_) => ElementSetKind::Equinoctial,
        }
    }

    /// Epoch the elements refer to.
    pub fn reference_epoch(&self) -> Epoch {
        match self {
            OrbitalElements::Keplerian(k) => k.reference_epoch,
            OrbitalElements::Circular(c) => c.reference_epoch,
            OrbitalElements::Equinoctial(e) => e.reference_epoch,
        }
    }

    /// Convert to Keplerian elements.
    pub fn to_keplerian(&self) -> KeplerianElements {
        match self {
            OrbitalElements::Keplerian(ke) => ke.clone(),
            OrbitalElements::Circular(ce) => KeplerianElements::from(ce),
            OrbitalElements::Equinoctial(ee) => KeplerianElements::from(ee),
        }
    }

    /// Convert to circular elements.
    pub fn to_circular(&self) -> CircularElements {
        match self {
            OrbitalElements::Keplerian(ke) => CircularElements::from(ke),
            OrbitalElements::Circular(ce) => ce.clone(),
            OrbitalElements::Equinoctial(ee) => CircularElements::from(&KeplerianElements::from(ee)),
        }
    }

    /// Convert to equinoctial elements.
    pub fn to_equinoctial(&self) -> EquinoctialElements {
        match self {
            OrbitalElements::Keplerian(ke) => EquinoctialElements::from(ke),
            OrbitalElements::Circular(ce) => EquinoctialElements::from(&KeplerianElements::from(ce)),
            OrbitalElements::Equinoctial(ee) => ee.clone(),
        }
    }

    /// Convert to the representation described by `kind`.
    pub fn to_kind(&self, kind: ElementSetKind) -> OrbitalElements {
        match kind {
            ElementSetKind::Keplerian => OrbitalElements::Keplerian(self.to_keplerian()),
            ElementSetKind::Circular => OrbitalElements::Circular(self.to_circular()),
            ElementSetKind::Equinoctial => OrbitalElements::Equinoctial(self.to_equinoctial()),
        }
    }

    /// Raw 6-component vector view, laid out per [`ElementSetKind`].
    pub fn to_vector(&self) -> Vector6<f64> {
        match self {
            OrbitalElements::Keplerian(ke) => ke.to_vector(),
            OrbitalElements::Circular(ce) => ce.to_vector(),
            OrbitalElements::Equinoctial(ee) => ee.to_vector(),
        }
    }

    /// Rebuild typed elements from a raw vector.
    pub fn from_vector(kind: ElementSetKind, reference_epoch: Epoch, v: &Vector6<f64>) -> Self {
        match kind {
            ElementSetKind::Keplerian => {
                OrbitalElements::Keplerian(KeplerianElements::from_vector(reference_epoch, v))
            }
            ElementSetKind::Circular => {
                OrbitalElements::Circular(CircularElements::from_vector(reference_epoch, v))
            }
            ElementSetKind::Equinoctial => {
                OrbitalElements::Equinoctial(EquinoctialElements::from_vector(reference_epoch, v))
            }
        }
    }

    /// Get a reference to the underlying [`KeplerianElements`] if this is `Keplerian`.
    pub fn as_keplerian(&self) -> Option<&KeplerianElements> {
        if let OrbitalElements::Keplerian(ref k) = self {
            Some(k)
        } else {
            None
        }
    }

    /// Get a reference to the underlying [`CircularElements`] if this is `Circular`.
    pub fn as_circular(&self) -> Option<&CircularElements> {
        if let OrbitalElements::Circular(ref c) = self {
            Some(c)
        } else {
            None
        }
    }

    /// Get a reference to the underlying [`EquinoctialElements`] if this is `Equinoctial`.
    pub fn as_equinoctial(&self) -> Option<&EquinoctialElements> {
        if let OrbitalElements::Equinoctial(ref e) = self {
            Some(e)
        } else {
            None
        }
    }
}

use std::fmt;

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitalElements::Keplerian(k) => {
                writeln!(f, "[Keplerian representation]")?;
                write!(f, "{k}")
            }
            OrbitalElements::Circular(c) => {
                writeln!(f, "[Circular representation]")?;
                write!(f, "{c}")
            }
            OrbitalElements::Equinoctial(e) => {
                writeln!(f, "[Equinoctial representation]")?;
                write!(f, "{e}")
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod orbit_type_test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    /// Degrees to radians helper.
    fn deg(x: f64) -> f64 {
        x * PI / 180.0
    }

    /// Compare two angles modulo 2π with an absolute epsilon.
    pub(crate) fn assert_angle_eq(a: f64, b: f64, eps: f64) {
        let d = crate::kepler::angle_diff(a, b);
        assert_abs_diff_eq!(d, 0.0, epsilon = eps);
    }

    fn sample_keplerian() -> KeplerianElements {
        KeplerianElements {
            reference_epoch: Epoch::from_mjd_utc(60000.0),
            semi_major_axis: 7.2e6,
            eccentricity: 0.05,
            inclination: deg(51.6),
            ascending_node_longitude: deg(40.0),
            periapsis_argument: deg(80.0),
            mean_anomaly: deg(10.0),
        }
    }

    #[test]
    fn keplerian_circular_round_trip() {
        let ke = sample_keplerian();
        let ce = CircularElements::from(&ke);
        let back = KeplerianElements::from(&ce);

        assert_abs_diff_eq!(back.semi_major_axis, ke.semi_major_axis, epsilon = 1e-6);
        assert_relative_eq!(back.eccentricity, ke.eccentricity, max_relative = 1e-12);
        assert_abs_diff_eq!(back.inclination, ke.inclination, epsilon = 1e-13);
        assert_angle_eq(
            back.ascending_node_longitude,
            ke.ascending_node_longitude,
            1e-13,
        );
        assert_angle_eq(back.periapsis_argument, ke.periapsis_argument, 1e-11);
        assert_angle_eq(back.mean_anomaly, ke.mean_anomaly, 1e-11);
    }

    #[test]
    fn keplerian_equinoctial_round_trip() {
        let ke = sample_keplerian();
        let ee = EquinoctialElements::from(&ke);
        let back = KeplerianElements::from(&ee);

        assert_abs_diff_eq!(back.semi_major_axis, ke.semi_major_axis, epsilon = 1e-6);
        assert_relative_eq!(back.eccentricity, ke.eccentricity, max_relative = 1e-10);
        assert_abs_diff_eq!(back.inclination, ke.inclination, epsilon = 1e-12);
        assert_angle_eq(
            back.ascending_node_longitude,
            ke.ascending_node_longitude,
            1e-12,
        );
        assert_angle_eq(back.periapsis_argument, ke.periapsis_argument, 1e-10);
        assert_angle_eq(back.mean_anomaly, ke.mean_anomaly, 1e-10);
    }

    #[test]
    fn vector_round_trip_preserves_kind() {
        let ke = sample_keplerian();
        for kind in [
            ElementSetKind::Keplerian,
            ElementSetKind::Circular,
            ElementSetKind::Equinoctial,
        ] {
            let oe = OrbitalElements::Keplerian(ke.clone()).to_kind(kind);
            let v = oe.to_vector();
            let back = OrbitalElements::from_vector(kind, ke.reference_epoch, &v);
            assert_eq!(back.kind(), kind);
            let dv = back.to_vector() - v;
            assert_abs_diff_eq!(dv.norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn as_accessors_return_some_only_for_matching_variant() {
        let ke = sample_keplerian();
        let oe_k = OrbitalElements::Keplerian(ke.clone());
        assert!(oe_k.as_keplerian().is_some());
        assert!(oe_k.as_circular().is_none());
        assert!(oe_k.as_equinoctial().is_none());

        let oe_c = OrbitalElements::Circular(CircularElements::from(&ke));
        assert!(oe_c.as_keplerian().is_none());
        assert!(oe_c.as_circular().is_some());

        let oe_e = OrbitalElements::Equinoctial(EquinoctialElements::from(&ke));
        assert!(oe_e.as_equinoctial().is_some());
        assert!(oe_e.as_keplerian().is_none());
    }

    #[test]
    fn display_prefix_matches_variant() {
        let ke = sample_keplerian();
        let s_k = format!("{}", OrbitalElements::Keplerian(ke.clone()));
        assert!(s_k.starts_with("[Keplerian representation]"));

        let s_c = format!("{}", OrbitalElements::Circular(CircularElements::from(&ke)));
        assert!(s_c.starts_with("[Circular representation]"));

        let s_e = format!(
            "{}",
            OrbitalElements::Equinoctial(EquinoctialElements::from(&ke))
        );
        assert!(s_e.starts_with("[Equinoctial representation]"));
    }
}
