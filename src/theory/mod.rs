//! # Averaging theories
//!
//! An **averaging theory** relates a set of *mean* (averaged) orbital
//! elements to the *osculating* elements that reproduce the instantaneous
//! position and velocity. Each theory is a stateless strategy implementing
//! the [`MeanTheory`] trait:
//!
//! - [`brouwer_lyddane`](crate::theory::brouwer_lyddane) – first-order J2
//!   mapping on Keplerian elements (Brouwer 1959, Lyddane 1963),
//! - [`eckstein_hechler`](crate::theory::eckstein_hechler) – first-order J2
//!   mapping in circular elements for near-circular orbits,
//! - [`dsst_zonal`](crate::theory::dsst_zonal) – J2 zonal short-periodics
//!   carried in equinoctial elements, truncated in eccentricity,
//! - [`tle_gp`](crate::theory::tle_gp) – low-order general-perturbations
//!   mapping (SGP4 periodic terms at `tsince = 0`), WGS-72 constants, TEME.
//!
//! ## Contract
//!
//! `osculating_from_mean` is a **pure function**: same input, same output, no
//! side effects, no retained state. This is what makes the fixed-point and
//! least-squares converters well-defined, and what allows independent
//! conversions to run concurrently on different threads.
//!
//! Theories also expose their **secular rates** so a
//! [`MeanOrbitalState`](crate::mean_state::MeanOrbitalState) can be advanced
//! in time without numerical integration.

use hifitime::Epoch;
use nalgebra::Vector6;

use crate::orbit_type::ElementSetKind;
use crate::osmean_errors::OsmeanError;
use crate::ref_frame::Frame;

pub mod brouwer_lyddane;
pub mod dsst_zonal;
pub mod eckstein_hechler;
pub mod tle_gp;

/// Strategy contract of an averaging theory.
///
/// The element vector layout is the one described by
/// [`ElementSetKind`](crate::orbit_type::ElementSetKind) for
/// [`element_set`](MeanTheory::element_set); both the input (mean) and output
/// (osculating) vectors use that same layout.
pub trait MeanTheory: Send + Sync {
    /// Short theory name used in diagnostics and errors.
    fn name(&self) -> &'static str;

    /// Element set the theory is formulated in.
    fn element_set(&self) -> ElementSetKind;

    /// Reference frame the theory is valid in.
    fn frame(&self) -> Frame;

    /// Gravitational parameter the theory is formulated with, m³/s².
    ///
    /// Cartesian states entering or leaving a conversion are interpreted with
    /// this value, so that element/state round trips stay consistent with the
    /// theory's own constants.
    fn gravitational_parameter(&self) -> f64;

    /// Check that a mean element vector lies in the regime the theory
    /// supports. Called at state construction and before each conversion.
    fn check_admissible(&self, mean: &Vector6<f64>) -> Result<(), OsmeanError>;

    /// Map mean elements at `epoch` to the osculating elements reproducing
    /// the instantaneous state. Pure and deterministic.
    fn osculating_from_mean(
        &self,
        mean: &Vector6<f64>,
        epoch: Epoch,
    ) -> Result<Vector6<f64>, OsmeanError>;

    /// Secular time derivatives of the mean elements (per second), used for
    /// semi-analytical propagation of a mean state.
    fn mean_rates(&self, mean: &Vector6<f64>) -> Result<Vector6<f64>, OsmeanError>;
}
