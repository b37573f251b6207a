//! # Fixed-point osculating → mean converter
//!
//! Successive-substitution recovery of mean elements: starting from the
//! osculating elements themselves, repeat
//!
//! ```text
//! mean ← mean + (target − theory.osculating_from_mean(mean))
//! ```
//!
//! until the scaled residual drops below the configured `epsilon`. The
//! periodic part of any first-order averaging theory is O(J2), so the map is
//! a contraction and a handful of iterations is typically enough.
//!
//! Non-convergence within `max_iterations` is a hard error
//! ([`OsmeanError::NotConverged`]) carrying the iteration count and the last
//! residual; a partial result is never returned.

use crate::cartesian::CartesianState;
use crate::conversion::{scaled_norm, wrapped_residual, ConversionParams, ConvergenceReport};
use crate::mean_state::MeanOrbitalState;
use crate::orbit_type::OrbitalElements;
use crate::osmean_errors::OsmeanError;
use crate::theory::MeanTheory;

/// Fixed-point converter for a given averaging theory.
#[derive(Debug, Clone)]
pub struct FixedPointConverter<T: MeanTheory + Clone> {
    theory: T,
    params: ConversionParams,
}

impl<T: MeanTheory + Clone> FixedPointConverter<T> {
    /// Build a converter with default [`ConversionParams`].
    pub fn new(theory: T) -> Self {
        Self {
            theory,
            params: ConversionParams::default(),
        }
    }

    /// Build a converter with explicit parameters.
    pub fn with_params(theory: T, params: ConversionParams) -> Self {
        Self { theory, params }
    }

    pub fn theory(&self) -> &T {
        &self.theory
    }

    pub fn params(&self) -> &ConversionParams {
        &self.params
    }

    /// Convert an osculating Cartesian state to a mean state.
    ///
    /// The state must be expressed in the theory's frame; the osculating
    /// elements are derived with the theory's gravitational parameter.
    pub fn to_mean(
        &self,
        osculating: &CartesianState,
    ) -> Result<(MeanOrbitalState<T>, ConvergenceReport), OsmeanError> {
        if osculating.frame != self.theory.frame() {
            return Err(OsmeanError::UnsupportedFrame {
                theory: self.theory.name(),
                expected: self.theory.frame().as_str(),
                found: osculating.frame.as_str(),
            });
        }
        let kep = osculating.to_keplerian(self.theory.gravitational_parameter())?;
        self.to_mean_from_elements(&OrbitalElements::Keplerian(kep))
    }

    /// Convert osculating elements (any representation) to a mean state.
    pub fn to_mean_from_elements(
        &self,
        osculating: &OrbitalElements,
    ) -> Result<(MeanOrbitalState<T>, ConvergenceReport), OsmeanError> {
        let kind = self.theory.element_set();
        let angular = kind.angular_mask();
        let epoch = osculating.reference_epoch();
        let target = osculating.to_kind(kind).to_vector();

        // Initial guess: mean = osculating.
        let mut mean = target;
        let mut residual = f64::INFINITY;

        for iteration in 0..self.params.max_iterations {
            let reproduced = self.theory.osculating_from_mean(&mean, epoch)?;
            let delta = wrapped_residual(&target, &reproduced, &angular);
            residual = scaled_norm(&delta, target[0]);

            if residual < self.params.epsilon {
                let state = MeanOrbitalState::new(
                    OrbitalElements::from_vector(kind, epoch, &mean),
                    self.theory.frame(),
                    self.theory.clone(),
                )?;
                return Ok((
                    state,
                    ConvergenceReport {
                        iterations: iteration,
                        residual,
                    },
                ));
            }

            mean += delta;
        }

        Err(OsmeanError::NotConverged {
            iterations: self.params.max_iterations,
            residual,
        })
    }
}
