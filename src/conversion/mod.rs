//! # Osculating → mean conversion
//!
//! This module defines the [`ConversionParams`] configuration struct and its
//! builder, which control how the converters iterate, together with the two
//! conversion strategies:
//!
//! - [`fixed_point`](crate::conversion::fixed_point) – successive-substitution
//!   iteration `mean ← mean + (target − theory(mean))`,
//! - [`least_squares`](crate::conversion::least_squares) – Gauss-Newton
//!   iteration with a finite-difference Jacobian of the averaging theory.
//!
//! ## Convergence contract
//!
//! Both converters run the same state machine: *iterating* until either the
//! scaled residual drops below `epsilon` (*converged*) or the iteration
//! budget is exhausted (*failed*). A failed conversion always surfaces as
//! [`OsmeanError::NotConverged`] carrying the iteration count and the last
//! residual; a non-converged mean state is never returned silently.
//!
//! The residual is measured in a scaled infinity norm: the semi-major axis
//! component is divided by the target semi-major axis, angular components are
//! wrapped to [-π, π], and the remaining components are taken as-is.

use nalgebra::Vector6;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kepler::angle_diff;
use crate::osmean_errors::OsmeanError;

pub mod fixed_point;
pub mod least_squares;

/// Outcome report of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceReport {
    /// Number of iterations performed before the residual test passed.
    pub iterations: usize,
    /// Scaled residual at convergence.
    pub residual: f64,
}

/// Configuration parameters controlling the behavior of the
/// osculating-to-mean converters.
///
/// Overview
/// -----------------
/// * `epsilon` – convergence threshold on the scaled residual norm.
/// * `max_iterations` – hard bound on the iteration count; exceeding it is a
///   reported failure, never an endless loop.
/// * `finite_diff_step` – relative step of the central-difference Jacobian
///   used by the least-squares converter (ignored by the fixed-point one).
///
/// Defaults
/// -----------------
/// * `epsilon`: 1e-13 (scaled units)
/// * `max_iterations`: 100
/// * `finite_diff_step`: 1e-6
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Convergence threshold on the scaled residual norm.
    pub epsilon: f64,
    /// Maximum number of iterations before the conversion fails.
    pub max_iterations: usize,
    /// Relative finite-difference step for Jacobian estimation.
    pub finite_diff_step: f64,
}

impl ConversionParams {
    /// Construct a new [`ConversionParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ConversionParamsBuilder`] to configure custom
    /// parameters step by step before building.
    ///
    /// # Example
    ///
    /// ```rust
    /// use osmean::conversion::ConversionParams;
    ///
    /// let params = ConversionParams::builder()
    ///     .epsilon(1e-11)
    ///     .max_iterations(50)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.max_iterations, 50);
    /// ```
    pub fn builder() -> ConversionParamsBuilder {
        ConversionParamsBuilder::new()
    }
}

impl Default for ConversionParams {
    fn default() -> Self {
        ConversionParams {
            epsilon: 1.0e-13,
            max_iterations: 100,
            finite_diff_step: 1.0e-6,
        }
    }
}

/// Builder for [`ConversionParams`], with validation.
#[derive(Debug, Clone)]
pub struct ConversionParamsBuilder {
    params: ConversionParams,
}

impl Default for ConversionParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: ConversionParams::default(),
        }
    }

    pub fn epsilon(mut self, v: f64) -> Self {
        self.params.epsilon = v;
        self
    }

    pub fn max_iterations(mut self, v: usize) -> Self {
        self.params.max_iterations = v;
        self
    }

    pub fn finite_diff_step(mut self, v: f64) -> Self {
        self.params.finite_diff_step = v;
        self
    }

    /// Finalize the builder and produce a [`ConversionParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `epsilon > 0.0` and finite (NaN is rejected).
    /// * `max_iterations >= 1`.
    /// * `finite_diff_step > 0.0` and finite.
    pub fn build(self) -> Result<ConversionParams, OsmeanError> {
        let p = &self.params;

        if !(p.epsilon > 0.0 && p.epsilon.is_finite()) {
            return Err(OsmeanError::InvalidConversionParameter(
                "epsilon must be finite and > 0".into(),
            ));
        }
        if p.max_iterations == 0 {
            return Err(OsmeanError::InvalidConversionParameter(
                "max_iterations must be >= 1".into(),
            ));
        }
        if !(p.finite_diff_step > 0.0 && p.finite_diff_step.is_finite()) {
            return Err(OsmeanError::InvalidConversionParameter(
                "finite_diff_step must be finite and > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for ConversionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConversionParams(epsilon={:.1e}, max_iterations={}, finite_diff_step={:.1e})",
            self.epsilon, self.max_iterations, self.finite_diff_step
        )
    }
}

/// Difference `target - value` with angular components wrapped to [-π, π].
pub(crate) fn wrapped_residual(
    target: &Vector6<f64>,
    value: &Vector6<f64>,
    angular: &[bool; 6],
) -> Vector6<f64> {
    let mut delta = Vector6::zeros();
    for j in 0..6 {
        delta[j] = if angular[j] {
            angle_diff(target[j], value[j])
        } else {
            target[j] - value[j]
        };
    }
    delta
}

/// Scaled infinity norm of a residual: the first component (semi-major axis)
/// is measured relative to `sma_scale`, the others absolutely.
pub(crate) fn scaled_norm(delta: &Vector6<f64>, sma_scale: f64) -> f64 {
    let scale = sma_scale.abs().max(1.0);
    let mut norm = (delta[0] / scale).abs();
    for j in 1..6 {
        norm = norm.max(delta[j].abs());
    }
    norm
}
