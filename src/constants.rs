//! # Constants and type definitions for osmean
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `osmean` library.
//!
//! ## Overview
//!
//! - Earth gravity field constants (GM, equatorial radius, zonal harmonics)
//! - WGS-72 constants used by the TLE low-order theory
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the averaging theories,
//! the converters, and the Cartesian/element conversions.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Earth gravitational parameter (EGM-96), m³/s²
pub const EARTH_MU: f64 = 3.986_004_415e14;

/// Earth equatorial radius (EGM-96), meters
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_136.3;

/// Earth second zonal harmonic J2 (EGM-96, unnormalized)
pub const EARTH_J2: f64 = 1.082_626_684e-3;

/// Earth third zonal harmonic J3 (EGM-96, unnormalized)
pub const EARTH_J3: f64 = -2.532_656_48e-6;

// -------------------------------------------------------------------------------------------------
// WGS-72 constants (TLE / general-perturbations theory)
// -------------------------------------------------------------------------------------------------

/// WGS-72 gravitational parameter, km³/s²
pub const WGS72_MU: f64 = 398_600.8;

/// WGS-72 Earth equatorial radius, km
pub const WGS72_EQUATORIAL_RADIUS: f64 = 6_378.135;

/// WGS-72 J2 zonal harmonic
pub const WGS72_J2: f64 = 1.082_616e-3;

/// WGS-72 J3 zonal harmonic
pub const WGS72_J3: f64 = -2.538_81e-6;

/// WGS-72 J4 zonal harmonic
pub const WGS72_J4: f64 = -1.655_97e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Velocity in meters per second
pub type MeterPerSecond = f64;
