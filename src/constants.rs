//! # Constants and type definitions for marsfit
//!
//! This module centralizes the **unit aliases**, **conversion factors** and the **historical seeds**
//! used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//! - Seed values of the outer searches, taken from the sidereal period of Mars and the
//!   classical estimate of its orbital radius
//! - Default shape of the historical opposition dataset

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Full turn in degrees
pub const FULL_TURN: f64 = 360.0;

/// Half turn in degrees, the shortest-path wrap limit of angular differences
pub const HALF_TURN: f64 = 180.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of degrees in one zodiac sign
pub const DEGREES_PER_SIGN: f64 = 30.0;

/// Number of zodiac signs (Aries 0, …, Pisces 11)
pub const ZODIAC_SIGNS: u8 = 12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Elapsed time in days
pub type Day = f64;
/// Angular velocity in degrees per day
pub type DegreePerDay = f64;

// -------------------------------------------------------------------------------------------------
// Historical dataset and search seeds
// -------------------------------------------------------------------------------------------------

/// Number of oppositions in the historical dataset
pub const DEFAULT_OBSERVATION_COUNT: usize = 12;

/// Sidereal period of Mars in days
pub const MARS_SIDEREAL_PERIOD: Day = 687.0;

/// Mean angular velocity of Mars about the equant (°/day), seed of the `s` search
pub const MARS_MEAN_MOTION: DegreePerDay = FULL_TURN / MARS_SIDEREAL_PERIOD;

/// Orbit radius seed, in units of the Sun–centre distance
pub const MARS_RADIUS_SEED: f64 = 1.52;

/// Angular velocity seed of the joint `(r, s)` search (°/day)
pub const MARS_ANGULAR_VELOCITY_SEED: DegreePerDay = 0.518195;

/// Largest accepted disagreement (degrees) between predictions recovered from residuals and
/// predictions recomputed by the forward model
pub const PREDICTION_TOLERANCE: Degree = 1e-9;

/// Largest number of points accepted on one search axis
pub const MAX_AXIS_POINTS: usize = 1 << 20;
