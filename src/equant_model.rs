//! # Circular orbit with equant: forward model
//!
//! Given the six orbit parameters and an elapsed time, predict the heliocentric longitude of Mars
//! and compare it with the observed oppositions.
//!
//! ## Model
//!
//! All positions are Sun-centred, in the ecliptic plane, with the x axis pointing to Aries.
//!
//! | Parameter | Unit | Meaning |
//! |---|---|---|
//! | `c`  | degrees | direction of the orbit centre, which sits at unit distance from the Sun |
//! | `r`  | Sun–centre distances | orbit radius |
//! | `e1` | Sun–centre distances | distance of the equant from the Sun |
//! | `e2` | degrees | direction of the equant |
//! | `z`  | degrees | angle of Mars about the equant at time zero (the first opposition) |
//! | `s`  | degrees/day | uniform angular velocity of Mars about the equant |
//!
//! At time `t`, Mars sits at `equant + r·(cos θ, sin θ)` with `θ = z + s·t`, and the predicted
//! longitude is the direction of that point seen from the Sun, in `[0, 360)`.
//!
//! Mars is offset from the **equant** by `r`; it is not placed on the circle of radius `r` centred
//! on the orbit centre. The orbit centre is therefore computed (and exposed through
//! [`EquantModel::orbit_center`]) but does not enter the prediction.
//!
//! ## Residuals
//!
//! The residual of an observation is
//! [`signed_angular_difference`](crate::conversion::signed_angular_difference)`(predicted, observed)`,
//! in `(-180, 180]`. The objective of every search is the largest absolute residual,
//! see [`AngularResiduals::max_abs_error`].
use std::fmt;

use nalgebra::Vector2;

use crate::{
    constants::{Day, Degree, DegreePerDay},
    conversion::{normalize_degrees, signed_angular_difference, to_degrees, to_radians},
    marsfit_errors::MarsFitError,
    observations::{Observation, Oppositions},
};

/// The six parameters of the equant model.
///
/// Fields
/// -----------------
/// * `c` – orbit centre direction (degrees).
/// * `r` – orbit radius (Sun–centre distances).
/// * `e1` – equant distance from the Sun (Sun–centre distances).
/// * `e2` – equant direction (degrees).
/// * `z` – equant angle of Mars at time zero (degrees).
/// * `s` – angular velocity about the equant (degrees/day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub c: Degree,
    pub r: f64,
    pub e1: f64,
    pub e2: Degree,
    pub z: Degree,
    pub s: DegreePerDay,
}

impl OrbitParams {
    pub fn new(c: Degree, r: f64, e1: f64, e2: Degree, z: Degree, s: DegreePerDay) -> Self {
        OrbitParams {
            c,
            r,
            e1,
            e2,
            z,
            s,
        }
    }

    fn check_finite(&self) -> Result<(), MarsFitError> {
        let named = [
            ("c", self.c),
            ("r", self.r),
            ("e1", self.e1),
            ("e2", self.e2),
            ("z", self.z),
            ("s", self.s),
        ];
        match named.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(MarsFitError::NumericDomain(format!(
                "orbit parameter {name} = {v}"
            ))),
            None => Ok(()),
        }
    }
}

impl fmt::Display for OrbitParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Equant orbit parameters")?;
            writeln!(f, "-----------------------")?;
            writeln!(f, "  r  = {:.6}", self.r)?;
            writeln!(f, "  s  = {:.6} °/day", self.s)?;
            writeln!(f, "  c  = {:.6} °", self.c)?;
            writeln!(f, "  e1 = {:.6}", self.e1)?;
            writeln!(f, "  e2 = {:.6} °", self.e2)?;
            write!(f, "  z  = {:.6} °", self.z)
        } else {
            write!(
                f,
                "OrbitParams(c={:.2}°, r={:.6}, e1={:.4}, e2={:.2}°, z={:.2}°, s={:.6}°/d)",
                self.c, self.r, self.e1, self.e2, self.z, self.s
            )
        }
    }
}

/// Signed per-observation residuals and their largest magnitude.
///
/// `errors[i]` is parallel to the i-th observation of the evaluated [`Oppositions`].
#[derive(Debug, Clone, PartialEq)]
pub struct AngularResiduals {
    errors: Vec<Degree>,
    max_abs_error: Degree,
}

/// Running maximum of magnitudes that keeps a NaN once it has been seen.
#[inline]
pub(crate) fn max_magnitude(acc: Degree, value: Degree) -> Degree {
    let magnitude = value.abs();
    if acc.is_nan() || magnitude.is_nan() || magnitude > acc {
        magnitude
    } else {
        acc
    }
}

impl AngularResiduals {
    pub(crate) fn from_errors(errors: Vec<Degree>) -> Self {
        let max_abs_error = errors.iter().fold(0.0_f64, |acc, e| max_magnitude(acc, *e));
        AngularResiduals {
            errors,
            max_abs_error,
        }
    }

    /// Signed residuals in degrees, each in `(-180, 180]`.
    pub fn errors(&self) -> &[Degree] {
        &self.errors
    }

    /// Largest absolute residual in degrees, NaN if any residual is NaN.
    pub fn max_abs_error(&self) -> Degree {
        self.max_abs_error
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Forward model for a fixed set of [`OrbitParams`].
///
/// The centre and equant positions are computed once at construction; the model can then be
/// evaluated at any number of epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct EquantModel {
    params: OrbitParams,
    center: Vector2<f64>,
    equant: Vector2<f64>,
}

impl EquantModel {
    /// Build the model, rejecting non-finite parameters with [`MarsFitError::NumericDomain`].
    pub fn new(params: OrbitParams) -> Result<Self, MarsFitError> {
        params.check_finite()?;
        Ok(Self::from_finite(params))
    }

    /// Build the model from parameters already known to be finite (grid points).
    pub(crate) fn from_finite(params: OrbitParams) -> Self {
        let c_rad = to_radians(params.c);
        let e2_rad = to_radians(params.e2);

        EquantModel {
            params,
            center: Vector2::new(c_rad.cos(), c_rad.sin()),
            equant: Vector2::new(params.e1 * e2_rad.cos(), params.e1 * e2_rad.sin()),
        }
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    /// Orbit centre, at unit distance from the Sun in direction `c`.
    pub fn orbit_center(&self) -> Vector2<f64> {
        self.center
    }

    /// Equant position, at distance `e1` from the Sun in direction `e2`.
    pub fn equant(&self) -> Vector2<f64> {
        self.equant
    }

    /// Heliocentric position of Mars at elapsed time `t` (days).
    pub fn mars_position(&self, t: Day) -> Vector2<f64> {
        let angle = to_radians(self.params.z) + to_radians(self.params.s * t);
        self.equant + Vector2::new(angle.cos(), angle.sin()) * self.params.r
    }

    /// Predicted heliocentric longitude of Mars at elapsed time `t`, in `[0, 360)`.
    pub fn predicted_longitude(&self, t: Day) -> Degree {
        let mars = self.mars_position(t);
        normalize_degrees(to_degrees(mars.y.atan2(mars.x)))
    }

    /// Signed residual `predicted - observed` for one observation.
    #[inline]
    pub fn residual(&self, observation: &Observation) -> Degree {
        signed_angular_difference(
            self.predicted_longitude(observation.time),
            observation.longitude,
        )
    }

    /// Residuals of every observation, in input order.
    pub fn residuals(&self, oppositions: &Oppositions) -> AngularResiduals {
        AngularResiduals::from_errors(oppositions.iter().map(|o| self.residual(o)).collect())
    }

    /// Largest absolute residual, without materializing the residual vector.
    ///
    /// NaN when a prediction is not finite (e.g. `s·t` overflows).
    pub fn max_abs_error(&self, oppositions: &Oppositions) -> Degree {
        oppositions
            .iter()
            .fold(0.0_f64, |acc, o| max_magnitude(acc, self.residual(o)))
    }

    /// Generate the oppositions this model predicts at the given times.
    ///
    /// The resulting set has exactly `times.len()` observations and zero residuals against this
    /// model; it is the synthetic counterpart of a historical dataset.
    pub fn simulate_oppositions(&self, times: &[Day]) -> Result<Oppositions, MarsFitError> {
        let longitudes: Vec<Degree> = times.iter().map(|&t| self.predicted_longitude(t)).collect();
        Oppositions::with_expected_count(times, &longitudes, times.len())
    }
}

/// Evaluate a parameter set against a set of oppositions.
///
/// Arguments
/// -----------------
/// * `params`: the six orbit parameters.
/// * `oppositions`: the validated observations.
///
/// Return
/// ----------
/// * The per-observation signed residuals and their maximum magnitude, or
///   [`MarsFitError::NumericDomain`] if a parameter or a prediction is not finite.
pub fn evaluate(
    params: &OrbitParams,
    oppositions: &Oppositions,
) -> Result<AngularResiduals, MarsFitError> {
    let residuals = EquantModel::new(*params)?.residuals(oppositions);
    if !residuals.max_abs_error().is_finite() {
        return Err(MarsFitError::NumericDomain(format!(
            "non-finite prediction for {params}"
        )));
    }
    Ok(residuals)
}
