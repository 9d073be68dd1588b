//! # Opposition observations
//!
//! The fitting routines consume a validated, immutable collection of Mars oppositions,
//! [`Oppositions`], made of [`Observation`]s that pair an elapsed time with a heliocentric longitude.
//!
//! ## Construction
//!
//! - [`Oppositions::new`] – from parallel `times` / `longitudes` slices, expecting the
//!   historical count of [`DEFAULT_OBSERVATION_COUNT`] oppositions.
//! - [`Oppositions::with_expected_count`] – same, with an explicit expected count.
//! - [`opposition_csv`] – from the tabular dataset (calendar timestamps and zodiac longitudes).
//!
//! Validation is done once, here: the two slices must have the same length, that length must
//! match the expected count, and every value must be finite. Longitudes are normalized into
//! `[0, 360)`. Downstream code (forward model, searches, reporting) relies on these guarantees.
//!
//! ## Fitting
//!
//! The [`oppositions_ext::OppositionFit`] extension trait exposes every search strategy directly
//! on an [`Oppositions`] value.
pub mod opposition_csv;
pub mod oppositions_ext;

use std::ops::Index;

use crate::{
    constants::{Day, Degree, DEFAULT_OBSERVATION_COUNT},
    conversion::normalize_degrees,
    marsfit_errors::MarsFitError,
};

/// A single opposition of Mars
///
/// # Fields
///
/// * `time` - Days elapsed since the reference epoch (the first opposition)
/// * `longitude` - Heliocentric longitude of Mars in degrees, in `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: Day,
    pub longitude: Degree,
}

impl Observation {
    /// Create a new observation, normalizing the longitude into `[0, 360)`.
    ///
    /// Arguments
    /// ---------
    /// * `time`: days elapsed since the reference epoch
    /// * `longitude`: heliocentric longitude in degrees
    ///
    /// Return
    /// ------
    /// * The observation, or [`MarsFitError::NumericDomain`] if a value is not finite.
    pub fn new(time: Day, longitude: Degree) -> Result<Self, MarsFitError> {
        if !time.is_finite() || !longitude.is_finite() {
            return Err(MarsFitError::NumericDomain(format!(
                "observation (time = {time}, longitude = {longitude}) is not finite"
            )));
        }
        Ok(Observation {
            time,
            longitude: normalize_degrees(longitude),
        })
    }
}

/// Validated sequence of oppositions, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Oppositions {
    observations: Vec<Observation>,
}

impl Oppositions {
    /// Build the historical dataset of [`DEFAULT_OBSERVATION_COUNT`] oppositions.
    ///
    /// See [`Oppositions::with_expected_count`] for the validation rules.
    pub fn new(times: &[Day], longitudes: &[Degree]) -> Result<Self, MarsFitError> {
        Self::with_expected_count(times, longitudes, DEFAULT_OBSERVATION_COUNT)
    }

    /// Build a set of oppositions from parallel arrays.
    ///
    /// Arguments
    /// ---------
    /// * `times`: days elapsed since the reference epoch, one per opposition
    /// * `longitudes`: observed heliocentric longitudes in degrees, parallel to `times`
    /// * `expected`: the number of oppositions the caller expects
    ///
    /// Return
    /// ------
    /// * [`MarsFitError::InputShape`] if the lengths differ or do not match `expected`
    ///   (nothing is truncated).
    /// * [`MarsFitError::NumericDomain`] if any value is NaN or infinite.
    pub fn with_expected_count(
        times: &[Day],
        longitudes: &[Degree],
        expected: usize,
    ) -> Result<Self, MarsFitError> {
        if times.len() != longitudes.len() {
            return Err(MarsFitError::InputShape(format!(
                "{} times for {} longitudes",
                times.len(),
                longitudes.len()
            )));
        }
        if times.len() != expected {
            return Err(MarsFitError::InputShape(format!(
                "expected {expected} observations, got {}",
                times.len()
            )));
        }

        let observations = times
            .iter()
            .zip(longitudes)
            .map(|(&t, &l)| Observation::new(t, l))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Oppositions { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Elapsed times, in input order.
    pub fn times(&self) -> Vec<Day> {
        self.observations.iter().map(|o| o.time).collect()
    }

    /// Observed longitudes (normalized), in input order.
    pub fn longitudes(&self) -> Vec<Degree> {
        self.observations.iter().map(|o| o.longitude).collect()
    }
}

impl Index<usize> for Oppositions {
    type Output = Observation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.observations[index]
    }
}

impl<'a> IntoIterator for &'a Oppositions {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
