//! Discretized parameter axes.
//!
//! * [`StepRange`] – half-open `[start, stop)` axis with a fixed step (the inner search axes).
//! * [`SeedGrid`] – evenly spaced points around a seed value, `seed·(1 ± spread)` (the outer axes).
//! * [`ParameterLattice`] – the flattened Cartesian product of the four inner axes.
use std::fmt;

use crate::{constants::MAX_AXIS_POINTS, marsfit_errors::MarsFitError};

/// Half-open range `[start, stop)` sampled every `step`.
///
/// The sampled values are `start + k·step` for `k < ceil((stop - start) / step)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl StepRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        StepRange { start, stop, step }
    }

    /// `ceil((stop - start) / step)`, before any bound is applied.
    fn raw_len(&self) -> f64 {
        ((self.stop - self.start) / self.step).ceil()
    }

    /// Number of sampled values (0 for an empty, invalid or oversized range).
    pub fn len(&self) -> usize {
        let n = self.raw_len();
        if n.is_finite() && n > 0.0 && n <= MAX_AXIS_POINTS as f64 {
            n as usize
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The k-th sampled value.
    #[inline]
    pub fn value(&self, k: usize) -> f64 {
        self.start + k as f64 * self.step
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|k| self.value(k)).collect()
    }

    /// Check that the range is finite, has a positive step and between one and
    /// [`MAX_AXIS_POINTS`] values.
    pub(crate) fn validate(&self, name: &str) -> Result<(), MarsFitError> {
        if ![self.start, self.stop, self.step]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(MarsFitError::InvalidSearchParameter(format!(
                "{name} range must be finite"
            )));
        }
        if self.step <= 0.0 {
            return Err(MarsFitError::InvalidSearchParameter(format!(
                "{name} step must be > 0"
            )));
        }
        if self.raw_len() > MAX_AXIS_POINTS as f64 {
            return Err(MarsFitError::InvalidSearchParameter(format!(
                "{name} range has more than {MAX_AXIS_POINTS} points"
            )));
        }
        if self.is_empty() {
            return Err(MarsFitError::EmptySearchSpace(format!(
                "{name} range [{}, {}) has no point",
                self.start, self.stop
            )));
        }
        Ok(())
    }
}

impl fmt::Display for StepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) step {} ({} pts)",
            self.start,
            self.stop,
            self.step,
            self.len()
        )
    }
}

/// `points` evenly spaced values over `[seed·(1 - relative_spread), seed·(1 + relative_spread)]`.
///
/// Both bounds are included when `points >= 2`; a single point sits on the lower bound.
/// Values are `lower + k·step` with the last one pinned to the upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedGrid {
    pub seed: f64,
    pub relative_spread: f64,
    pub points: usize,
}

impl SeedGrid {
    pub fn new(seed: f64, relative_spread: f64, points: usize) -> Self {
        SeedGrid {
            seed,
            relative_spread,
            points,
        }
    }

    pub fn lower(&self) -> f64 {
        self.seed * (1.0 - self.relative_spread)
    }

    pub fn upper(&self) -> f64 {
        self.seed * (1.0 + self.relative_spread)
    }

    pub fn len(&self) -> usize {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    pub fn values(&self) -> Vec<f64> {
        let (lower, upper) = (self.lower(), self.upper());
        match self.points {
            0 => Vec::new(),
            1 => vec![lower],
            n => {
                let step = (upper - lower) / (n - 1) as f64;
                let mut values: Vec<f64> = (0..n).map(|k| k as f64 * step + lower).collect();
                values[n - 1] = upper;
                values
            }
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), MarsFitError> {
        if !self.seed.is_finite() {
            return Err(MarsFitError::InvalidSearchParameter(format!(
                "{name} seed must be finite"
            )));
        }
        if !(self.relative_spread.is_finite() && self.relative_spread >= 0.0) {
            return Err(MarsFitError::InvalidSearchParameter(format!(
                "{name} relative spread must be finite and >= 0"
            )));
        }
        if self.points == 0 {
            return Err(MarsFitError::EmptySearchSpace(format!(
                "{name} grid has no point"
            )));
        }
        if self.points > MAX_AXIS_POINTS {
            return Err(MarsFitError::InvalidSearchParameter(format!(
                "{name} grid has {} points, more than {MAX_AXIS_POINTS}",
                self.points
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SeedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ± {}% ({} pts)",
            self.seed,
            self.relative_spread * 100.0,
            self.points
        )
    }
}

/// Flattened Cartesian product of the `c`, `e1`, `e2`, `z` axes.
///
/// Lattice indices follow the enumeration order of nested loops with `c` outermost and `z`
/// innermost, so comparing indices is comparing enumeration order.
///
/// Every axis is non-empty and the point count fits in a `usize`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterLattice {
    c: Vec<f64>,
    e1: Vec<f64>,
    e2: Vec<f64>,
    z: Vec<f64>,
    len: usize,
}

/// One lattice point `(c, e1, e2, z)`.
pub type LatticePoint = (f64, f64, f64, f64);

impl ParameterLattice {
    /// Build the lattice of four validated axes.
    ///
    /// Return
    /// ----------
    /// * The lattice, the first invalid, empty or oversized axis error, or
    ///   [`MarsFitError::InvalidSearchParameter`] when the point count overflows `usize`.
    pub fn new(
        c: &StepRange,
        e1: &StepRange,
        e2: &StepRange,
        z: &StepRange,
    ) -> Result<Self, MarsFitError> {
        c.validate("c")?;
        e1.validate("e1")?;
        e2.validate("e2")?;
        z.validate("z")?;

        let len = [e1, e2, z]
            .iter()
            .try_fold(c.len(), |acc, axis| acc.checked_mul(axis.len()))
            .ok_or_else(|| {
                MarsFitError::InvalidSearchParameter(format!(
                    "inner lattice {}x{}x{}x{} overflows usize",
                    c.len(),
                    e1.len(),
                    e2.len(),
                    z.len()
                ))
            })?;

        Ok(ParameterLattice {
            c: c.values(),
            e1: e1.values(),
            e2: e2.values(),
            z: z.values(),
            len,
        })
    }

    /// Number of lattice points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a lattice index (mixed radix, `z` fastest).
    #[inline]
    pub fn point(&self, index: usize) -> LatticePoint {
        let iz = index % self.z.len();
        let rest = index / self.z.len();
        let ie2 = rest % self.e2.len();
        let rest = rest / self.e2.len();
        let ie1 = rest % self.e1.len();
        let ic = rest / self.e1.len();
        (self.c[ic], self.e1[ie1], self.e2[ie2], self.z[iz])
    }
}
