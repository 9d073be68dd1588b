//! # Grid search parameters
//!
//! This module defines the [`SearchParams`] configuration struct and its builder, which control the
//! discretization of the two nested grid searches that fit the equant model to the oppositions.
//!
//! ## Purpose
//!
//! The [`SearchParams`] object centralizes every tunable value used by
//! [`search_inner`](crate::grid_search::inner_search::search_inner) and the outer searches of
//! [`outer_search`](crate::grid_search::outer_search). It lets you:
//!
//! - Set the four inner axes `c`, `e1`, `e2`, `z` as half-open [`StepRange`]s,
//! - Set the seed grids of the outer searches over `s`, `r`, and the joint `(r, s)` plane,
//! - Fix the number of oppositions the searches expect,
//! - Switch the data-parallel evaluation of the inner lattice on or off.
//!
//! ## Search overview
//!
//! 1. **Inner search**
//!    For a fixed `(r, s)`, every point of the `c × e1 × e2 × z` lattice is scored by the largest
//!    absolute residual. The smallest score wins, the first point in enumeration order on ties.
//!
//! 2. **Outer searches**
//!    Each candidate of a [`SeedGrid`] (or of the `r × s` product for the joint search) runs one
//!    inner search. The candidate with the smallest inner score wins.
//!
//! ## Example
//!
//! ```rust,no_run
//! use marsfit::grid_search::{SearchParams, StepRange};
//!
//! let params = SearchParams::builder()
//!     .z_range(StepRange::new(0.0, 360.0, 10.0))
//!     .joint_r_points(10)
//!     .parallel(false)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## See also
//!
//! * [`crate::observations::oppositions_ext::OppositionFit`] – search entry points on the oppositions
//! * [`crate::grid_search::search_result`] – result types of the searches
use std::fmt;

use crate::{
    constants::{
        DEFAULT_OBSERVATION_COUNT, MARS_ANGULAR_VELOCITY_SEED, MARS_MEAN_MOTION, MARS_RADIUS_SEED,
    },
    marsfit_errors::MarsFitError,
    observations::Oppositions,
};

pub mod grid;
pub mod inner_search;
pub mod outer_search;
pub mod search_result;

pub use grid::{ParameterLattice, SeedGrid, StepRange};

/// Configuration of the equant-model grid searches.
///
/// Fields
/// -----------------
/// * `c_range`, `e1_range`, `e2_range`, `z_range` – inner lattice axes.
/// * `s_grid` – candidates of [`best_s`](crate::grid_search::outer_search::best_s).
/// * `r_grid` – candidates of [`best_r`](crate::grid_search::outer_search::best_r).
/// * `joint_r_grid`, `joint_s_grid` – axes of
///   [`best_mars_orbit_params`](crate::grid_search::outer_search::best_mars_orbit_params).
/// * `expected_observations` – number of oppositions every search requires.
/// * `parallel` – evaluate the inner lattice with `rayon` (needs the `parallel` feature).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub c_range: StepRange,
    pub e1_range: StepRange,
    pub e2_range: StepRange,
    pub z_range: StepRange,

    pub s_grid: SeedGrid,
    pub r_grid: SeedGrid,
    pub joint_r_grid: SeedGrid,
    pub joint_s_grid: SeedGrid,

    pub expected_observations: usize,
    pub parallel: bool,
}

impl SearchParams {
    /// Create a new builder for [`SearchParams`], initialized with default values.
    ///
    /// # See also
    /// * [`SearchParamsBuilder::build`] – validation rules.
    pub fn builder() -> SearchParamsBuilder {
        SearchParamsBuilder::new()
    }

    /// The inner lattice described by the four inner ranges.
    ///
    /// Fails like [`ParameterLattice::new`] on an invalid, empty or oversized axis.
    pub fn lattice(&self) -> Result<ParameterLattice, MarsFitError> {
        ParameterLattice::new(&self.c_range, &self.e1_range, &self.e2_range, &self.z_range)
    }

    /// Check that `oppositions` holds the expected number of observations.
    pub(crate) fn check_oppositions(&self, oppositions: &Oppositions) -> Result<(), MarsFitError> {
        if oppositions.len() != self.expected_observations {
            return Err(MarsFitError::InputShape(format!(
                "expected {} observations, got {}",
                self.expected_observations,
                oppositions.len()
            )));
        }
        Ok(())
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            // Inner lattice
            c_range: StepRange::new(0.0, 360.0, 20.0),
            e1_range: StepRange::new(0.0, 0.2, 0.1),
            e2_range: StepRange::new(0.0, 360.0, 20.0),
            z_range: StepRange::new(0.0, 360.0, 20.0),

            // Outer searches
            s_grid: SeedGrid::new(MARS_MEAN_MOTION, 0.1, 10),
            r_grid: SeedGrid::new(MARS_RADIUS_SEED, 0.1, 10),
            joint_r_grid: SeedGrid::new(MARS_RADIUS_SEED, 0.05, 6),
            joint_s_grid: SeedGrid::new(MARS_ANGULAR_VELOCITY_SEED, 0.05, 6),

            expected_observations: DEFAULT_OBSERVATION_COUNT,
            parallel: true,
        }
    }
}

/// Builder for [`SearchParams`], with validation.
#[derive(Debug, Clone)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl Default for SearchParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: SearchParams::default(),
        }
    }

    // --- Inner lattice ---
    pub fn c_range(mut self, v: StepRange) -> Self {
        self.params.c_range = v;
        self
    }
    pub fn e1_range(mut self, v: StepRange) -> Self {
        self.params.e1_range = v;
        self
    }
    pub fn e2_range(mut self, v: StepRange) -> Self {
        self.params.e2_range = v;
        self
    }
    pub fn z_range(mut self, v: StepRange) -> Self {
        self.params.z_range = v;
        self
    }

    // --- Outer searches ---
    pub fn s_grid(mut self, v: SeedGrid) -> Self {
        self.params.s_grid = v;
        self
    }
    pub fn r_grid(mut self, v: SeedGrid) -> Self {
        self.params.r_grid = v;
        self
    }
    pub fn joint_r_grid(mut self, v: SeedGrid) -> Self {
        self.params.joint_r_grid = v;
        self
    }
    pub fn joint_s_grid(mut self, v: SeedGrid) -> Self {
        self.params.joint_s_grid = v;
        self
    }
    pub fn joint_r_points(mut self, v: usize) -> Self {
        self.params.joint_r_grid.points = v;
        self
    }
    pub fn joint_s_points(mut self, v: usize) -> Self {
        self.params.joint_s_grid.points = v;
        self
    }

    // --- Data / execution ---
    pub fn expected_observations(mut self, v: usize) -> Self {
        self.params.expected_observations = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.params.parallel = v;
        self
    }

    /// Finalize the builder and produce a [`SearchParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * every inner range is finite, has `step > 0` and between 1 and
    ///   [`MAX_AXIS_POINTS`](crate::constants::MAX_AXIS_POINTS) points,
    /// * the inner lattice size fits in a `usize`,
    /// * every seed grid has a finite seed, a finite `relative_spread >= 0` and between 1 and
    ///   `MAX_AXIS_POINTS` points,
    /// * `expected_observations >= 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SearchParams)` if all values are valid.
    /// * `Err(MarsFitError::InvalidSearchParameter)` for a malformed value, or
    ///   `Err(MarsFitError::EmptySearchSpace)` for a range or grid without any point.
    pub fn build(self) -> Result<SearchParams, MarsFitError> {
        let p = &self.params;

        p.lattice()?;

        p.s_grid.validate("s")?;
        p.r_grid.validate("r")?;
        p.joint_r_grid.validate("joint r")?;
        p.joint_s_grid.validate("joint s")?;

        if p.expected_observations == 0 {
            return Err(MarsFitError::InvalidSearchParameter(
                "expected_observations must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 48;
            writeln!(f, "Equant Grid Search Parameters")?;
            writeln!(f, "-----------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.chars().count() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.chars().count())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Inner lattice]")?;
            line!("c    = {}", self.c_range, "Orbit centre direction (deg)")?;
            line!("e1   = {}", self.e1_range, "Equant distance")?;
            line!("e2   = {}", self.e2_range, "Equant direction (deg)")?;
            line!("z    = {}", self.z_range, "Equant angle at t = 0 (deg)")?;
            let size = match self.lattice() {
                Ok(lattice) => lattice.len().to_string(),
                Err(_) => "invalid".to_string(),
            };
            line!("size = {}", size, "Points per inner search")?;

            writeln!(f, "\n[Outer searches]")?;
            line!("s       = {}", self.s_grid, "Angular velocity (deg/day)")?;
            line!("r       = {}", self.r_grid, "Orbit radius")?;
            line!("joint r = {}", self.joint_r_grid, "Joint search radius axis")?;
            line!("joint s = {}", self.joint_s_grid, "Joint search velocity axis")?;

            writeln!(f, "\n[Data / execution]")?;
            line!(
                "expected_observations = {}",
                self.expected_observations,
                "Oppositions per dataset"
            )?;
            line!("parallel = {}", self.parallel, "Rayon inner evaluation")?;

            Ok(())
        } else {
            write!(
                f,
                "SearchParams(lattice={}x{}x{}x{}, s_grid={}, r_grid={}, joint={}x{}, n_obs={}, parallel={})",
                self.c_range.len(),
                self.e1_range.len(),
                self.e2_range.len(),
                self.z_range.len(),
                self.s_grid.points,
                self.r_grid.points,
                self.joint_r_grid.points,
                self.joint_s_grid.points,
                self.expected_observations,
                self.parallel,
            )
        }
    }
}

#[cfg(test)]
mod search_params_test {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SearchParams::default();
        assert_eq!(params.lattice().unwrap().len(), 18 * 2 * 18 * 18);
        assert_eq!(params.s_grid.seed, 360.0 / 687.0);
        assert_eq!(params.joint_s_grid.seed, 0.518195);
        assert_eq!(params.expected_observations, 12);
        assert_eq!(SearchParams::builder().build().unwrap(), params);
    }

    #[test]
    fn test_builder_validation() {
        let err = SearchParams::builder()
            .e2_range(StepRange::new(0.0, 360.0, -20.0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MarsFitError::InvalidSearchParameter("e2 step must be > 0".into())
        );

        let err = SearchParams::builder()
            .joint_s_points(0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MarsFitError::EmptySearchSpace("joint s grid has no point".into())
        );

        let err = SearchParams::builder()
            .expected_observations(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, MarsFitError::InvalidSearchParameter(_)));

        let err = SearchParams::builder()
            .c_range(StepRange::new(0.0, 360.0, 1e-300))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MarsFitError::InvalidSearchParameter("c range has more than 1048576 points".into())
        );

        let axis = StepRange::new(0.0, 1_048_576.0, 1.0);
        let err = SearchParams::builder()
            .c_range(axis)
            .e1_range(axis)
            .e2_range(axis)
            .z_range(axis)
            .build()
            .unwrap_err();
        assert!(matches!(err, MarsFitError::InvalidSearchParameter(_)));

        let err = SearchParams::builder()
            .r_grid(SeedGrid::new(1.52, f64::NAN, 4))
            .build()
            .unwrap_err();
        assert!(matches!(err, MarsFitError::InvalidSearchParameter(_)));
    }

    #[test]
    fn test_check_oppositions() {
        let params = SearchParams::builder()
            .expected_observations(2)
            .build()
            .unwrap();
        let two = Oppositions::with_expected_count(&[0.0, 1.0], &[1.0, 2.0], 2).unwrap();
        let three =
            Oppositions::with_expected_count(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], 3).unwrap();
        assert!(params.check_oppositions(&two).is_ok());
        assert_eq!(
            params.check_oppositions(&three),
            Err(MarsFitError::InputShape(
                "expected 2 observations, got 3".into()
            ))
        );
    }

    #[test]
    fn test_display() {
        let params = SearchParams::default();
        assert_eq!(
            format!("{params}"),
            "SearchParams(lattice=18x2x18x18, s_grid=10, r_grid=10, joint=6x6, n_obs=12, parallel=true)"
        );
        let pretty = format!("{params:#}");
        assert!(pretty.starts_with("Equant Grid Search Parameters"));
        assert!(pretty.contains("size = 11664"));
        assert!(pretty.contains("[Outer searches]"));
    }
}
