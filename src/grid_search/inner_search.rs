//! # Inner grid search
//!
//! Exhaustive search of `(c, e1, e2, z)` for a fixed orbit radius `r` and angular velocity `s`.
//!
//! The four axes of [`SearchParams`] are flattened into a [`ParameterLattice`]; each lattice index
//! is scored by the largest absolute residual of the forward model. The winner is the smallest
//! score, ties going to the smallest lattice index, i.e. the first point met by nested loops over
//! `c`, `e1`, `e2`, `z`.
//!
//! With the `parallel` feature and [`SearchParams::parallel`] set, the lattice is scored with
//! `rayon`. Both paths reduce with the same `(score, index)` total order and return bit-identical
//! results.
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    constants::{Degree, DegreePerDay},
    equant_model::{EquantModel, OrbitParams},
    marsfit_errors::MarsFitError,
    observations::Oppositions,
};

use super::{search_result::InnerFit, ParameterLattice, SearchParams};

/// Score of one lattice point.
#[derive(Debug, Clone, Copy)]
struct Scored {
    max_error: Degree,
    index: usize,
}

/// Smaller score first, then smaller index.
#[inline]
fn better(a: Scored, b: Scored) -> Scored {
    match a
        .max_error
        .total_cmp(&b.max_error)
        .then(a.index.cmp(&b.index))
    {
        Ordering::Greater => b,
        _ => a,
    }
}

#[inline]
fn lattice_model(lattice: &ParameterLattice, index: usize, r: f64, s: DegreePerDay) -> EquantModel {
    let (c, e1, e2, z) = lattice.point(index);
    EquantModel::from_finite(OrbitParams::new(c, r, e1, e2, z, s))
}

#[inline]
fn score(
    lattice: &ParameterLattice,
    index: usize,
    r: f64,
    s: DegreePerDay,
    oppositions: &Oppositions,
) -> Scored {
    Scored {
        max_error: lattice_model(lattice, index, r, s).max_abs_error(oppositions),
        index,
    }
}

fn best_point_sequential(
    lattice: &ParameterLattice,
    r: f64,
    s: DegreePerDay,
    oppositions: &Oppositions,
) -> Option<Scored> {
    let mut best: Option<Scored> = None;
    for index in 0..lattice.len() {
        let candidate = score(lattice, index, r, s, oppositions);
        best = match best {
            Some(current) if better(current, candidate).index == current.index => Some(current),
            _ => {
                trace!(
                    index,
                    max_error = candidate.max_error,
                    "inner lattice improvement"
                );
                Some(candidate)
            }
        };
    }
    best
}

#[cfg(feature = "parallel")]
fn best_point_parallel(
    lattice: &ParameterLattice,
    r: f64,
    s: DegreePerDay,
    oppositions: &Oppositions,
) -> Option<Scored> {
    (0..lattice.len())
        .into_par_iter()
        .map(|index| score(lattice, index, r, s, oppositions))
        .reduce_with(better)
}

/// Find the best `(c, e1, e2, z)` for a fixed `(r, s)`.
///
/// Arguments
/// -----------------
/// * `r`: orbit radius.
/// * `s`: angular velocity about the equant, in degrees per day.
/// * `oppositions`: the observations to fit.
/// * `params`: lattice axes, expected observation count and execution mode.
///
/// Return
/// ----------
/// * The winning lattice point with its full residual vector.
/// * [`MarsFitError::NumericDomain`] if `r` or `s` is not finite.
/// * [`MarsFitError::InputShape`] if `oppositions` does not hold the expected count.
/// * [`MarsFitError::EmptySearchSpace`] if an axis has no point, or
///   [`MarsFitError::InvalidSearchParameter`] for a malformed or oversized lattice.
/// * [`MarsFitError::NumericDomain`] if no lattice point yields finite predictions.
///
/// See also
/// ------------
/// * [`crate::grid_search::outer_search`] – searches over `r` and `s` built on this function.
pub fn search_inner(
    r: f64,
    s: DegreePerDay,
    oppositions: &Oppositions,
    params: &SearchParams,
) -> Result<InnerFit, MarsFitError> {
    if !r.is_finite() || !s.is_finite() {
        return Err(MarsFitError::NumericDomain(format!(
            "inner search at r = {r}, s = {s}"
        )));
    }
    params.check_oppositions(oppositions)?;

    let lattice = params.lattice()?;

    #[cfg(feature = "parallel")]
    let best = if params.parallel {
        best_point_parallel(&lattice, r, s, oppositions)
    } else {
        best_point_sequential(&lattice, r, s, oppositions)
    };
    #[cfg(not(feature = "parallel"))]
    let best = best_point_sequential(&lattice, r, s, oppositions);

    let best = best.ok_or_else(|| {
        MarsFitError::EmptySearchSpace("inner lattice has no point".into())
    })?;
    // NaN scores sort last, so a non-finite winner means no point could be evaluated
    if !best.max_error.is_finite() {
        return Err(MarsFitError::NumericDomain(format!(
            "no finite prediction at r = {r}, s = {s}"
        )));
    }

    let (c, e1, e2, z) = lattice.point(best.index);
    let residuals = lattice_model(&lattice, best.index, r, s).residuals(oppositions);
    debug!(
        r,
        s,
        points = lattice.len(),
        c,
        e1,
        e2,
        z,
        max_error = best.max_error,
        "inner search done"
    );

    Ok(InnerFit {
        c,
        e1,
        e2,
        z,
        residuals,
    })
}

#[cfg(test)]
mod inner_search_test {
    use super::*;
    use crate::grid_search::StepRange;

    const TIMES: [f64; 5] = [
        0.0,
        770.1020833333333,
        1534.7381944444444,
        2299.2444444444445,
        3069.2027777777776,
    ];

    fn synthetic() -> Oppositions {
        EquantModel::new(OrbitParams::new(40.0, 1.5, 0.1, 100.0, 60.0, 0.52))
            .unwrap()
            .simulate_oppositions(&TIMES)
            .unwrap()
    }

    fn params(parallel: bool) -> SearchParams {
        SearchParams::builder()
            .expected_observations(TIMES.len())
            .parallel(parallel)
            .build()
            .unwrap()
    }

    #[test]
    fn test_better_total_order() {
        let a = Scored {
            max_error: 1.0,
            index: 4,
        };
        let b = Scored {
            max_error: 1.0,
            index: 2,
        };
        let c = Scored {
            max_error: 0.5,
            index: 9,
        };
        assert_eq!(better(a, b).index, 2);
        assert_eq!(better(b, a).index, 2);
        assert_eq!(better(a, c).index, 9);
        assert_eq!(better(c, b).index, 9);

        let nan = Scored {
            max_error: f64::NAN,
            index: 0,
        };
        assert_eq!(better(nan, a).index, 4);
        assert_eq!(better(a, nan).index, 4);
    }

    #[test]
    fn test_recovers_on_grid_parameters() {
        let fit = search_inner(1.5, 0.52, &synthetic(), &params(false)).unwrap();
        // the centre direction does not enter the prediction: the first value wins the tie
        assert_eq!(fit.c, 0.0);
        assert_eq!(fit.e1, 0.1);
        assert_eq!(fit.e2, 100.0);
        assert_eq!(fit.z, 60.0);
        assert_eq!(fit.max_abs_error(), 0.0);
        assert_eq!(fit.residuals.len(), TIMES.len());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let obs = synthetic();
        let seq = search_inner(1.47, 0.51, &obs, &params(false)).unwrap();
        let par = search_inner(1.47, 0.51, &obs, &params(true)).unwrap();
        assert_eq!(seq, par);
        assert_eq!(seq.c, 0.0);
    }

    #[test]
    fn test_historical_oppositions() {
        let opps = &*crate::unit_test_global::MARS_OPPOSITIONS;
        let fit = search_inner(1.52, 0.518195, opps, &SearchParams::default()).unwrap();
        assert_eq!((fit.c, fit.e1, fit.e2, fit.z), (0.0, 0.1, 180.0, 80.0));
        approx::assert_relative_eq!(fit.max_abs_error(), 18.09962700996664, epsilon = 1e-9);
    }

    #[test]
    fn test_input_errors() {
        let obs = synthetic();
        assert!(matches!(
            search_inner(f64::NAN, 0.52, &obs, &params(false)),
            Err(MarsFitError::NumericDomain(_))
        ));
        assert_eq!(
            search_inner(1.5, 0.52, &obs, &SearchParams::default()).unwrap_err(),
            MarsFitError::InputShape("expected 12 observations, got 5".into())
        );

        let mut empty = params(false);
        empty.z_range = StepRange::new(0.0, 0.0, 20.0);
        assert_eq!(
            search_inner(1.5, 0.52, &obs, &empty).unwrap_err(),
            MarsFitError::EmptySearchSpace("z range [0, 0) has no point".into())
        );
    }

    #[test]
    fn test_overflowing_predictions() {
        // s·t overflows at t = 1e10 for every lattice point
        let opps = Oppositions::with_expected_count(&[0.0, 1e10], &[0.0, 10.0], 2).unwrap();
        let params = SearchParams::builder()
            .expected_observations(2)
            .parallel(false)
            .build()
            .unwrap();
        assert!(matches!(
            search_inner(1.0, 1e300, &opps, &params),
            Err(MarsFitError::NumericDomain(_))
        ));

        #[cfg(feature = "parallel")]
        {
            let params = SearchParams {
                parallel: true,
                ..params
            };
            assert!(matches!(
                search_inner(1.0, 1e300, &opps, &params),
                Err(MarsFitError::NumericDomain(_))
            ));
        }
    }
}
