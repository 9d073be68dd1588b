//! # Outer searches
//!
//! Searches over the orbit radius `r` and the angular velocity `s`, each candidate running a full
//! [`search_inner`] over `(c, e1, e2, z)`.
//!
//! | Function | Varies | Grid of [`SearchParams`] |
//! |---|---|---|
//! | [`best_s`] | `s`, for a given `r` | `s_grid` |
//! | [`best_r`] | `r`, for a given `s` | `r_grid` |
//! | [`best_mars_orbit_params`] | `r × s` | `joint_r_grid × joint_s_grid` |
//!
//! The candidate with the strictly smallest max error wins, so the first candidate in enumeration
//! order is kept on ties. The joint search iterates `r` in the outer loop and `s` in the inner one.
//!
//! Each candidate is logged at `debug` level. With the `progress` feature, an `indicatif` bar
//! tracks the candidate loop.
#[cfg(feature = "progress")]
use std::time::Duration;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
use itertools::iproduct;
use tracing::{debug, info};

use crate::{constants::DegreePerDay, marsfit_errors::MarsFitError, observations::Oppositions};

use super::{inner_search::search_inner, search_result::OrbitFit, SearchParams};

#[cfg(feature = "progress")]
fn candidate_bar(total: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total.max(1) as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | ETA {eta_precise} | {msg}",
    ) {
        pb.set_style(style);
    }
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb
}

/// Run the inner search on every `(r, s)` candidate and keep the best one.
fn best_candidate<I>(
    label: &str,
    candidates: I,
    total: usize,
    oppositions: &Oppositions,
    params: &SearchParams,
) -> Result<OrbitFit, MarsFitError>
where
    I: IntoIterator<Item = (f64, DegreePerDay)>,
{
    params.check_oppositions(oppositions)?;
    let lattice_size = params.lattice()?.len();
    info!(
        search = label,
        candidates = total,
        lattice = lattice_size,
        "outer search started"
    );

    #[cfg(feature = "progress")]
    let pb = candidate_bar(total, label);

    let mut best: Option<OrbitFit> = None;
    for (r, s) in candidates {
        let fit = search_inner(r, s, oppositions, params)?.into_orbit_fit(r, s);
        debug!(
            search = label,
            r,
            s,
            max_error = fit.max_abs_error(),
            "outer candidate"
        );

        #[cfg(feature = "progress")]
        pb.inc(1);

        best = match best {
            Some(current) if current.max_abs_error() <= fit.max_abs_error() => Some(current),
            _ => Some(fit),
        };
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    let best = best
        .ok_or_else(|| MarsFitError::EmptySearchSpace(format!("{label} has no candidate")))?;
    info!(
        search = label,
        r = best.params.r,
        s = best.params.s,
        max_error = best.max_abs_error(),
        "outer search done"
    );
    Ok(best)
}

/// Best angular velocity `s` for a fixed radius `r`.
///
/// Arguments
/// -----------------
/// * `r`: orbit radius.
/// * `oppositions`: the observations to fit.
/// * `params`: the `s_grid` candidates and the inner lattice.
///
/// Return
/// ----------
/// * The best full parameter set, with `r` unchanged, and its residuals.
pub fn best_s(
    r: f64,
    oppositions: &Oppositions,
    params: &SearchParams,
) -> Result<OrbitFit, MarsFitError> {
    params.s_grid.validate("s")?;
    let candidates = params.s_grid.values();
    let total = candidates.len();
    best_candidate(
        "best_s",
        candidates.into_iter().map(|s| (r, s)),
        total,
        oppositions,
        params,
    )
}

/// Best orbit radius `r` for a fixed angular velocity `s`.
///
/// Arguments
/// -----------------
/// * `s`: angular velocity about the equant, in degrees per day.
/// * `oppositions`: the observations to fit.
/// * `params`: the `r_grid` candidates and the inner lattice.
///
/// Return
/// ----------
/// * The best full parameter set, with `s` unchanged, and its residuals.
pub fn best_r(
    s: DegreePerDay,
    oppositions: &Oppositions,
    params: &SearchParams,
) -> Result<OrbitFit, MarsFitError> {
    params.r_grid.validate("r")?;
    let candidates = params.r_grid.values();
    let total = candidates.len();
    best_candidate(
        "best_r",
        candidates.into_iter().map(|r| (r, s)),
        total,
        oppositions,
        params,
    )
}

/// Joint search over the `joint_r_grid × joint_s_grid` plane.
///
/// Return
/// ----------
/// * The best of all six parameters and its residuals.
pub fn best_mars_orbit_params(
    oppositions: &Oppositions,
    params: &SearchParams,
) -> Result<OrbitFit, MarsFitError> {
    params.joint_r_grid.validate("joint r")?;
    params.joint_s_grid.validate("joint s")?;
    let total = params
        .joint_r_grid
        .len()
        .saturating_mul(params.joint_s_grid.len());
    best_candidate(
        "best_mars_orbit_params",
        iproduct!(params.joint_r_grid.values(), params.joint_s_grid.values()),
        total,
        oppositions,
        params,
    )
}
