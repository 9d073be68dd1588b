use crate::{
    constants::DegreePerDay,
    equant_model::{evaluate, AngularResiduals, OrbitParams},
    grid_search::{
        inner_search::search_inner,
        outer_search,
        search_result::{InnerFit, OrbitFit},
        SearchParams,
    },
    marsfit_errors::MarsFitError,
    report::FitReport,
};

use super::Oppositions;

/// Extension trait for [`Oppositions`] exposing the equant-model fitting workflow.
///
/// # Provided methods
/// - [`orbit_residuals`](OppositionFit::orbit_residuals):
///   Residuals of a given parameter set.
/// - [`best_orbit_inner_params`](OppositionFit::best_orbit_inner_params):
///   Best `(c, e1, e2, z)` for a fixed `(r, s)`.
/// - [`best_s`](OppositionFit::best_s) / [`best_r`](OppositionFit::best_r):
///   One-dimensional outer searches.
/// - [`best_mars_orbit_params`](OppositionFit::best_mars_orbit_params):
///   Joint `(r, s)` search, the full fit.
/// - [`fit_report`](OppositionFit::fit_report):
///   Predicted longitudes and agreement statistics of a fit.
///
/// # See also
/// * [`SearchParams`] – grids and execution mode of every search.
/// * [`crate::grid_search::outer_search`] – free-function form of the outer searches.
pub trait OppositionFit {
    /// Signed residuals of `params` against these oppositions.
    fn orbit_residuals(&self, params: &OrbitParams) -> Result<AngularResiduals, MarsFitError>;

    /// Exhaustive `(c, e1, e2, z)` search for fixed `r` and `s`.
    ///
    /// See [`search_inner`] for the tie-break and error rules.
    fn best_orbit_inner_params(
        &self,
        r: f64,
        s: DegreePerDay,
        params: &SearchParams,
    ) -> Result<InnerFit, MarsFitError>;

    /// Best `s` on `params.s_grid` for a fixed `r`.
    fn best_s(&self, r: f64, params: &SearchParams) -> Result<OrbitFit, MarsFitError>;

    /// Best `r` on `params.r_grid` for a fixed `s`.
    fn best_r(&self, s: DegreePerDay, params: &SearchParams) -> Result<OrbitFit, MarsFitError>;

    /// Best `(r, s)` on the joint grids, with the matching inner optimum.
    fn best_mars_orbit_params(&self, params: &SearchParams) -> Result<OrbitFit, MarsFitError>;

    /// Build the [`FitReport`] of a fit on these oppositions.
    fn fit_report(&self, fit: &OrbitFit) -> Result<FitReport, MarsFitError>;
}

impl OppositionFit for Oppositions {
    fn orbit_residuals(&self, params: &OrbitParams) -> Result<AngularResiduals, MarsFitError> {
        evaluate(params, self)
    }

    fn best_orbit_inner_params(
        &self,
        r: f64,
        s: DegreePerDay,
        params: &SearchParams,
    ) -> Result<InnerFit, MarsFitError> {
        search_inner(r, s, self, params)
    }

    fn best_s(&self, r: f64, params: &SearchParams) -> Result<OrbitFit, MarsFitError> {
        outer_search::best_s(r, self, params)
    }

    fn best_r(&self, s: DegreePerDay, params: &SearchParams) -> Result<OrbitFit, MarsFitError> {
        outer_search::best_r(s, self, params)
    }

    fn best_mars_orbit_params(&self, params: &SearchParams) -> Result<OrbitFit, MarsFitError> {
        outer_search::best_mars_orbit_params(self, params)
    }

    fn fit_report(&self, fit: &OrbitFit) -> Result<FitReport, MarsFitError> {
        FitReport::new(fit, self)
    }
}
