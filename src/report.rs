//! # Fit report
//!
//! Turn an [`OrbitFit`] into the quantities used to judge it: predicted longitudes, their
//! agreement with the observed ones, and a self-check of the residual bookkeeping.
//!
//! ## Predicted longitudes
//!
//! Two independent routes give the predicted longitude of each opposition:
//!
//! - **from residuals**: `normalize(observed - error)`, which inverts the residual definition;
//! - **recomputed**: [`EquantModel::predicted_longitude`] at the fitted parameters.
//!
//! [`FitReport::max_prediction_drift`] is the largest angular disagreement between the two, and
//! [`FitReport::check_consistency`] fails when it exceeds a tolerance
//! ([`PREDICTION_TOLERANCE`] by default).
//!
//! [`FitReport::correlation`] is computed on the unwrapped `observed - error` values
//! ([`FitReport::observed_minus_errors`]), so a prediction just below `0°` stays next to its
//! observation instead of jumping to `~360°`.
//!
//! ## Rendering
//!
//! * `Display` – one-line summary.
//! * [`FitReport::table`] – per-opposition table built with [`comfy-table`].
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::izip;

use crate::{
    constants::{Day, Degree, PREDICTION_TOLERANCE},
    conversion::{normalize_degrees, signed_angular_difference},
    equant_model::{max_magnitude, EquantModel, OrbitParams},
    grid_search::search_result::OrbitFit,
    marsfit_errors::MarsFitError,
    observations::Oppositions,
};

/// Pearson correlation coefficient of two samples.
///
/// Return
/// ----------
/// * `None` when the samples differ in length, hold fewer than two values, or one of them has
///   zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let (cov, var_x, var_y) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(c, vx, vy), (a, b)| {
        let (dx, dy) = (a - mean_x, b - mean_y);
        (c + dx * dy, vx + dx * dx, vy + dy * dy)
    });

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

/// Per-opposition predictions of a fit and their agreement statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    params: OrbitParams,
    times: Vec<Day>,
    observed: Vec<Degree>,
    errors: Vec<Degree>,
    observed_minus_errors: Vec<Degree>,
    predicted_from_residuals: Vec<Degree>,
    predicted: Vec<Degree>,
    max_abs_error: Degree,
    max_prediction_drift: Degree,
    correlation: Option<f64>,
}

impl FitReport {
    /// Build the report of `fit` on `oppositions`.
    ///
    /// Arguments
    /// -----------------
    /// * `fit`: the fitted parameters and their residuals on `oppositions`.
    /// * `oppositions`: the observations the fit was computed on.
    ///
    /// Return
    /// ----------
    /// * The report, [`MarsFitError::InputShape`] if the residuals do not match the observations,
    ///   or [`MarsFitError::NumericDomain`] for non-finite parameters.
    pub fn new(fit: &OrbitFit, oppositions: &Oppositions) -> Result<Self, MarsFitError> {
        if fit.errors().len() != oppositions.len() {
            return Err(MarsFitError::InputShape(format!(
                "{} residuals for {} observations",
                fit.errors().len(),
                oppositions.len()
            )));
        }
        let model = EquantModel::new(fit.params)?;

        let times = oppositions.times();
        let observed = oppositions.longitudes();
        let errors = fit.errors().to_vec();

        let observed_minus_errors: Vec<Degree> =
            observed.iter().zip(&errors).map(|(o, e)| o - e).collect();
        let predicted_from_residuals: Vec<Degree> = observed_minus_errors
            .iter()
            .map(|&p| normalize_degrees(p))
            .collect();
        let predicted: Vec<Degree> = times
            .iter()
            .map(|&t| model.predicted_longitude(t))
            .collect();

        let max_prediction_drift = predicted
            .iter()
            .zip(&predicted_from_residuals)
            .fold(0.0_f64, |acc, (p, q)| {
                max_magnitude(acc, signed_angular_difference(*p, *q))
            });
        let correlation = pearson_correlation(&observed, &observed_minus_errors);

        Ok(FitReport {
            params: fit.params,
            times,
            observed,
            errors,
            observed_minus_errors,
            predicted_from_residuals,
            predicted,
            max_abs_error: fit.max_abs_error(),
            max_prediction_drift,
            correlation,
        })
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    pub fn times(&self) -> &[Day] {
        &self.times
    }

    pub fn observed(&self) -> &[Degree] {
        &self.observed
    }

    pub fn errors(&self) -> &[Degree] {
        &self.errors
    }

    /// `observed - error` for each opposition, not wrapped into `[0, 360)`.
    pub fn observed_minus_errors(&self) -> &[Degree] {
        &self.observed_minus_errors
    }

    /// `normalize(observed - error)` for each opposition.
    pub fn predicted_from_residuals(&self) -> &[Degree] {
        &self.predicted_from_residuals
    }

    /// Longitudes recomputed by the forward model at the fitted parameters.
    pub fn predicted(&self) -> &[Degree] {
        &self.predicted
    }

    pub fn max_abs_error(&self) -> Degree {
        self.max_abs_error
    }

    /// Largest angular disagreement between the two predicted series, in degrees.
    pub fn max_prediction_drift(&self) -> Degree {
        self.max_prediction_drift
    }

    /// Pearson correlation of the observed longitudes and
    /// [`observed_minus_errors`](FitReport::observed_minus_errors), when defined.
    pub fn correlation(&self) -> Option<f64> {
        self.correlation
    }

    /// Fail with [`MarsFitError::InconsistentPrediction`] if the drift exceeds `tolerance` or
    /// is NaN.
    pub fn check_consistency(&self, tolerance: Degree) -> Result<(), MarsFitError> {
        if self.max_prediction_drift.is_nan() || self.max_prediction_drift > tolerance {
            return Err(MarsFitError::InconsistentPrediction {
                drift: self.max_prediction_drift,
                tolerance,
            });
        }
        Ok(())
    }

    /// [`check_consistency`](FitReport::check_consistency) with [`PREDICTION_TOLERANCE`].
    pub fn check_default_consistency(&self) -> Result<(), MarsFitError> {
        self.check_consistency(PREDICTION_TOLERANCE)
    }

    /// Render one row per opposition with comfy-table.
    pub fn table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("t [d]"),
            Cell::new("Observed [°]"),
            Cell::new("Predicted [°]"),
            Cell::new("Error [°]"),
        ]);

        for (i, (t, obs, pred, err)) in izip!(
            &self.times,
            &self.observed,
            &self.predicted_from_residuals,
            &self.errors
        )
        .enumerate()
        {
            table.add_row(Row::from(vec![
                Cell::new(i).set_alignment(CellAlignment::Right),
                Cell::new(format!("{t:.4}")).set_alignment(CellAlignment::Right),
                Cell::new(format!("{obs:.4}")).set_alignment(CellAlignment::Right),
                Cell::new(format!("{pred:.4}")).set_alignment(CellAlignment::Right),
                Cell::new(format!("{err:+.4}")).set_alignment(CellAlignment::Right),
            ]));
        }

        table.to_string()
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let correlation = match self.correlation {
            Some(r) => format!("{r:.6}"),
            None => "n/a".to_string(),
        };
        write!(
            f,
            "FitReport(n={}, max_error={:.6}°, correlation={}, drift={:.1e}°)",
            self.observed.len(),
            self.max_abs_error,
            correlation,
            self.max_prediction_drift
        )
    }
}
