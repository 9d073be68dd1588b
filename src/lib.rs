//! Fit a circular orbit with an equant to the twelve historical oppositions of Mars.
//!
//! The crate predicts Mars' heliocentric longitude from six parameters
//! ([`equant_model::OrbitParams`]) and searches them on nested grids
//! ([`grid_search`]) for the smallest worst-case angular error. The fitting workflow is exposed
//! on [`observations::Oppositions`] through [`observations::oppositions_ext::OppositionFit`].
pub mod constants;
pub mod conversion;
pub mod equant_model;
pub mod grid_search;
pub mod marsfit_errors;
pub mod observations;
pub mod report;
pub mod time;

pub use equant_model::{evaluate, AngularResiduals, EquantModel, OrbitParams};
pub use grid_search::{
    search_result::{InnerFit, OrbitFit},
    SearchParams,
};
pub use marsfit_errors::MarsFitError;
pub use observations::{oppositions_ext::OppositionFit, Observation, Oppositions};
pub use report::FitReport;
