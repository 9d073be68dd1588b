//! Result types of the grid searches.
//!
//! * [`InnerFit`] – best `(c, e1, e2, z)` of the inner lattice for a fixed `(r, s)`.
//! * [`OrbitFit`] – best full parameter set found by an outer search.
use std::fmt;

use crate::{
    constants::{Degree, DegreePerDay},
    equant_model::{AngularResiduals, OrbitParams},
};

/// Argmin of the inner lattice for a fixed radius and angular velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerFit {
    pub c: Degree,
    pub e1: f64,
    pub e2: Degree,
    pub z: Degree,
    pub residuals: AngularResiduals,
}

impl InnerFit {
    /// Largest absolute residual at the winning lattice point.
    pub fn max_abs_error(&self) -> Degree {
        self.residuals.max_abs_error()
    }

    /// Complete the inner optimum with the `(r, s)` it was searched for.
    pub fn into_orbit_fit(self, r: f64, s: DegreePerDay) -> OrbitFit {
        OrbitFit {
            params: OrbitParams::new(self.c, r, self.e1, self.e2, self.z, s),
            residuals: self.residuals,
        }
    }
}

impl fmt::Display for InnerFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InnerFit(c={:.2}°, e1={:.4}, e2={:.2}°, z={:.2}°, max_error={:.6}°)",
            self.c,
            self.e1,
            self.e2,
            self.z,
            self.max_abs_error()
        )
    }
}

/// Argmin of an outer search: the six parameters with their residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitFit {
    pub params: OrbitParams,
    pub residuals: AngularResiduals,
}

impl OrbitFit {
    pub fn max_abs_error(&self) -> Degree {
        self.residuals.max_abs_error()
    }

    pub fn errors(&self) -> &[Degree] {
        self.residuals.errors()
    }
}

impl fmt::Display for OrbitFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "{:#}", self.params)?;
            write!(f, "  max |error| = {:.6} °", self.max_abs_error())
        } else {
            write!(
                f,
                "{} max_error={:.6}°",
                self.params,
                self.max_abs_error()
            )
        }
    }
}
