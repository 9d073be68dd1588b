use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarsFitError {
    #[error("Invalid input shape: {0}")]
    InputShape(String),

    #[error("Non-finite numeric input: {0}")]
    NumericDomain(String),

    #[error("Empty search space: {0}")]
    EmptySearchSpace(String),

    #[error("Invalid search parameter: {0}")]
    InvalidSearchParameter(String),

    #[error("Invalid zodiac index: {0} (expected 0..=11)")]
    InvalidZodiacIndex(i64),

    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    #[error("Predicted longitudes disagree by {drift:e}° (tolerance {tolerance:e}°)")]
    InconsistentPrediction { drift: f64, tolerance: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<hifitime::HifitimeError> for MarsFitError {
    fn from(err: hifitime::HifitimeError) -> Self {
        MarsFitError::InvalidCalendarDate(err.to_string())
    }
}

impl PartialEq for MarsFitError {
    fn eq(&self, other: &Self) -> bool {
        use MarsFitError::*;
        match (self, other) {
            (InputShape(a), InputShape(b)) => a == b,
            (NumericDomain(a), NumericDomain(b)) => a == b,
            (EmptySearchSpace(a), EmptySearchSpace(b)) => a == b,
            (InvalidSearchParameter(a), InvalidSearchParameter(b)) => a == b,
            (InvalidZodiacIndex(a), InvalidZodiacIndex(b)) => a == b,
            (InvalidCalendarDate(a), InvalidCalendarDate(b)) => a == b,
            (
                InconsistentPrediction {
                    drift: d1,
                    tolerance: t1,
                },
                InconsistentPrediction {
                    drift: d2,
                    tolerance: t2,
                },
            ) => d1 == d2 && t1 == t2,

            // not comparable, same variant is enough
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
