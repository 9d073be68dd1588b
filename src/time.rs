use hifitime::{Epoch, TimeScale};

use crate::constants::{Day, SECONDS_PER_DAY};
use crate::marsfit_errors::MarsFitError;

/// Build an epoch from calendar fields at minute resolution.
///
/// The date is read on the proleptic Gregorian calendar and placed on the `TAI` scale, which has
/// no leap seconds: the difference between two epochs is then the plain civil difference, the
/// same as naive calendar arithmetic.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`, `hour`, `minute`: calendar fields
///
/// Return
/// ------
/// * The corresponding [`Epoch`], or [`MarsFitError::InvalidCalendarDate`] if the fields do not
///   describe a valid Gregorian date.
pub fn calendar_epoch(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
) -> Result<Epoch, MarsFitError> {
    Ok(Epoch::maybe_from_gregorian(
        year,
        month,
        day,
        hour,
        minute,
        0,
        0,
        TimeScale::TAI,
    )?)
}

/// Days elapsed from `reference` to `epoch`, with fractional-day precision.
///
/// Negative when `epoch` precedes `reference`.
pub fn days_elapsed(reference: Epoch, epoch: Epoch) -> Day {
    (epoch - reference).to_seconds() / SECONDS_PER_DAY
}

/// Elapsed days of every epoch relative to the first one.
///
/// Return
/// ------
/// * A vector of the same length as `epochs`, starting with `0.0` (empty for empty input).
pub fn elapsed_since_first(epochs: &[Epoch]) -> Vec<Day> {
    match epochs.first() {
        Some(&reference) => epochs
            .iter()
            .map(|&epoch| days_elapsed(reference, epoch))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_days_elapsed() {
        let t0 = calendar_epoch(1580, 11, 18, 1, 31).unwrap();
        let t1 = calendar_epoch(1582, 12, 28, 3, 58).unwrap();
        assert_relative_eq!(days_elapsed(t0, t1), 770.1020833333333, epsilon = 1e-9);
        assert_relative_eq!(days_elapsed(t1, t0), -770.1020833333333, epsilon = 1e-9);
        assert_eq!(days_elapsed(t0, t0), 0.0);
    }

    #[test]
    fn test_elapsed_since_first() {
        let epochs = [
            calendar_epoch(2000, 1, 1, 0, 0).unwrap(),
            calendar_epoch(2000, 1, 1, 12, 0).unwrap(),
            calendar_epoch(2000, 3, 1, 6, 0).unwrap(),
        ];
        let elapsed = elapsed_since_first(&epochs);
        assert_eq!(elapsed.len(), 3);
        assert_eq!(elapsed[0], 0.0);
        assert_relative_eq!(elapsed[1], 0.5, epsilon = 1e-12);
        // 31 days of January, 29 days of a leap-year February
        assert_relative_eq!(elapsed[2], 60.25, epsilon = 1e-12);
        assert!(elapsed_since_first(&[]).is_empty());
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert!(matches!(
            calendar_epoch(1601, 2, 30, 0, 0),
            Err(MarsFitError::InvalidCalendarDate(_))
        ));
        assert!(matches!(
            calendar_epoch(1601, 13, 1, 0, 0),
            Err(MarsFitError::InvalidCalendarDate(_))
        ));
    }
}
