//! # Opposition table reader
//!
//! Loads the historical opposition table: one header row, then one row per opposition with
//! its calendar timestamp and its zodiac-sexagesimal heliocentric longitude.
//!
//! ```text
//! Year,Month,Day,Hour,Minute,ZodiacIndex,Degree,Minute,Second,...
//! 1580,11,18,1,31,2,6,28,35,...
//! ```
//!
//! The header carries `Minute` twice (time of day, then arc-minutes of the longitude).
//! Repeated names are renamed `Minute.1`, `Minute.2`, … before deserialization so each column
//! maps to a distinct field. Columns not listed in [`OppositionRecord`] are ignored.
//!
//! See also
//! ------------
//! * [`crate::time::elapsed_since_first`] – elapsed days relative to the first row.
//! * [`crate::conversion::zodiac_to_longitude`] – longitude reconstruction.
use std::{collections::HashMap, fs::File, io::Read};

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use hifitime::Epoch;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::Degree,
    conversion::zodiac_to_longitude,
    marsfit_errors::MarsFitError,
    time::{calendar_epoch, elapsed_since_first},
};

use super::Oppositions;

/// One row of the opposition table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OppositionRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u8,
    #[serde(rename = "Day")]
    pub day: u8,
    #[serde(rename = "Hour")]
    pub hour: u8,
    #[serde(rename = "Minute")]
    pub minute: u8,

    #[serde(rename = "ZodiacIndex")]
    pub zodiac_index: i64,
    #[serde(rename = "Degree")]
    pub degree: f64,
    #[serde(rename = "Minute.1")]
    pub arc_minute: f64,
    #[serde(rename = "Second")]
    pub arc_second: f64,
}

impl OppositionRecord {
    /// Timestamp of the opposition.
    pub fn epoch(&self) -> Result<Epoch, MarsFitError> {
        calendar_epoch(self.year, self.month, self.day, self.hour, self.minute)
    }

    /// Heliocentric longitude of the opposition, in degrees.
    pub fn longitude(&self) -> Result<Degree, MarsFitError> {
        zodiac_to_longitude(
            self.zodiac_index,
            self.degree,
            self.arc_minute,
            self.arc_second,
        )
    }
}

/// Rename repeated header names by appending `.1`, `.2`, … to every occurrence after the first.
fn dedupe_headers(headers: &StringRecord) -> StringRecord {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    headers
        .iter()
        .map(|name| {
            let count = seen.entry(name).or_insert(0);
            let renamed = if *count == 0 {
                name.to_string()
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            renamed
        })
        .collect()
}

/// Read every opposition row from a CSV source.
///
/// Arguments
/// -----------------
/// * `reader`: any byte source holding the CSV text (header row first).
///
/// Return
/// ----------
/// * The rows in file order, or [`MarsFitError::Csv`] on malformed input or a missing column.
pub fn read_opposition_records<R: Read>(reader: R) -> Result<Vec<OppositionRecord>, MarsFitError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = dedupe_headers(csv_reader.headers()?);

    csv_reader
        .records()
        .map(|record| Ok(record?.deserialize::<OppositionRecord>(Some(&headers))?))
        .collect()
}

/// Turn table rows into validated [`Oppositions`].
///
/// Times are the days elapsed since the first row; longitudes come from the zodiac fields.
///
/// Arguments
/// -----------------
/// * `records`: the table rows, in chronological order.
/// * `expected`: number of oppositions the caller expects.
///
/// Return
/// ----------
/// * The oppositions, or the first date, zodiac or shape error encountered.
pub fn records_to_oppositions(
    records: &[OppositionRecord],
    expected: usize,
) -> Result<Oppositions, MarsFitError> {
    let epochs = records
        .iter()
        .map(OppositionRecord::epoch)
        .collect::<Result<Vec<_>, _>>()?;
    let longitudes = records
        .iter()
        .map(OppositionRecord::longitude)
        .collect::<Result<Vec<_>, _>>()?;
    let times = elapsed_since_first(&epochs);

    Oppositions::with_expected_count(&times, &longitudes, expected)
}

impl Oppositions {
    /// Load oppositions from a CSV source.
    ///
    /// See [`read_opposition_records`] and [`records_to_oppositions`].
    pub fn from_csv_reader<R: Read>(reader: R, expected: usize) -> Result<Self, MarsFitError> {
        let records = read_opposition_records(reader)?;
        records_to_oppositions(&records, expected)
    }

    /// Load oppositions from a CSV file.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: path of the CSV file.
    /// * `expected`: number of oppositions the caller expects.
    pub fn from_csv_file(path: &Utf8Path, expected: usize) -> Result<Self, MarsFitError> {
        let file = File::open(path)?;
        let oppositions = Self::from_csv_reader(file, expected)?;
        debug!(path = %path, count = oppositions.len(), "loaded opposition table");
        Ok(oppositions)
    }
}

#[cfg(test)]
mod opposition_csv_test {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str =
        "Year,Month,Day,Hour,Minute,ZodiacIndex,Degree,Minute,Second,LatDegree,LatMinute";

    fn table(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_dedupe_headers() {
        let headers = StringRecord::from(vec!["Minute", "Degree", "Minute", "Minute"]);
        let deduped = dedupe_headers(&headers);
        assert_eq!(
            deduped.iter().collect::<Vec<_>>(),
            vec!["Minute", "Degree", "Minute.1", "Minute.2"]
        );
    }

    #[test]
    fn test_read_records() {
        let csv = table(&[
            "1580,11,18,1,31,2,6,28,35,1,40",
            "1582,12,28,3,58,3,16,55,30,4,6",
        ]);
        let records = read_opposition_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            OppositionRecord {
                year: 1580,
                month: 11,
                day: 18,
                hour: 1,
                minute: 31,
                zodiac_index: 2,
                degree: 6.0,
                arc_minute: 28.0,
                arc_second: 35.0,
            }
        );
        assert_relative_eq!(
            records[1].longitude().unwrap(),
            106.925,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_records_to_oppositions() {
        let csv = table(&[
            "1580,11,18,1,31,2,6,28,35,1,40",
            "1582,12,28,3,58,3,16,55,30,4,6",
        ]);
        let opps = Oppositions::from_csv_reader(csv.as_bytes(), 2).unwrap();
        assert_eq!(opps[0].time, 0.0);
        assert_relative_eq!(opps[1].time, 770.1020833333333, epsilon = 1e-9);
        assert_relative_eq!(opps[0].longitude, 66.47638888888889, epsilon = 1e-12);

        let err = Oppositions::from_csv_reader(csv.as_bytes(), 12).unwrap_err();
        assert_eq!(
            err,
            MarsFitError::InputShape("expected 12 observations, got 2".into())
        );
    }

    #[test]
    fn test_historical_table() {
        let opps = &*crate::unit_test_global::MARS_OPPOSITIONS;
        assert_eq!(opps.len(), 12);
        assert_relative_eq!(opps[6].time, 4663.663888888889, epsilon = 1e-9);
        assert_relative_eq!(opps[11].time, 8531.619444444445, epsilon = 1e-9);
        assert_relative_eq!(opps[6].longitude, 342.26666666666665, epsilon = 1e-12);
        assert_relative_eq!(opps[11].longitude, 198.61944444444444, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_rows() {
        let csv = table(&["1580,11,18,1,31,12,6,28,35,1,40"]);
        assert_eq!(
            Oppositions::from_csv_reader(csv.as_bytes(), 1).unwrap_err(),
            MarsFitError::InvalidZodiacIndex(12)
        );

        let csv = table(&["1581,2,29,1,31,2,6,28,35,1,40"]);
        assert!(matches!(
            Oppositions::from_csv_reader(csv.as_bytes(), 1),
            Err(MarsFitError::InvalidCalendarDate(_))
        ));

        let csv = "Year,Month,Day,Hour,Minute,ZodiacIndex,Degree,Second\n1580,11,18,1,31,2,6,35";
        assert!(matches!(
            read_opposition_records(csv.as_bytes()),
            Err(MarsFitError::Csv(_))
        ));
    }
}
