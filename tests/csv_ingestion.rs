use approx::assert_relative_eq;
use camino::Utf8Path;
use marsfit::{
    observations::opposition_csv::read_opposition_records, MarsFitError, Oppositions,
};

mod common;
use common::{load_oppositions, HISTORICAL_LONGITUDES, HISTORICAL_TIMES, OPPOSITION_TABLE};

#[test]
fn test_historical_times_and_longitudes() {
    let oppositions = load_oppositions();
    assert_eq!(oppositions.len(), 12);

    for (obs, (t, l)) in oppositions
        .iter()
        .zip(HISTORICAL_TIMES.iter().zip(HISTORICAL_LONGITUDES.iter()))
    {
        assert_relative_eq!(obs.time, *t, epsilon = 1e-9);
        assert_relative_eq!(obs.longitude, *l, epsilon = 1e-12);
    }
}

#[test]
fn test_records_keep_both_minute_columns() {
    let file = std::fs::File::open(OPPOSITION_TABLE).unwrap();
    let records = read_opposition_records(file).unwrap();
    assert_eq!(records.len(), 12);

    let last = &records[11];
    assert_eq!((last.year, last.month, last.day), (1604, 3, 28));
    assert_eq!((last.hour, last.minute), (16, 23));
    assert_eq!(last.zodiac_index, 6);
    assert_eq!((last.degree, last.arc_minute, last.arc_second), (18.0, 37.0, 10.0));
}

#[test]
fn test_wrong_expected_count() {
    let err = Oppositions::from_csv_file(Utf8Path::new(OPPOSITION_TABLE), 10).unwrap_err();
    assert_eq!(
        err,
        MarsFitError::InputShape("expected 10 observations, got 12".into())
    );
}

#[test]
fn test_missing_file() {
    let err = Oppositions::from_csv_file(Utf8Path::new("tests/data/no_such_table.csv"), 12)
        .unwrap_err();
    assert!(matches!(err, MarsFitError::IoError(_)));
}
