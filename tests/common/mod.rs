#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8Path;
use marsfit::{constants::DEFAULT_OBSERVATION_COUNT, OrbitParams, Oppositions};

pub const OPPOSITION_TABLE: &str = "tests/data/01_data_mars_opposition_updated.csv";

/// Elapsed days of the historical oppositions since 1580-11-18 01:31.
pub const HISTORICAL_TIMES: [f64; 12] = [
    0.0,
    770.1020833333333,
    1534.7381944444444,
    2299.2444444444445,
    3069.2027777777776,
    3854.258333333333,
    4663.663888888889,
    5459.9638888888885,
    6234.592361111111,
    7000.521527777778,
    7764.529166666666,
    8531.619444444445,
];

/// Heliocentric longitudes (degrees) of the historical oppositions.
pub const HISTORICAL_LONGITUDES: [f64; 12] = [
    66.47638888888889,
    106.92500000000001,
    141.60277777777776,
    175.71666666666667,
    214.38333333333333,
    266.71666666666664,
    342.26666666666665,
    47.52777777777778,
    92.46666666666667,
    128.63333333333333,
    162.45,
    198.61944444444444,
];

pub fn load_oppositions() -> Oppositions {
    Oppositions::from_csv_file(Utf8Path::new(OPPOSITION_TABLE), DEFAULT_OBSERVATION_COUNT)
        .expect("opposition table")
}

pub fn assert_params_close(actual: &OrbitParams, expected: &OrbitParams, epsilon: f64) {
    assert_relative_eq!(actual.c, expected.c, epsilon = epsilon);
    assert_relative_eq!(actual.r, expected.r, epsilon = epsilon);
    assert_relative_eq!(actual.e1, expected.e1, epsilon = epsilon);
    assert_relative_eq!(actual.e2, expected.e2, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
    assert_relative_eq!(actual.s, expected.s, epsilon = epsilon);
}
