use approx::assert_relative_eq;
use marsfit::{
    grid_search::{inner_search::search_inner, StepRange},
    EquantModel, OppositionFit, OrbitParams, SearchParams,
};

mod common;
use common::{load_oppositions, HISTORICAL_TIMES};

#[test]
fn test_synthetic_round_trip() {
    let truth = OrbitParams::new(40.0, 1.5, 0.1, 100.0, 60.0, 0.52);
    let synthetic = EquantModel::new(truth)
        .unwrap()
        .simulate_oppositions(&HISTORICAL_TIMES)
        .unwrap();

    let fit = synthetic
        .best_orbit_inner_params(1.5, 0.52, &SearchParams::default())
        .unwrap();

    // c never enters the prediction: the first grid value wins
    assert_eq!(fit.c, 0.0);
    assert_eq!((fit.e1, fit.e2, fit.z), (0.1, 100.0, 60.0));
    assert_eq!(fit.max_abs_error(), 0.0);
    assert!(fit.residuals.errors().iter().all(|e| *e == 0.0));
}

#[test]
fn test_historical_inner_search() {
    let oppositions = load_oppositions();
    let fit = oppositions
        .best_orbit_inner_params(1.52, 0.518195, &SearchParams::default())
        .unwrap();

    assert_eq!((fit.c, fit.e1, fit.e2, fit.z), (0.0, 0.1, 180.0, 80.0));
    assert_relative_eq!(fit.max_abs_error(), 18.09962700996664, epsilon = 1e-9);
    assert_eq!(fit.residuals.len(), 12);
}

#[test]
fn test_sequential_parallel_bit_identical() {
    let oppositions = load_oppositions();
    let sequential = SearchParams::builder().parallel(false).build().unwrap();
    let parallel = SearchParams::builder().parallel(true).build().unwrap();

    let reference = search_inner(1.4744, 0.50264915, &oppositions, &sequential).unwrap();
    for _ in 0..3 {
        assert_eq!(
            search_inner(1.4744, 0.50264915, &oppositions, &parallel).unwrap(),
            reference
        );
        assert_eq!(
            search_inner(1.4744, 0.50264915, &oppositions, &sequential).unwrap(),
            reference
        );
    }
    assert_eq!(reference.c, 0.0);
}

#[test]
fn test_finer_grid_never_worse() {
    let oppositions = load_oppositions();
    let coarse = SearchParams::default();
    let fine = SearchParams::builder()
        .c_range(StepRange::new(0.0, 360.0, 10.0))
        .e2_range(StepRange::new(0.0, 360.0, 10.0))
        .z_range(StepRange::new(0.0, 360.0, 10.0))
        .build()
        .unwrap();

    for (r, s) in [(1.52, 0.518195), (1.444, 0.52337695), (1.6, 0.5)] {
        let coarse_fit = search_inner(r, s, &oppositions, &coarse).unwrap();
        let fine_fit = search_inner(r, s, &oppositions, &fine).unwrap();
        assert!(
            fine_fit.max_abs_error() <= coarse_fit.max_abs_error(),
            "r={r}, s={s}: fine {} > coarse {}",
            fine_fit.max_abs_error(),
            coarse_fit.max_abs_error()
        );
    }
}
