//! Fit the equant model to the Mars opposition table.
//!
//! Usage:
//!   cargo run --example fit_oppositions -- [path/to/oppositions.csv]
//!   RUST_LOG=marsfit=debug cargo run --example fit_oppositions --features progress

use camino::Utf8PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marsfit::constants::{MARS_ANGULAR_VELOCITY_SEED, MARS_RADIUS_SEED};
use marsfit::{MarsFitError, OppositionFit, Oppositions, SearchParams};

fn main() -> Result<(), MarsFitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|| Utf8PathBuf::from("tests/data/01_data_mars_opposition_updated.csv"));

    let params = SearchParams::default();
    let oppositions = Oppositions::from_csv_file(&path, params.expected_observations)?;
    println!("{params:#}");

    let inner =
        oppositions.best_orbit_inner_params(MARS_RADIUS_SEED, MARS_ANGULAR_VELOCITY_SEED, &params)?;
    println!("Inner search at the seeds: {inner}");

    let fit_s = oppositions.best_s(MARS_RADIUS_SEED, &params)?;
    println!("Best s: {fit_s}");

    let fit_r = oppositions.best_r(MARS_ANGULAR_VELOCITY_SEED, &params)?;
    println!("Best r: {fit_r}");

    let fit = oppositions.best_mars_orbit_params(&params)?;
    println!("\n{fit:#}\n");

    let report = oppositions.fit_report(&fit)?;
    report.check_default_consistency()?;
    println!("{}", report.table());
    println!("{report}");

    Ok(())
}
