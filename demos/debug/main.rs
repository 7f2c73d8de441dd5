//! Catoptric debug runner — traces one concave and one convex scenario
//! and prints their metrics.
//!
//! Usage:
//! ```text
//! cargo run --example debug                 # defaults (r=1, sun from above)
//! cargo run --example debug -- 2.5 250      # radius, sun direction in degrees
//! ```
//!
//! Logging defaults to WARN for everything and INFO for catoptric;
//! override with the RUST_LOG env var (e.g. RUST_LOG=catoptric=debug).

use catoptric::analysis::{EvalOptions, MirrorKind, Scenario};
use catoptric::CatoptricError;

const METRICS: &[&str] = &[
    "radius",
    "distance",
    "sun_width",
    "sun_a",
    "mirror_width",
    "ref_width",
    "ref_focal_d",
    "ref_focal_p",
    "ref_blur",
    "pupil",
    "pupil2",
    "brightness",
    "brightness2",
];

fn main() -> Result<(), CatoptricError> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("catoptric=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let radius: f64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1.0);
    let sun_dir: f64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(270.0);

    let mut concave = Scenario::new(radius, sun_dir);
    concave.min_normal_dir = 180.0;
    concave.max_normal_dir = 360.0;

    let options = EvalOptions {
        rays: 9,
        pupil: true,
    };
    println!("concave, radius {radius}, sun from {sun_dir} degrees:");
    print_metrics(&concave.evaluate(&options)?);

    let mut convex = concave.clone();
    convex.kind = MirrorKind::Convex;
    convex.sun_dir = 180.0;
    convex.observer_distance = Some(2.0 * radius);
    println!("convex, observer at distance {}:", 2.0 * radius);
    print_metrics(&convex.evaluate(&options)?);

    Ok(())
}

fn print_metrics(result: &catoptric::analysis::ScenarioResult) {
    for name in METRICS {
        match result.metric(name) {
            Ok(value) if catoptric::math::is_defined(value) => {
                println!("  {name:12} {value:.6}");
            }
            Ok(_) => println!("  {name:12} (undefined)"),
            Err(err) => println!("  {name:12} error: {err}"),
        }
    }
}
