//! Runs one AGN-driven outflow and prints the resampled trajectory.
//!
//! ```text
//! outflow [scenario.json] [trajectory.json]
//! ```
//!
//! Without a scenario the default galaxy is used. If a second path is given
//! the resampled trajectory is also written there as JSON. `RUST_LOG`
//! controls logging (`outflow_sim=trace` shows every step).

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use outflow_core::{Scenario, UNIT_KPC, UNIT_MSUN, UNIT_VELOCITY, UNIT_YEAR};
use outflow_sim::{OutflowSimulation, Trajectory};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_scenario(path: Option<&Path>) -> Result<Scenario, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(Scenario::default());
    };
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn print_trajectory(trajectory: &Trajectory) {
    let mut points = trajectory.points().to_vec();
    points.sort_by(|a, b| a.state.time.total_cmp(&b.state.time));

    println!();
    println!("══════════════════════════════════════════════════════════════════");
    println!(
        "OUTFLOW TRAJECTORY: {} points, stopped at {}",
        points.len(),
        trajectory.termination().name()
    );
    println!("══════════════════════════════════════════════════════════════════");
    println!(
        "{:>12} {:>10} {:>12} {:>12} {:>12}",
        "time [yr]", "r [kpc]", "v [km/s]", "M_gas [Msun]", "M_bh [Msun]"
    );
    for point in &points {
        println!(
            "{:>12.4e} {:>10.4} {:>12.2} {:>12.4e} {:>12.4e}",
            point.state.time * UNIT_YEAR,
            point.state.radius * UNIT_KPC,
            point.state.velocity * UNIT_VELOCITY / 1.0e5,
            point.state.gas_mass * UNIT_MSUN,
            point.galaxy.smbh_mass * UNIT_MSUN,
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let scenario_path = args.next();
    let output_path = args.next();

    let scenario = load_scenario(scenario_path.as_deref())?;
    scenario.galaxy.validate()?;

    info!(
        seed = scenario.seed,
        integrator = ?scenario.run.integrator,
        halo = scenario.galaxy.halo_profile.name(),
        bulge = scenario.galaxy.bulge_profile.name(),
        fade = scenario.galaxy.fade.name(),
        "starting outflow run"
    );

    let simulation = OutflowSimulation::new(scenario.galaxy, scenario.run);
    let mut rng = ChaCha8Rng::seed_from_u64(scenario.seed);
    let trajectory = simulation.run(Some(&mut rng))?;

    print_trajectory(&trajectory);

    if let Some(path) = output_path {
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, &trajectory)?;
        info!(path = %path.display(), "trajectory written");
    }

    Ok(())
}
