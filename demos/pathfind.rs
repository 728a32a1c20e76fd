//! Solve a scenario and print the path over the map.
//!
//! Run: cargo run --bin pathfind -- [--diagonal] [--random SEED | FILE]

use pathfinder_demos::{SAMPLE, Scenario};
use pathfinder_paths::GridConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RANDOM_WIDTH: i32 = 60;
const RANDOM_HEIGHT: i32 = 20;
const RANDOM_DENSITY: f64 = 0.3;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GridConfig::default();
    let mut seed = None;
    let mut file = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--diagonal" => config = config.with_diagonal_moves(true),
            "--random" => {
                let s = args.next().ok_or("--random needs a seed")?;
                seed = Some(s.parse::<u64>()?);
            }
            _ => file = Some(arg),
        }
    }

    let scenario = match (seed, file) {
        (Some(seed), _) => {
            let mut rng = StdRng::seed_from_u64(seed);
            Scenario::random(&mut rng, RANDOM_WIDTH, RANDOM_HEIGHT, RANDOM_DENSITY, config)?
        }
        (None, Some(file)) => Scenario::parse(&std::fs::read_to_string(file)?, config)?,
        (None, None) => Scenario::parse(SAMPLE, config)?,
    };

    let path = scenario.solve()?;
    println!("{}", scenario.render(path.coords()));
    if path.is_empty() {
        println!("no path from {} to {}", scenario.start, scenario.end);
    } else {
        println!(
            "{} cells, cost {}, {} nodes expanded",
            path.len(),
            path.cost(),
            path.expanded()
        );
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
