// main.rs - Conway's Game of Life, configured from the command line

use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use conway_life::config::usage;
use conway_life::{Backend, Command, Config, Simulation, terminal, ui};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "conway_life".to_string());

    let config = match Config::from_args(args).context("invalid configuration")? {
        Command::Help => {
            print!("{}", usage(&program));
            return Ok(());
        }
        Command::Run(config) => config,
    };

    info!("Welcome to {}!", config.title);
    info!("{config:?}");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sim = Simulation::from_config(&config, &mut rng).context("failed to seed the grid")?;

    match config.backend {
        Backend::Window => ui::run_window(&config, sim),
        Backend::Terminal => terminal::run_terminal(&config, sim).map(|_| ()),
    }
}
