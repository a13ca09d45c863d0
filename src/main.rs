use std::{error::Error as _, io, process::ExitCode, thread, time::Duration};
use thiserror::Error;
use toruslife::{AllocationError, Render, Simulation, TextRender, Universe};

mod console;
mod options;
mod stats;

use options::{Config, Invocation, OptionsError};
use stats::RunStats;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("cannot create the universe: {0}")]
    Allocation(#[from] AllocationError),
    #[error("output failed: {0}")]
    Io(#[from] io::Error),
}
impl AppError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Options(err) => err.exit_code(),
            Self::Allocation(_) => 6,
            Self::Io(_) => 7,
        }
    }
}

fn create_universe(config: &Config) -> Result<Universe, AllocationError> {
    let mut universe = Universe::new(config.rows, config.cols)?;
    log::info!("board: {}x{}", config.cols, config.rows);
    if let Some(seed) = config.seed {
        log::info!("seed: {}", seed);
        universe.randomize(seed);
    }
    Ok(universe)
}

/// Evolves `sim` until it stops, waiting `delay` before each new generation
fn drive<R: Render + ?Sized>(
    sim: &mut Simulation,
    out: &mut R,
    delay: Duration,
    stats: &mut RunStats,
) -> io::Result<()> {
    while sim.can_advance() {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        sim.tick(out)?;
        stats.record(sim);
    }
    Ok(())
}

fn simulate(config: Config) -> Result<(), AppError> {
    let universe = create_universe(&config)?;
    let mut stats = RunStats::new(config.stats_file.is_some());

    let mut out: Box<dyn Render> = if config.console {
        Box::new(console::ConsoleRender::new(config.mode)?)
    } else {
        Box::new(TextRender::new(io::stdout().lock(), config.mode))
    };

    let mut sim = Simulation::start(universe, config.budget, out.as_mut())?;
    drive(&mut sim, out.as_mut(), config.delay, &mut stats)?;
    std::mem::drop(out);

    log::info!(
        "stopped after {} generations, {} cells alive",
        sim.generation(),
        sim.universe().alive_count()
    );
    sim.into_universe().release();

    if let Some(file_name) = config.stats_file {
        stats.save(&file_name)?;
        log::info!("stats written to {}", file_name);
    }
    Ok(())
}

fn run() -> Result<(), AppError> {
    match options::Args::from_env()? {
        Invocation::Help(usage) => {
            print!("{}", usage);
            Ok(())
        }
        Invocation::Version => {
            println!("Version: {}", VERSION);
            Ok(())
        }
        Invocation::Run(args) => simulate(args.config()?),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                log::debug!("caused by: {}", cause);
                source = cause.source();
            }
            if let AppError::Options(OptionsError::Parse(_)) = err {
                print!("{}", options::Args::help());
            }
            ExitCode::from(err.exit_code())
        }
    }
}
