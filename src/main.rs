use std::process;
use std::time::Instant;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use pell_search::config::{command, Config};
use pell_search::{largest_minimal_x, largest_minimal_x_par, PellSolution, Result};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &Config) -> Result<PellSolution> {
    debug!(?config, "starting search");

    let start_time = Instant::now();
    let best = match config.thread_num {
        Some(thread_num) => largest_minimal_x_par(config.bound, thread_num)?,
        None => largest_minimal_x(config.bound)?,
    };
    debug!(elapsed = ?start_time.elapsed(), d = best.d, "search finished");
    Ok(best)
}

fn main() {
    let matches = command().get_matches();

    let result = Config::from_matches(&matches).and_then(|config| {
        init_tracing(config.verbose);
        run(&config).map(|best| (config, best))
    });

    match result {
        Ok((config, best)) => {
            println!("{}", best.d);
            if config.show_solution {
                println!("{}", best);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
