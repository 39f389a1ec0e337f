use clap::{Arg, ArgMatches, Command};

use crate::error::{PellError, Result};

pub const DEFAULT_BOUND: &str = "1000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bound: u64,
    /// `None` runs the sequential scan; `Some(0)` lets rayon pick the thread count.
    pub thread_num: Option<usize>,
    pub show_solution: bool,
    pub verbose: bool,
}

pub fn command() -> Command<'static> {
    Command::new("pell-search")
        .version("0.1.0")
        .about("find the D <= N whose Pell equation x^2 - D*y^2 = 1 has the largest minimal x")
        .arg(Arg::new("bound")
            .help("the upper bound N of the search")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value(DEFAULT_BOUND)
            .short('n')
            .long("bound"))
        .arg(Arg::new("thread_num")
            .help("the number of threads to use (0 for one per core)")
            .takes_value(true)
            .short('t')
            .long("thread_num"))
        .arg(Arg::new("show_solution")
            .help("also print the fundamental solution of the answer")
            .short('s')
            .long("show_solution"))
        .arg(Arg::new("verbose")
            .help("log progress to stderr")
            .short('v')
            .long("verbose"))
}

pub fn parse_bound(s: &str) -> Result<u64> {
    match s.trim().parse::<u64>() {
        Ok(bound) if bound > 0 => Ok(bound),
        _ => Err(PellError::InvalidBound(s.to_string())),
    }
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let bound = parse_bound(matches.value_of("bound").unwrap_or(DEFAULT_BOUND))?;
        let thread_num = match matches.value_of("thread_num") {
            Some(t) => Some(t.parse::<usize>().map_err(|_| PellError::InvalidThreadNum(t.to_string()))?),
            None => None,
        };
        Ok(Config {
            bound,
            thread_num,
            show_solution: matches.is_present("show_solution"),
            verbose: matches.is_present("verbose"),
        })
    }
}
