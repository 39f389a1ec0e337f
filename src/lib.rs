//! Search for the D <= N whose Pell equation x^2 - D*y^2 = 1 has the
//! largest fundamental solution x.

pub mod config;
pub mod error;
pub mod pell;
pub mod search;
pub mod utils;

pub use error::{PellError, Result};
pub use pell::{fundamental_solution, PellSolution};
pub use search::{largest_minimal_x, largest_minimal_x_par};
