use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, trace, Level};

use crate::error::{PellError, Result};
use crate::pell::{solve_non_square, ContinuedFraction, PellSolution};
use crate::utils::is_square;

/// Larger x wins; equal x goes to the smaller d.
fn is_better(a: &PellSolution, b: &PellSolution) -> bool {
    a.x > b.x || (a.x == b.x && a.d < b.d)
}

fn solve_candidate(d: u64) -> Option<PellSolution> {
    if is_square(d) {
        trace!(d, "skipping perfect square");
        return None;
    }
    if tracing::enabled!(Level::TRACE) {
        if let Some(period) = ContinuedFraction::period(d) {
            trace!(d, period = period.len(), "solving");
        }
    }
    solve_non_square(d)
}

/// Scans d in [1, bound] and returns the fundamental solution with the largest x.
pub fn largest_minimal_x(bound: u64) -> Result<PellSolution> {
    let mut best: Option<PellSolution> = None;
    for d in 1..=bound {
        let solution = match solve_candidate(d) {
            Some(s) => s,
            None => continue,
        };
        if best.as_ref().map_or(true, |b| solution.x > b.x) {
            debug!(d, digits = solution.x.to_string().len(), "new best");
            best = Some(solution);
        }
    }
    best.ok_or(PellError::NoCandidate(bound))
}

/// Same result as [`largest_minimal_x`], computed on a pool of `thread_num` threads.
pub fn largest_minimal_x_par(bound: u64, thread_num: usize) -> Result<PellSolution> {
    let pool = ThreadPoolBuilder::new().num_threads(thread_num).build()?;
    let best = pool.install(|| {
        (1..=bound)
            .into_par_iter()
            .filter_map(solve_candidate)
            .reduce_with(|a, b| if is_better(&b, &a) { b } else { a })
    });
    best.ok_or(PellError::NoCandidate(bound))
}

#[cfg(test)]
mod tests {
    use ibig::{UBig, ubig};

    use super::*;

    #[test]
    fn test_small_bounds() {
        assert_eq!(largest_minimal_x(7).unwrap().d, 5);
        assert_eq!(largest_minimal_x(7).unwrap().x, ubig!(9));
        assert_eq!(largest_minimal_x(10).unwrap().d, 10);
        assert_eq!(largest_minimal_x(100).unwrap().d, 61);
    }

    #[test]
    fn test_full_range() {
        let best = largest_minimal_x(1000).unwrap();
        assert_eq!(best.d, 661);
        assert!(best.verify());
    }

    #[test]
    fn test_boundaries() {
        assert!(matches!(largest_minimal_x(1), Err(PellError::NoCandidate(1))));
        assert!(matches!(largest_minimal_x(0), Err(PellError::NoCandidate(0))));

        let best = largest_minimal_x(2).unwrap();
        assert_eq!(best.d, 2);
        assert_eq!(best.x, ubig!(3));
    }

    #[test]
    fn test_squares_never_selected() {
        for bound in 2..=200u64 {
            let best = largest_minimal_x(bound).unwrap();
            assert!(!is_square(best.d), "bound = {}", bound);
            assert!(best.d <= bound);
        }
    }

    #[test]
    fn test_squares_skipped() {
        assert!(solve_candidate(1).is_none());
        assert!(solve_candidate(144).is_none());
        assert_eq!(solve_candidate(5).map(|s| s.x), Some(UBig::from(9u8)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for &bound in [2u64, 7, 50, 500, 1000].iter() {
            let seq = largest_minimal_x(bound).unwrap();
            for &threads in [1usize, 4].iter() {
                let par = largest_minimal_x_par(bound, threads).unwrap();
                assert_eq!(par, seq, "bound = {}, threads = {}", bound, threads);
            }
        }
        assert!(matches!(largest_minimal_x_par(1, 2), Err(PellError::NoCandidate(1))));
    }

    #[test]
    fn test_tie_break_prefers_smaller_d() {
        let a = PellSolution { d: 3, x: ubig!(2), y: ubig!(1) };
        let b = PellSolution { d: 12, x: ubig!(7), y: ubig!(2) };
        let c = PellSolution { d: 48, x: ubig!(7), y: ubig!(1) };
        assert!(is_better(&b, &a));
        assert!(is_better(&b, &c));
        assert!(!is_better(&c, &b));
    }

    #[test]
    fn test_idempotent() {
        let first = largest_minimal_x(300).unwrap();
        for _ in 0..3 {
            assert_eq!(largest_minimal_x(300).unwrap(), first);
        }
    }
}
