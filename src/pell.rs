use std::fmt;
use std::mem;

use ibig::{UBig, ubig};

use crate::error::{PellError, Result};
use crate::utils::{is_square, isqrt, isqrt_u64};

/// Partial quotients a0, a1, a2, ... of the continued fraction of sqrt(d).
///
/// The sequence is infinite and, after a0, periodic. Every intermediate value
/// stays below 2 * sqrt(d), so plain `u64` arithmetic cannot overflow.
#[derive(Debug, Clone)]
pub struct ContinuedFraction {
    d: u64,
    a0: u64,
    m: u64,
    q: u64,
    a: u64,
    started: bool,
}

impl ContinuedFraction {
    /// `None` when `d` is a perfect square (the expansion terminates).
    pub fn new(d: u64) -> Option<Self> {
        if is_square(d) {
            return None;
        }
        let a0 = isqrt_u64(d);
        Some(ContinuedFraction { d, a0, m: 0, q: 1, a: a0, started: false })
    }

    pub fn a0(&self) -> u64 {
        self.a0
    }

    fn advance(&mut self) -> u64 {
        if !self.started {
            self.started = true;
            return self.a;
        }
        self.m = self.q * self.a - self.m;
        self.q = (self.d - self.m * self.m) / self.q;
        self.a = (self.a0 + self.m) / self.q;
        self.a
    }

    /// The repeating block of sqrt(d), e.g. `[1, 3, 1, 8]` for 23.
    pub fn period(d: u64) -> Option<Vec<u64>> {
        let mut cf = Self::new(d)?;
        let a0 = cf.advance();
        let mut period = Vec::new();
        loop {
            let a = cf.advance();
            period.push(a);
            if a == 2 * a0 {
                return Some(period);
            }
        }
    }
}

impl Iterator for ContinuedFraction {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.advance())
    }
}

/// Convergents h_i / k_i of sqrt(d), as exact `(h_i, k_i)` pairs.
#[derive(Debug, Clone)]
pub struct Convergents {
    quotients: ContinuedFraction,
    h_prev: UBig,
    h: UBig,
    k_prev: UBig,
    k: UBig,
}

impl Convergents {
    pub fn new(d: u64) -> Option<Self> {
        let quotients = ContinuedFraction::new(d)?;
        Some(Convergents {
            quotients,
            h_prev: ubig!(0),
            h: ubig!(1),
            k_prev: ubig!(1),
            k: ubig!(0),
        })
    }

    fn advance(&mut self) -> (UBig, UBig) {
        let a = UBig::from(self.quotients.advance());
        let h = &a * &self.h + &self.h_prev;
        let k = &a * &self.k + &self.k_prev;
        self.h_prev = mem::replace(&mut self.h, h);
        self.k_prev = mem::replace(&mut self.k, k);
        (self.h.clone(), self.k.clone())
    }
}

impl Iterator for Convergents {
    type Item = (UBig, UBig);

    fn next(&mut self) -> Option<(UBig, UBig)> {
        Some(self.advance())
    }
}

/// The fundamental solution of x^2 - d*y^2 = 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PellSolution {
    pub d: u64,
    pub x: UBig,
    pub y: UBig,
}

impl PellSolution {
    pub fn verify(&self) -> bool {
        x_for_y(self.d, &self.y).as_ref() == Some(&self.x)
    }
}

impl fmt::Display for PellSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^2 - {}*{}^2 = 1", self.x, self.d, self.y)
    }
}

/// x such that x^2 = d*y^2 + 1, if d*y^2 + 1 is a perfect square.
pub fn x_for_y(d: u64, y: &UBig) -> Option<UBig> {
    let rhs = UBig::from(d) * y * y + ubig!(1);
    let x = isqrt(&rhs);
    if &x * &x == rhs {
        Some(x)
    } else {
        None
    }
}

pub fn fundamental_solution(d: u64) -> Result<PellSolution> {
    let convergents = Convergents::new(d).ok_or(PellError::PerfectSquare(d))?;
    Ok(solve(d, convergents))
}

/// Like [`fundamental_solution`], for callers that already filter out squares.
pub(crate) fn solve_non_square(d: u64) -> Option<PellSolution> {
    Convergents::new(d).map(|convergents| solve(d, convergents))
}

fn solve(d: u64, mut convergents: Convergents) -> PellSolution {
    let n = UBig::from(d);
    let mut steps = 0usize;
    loop {
        let (h, k) = convergents.advance();
        steps += 1;
        if &h * &h == &n * &k * &k + ubig!(1) {
            tracing::trace!(d, steps, "fundamental solution found");
            let solution = PellSolution { d, x: h, y: k };
            debug_assert!(solution.verify());
            return solution;
        }
    }
}
