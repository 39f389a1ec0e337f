use thiserror::Error;

#[derive(Error, Debug)]
pub enum PellError {
    /// The search bound is not a positive integer
    #[error("invalid bound {0:?}: expected a positive integer")]
    InvalidBound(String),

    /// No non-square D exists in [1, bound]
    #[error("no non-square D in [1, {0}]")]
    NoCandidate(u64),

    /// x^2 - D*y^2 = 1 has no positive solution for square D
    #[error("{0} is a perfect square")]
    PerfectSquare(u64),

    #[error("invalid thread count {0:?}")]
    InvalidThreadNum(String),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, PellError>;
