use std::backtrace::Backtrace;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The reason a solve attempt did not produce a grid.
///
/// These are terminal for the current `solve` call; the caller is expected
/// to `reset` the grid before trying again. They are distinct from
/// validation outcomes, which are a normal result of checking user input
/// rather than an exceptional condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("no assignment satisfies every clue")]
    NoSolution,
    #[error("solve was cancelled before completion")]
    Abandoned,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{0}")]
    Solve(#[from] SolveError),
    #[error("reveal requested on a grid with no stored solution")]
    NoStoredSolution,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<EngineError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<EngineError> for Error {
    fn from(inner: EngineError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(Backtrace::capture()),
        }
    }
}

impl From<SolveError> for Error {
    fn from(inner: SolveError) -> Self {
        Error::from(EngineError::Solve(inner))
    }
}
