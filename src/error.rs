use thiserror::Error;

use crate::interval::Interval;

/// Recoverable errors of the decomposition engine.
///
/// Broken invariants (an empty interval, a sample point lying on a root,
/// a polynomial from the wrong ring) are programming errors and panic instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("division by interval {0} which contains zero")]
    DivisionByZero(Interval),

    #[error("bounding box has no dimensions")]
    EmptyBox,

    #[error("bounding box side {dimension} is degenerate: {interval}")]
    DegenerateBox { dimension: usize, interval: Interval },
}

pub type Result<T> = std::result::Result<T, Error>;
