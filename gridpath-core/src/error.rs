use thiserror::Error;

use crate::models::CellIndex;

pub type Result<T> = std::result::Result<T, Error>;

/// Discriminated failure reasons for the planning pipeline.
///
/// `EmptyGrid` and `NoPathFound` are reportable outcomes rather than input
/// errors; callers deciding whether to reprompt or reconfigure can match on
/// them separately from the hard `Invalid*` variants.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("grid generation produced no traversable cells")]
    EmptyGrid,

    #[error("cell {0} is not a node of the current graph")]
    UnknownNode(CellIndex),

    #[error("no path exists between start and goal")]
    NoPathFound,
}
