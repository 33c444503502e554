//! Errors reported by the checked quadtree entry points.

use thiserror::Error;

use crate::Coordinate;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    #[error("Bucket capacity must be at least 1")]
    ZeroCapacity,

    #[error("Region bounds must be finite")]
    NonFiniteRegion,

    #[error("Region minimum exceeds its maximum")]
    InvertedRegion,

    #[error("Region has zero width and zero height")]
    DegenerateRegion,

    #[error("Point {0:?} lies outside the tree region")]
    OutOfBounds(Coordinate),
}
