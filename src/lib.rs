mod coordinate;
mod error;
pub mod geometry;
mod node;
mod quadtree;
mod rectangle;

pub use coordinate::Coordinate;
pub use error::QuadTreeError;
pub use geometry::{Enclosure, Quadrant};
pub use node::{Preorder, QuadTreeNode};
pub use quadtree::{Points, QuadTree, DEFAULT_CAPACITY};
pub use rectangle::Rectangle;
