use std::collections::VecDeque;

use tracing::debug;

use crate::geometry::{center_size, classify, point_in_rect, Enclosure};
use crate::node::{Preorder, QuadTreeNode, Removal};
use crate::{Coordinate, QuadTreeError, Rectangle};

/// Bucket capacity used by [`QuadTree::with_default_capacity`].
pub const DEFAULT_CAPACITY: usize = 16;

/// A dynamic point quadtree with set semantics.
///
/// Leaves hold at most `capacity` points. A full leaf splits into a stem when
/// another point arrives, and stems collapse back into leaves when removals
/// leave their children holding `capacity` points or fewer.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadTreeNode,
    capacity: usize,
    size: usize,
}

impl QuadTree {
    /// Create a tree whose root square covers `region`.
    ///
    /// # Panics
    ///
    /// Panics if `try_new` would return an error.
    pub fn new(region: Rectangle, capacity: usize) -> Self {
        match Self::try_new(region, capacity) {
            Ok(tree) => tree,
            Err(e) => panic!("Invalid quadtree parameters: {}", e),
        }
    }

    pub fn with_default_capacity(region: Rectangle) -> Self {
        Self::new(region, DEFAULT_CAPACITY)
    }

    pub fn try_new(region: Rectangle, capacity: usize) -> Result<Self, QuadTreeError> {
        if capacity == 0 {
            return Err(QuadTreeError::ZeroCapacity);
        }
        if !region.min().is_finite() || !region.max().is_finite() {
            return Err(QuadTreeError::NonFiniteRegion);
        }
        if region.x_min > region.x_max || region.y_min > region.y_max {
            return Err(QuadTreeError::InvertedRegion);
        }
        if region.width() == 0. && region.height() == 0. {
            return Err(QuadTreeError::DegenerateRegion);
        }

        let (center, half_size) = center_size(&region);
        debug!(?center, ?half_size, capacity, "created quadtree");
        Ok(QuadTree {
            root: QuadTreeNode::new(center, half_size),
            capacity,
            size: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root(&self) -> &QuadTreeNode {
        &self.root
    }

    /// The square actually covered by the root, which is larger than the
    /// region passed at construction.
    pub fn region(&self) -> Rectangle {
        self.root.region()
    }

    /// Number of levels, counting the root alone as 1.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Insert `point`. Returns false if it was already stored.
    ///
    /// Points outside the root region are routed to the border quadrants
    /// unchecked; use [`QuadTree::try_add`] to reject them. Such points can
    /// share every quadrant down to the depth where halving stops moving a
    /// node's center. The leaf there keeps them all, even past `capacity`.
    pub fn add(&mut self, point: Coordinate) -> bool {
        let inserted = self.root.insert(point, self.capacity);
        if inserted {
            self.size += 1;
        }
        inserted
    }

    pub fn try_add(&mut self, point: Coordinate) -> Result<bool, QuadTreeError> {
        if !point.is_finite() || !point_in_rect(point, &self.root.region()) {
            return Err(QuadTreeError::OutOfBounds(point));
        }
        Ok(self.add(point))
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        self.root
            .find_leaf(point)
            .map_or(false, |leaf| leaf.bucket().contains(&point))
    }

    /// Remove `point`, collapsing emptied-out subtrees. Returns whether the
    /// point was stored.
    pub fn remove(&mut self, point: Coordinate) -> bool {
        match self.root.remove(point, self.capacity) {
            Removal::Removed { .. } => {
                self.size -= 1;
                true
            }
            Removal::NotFound => false,
        }
    }

    /// All stored points inside `rect`, bounds inclusive. The order of the
    /// results is unspecified.
    pub fn range_search(&self, rect: &Rectangle) -> Vec<Coordinate> {
        let mut results = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(&self.root);

        while let Some(node) = queue.pop_front() {
            if node.is_leaf() {
                match classify(node.center(), node.half_size(), rect) {
                    Enclosure::Contained => results.extend_from_slice(node.bucket()),
                    Enclosure::Partial => results.extend(
                        node.bucket()
                            .iter()
                            .copied()
                            .filter(|&p| point_in_rect(p, rect)),
                    ),
                    Enclosure::Outside => {}
                }
                continue;
            }

            for child in node.children() {
                match classify(child.center(), child.half_size(), rect) {
                    Enclosure::Contained => child.collect_all_points(&mut results),
                    Enclosure::Partial => queue.push_back(child),
                    Enclosure::Outside => {}
                }
            }
        }

        results
    }

    /// Stored points, leaf by leaf in preorder.
    pub fn iter(&self) -> Points<'_> {
        Points {
            nodes: self.root.preorder(),
            bucket: [].iter(),
        }
    }
}

impl Extend<Coordinate> for QuadTree {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        for point in iter {
            self.add(point);
        }
    }
}

impl<'a> IntoIterator for &'a QuadTree {
    type Item = Coordinate;
    type IntoIter = Points<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`QuadTree`].
pub struct Points<'a> {
    nodes: Preorder<'a>,
    bucket: std::slice::Iter<'a, Coordinate>,
}

impl<'a> Iterator for Points<'a> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        loop {
            if let Some(&point) = self.bucket.next() {
                return Some(point);
            }
            let node = self.nodes.next()?;
            if node.is_leaf() {
                self.bucket = node.bucket().iter();
            }
        }
    }
}
