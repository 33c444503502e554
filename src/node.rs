use tracing::trace;

use crate::geometry::{child_center, Quadrant};
use crate::{Coordinate, Rectangle};

/// A square region of the tree.
///
/// A leaf stores up to `capacity` points in its bucket and has no children.
/// A stem has an empty bucket and routes to the children created so far.
#[derive(Debug, Clone)]
pub struct QuadTreeNode {
    center: Coordinate,
    half_size: Coordinate,
    children: [Option<Box<QuadTreeNode>>; 4],
    bucket: Vec<Coordinate>,
    is_leaf: bool,
}

/// Outcome of removing a point from a subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    NotFound,
    /// `reduce` is true while the ancestors should still try to collapse.
    Removed { reduce: bool },
}

impl QuadTreeNode {
    pub fn new(center: Coordinate, half_size: Coordinate) -> Self {
        QuadTreeNode {
            center,
            half_size,
            children: [None, None, None, None],
            bucket: Vec::new(),
            is_leaf: true,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn half_size(&self) -> Coordinate {
        self.half_size
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn bucket(&self) -> &[Coordinate] {
        &self.bucket
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadTreeNode> {
        self.children[quadrant.index()].as_deref()
    }

    /// Present children in quadrant order.
    pub fn children(&self) -> impl Iterator<Item = &QuadTreeNode> {
        self.children.iter().filter_map(|c| c.as_deref())
    }

    pub fn quadrant_for(&self, point: Coordinate) -> Quadrant {
        Quadrant::of(self.center, point)
    }

    pub fn region(&self) -> Rectangle {
        Rectangle {
            x_min: self.center.x - self.half_size.x,
            y_min: self.center.y - self.half_size.y,
            x_max: self.center.x + self.half_size.x,
            y_max: self.center.y + self.half_size.y,
        }
    }

    /// The child responsible for `point`, creating an empty leaf in its slot
    /// if there is none yet.
    pub fn child_for(&mut self, point: Coordinate) -> &mut QuadTreeNode {
        let quadrant = self.quadrant_for(point);
        let center = child_center(self.center, self.half_size, quadrant);
        let half_size = Coordinate::new(self.half_size.x / 2., self.half_size.y / 2.);
        self.children[quadrant.index()]
            .get_or_insert_with(|| Box::new(QuadTreeNode::new(center, half_size)))
    }

    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Append every point stored in this subtree to `results`.
    pub fn collect_all_points(&self, results: &mut Vec<Coordinate>) {
        if self.is_leaf {
            results.extend_from_slice(&self.bucket);
        } else {
            for child in self.children() {
                child.collect_all_points(results);
            }
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.children().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Leaf holding `point` if the routing path to it exists.
    pub(crate) fn find_leaf(&self, point: Coordinate) -> Option<&QuadTreeNode> {
        let mut node = self;
        while !node.is_leaf {
            node = node.child(node.quadrant_for(point))?;
        }
        Some(node)
    }

    /// Store `point` in this subtree. Returns false if it was already present.
    pub(crate) fn insert(&mut self, point: Coordinate, capacity: usize) -> bool {
        if !self.is_leaf {
            return self.child_for(point).insert(point, capacity);
        }
        if self.bucket.contains(&point) {
            return false;
        }
        if self.bucket.len() < capacity {
            self.bucket.push(point);
            return true;
        }
        let quadrant = self.quadrant_for(point);
        if child_center(self.center, self.half_size, quadrant) == self.center {
            // halving no longer moves the center, so every deeper level routes
            // the same way and a split cannot separate the points
            trace!(
                x = self.center.x,
                y = self.center.y,
                points = self.bucket.len() + 1,
                "leaf cannot split further, keeping point over capacity"
            );
            self.bucket.push(point);
            return true;
        }

        trace!(
            x = self.center.x,
            y = self.center.y,
            half_size = self.half_size.x,
            "splitting full leaf"
        );
        self.is_leaf = false;
        let bucket = std::mem::take(&mut self.bucket);
        self.child_for(point).insert(point, capacity);
        for p in bucket {
            self.child_for(p).insert(p, capacity);
        }
        true
    }

    /// Remove `point` from this subtree, collapsing stems on the way back up
    /// until the first one that cannot be collapsed.
    pub(crate) fn remove(&mut self, point: Coordinate, capacity: usize) -> Removal {
        if self.is_leaf {
            return match self.bucket.iter().position(|p| *p == point) {
                Some(idx) => {
                    self.bucket.remove(idx);
                    Removal::Removed { reduce: true }
                }
                None => Removal::NotFound,
            };
        }

        let quadrant = self.quadrant_for(point);
        let child = match self.children[quadrant.index()].as_mut() {
            Some(child) => child,
            None => return Removal::NotFound,
        };
        match child.remove(point, capacity) {
            Removal::Removed { reduce: true } => Removal::Removed {
                reduce: self.reduce(capacity),
            },
            other => other,
        }
    }

    /// Absorb all children into this node's bucket if they are leaves holding
    /// at most `capacity` points between them. Returns whether it collapsed.
    fn reduce(&mut self, capacity: usize) -> bool {
        let mut num_points = 0;
        for child in self.children() {
            if !child.is_leaf {
                return false;
            }
            num_points += child.bucket.len();
        }
        if num_points > capacity {
            return false;
        }

        for slot in self.children.iter_mut() {
            if let Some(mut child) = slot.take() {
                self.bucket.append(&mut child.bucket);
            }
        }
        self.is_leaf = true;
        trace!(
            x = self.center.x,
            y = self.center.y,
            points = num_points,
            "collapsed stem into leaf"
        );
        true
    }
}

/// Depth-first, parent-before-children walk over a subtree.
pub struct Preorder<'a> {
    stack: Vec<&'a QuadTreeNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a QuadTreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed so the lowest quadrant is visited first
        for child in node.children.iter().rev().filter_map(|c| c.as_deref()) {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_node() -> QuadTreeNode {
        QuadTreeNode::new((0., 0.).into(), (8., 8.).into())
    }

    #[test]
    fn test_child_for_creates_once() {
        let mut node = unit_node();
        let child = node.child_for((3., -3.).into());
        assert_eq!(child.center(), Coordinate::new(4., -4.));
        assert_eq!(child.half_size(), Coordinate::new(4., 4.));
        assert!(child.is_leaf());
        child.bucket.push((3., -3.).into());

        let again = node.child_for((1., -1.).into());
        assert_eq!(again.bucket(), &[Coordinate::new(3., -3.)]);
        assert_eq!(node.children().count(), 1);
        assert!(node.child(Quadrant::LowerRight).is_some());
        assert!(node.child(Quadrant::UpperRight).is_none());
    }

    #[test]
    fn test_region() {
        let node = QuadTreeNode::new((1., 2.).into(), (4., 4.).into());
        assert_eq!(node.region(), Rectangle::new((-3., -2.).into(), (5., 6.).into()));
    }

    #[test]
    fn test_insert_splits_full_leaf() {
        let mut node = unit_node();
        assert!(node.insert((1., 1.).into(), 2));
        assert!(node.insert((-1., -1.).into(), 2));
        assert!(!node.insert((1., 1.).into(), 2));
        assert!(node.is_leaf());

        assert!(node.insert((-1., 1.).into(), 2));
        assert!(!node.is_leaf());
        assert!(node.bucket().is_empty());
        assert_eq!(node.children().count(), 3);
        assert_eq!(node.children().map(|c| c.bucket().len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_insert_splits_transitively() {
        let mut node = unit_node();
        for &p in &[(1., 1.), (1.5, 1.5), (2., 2.)] {
            node.insert(p.into(), 2);
        }
        let upper_right = node.child(Quadrant::UpperRight).unwrap();
        assert!(!upper_right.is_leaf());
        assert_eq!(node.children().count(), 1);
        let deepest = upper_right.child(Quadrant::LowerLeft).unwrap();
        assert!(!deepest.is_leaf());
    }

    #[test]
    fn test_preorder_order() {
        let mut node = unit_node();
        for &p in &[(5., 5.), (-5., -5.), (-5., 5.), (5., -5.), (6., 6.)] {
            node.insert(p.into(), 1);
        }
        let centers: Vec<Coordinate> = node.preorder().map(|n| n.center()).collect();
        assert_eq!(centers[0], Coordinate::new(0., 0.));
        assert_eq!(centers[1], Coordinate::new(-4., -4.));
        assert_eq!(centers[2], Coordinate::new(-4., 4.));
        assert_eq!(centers[3], Coordinate::new(4., -4.));
        assert_eq!(centers[4], Coordinate::new(4., 4.));
        // (5, 5) and (6, 6) share quadrants until two levels further down
        assert_eq!(centers[5], Coordinate::new(6., 6.));
        assert_eq!(centers[6], Coordinate::new(5., 5.));
        assert_eq!(centers[7], Coordinate::new(7., 7.));
        assert_eq!(centers.len(), 8);
    }

    #[test]
    fn test_collect_all_points() {
        let mut node = unit_node();
        let points: Vec<Coordinate> = vec![
            (1., 1.).into(),
            (-2., 3.).into(),
            (4., -7.).into(),
            (-6., -6.).into(),
        ];
        for &p in &points {
            node.insert(p, 1);
        }
        let mut results = Vec::new();
        node.collect_all_points(&mut results);
        assert_eq!(results.len(), points.len());
        for p in &points {
            assert!(results.contains(p));
        }
    }

    #[test]
    fn test_remove_collapses() {
        let mut node = unit_node();
        for &p in &[(1., 1.), (-1., -1.), (-1., 1.)] {
            node.insert(p.into(), 2);
        }
        assert!(!node.is_leaf());
        assert_eq!(node.remove((3., 3.).into(), 2), Removal::NotFound);
        assert_eq!(
            node.remove((1., 1.).into(), 2),
            Removal::Removed { reduce: true }
        );
        assert!(node.is_leaf());
        assert_eq!(node.children().count(), 0);
        assert_eq!(node.bucket().len(), 2);
    }
}
