//! Region arithmetic shared by the tree: root sizing, quadrant routing and
//! the node/rectangle enclosure test used by range search.

use crate::{Coordinate, Rectangle};

/// One of the four subdivisions of a node's square region.
///
/// The discriminant is the child slot index: bit 1 is set for the right half,
/// bit 0 for the upper half.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    LowerLeft = 0,
    UpperLeft = 1,
    LowerRight = 2,
    UpperRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::LowerLeft,
        Quadrant::UpperLeft,
        Quadrant::LowerRight,
        Quadrant::UpperRight,
    ];

    /// Quadrant of `center`'s region that `point` falls in. A coordinate equal
    /// to the center line belongs to the upper (or right) half.
    pub fn of(center: Coordinate, point: Coordinate) -> Quadrant {
        match (point.x >= center.x, point.y >= center.y) {
            (false, false) => Quadrant::LowerLeft,
            (false, true) => Quadrant::UpperLeft,
            (true, false) => Quadrant::LowerRight,
            (true, true) => Quadrant::UpperRight,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    fn is_right(self) -> bool {
        matches!(self, Quadrant::LowerRight | Quadrant::UpperRight)
    }

    fn is_upper(self) -> bool {
        matches!(self, Quadrant::UpperLeft | Quadrant::UpperRight)
    }
}

/// How a node's region relates to a query rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Enclosure {
    Outside,
    Partial,
    Contained,
}

/// Smallest power of two that is >= `value`. Non-positive values give 0.
pub fn next_pow2(value: f64) -> f64 {
    if value <= 0. {
        return 0.;
    }
    let mut pow = pow2(value.log2().ceil() as i32);
    // log2 may round down for values just above a power of two
    if pow < value {
        pow *= 2.;
    }
    pow
}

/// 2^exp assembled from the exponent bits, so subnormal results do not
/// underflow to 0.
fn pow2(exp: i32) -> f64 {
    if exp > 1023 {
        f64::INFINITY
    } else if exp >= -1022 {
        f64::from_bits(((exp + 1023) as u64) << 52)
    } else if exp >= -1074 {
        f64::from_bits(1u64 << (exp + 1074))
    } else {
        0.
    }
}

/// Center and half size of the root square for a bounding box.
///
/// The half size is the next power of two of the larger extent, so the square
/// covers the box with room to spare and halves exactly on every split.
pub fn center_size(region: &Rectangle) -> (Coordinate, Coordinate) {
    let x_size = region.x_max - region.x_min;
    let y_size = region.y_max - region.y_min;
    let center = Coordinate::new(region.x_min + 0.5 * x_size, region.y_min + 0.5 * y_size);
    let half = next_pow2(x_size).max(next_pow2(y_size));
    (center, Coordinate::new(half, half))
}

pub fn child_center(center: Coordinate, half_size: Coordinate, quadrant: Quadrant) -> Coordinate {
    let dx = half_size.x / 2.;
    let dy = half_size.y / 2.;
    Coordinate {
        x: if quadrant.is_right() { center.x + dx } else { center.x - dx },
        y: if quadrant.is_upper() { center.y + dy } else { center.y - dy },
    }
}

pub fn point_in_rect(point: Coordinate, rect: &Rectangle) -> bool {
    point.x >= rect.x_min && point.x <= rect.x_max && point.y >= rect.y_min && point.y <= rect.y_max
}

/// Classify the square around `center` against `rect`.
///
/// Containment is decided by the node's four corners only. A rectangle lying
/// strictly inside the node has no node corner in it and comes back
/// `Partial`, which callers treat as "scan it".
pub fn classify(center: Coordinate, half_size: Coordinate, rect: &Rectangle) -> Enclosure {
    let node_min = Coordinate::new(center.x - half_size.x, center.y - half_size.y);
    let node_max = Coordinate::new(center.x + half_size.x, center.y + half_size.y);

    if node_min.x > rect.x_max
        || node_max.x < rect.x_min
        || node_min.y > rect.y_max
        || node_max.y < rect.y_min
    {
        return Enclosure::Outside;
    }

    let corners = [
        node_min,
        Coordinate::new(node_min.x, node_max.y),
        Coordinate::new(node_max.x, node_min.y),
        node_max,
    ];
    if corners.iter().all(|&c| point_in_rect(c, rect)) {
        Enclosure::Contained
    } else {
        Enclosure::Partial
    }
}
