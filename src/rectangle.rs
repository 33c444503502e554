use crate::geometry::point_in_rect;
use crate::Coordinate;

/// Axis-aligned rectangle with closed bounds on every side.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            other.is_empty()
        } else {
            self.x_min == other.x_min
                && self.y_min == other.y_min
                && self.x_max == other.x_max
                && self.y_max == other.y_max
        }
    }
}

impl Rectangle {
    pub fn new(p1: Coordinate, p2: Coordinate) -> Self {
        Rectangle {
            x_min: p1.x.min(p2.x),
            y_min: p1.y.min(p2.y),
            x_max: p1.x.max(p2.x),
            y_max: p1.y.max(p2.y),
        }
    }

    pub fn new_empty() -> Self {
        Rectangle {
            x_min: f64::NAN,
            y_min: f64::NAN,
            x_max: f64::NAN,
            y_max: f64::NAN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_min.is_nan() || self.y_min.is_nan() || self.x_max.is_nan() || self.y_max.is_nan()
    }

    /// Bounding box of `points`; empty for an empty slice.
    pub fn of(points: &[Coordinate]) -> Self {
        // f64::min ignores a NaN operand, so the empty rectangle grows from the first point
        points.iter().fold(Rectangle::new_empty(), |r, p| Rectangle {
            x_min: r.x_min.min(p.x),
            y_min: r.y_min.min(p.y),
            x_max: r.x_max.max(p.x),
            y_max: r.y_max.max(p.y),
        })
    }

    pub fn min(&self) -> Coordinate {
        Coordinate::new(self.x_min, self.y_min)
    }

    pub fn max(&self) -> Coordinate {
        Coordinate::new(self.x_max, self.y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive on all four bounds, so points on the far edges count.
    pub fn contains(&self, point: Coordinate) -> bool {
        point_in_rect(point, self)
    }
}
