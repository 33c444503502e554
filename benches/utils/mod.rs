#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use point_quadtree::{Coordinate, Rectangle};

//// Utility functions

pub(crate) fn get_random_points(rect: Rectangle, n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::new();
    for _i in 0..n {
        results.push(Coordinate::new(
            rng.gen_range(rect.x_min, rect.x_max),
            rng.gen_range(rect.y_min, rect.y_max),
        ));
    }

    results
}

/// Points piled up along the diagonal, forcing deep splits.
pub(crate) fn get_skewed_points(rect: Rectangle, n: usize) -> Vec<Coordinate> {
    let x_step = rect.width() / n as f64;
    let y_step = rect.height() / n as f64;
    (0..n)
        .map(|i| {
            let i = i as f64;
            Coordinate::new(rect.x_min + i * x_step, rect.y_min + i * y_step)
        })
        .collect()
}

pub(crate) fn get_random_rects(rect: Rectangle, n: usize, seed: u64) -> Vec<Rectangle> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::new();
    for _i in 0..n {
        results.push(Rectangle::new(
            Coordinate::new(
                rng.gen_range(rect.x_min, rect.x_max),
                rng.gen_range(rect.y_min, rect.y_max),
            ),
            Coordinate::new(
                rng.gen_range(rect.x_min, rect.x_max),
                rng.gen_range(rect.y_min, rect.y_max),
            ),
        ));
    }

    results
}
