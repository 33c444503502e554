use std::fs;
use std::path::Path;
use std::str::FromStr;

use point_quadtree::{Coordinate, Rectangle};
use wkt::{Geometry, Wkt};

//// Utility functions

pub(crate) fn read_test_case(name: &str) -> Vec<Geometry<f64>> {
    let filepath = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(format!("{}.wkt", name));
    let contents = fs::read_to_string(&filepath).unwrap();

    contents
        .lines()
        .map(str::trim)
        // header line of the fixture export
        .filter(|line| !line.is_empty() && *line != "wkt")
        .flat_map(|line| {
            Wkt::<f64>::from_str(line)
                .unwrap_or_else(|e| panic!("Bad WKT in {}: {}: {}", name, line, e))
                .items
        })
        .collect()
}

pub(crate) fn get_points(name: &str) -> Vec<Coordinate> {
    read_test_case(name)
        .into_iter()
        .filter_map(|geom| match geom {
            Geometry::Point(point) => point.0.map(|c| Coordinate::new(c.x, c.y)),
            _ => None,
        })
        .collect()
}

/// Query rectangles stored as closed polygon shells; the first and third
/// vertices are the min and max corners.
pub(crate) fn get_rects(name: &str) -> Vec<Rectangle> {
    read_test_case(name)
        .into_iter()
        .filter_map(|geom| match geom {
            Geometry::Polygon(poly) => {
                let shell = &poly.0.get(0)?.0;
                let (c0, c2) = (shell.get(0)?, shell.get(2)?);
                Some(Rectangle::new(
                    Coordinate::new(c0.x, c0.y),
                    Coordinate::new(c2.x, c2.y),
                ))
            }
            _ => None,
        })
        .collect()
}
