/*
This file is part of the Raster Block Vectorizer
Copyright (C) 2026 Novel-T

The Raster Block Vectorizer is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use crate::raster::AffineTransform;

/// World coordinates of the four corners of aggregated block
/// (row, col), in upper left, upper right, lower right, lower left
/// order.
///
/// Each corner goes through the affine map independently, so the
/// polygon stays exact under rotated and sheared transforms.  Corners
/// are never reconstructed from the centroid plus a nominal size.
pub fn block_corners(
    transform: &AffineTransform,
    row: usize,
    col: usize,
    block_size: usize,
) -> [(f64, f64); 4] {
    let b = block_size as f64;
    let col0 = col as f64 * b;
    let row0 = row as f64 * b;

    [
        transform.apply(col0, row0),
        transform.apply(col0 + b, row0),
        transform.apply(col0 + b, row0 + b),
        transform.apply(col0, row0 + b),
    ]
}

/// World coordinate of the center of aggregated block (row, col),
/// through the same affine map as the corners.
pub fn block_centroid(
    transform: &AffineTransform,
    row: usize,
    col: usize,
    block_size: usize,
) -> (f64, f64) {
    let b = block_size as f64;

    transform.apply(col as f64 * b + b / 2.0, row as f64 * b + b / 2.0)
}

/// Physical block area in squared CRS linear units.  Only meaningful
/// for projected systems; under an angular CRS a planar area would be
/// numerically meaningless, so it is None for every block.
pub fn block_area(
    transform: &AffineTransform,
    block_size: usize,
    crs_is_projected: bool,
) -> Option<f64> {
    if !crs_is_projected {
        return None;
    }

    let b = block_size as f64;

    Some(transform.pixel_width() * transform.pixel_height() * b * b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn north_up() -> AffineTransform {
        AffineTransform::new(10.0, 0.0, 1000.0, 0.0, -10.0, 2000.0).unwrap()
    }

    #[test]
    fn test_corners_north_up() {
        // block (1, 2) with block size 5 covers pixels
        // rows 5..10, cols 10..15
        let corners = block_corners(&north_up(), 1, 2, 5);

        assert_eq!(corners[0], (1100.0, 1950.0));
        assert_eq!(corners[1], (1150.0, 1950.0));
        assert_eq!(corners[2], (1150.0, 1900.0));
        assert_eq!(corners[3], (1100.0, 1900.0));
    }

    #[test]
    fn test_corners_sheared() {
        let t = AffineTransform::new(2.0, 0.5, 0.0, 0.3, -2.0, 0.0).unwrap();
        let corners = block_corners(&t, 0, 0, 2);

        // each corner is an independent application of the affine
        assert_eq!(corners[0], t.apply(0.0, 0.0));
        assert_eq!(corners[1], t.apply(2.0, 0.0));
        assert_eq!(corners[2], t.apply(2.0, 2.0));
        assert_eq!(corners[3], t.apply(0.0, 2.0));
    }

    #[test]
    fn test_centroid_inside_corner_envelope() {
        let t = AffineTransform::new(2.0, 0.5, 7.0, 0.3, -2.0, 11.0).unwrap();

        for (row, col) in [(0, 0), (3, 1), (2, 5)] {
            let corners = block_corners(&t, row, col, 4);
            let (cx, cy) = block_centroid(&t, row, col, 4);

            let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
            let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
            let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
            let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

            assert!(cx > min_x && cx < max_x);
            assert!(cy > min_y && cy < max_y);
        }
    }

    #[test]
    fn test_area_projected() {
        let area = block_area(&north_up(), 5, true).unwrap();
        assert_approx_eq!(f64, area, 10.0 * 10.0 * 25.0);
    }

    #[test]
    fn test_area_geographic_undefined() {
        assert!(block_area(&north_up(), 5, false).is_none());
    }
}
