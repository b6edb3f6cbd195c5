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
use ndarray::Array2;

mod affine;
mod block_mean;
mod loader;
mod world_file;

pub mod test_util;

pub use affine::*;
pub use block_mean::*;
pub use loader::*;
pub use world_file::*;

/// Envelope of the raster in world coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    /// Envelope of the four image corners through the transform, which
    /// stays correct under rotation and shear.
    pub fn from_transform(transform: &AffineTransform, width: usize, height: usize) -> Bounds {
        let w = width as f64;
        let h = height as f64;

        let corners = [
            transform.apply(0.0, 0.0),
            transform.apply(w, 0.0),
            transform.apply(w, h),
            transform.apply(0.0, h),
        ];

        let mut bounds = Bounds {
            left: f64::INFINITY,
            bottom: f64::INFINITY,
            right: f64::NEG_INFINITY,
            top: f64::NEG_INFINITY,
        };

        for (x, y) in corners {
            bounds.left = bounds.left.min(x);
            bounds.right = bounds.right.max(x);
            bounds.bottom = bounds.bottom.min(y);
            bounds.top = bounds.top.max(y);
        }

        bounds
    }
}

/// Source CRS of a raster, resolved once at load time
#[derive(Clone, Debug, Default)]
pub struct CrsInfo {
    pub wkt: String,
    pub is_projected: bool,
}

impl CrsInfo {
    pub fn is_defined(&self) -> bool {
        !self.wkt.trim().is_empty()
    }
}

/// Typed metadata of an opened raster
#[derive(Clone, Debug)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub dtype: String,
    pub crs_wkt: String,
    pub transform: AffineTransform,
    pub bounds: Bounds,
    pub nodata: Option<f64>,
}

/// Band 1 of a raster, read eagerly, with nodata pixels replaced by NaN.
/// Immutable once loaded.
#[derive(Debug)]
pub struct RasterGrid {
    pub band: Array2<f64>,
    pub metadata: RasterMetadata,
    pub crs: CrsInfo,
}

/// Nodata comparison that also handles values that went through an f32
/// band, where the f32 rounding error is much bigger than the unit of
/// least precision of f64.
pub fn is_nodata_value(value: f64, nodata: f64) -> bool {
    if nodata.is_nan() {
        return value.is_nan();
    }

    if float_cmp::approx_eq!(f64, value, nodata, ulps = 2) {
        return true;
    }

    float_cmp::approx_eq!(f32, value as f32, nodata as f32, ulps = 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_bounds_north_up() {
        let t = AffineTransform::new(0.5, 0.0, 10.0, 0.0, -0.5, 20.0).unwrap();
        let bounds = Bounds::from_transform(&t, 4, 6);

        assert_approx_eq!(f64, bounds.left, 10.0);
        assert_approx_eq!(f64, bounds.right, 12.0);
        assert_approx_eq!(f64, bounds.top, 20.0);
        assert_approx_eq!(f64, bounds.bottom, 17.0);
    }

    #[test]
    fn test_bounds_rotated() {
        // 90 degree rotation, pixels map onto the y axis
        let t = AffineTransform::new(0.0, 1.0, 0.0, -1.0, 0.0, 0.0).unwrap();
        let bounds = Bounds::from_transform(&t, 2, 3);

        assert_approx_eq!(f64, bounds.left, 0.0);
        assert_approx_eq!(f64, bounds.right, 3.0);
        assert_approx_eq!(f64, bounds.bottom, -2.0);
        assert_approx_eq!(f64, bounds.top, 0.0);
    }

    #[test]
    fn test_is_nodata_value_f32_band() {
        // -9999.0 stored in an f32 band does not round trip exactly
        let stored = -9999.0f32 as f64 + 1e-5;
        assert!(is_nodata_value(-9999.0, -9999.0));
        assert!(!is_nodata_value(-9998.0, -9999.0));
        assert!(is_nodata_value(stored, -9999.0));
    }

    #[test]
    fn test_is_nodata_value_nan_sentinel() {
        assert!(is_nodata_value(f64::NAN, f64::NAN));
        assert!(!is_nodata_value(0.0, f64::NAN));
    }
}
