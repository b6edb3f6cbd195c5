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
use crate::error::{RasterVecError, Result};

/// 2D affine geotransform mapping pixel (col, row) to world (x, y):
///
///   x = a * col + b * row + c
///   y = d * col + e * row + f
///
/// GDAL stores the same 6 coefficients as [c, a, b, f, d, e].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<Self> {
        let t = AffineTransform { a, b, c, d, e, f };

        if !t.determinant().is_finite() || t.determinant().abs() < f64::EPSILON {
            return Err(RasterVecError::Configuration(format!(
                "degenerate affine transform, determinant is {}",
                t.determinant()
            )));
        }

        Ok(t)
    }

    /// From a GDAL geotransform array [c, a, b, f, d, e]
    pub fn from_gdal(gt: &[f64; 6]) -> Result<Self> {
        Self::new(gt[1], gt[2], gt[0], gt[4], gt[5], gt[3])
    }

    /// World files carry one coefficient per line, in the order
    /// a, d, b, e, c', f' -- where (c', f') is the *center* of the
    /// top left pixel.  The stored transform uses the pixel corner
    /// convention, so the origin is shifted back by half a pixel.
    pub fn from_world_file_coeffs(coeffs: &[f64; 6]) -> Result<Self> {
        let [a, d, b, e, cx, cy] = *coeffs;

        Self::new(
            a,
            b,
            cx - a / 2.0 - b / 2.0,
            d,
            e,
            cy - d / 2.0 - e / 2.0,
        )
    }

    pub fn to_gdal(&self) -> [f64; 6] {
        [self.c, self.a, self.b, self.f, self.d, self.e]
    }

    /// Forward map (col, row) -> (x, y)
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    pub fn pixel_width(&self) -> f64 {
        self.a.abs()
    }

    /// Note the e coefficient is negative for north-up rasters
    pub fn pixel_height(&self) -> f64 {
        self.e.abs()
    }
}
