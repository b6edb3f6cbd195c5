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
use ndarray::{s, Array2, ArrayView2};

/// Reduces the band to a grid of block means.
///
/// The band is cropped to the largest sub array whose dimensions are exact
/// multiples of block_size, so trailing rows/columns that do not fill a
/// whole block are dropped, never padded.  Nodata pixels are expected to
/// already be NaN; they are excluded from each mean and a block with no
/// valid pixel at all yields NaN.
pub fn aggregate_blocks(band: ArrayView2<f64>, block_size: usize) -> Result<Array2<f64>> {
    if block_size == 0 {
        return Err(RasterVecError::Configuration(
            "block size must be a positive integer".to_string(),
        ));
    }

    let (num_rows, num_cols) = band.dim();

    if num_rows == 0 || num_cols == 0 {
        return Err(RasterVecError::Configuration(format!(
            "band is empty: {} rows x {} cols",
            num_rows, num_cols
        )));
    }

    let out_rows = num_rows / block_size;
    let out_cols = num_cols / block_size;

    let mut means = Array2::from_elem((out_rows, out_cols), f64::NAN);

    for block_row in 0..out_rows {
        for block_col in 0..out_cols {
            let tile = band.slice(s![
                block_row * block_size..(block_row + 1) * block_size,
                block_col * block_size..(block_col + 1) * block_size
            ]);

            let mut sum = 0.0;
            let mut count = 0u64;

            for &v in tile.iter() {
                if !v.is_nan() {
                    sum += v;
                    count += 1;
                }
            }

            if count > 0 {
                means[[block_row, block_col]] = sum / count as f64;
            }
        }
    }

    Ok(means)
}
