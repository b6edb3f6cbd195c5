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
use crate::raster::AffineTransform;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// Sidecar candidates for image X.ext, in lookup order:
/// X.pgw, X.wld, X.extw
pub fn world_file_candidates(image_path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![
        image_path.with_extension("pgw"),
        image_path.with_extension("wld"),
    ];

    if let Some(ext) = image_path.extension().and_then(|e| e.to_str()) {
        candidates.push(image_path.with_extension(format!("{}w", ext)));
    }

    candidates
}

pub fn find_world_file(image_path: &Path) -> Result<PathBuf> {
    world_file_candidates(image_path)
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| RasterVecError::MissingWorldFile {
            path: image_path.to_path_buf(),
        })
}

/// Parses a world file: exactly six numeric lines, one per affine
/// coefficient, in the order a, d, b, e, c, f with the origin on the
/// top left pixel *center*.
pub fn read_world_file(path: &Path) -> Result<AffineTransform> {
    let content = read_to_string(path)?;

    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() != 6 {
        return Err(RasterVecError::MalformedWorldFile {
            path: path.to_path_buf(),
            detail: format!("expected 6 numeric lines, found {}", lines.len()),
        });
    }

    let mut coeffs = [0.0f64; 6];
    for (i, line) in lines.iter().enumerate() {
        coeffs[i] = line
            .parse()
            .map_err(|_| RasterVecError::MalformedWorldFile {
                path: path.to_path_buf(),
                detail: format!("line {} is not numeric: {:?}", i + 1, line),
            })?;
    }

    AffineTransform::from_world_file_coeffs(&coeffs)
}
