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
use std::path::PathBuf;
use thiserror::Error;

/// Every failure is fatal to the load/preview call that produced it;
/// there are no retries and no partially populated feature tables.
#[derive(Error, Debug)]
pub enum RasterVecError {
    #[error("file not found: {path:?}")]
    MissingFile { path: PathBuf },

    #[error("unsupported raster format: {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed reading raster {path:?}: {source}")]
    RasterRead {
        path: PathBuf,
        #[source]
        source: gdal::errors::GdalError,
    },

    #[error("no world file found for {path:?} (looked for .pgw, .wld and <ext>w)")]
    MissingWorldFile { path: PathBuf },

    #[error("malformed world file {path:?}: {detail}")]
    MalformedWorldFile { path: PathBuf, detail: String },

    #[error("projection error: {0}")]
    Projection(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

pub type Result<T> = std::result::Result<T, RasterVecError>;
