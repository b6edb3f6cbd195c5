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
use crate::raster::{
    find_world_file, is_nodata_value, read_world_file, AffineTransform, Bounds, CrsInfo,
    RasterGrid, RasterMetadata,
};
use gdal::spatial_ref::SpatialRef;
use gdal::Dataset;
use log::{debug, info};
use ndarray::Array2;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// CRS assumed for image + world file inputs that carry no embedded
/// spatial reference
pub const DEFAULT_CRS_EPSG: u32 = 4326;

/// Raster variant, decided once from the file extension at
/// construction time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterFormat {
    /// Raster with embedded georeferencing (GeoTIFF, JPEG2000)
    Geocoded,
    /// Plain image georeferenced by a sidecar world file
    ImageWorld,
}

impl RasterFormat {
    pub fn from_extension(path: &Path) -> Result<RasterFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "tif" | "tiff" | "jp2" | "vrt" => Ok(RasterFormat::Geocoded),
            "png" | "jpg" | "jpeg" | "bmp" => Ok(RasterFormat::ImageWorld),
            _ => Err(RasterVecError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn loader_name(&self) -> &'static str {
        match self {
            RasterFormat::Geocoded => "GeocodedRasterLoader",
            RasterFormat::ImageWorld => "ImageWorldFileLoader",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PreviewRecord {
    pub loader: String,
    pub file: String,
    pub shape: (usize, usize, usize),
    pub dtype: String,
    pub crs: String,
}

#[derive(Debug)]
pub enum Preview {
    Ascii(String),
    Json(PreviewRecord),
}

#[derive(Debug)]
pub struct RasterLoader {
    path: PathBuf,
    format: RasterFormat,
}

impl RasterLoader {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Result<RasterLoader> {
        let path = path.into();
        let format = RasterFormat::from_extension(&path)?;

        Ok(RasterLoader { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> RasterFormat {
        self.format
    }

    /// Reads band 1 eagerly, replacing nodata with NaN.  The GDAL
    /// dataset handle lives only for the duration of this call.
    pub fn open(&self) -> Result<RasterGrid> {
        if !self.path.exists() {
            return Err(RasterVecError::MissingFile {
                path: self.path.clone(),
            });
        }

        let transform_override = match self.format {
            RasterFormat::Geocoded => None,
            RasterFormat::ImageWorld => {
                let world_file = find_world_file(&self.path)?;
                debug!("Using world file {:?} for {:?}", world_file, self.path);
                Some(read_world_file(&world_file)?)
            }
        };

        info!("Opening raster {:?}", self.path);
        let dataset = self.open_dataset()?;

        self.read_grid(&dataset, transform_override)
    }

    /// Metadata preview without reading the band.  format is validated
    /// before any I/O happens.
    pub fn preview(&self, format: &str) -> Result<Preview> {
        if format != "ascii" && format != "json" {
            return Err(RasterVecError::Configuration(format!(
                "invalid preview format {:?}, expected \"ascii\" or \"json\"",
                format
            )));
        }

        if !self.path.exists() {
            return Err(RasterVecError::MissingFile {
                path: self.path.clone(),
            });
        }

        let dataset = self.open_dataset()?;
        let band = self.raster_band(&dataset)?;

        let shape = (dataset.raster_count(), band.y_size(), band.x_size());
        let dtype = format!("{}", band.band_type());
        let crs = crs_label(&dataset.projection());

        if format == "json" {
            return Ok(Preview::Json(PreviewRecord {
                loader: self.format.loader_name().to_string(),
                file: self.path.display().to_string(),
                shape,
                dtype,
                crs,
            }));
        }

        Ok(Preview::Ascii(format!(
            "Loader: {}\nFile: {}\nShape: ({}, {}, {})\nDtype: {}\nCRS: {}",
            self.format.loader_name(),
            self.path.display(),
            shape.0,
            shape.1,
            shape.2,
            dtype,
            crs,
        )))
    }

    fn open_dataset(&self) -> Result<Dataset> {
        Dataset::open(&self.path).map_err(|e| RasterVecError::RasterRead {
            path: self.path.clone(),
            source: e,
        })
    }

    fn raster_band<'a>(&self, dataset: &'a Dataset) -> Result<gdal::raster::RasterBand<'a>> {
        dataset.rasterband(1).map_err(|e| RasterVecError::RasterRead {
            path: self.path.clone(),
            source: e,
        })
    }

    fn read_grid(
        &self,
        dataset: &Dataset,
        transform_override: Option<AffineTransform>,
    ) -> Result<RasterGrid> {
        let band = self.raster_band(dataset)?;

        let width = band.x_size();
        let height = band.y_size();

        if width == 0 || height == 0 {
            return Err(RasterVecError::Configuration(format!(
                "raster {:?} has empty dimensions {}x{}",
                self.path, height, width
            )));
        }

        let transform = match transform_override {
            Some(t) => t,
            None => {
                let gt = dataset
                    .geo_transform()
                    .map_err(|e| RasterVecError::RasterRead {
                        path: self.path.clone(),
                        source: e,
                    })?;
                AffineTransform::from_gdal(&gt)?
            }
        };

        let crs = self.resolve_crs(dataset)?;
        let nodata = band.no_data_value();

        let metadata = RasterMetadata {
            width,
            height,
            band_count: dataset.raster_count(),
            dtype: format!("{}", band.band_type()),
            crs_wkt: crs.wkt.clone(),
            transform,
            bounds: Bounds::from_transform(&transform, width, height),
            nodata,
        };

        let buffer = band
            .read_as::<f64>((0, 0), (width, height), (width, height), None)
            .map_err(|e| RasterVecError::RasterRead {
                path: self.path.clone(),
                source: e,
            })?;

        let data: Vec<f64> = buffer.into_iter().collect();
        let mut band_arr = Array2::from_shape_vec((height, width), data)?;

        if let Some(nd) = nodata {
            band_arr.mapv_inplace(|v| if is_nodata_value(v, nd) { f64::NAN } else { v });
        }

        debug!(
            "Read {}x{} band, nodata {:?}, crs projected: {}",
            height, width, nodata, crs.is_projected
        );

        Ok(RasterGrid {
            band: band_arr,
            metadata,
            crs,
        })
    }

    fn resolve_crs(&self, dataset: &Dataset) -> Result<CrsInfo> {
        let mut wkt = dataset.projection();

        if wkt.trim().is_empty() && self.format == RasterFormat::ImageWorld {
            // UrbanMapper style default for bare images
            wkt = SpatialRef::from_epsg(DEFAULT_CRS_EPSG)?.to_wkt()?;
        }

        let is_projected = if wkt.trim().is_empty() {
            false
        } else {
            SpatialRef::from_wkt(&wkt)
                .map(|sr| sr.is_projected())
                .unwrap_or(false)
        };

        Ok(CrsInfo { wkt, is_projected })
    }
}

/// Compact CRS description for previews: authority code when known,
/// otherwise the raw WKT
fn crs_label(wkt: &str) -> String {
    if wkt.trim().is_empty() {
        return "undefined".to_string();
    }

    if let Ok(sr) = SpatialRef::from_wkt(wkt) {
        if let (Ok(name), Ok(code)) = (sr.auth_name(), sr.auth_code()) {
            return format!("{}:{}", name, code);
        }
    }

    wkt.to_string()
}
