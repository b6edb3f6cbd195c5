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
use crate::error::Result;
use crate::util::get_temp_filename;
use gdal::raster::Buffer;
use gdal::DriverManager;
use std::fs::create_dir_all;
use std::path::PathBuf;

/// Writes a single band float64 GeoTIFF under a unique temp path
pub fn create_test_raster(
    file_name: &str,
    width: usize,
    height: usize,
    geo_transform: [f64; 6],
    projection_wkt: &str,
    nodata: Option<f64>,
    data: &[f64],
) -> Result<PathBuf> {
    assert_eq!(data.len(), width * height);

    let path = get_temp_filename(file_name);
    create_dir_all(path.parent().unwrap())?;

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<f64, _>(&path, width, height, 1)?;

    dataset.set_geo_transform(&geo_transform)?;
    dataset.set_projection(projection_wkt)?;

    let mut band = dataset.rasterband(1)?;

    if let Some(nd) = nodata {
        band.set_no_data_value(Some(nd))?;
    }

    let mut buffer = Buffer::new((width, height), data.to_vec());
    band.write((0, 0), (width, height), &mut buffer)?;

    Ok(path)
}

/// Writes a plain byte BMP with no georeferencing, for the
/// image + world file loader variant
pub fn create_test_bmp(file_name: &str, width: usize, height: usize, data: &[u8]) -> Result<PathBuf> {
    assert_eq!(data.len(), width * height);

    let path = get_temp_filename(file_name);
    create_dir_all(path.parent().unwrap())?;

    let driver = DriverManager::get_driver_by_name("BMP")?;
    let mut dataset = driver.create_with_band_type::<u8, _>(&path, width, height, 1)?;

    let mut band = dataset.rasterband(1)?;

    let mut buffer = Buffer::new((width, height), data.to_vec());
    band.write((0, 0), (width, height), &mut buffer)?;

    Ok(path)
}
