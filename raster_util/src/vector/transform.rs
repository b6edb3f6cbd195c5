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
use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};

/// Batch projection of coordinates into WGS84 lon/lat, always x=lon,
/// y=lat regardless of the axis convention of either CRS.
///
/// The pipeline takes this as a parameter so the feature table logic
/// can be tested with fakes, without a PROJ database around.
pub trait ProjectToWgs84 {
    fn project(&self, xs: &mut [f64], ys: &mut [f64]) -> Result<()>;
}

/// GDAL/PROJ backed projector from a source CRS given as WKT
#[derive(Debug)]
pub struct GdalProjector {
    transform: CoordTransform,
}

impl GdalProjector {
    pub fn from_wkt(source_wkt: &str) -> Result<GdalProjector> {
        if source_wkt.trim().is_empty() {
            return Err(RasterVecError::Projection(
                "source CRS is undefined".to_string(),
            ));
        }

        let mut source = SpatialRef::from_wkt(source_wkt).map_err(|e| {
            RasterVecError::Projection(format!("cannot parse source CRS: {}", e))
        })?;
        let mut target = SpatialRef::from_epsg(4326).map_err(|e| {
            RasterVecError::Projection(format!("cannot build WGS84 reference: {}", e))
        })?;

        // Make sure X, Y order
        source.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
        target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

        let transform = CoordTransform::new(&source, &target).map_err(|e| {
            RasterVecError::Projection(format!("cannot build transform pipeline: {}", e))
        })?;

        Ok(GdalProjector { transform })
    }
}

impl ProjectToWgs84 for GdalProjector {
    fn project(&self, xs: &mut [f64], ys: &mut [f64]) -> Result<()> {
        let mut zs = vec![0.0; xs.len()];

        self.transform
            .transform_coords(xs, ys, &mut zs)
            .map_err(|e| RasterVecError::Projection(e.to_string()))
    }
}
