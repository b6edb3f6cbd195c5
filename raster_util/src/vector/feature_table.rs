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
use crate::raster::{aggregate_blocks, RasterGrid};
use crate::vector::{block_area, block_centroid, block_corners, ProjectToWgs84};
use itertools::Itertools;
use log::{debug, info};

/// One aggregated block.  Corner polygon is in the source CRS, the
/// latitude/longitude pair is the centroid reprojected to WGS84 as a
/// convenience -- the geometry itself intentionally keeps the source
/// reference system.
#[derive(Clone, Debug)]
pub struct BlockRecord {
    pub pixel_id: usize,
    pub row: usize,
    pub col: usize,
    pub area: Option<f64>,
    pub value: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    /// Upper left, upper right, lower right, lower left, source CRS
    pub corners: [(f64, f64); 4],
}

impl BlockRecord {
    /// Closed polygon ring as WKT
    pub fn wkt_polygon(&self) -> String {
        let ring = self
            .corners
            .iter()
            .chain(std::iter::once(&self.corners[0]))
            .map(|(x, y)| format!("{} {}", x, y))
            .join(",");

        format!("POLYGON(({}))", ring)
    }
}

pub const FEATURE_COLUMNS: &[(&str, &str)] = &[
    ("pixel_id", "Integer64"),
    ("row", "Integer64"),
    ("col", "Integer64"),
    ("area", "Real"),
    ("value", "Real"),
    ("latitude", "Real"),
    ("longitude", "Real"),
    ("geometry", "Polygon"),
];

/// The pipeline output: ordered block records plus the CRS the
/// geometry is expressed in (the source raster CRS, not WGS84).
#[derive(Debug)]
pub struct AggregatedFeatureSet {
    pub records: Vec<BlockRecord>,
    pub crs_wkt: String,
    pub num_block_rows: usize,
    pub num_block_cols: usize,
}

impl AggregatedFeatureSet {
    pub fn schema() -> &'static [(&'static str, &'static str)] {
        FEATURE_COLUMNS
    }
}

/// Runs the full aggregation pipeline on a loaded grid: block means,
/// corner geometry, centroid projection to WGS84, area.
///
/// Records come out in row major (row, col) order with pixel_id
/// 0..N-1 matching that order.  A failed projection aborts the whole
/// call; there is no partially projected table.
pub fn build_feature_table(
    grid: &RasterGrid,
    block_size: usize,
    projector: &dyn ProjectToWgs84,
) -> Result<AggregatedFeatureSet> {
    let means = aggregate_blocks(grid.band.view(), block_size)?;
    let (num_block_rows, num_block_cols) = means.dim();

    info!(
        "Aggregated {}x{} band into {}x{} blocks of {}",
        grid.metadata.height, grid.metadata.width, num_block_rows, num_block_cols, block_size
    );

    let transform = &grid.metadata.transform;
    let num_blocks = num_block_rows * num_block_cols;

    let mut lons = Vec::with_capacity(num_blocks);
    let mut lats = Vec::with_capacity(num_blocks);

    for row in 0..num_block_rows {
        for col in 0..num_block_cols {
            let (x, y) = block_centroid(transform, row, col, block_size);
            lons.push(x);
            lats.push(y);
        }
    }

    if num_blocks > 0 {
        projector.project(&mut lons, &mut lats)?;
    }

    // uniform across the set: defined iff the CRS is projected
    let area = block_area(transform, block_size, grid.crs.is_projected);

    let mut records = Vec::with_capacity(num_blocks);

    for row in 0..num_block_rows {
        for col in 0..num_block_cols {
            let pixel_id = row * num_block_cols + col;
            let mean = means[[row, col]];

            records.push(BlockRecord {
                pixel_id,
                row,
                col,
                area,
                value: if mean.is_nan() { None } else { Some(mean) },
                latitude: lats[pixel_id],
                longitude: lons[pixel_id],
                corners: block_corners(transform, row, col, block_size),
            });
        }
    }

    debug!("Built {} block records", records.len());

    Ok(AggregatedFeatureSet {
        records,
        crs_wkt: grid.crs.wkt.clone(),
        num_block_rows,
        num_block_cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{AffineTransform, Bounds, CrsInfo, RasterGrid, RasterMetadata};
    use float_cmp::assert_approx_eq;
    use ndarray::Array2;

    /// Stand in for the PROJ pipeline: shifts coordinates by a fixed
    /// offset so tests can tell projected from unprojected values.
    struct OffsetProjector {
        dx: f64,
        dy: f64,
    }

    impl ProjectToWgs84 for OffsetProjector {
        fn project(&self, xs: &mut [f64], ys: &mut [f64]) -> Result<()> {
            for x in xs.iter_mut() {
                *x += self.dx;
            }
            for y in ys.iter_mut() {
                *y += self.dy;
            }
            Ok(())
        }
    }

    struct FailingProjector;

    impl ProjectToWgs84 for FailingProjector {
        fn project(&self, _xs: &mut [f64], _ys: &mut [f64]) -> Result<()> {
            Err(crate::RasterVecError::Projection("broken pipeline".to_string()))
        }
    }

    fn test_grid(num_rows: usize, num_cols: usize, is_projected: bool) -> RasterGrid {
        let transform = AffineTransform::new(10.0, 0.0, 1000.0, 0.0, -10.0, 2000.0).unwrap();

        RasterGrid {
            band: Array2::from_shape_fn((num_rows, num_cols), |(r, c)| {
                (r * num_cols + c) as f64
            }),
            metadata: RasterMetadata {
                width: num_cols,
                height: num_rows,
                band_count: 1,
                dtype: "Float64".to_string(),
                crs_wkt: "TEST".to_string(),
                transform,
                bounds: Bounds::from_transform(&transform, num_cols, num_rows),
                nodata: None,
            },
            crs: CrsInfo {
                wkt: "TEST".to_string(),
                is_projected,
            },
        }
    }

    #[test]
    fn test_row_major_pixel_ids() {
        let grid = test_grid(10, 10, true);
        let table =
            build_feature_table(&grid, 5, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();

        assert_eq!(table.num_block_rows, 2);
        assert_eq!(table.num_block_cols, 2);
        assert_eq!(table.records.len(), 4);

        for (i, record) in table.records.iter().enumerate() {
            assert_eq!(record.pixel_id, i);
            assert_eq!(record.row, i / 2);
            assert_eq!(record.col, i % 2);
        }
    }

    #[test]
    fn test_trailing_blocks_dropped() {
        let grid = test_grid(8, 8, true);
        let table =
            build_feature_table(&grid, 3, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();

        assert_eq!(table.num_block_rows, 2);
        assert_eq!(table.num_block_cols, 2);
        assert_eq!(table.records.len(), 4);
    }

    #[test]
    fn test_projector_applied_to_centroids_only() {
        let grid = test_grid(4, 4, true);
        let table =
            build_feature_table(&grid, 2, &OffsetProjector { dx: 100.0, dy: -50.0 }).unwrap();

        let record = &table.records[0];

        // centroid of block (0, 0): pixel (1, 1) -> (1010, 1990), shifted
        assert_approx_eq!(f64, record.longitude, 1110.0);
        assert_approx_eq!(f64, record.latitude, 1940.0);

        // the polygon stays in the source CRS, unshifted
        assert_eq!(record.corners[0], (1000.0, 2000.0));
        assert_eq!(record.corners[2], (1020.0, 1980.0));
    }

    #[test]
    fn test_all_nodata_block_keeps_geometry_and_area() {
        let mut grid = test_grid(4, 4, true);
        grid.band.slice_mut(ndarray::s![0..2, 0..2]).fill(f64::NAN);

        let table =
            build_feature_table(&grid, 2, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();

        let nodata_block = &table.records[0];
        assert!(nodata_block.value.is_none());
        assert!(nodata_block.area.is_some());
        assert_approx_eq!(f64, nodata_block.area.unwrap(), 400.0);
        assert_eq!(nodata_block.corners[0], (1000.0, 2000.0));

        assert!(table.records[1].value.is_some());
    }

    #[test]
    fn test_area_undefined_for_geographic_crs() {
        let grid = test_grid(4, 4, false);
        let table =
            build_feature_table(&grid, 2, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();

        assert!(table.records.iter().all(|r| r.area.is_none()));
    }

    #[test]
    fn test_area_defined_for_every_projected_block() {
        let grid = test_grid(6, 6, true);
        let table =
            build_feature_table(&grid, 2, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();

        assert!(table
            .records
            .iter()
            .all(|r| r.area.map(|a| a > 0.0).unwrap_or(false)));
    }

    #[test]
    fn test_projection_failure_is_fatal() {
        let grid = test_grid(4, 4, true);
        let err = build_feature_table(&grid, 2, &FailingProjector).unwrap_err();
        assert!(matches!(err, crate::RasterVecError::Projection(_)));
    }

    #[test]
    fn test_output_crs_is_source_crs() {
        let grid = test_grid(4, 4, true);
        let table =
            build_feature_table(&grid, 2, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();
        assert_eq!(table.crs_wkt, "TEST");
    }

    #[test]
    fn test_wkt_polygon_is_closed() {
        let grid = test_grid(2, 2, true);
        let table =
            build_feature_table(&grid, 2, &OffsetProjector { dx: 0.0, dy: 0.0 }).unwrap();

        let wkt = table.records[0].wkt_polygon();
        assert_eq!(
            wkt,
            "POLYGON((1000 2000,1020 2000,1020 1980,1000 1980,1000 2000))"
        );
    }

    #[test]
    fn test_schema_order() {
        let names: Vec<&str> = AggregatedFeatureSet::schema().iter().map(|c| c.0).collect();
        assert_eq!(
            names,
            vec!["pixel_id", "row", "col", "area", "value", "latitude", "longitude", "geometry"]
        );
    }
}
