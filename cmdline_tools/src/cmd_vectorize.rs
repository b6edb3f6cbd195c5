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
use anyhow::{bail, Result};
use gdal::spatial_ref::SpatialRef;
use gdal::vector::{FieldValue, Geometry, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType};
use gdal::DriverManager;
use log::info;
use std::fs::{remove_file, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use structopt::StructOpt;

use raster_util::util::{format_duration, quote_csv_string};
use raster_util::vector::{build_feature_table, AggregatedFeatureSet, GdalProjector};
use raster_util::raster::RasterLoader;

#[derive(StructOpt)]
pub struct VectorizeArgs {
    #[structopt(parse(from_os_str), long, help = "Input raster (geocoded or image + world file)")]
    pub input: PathBuf,

    #[structopt(long, help = "Pixels per block side, must be >= 1")]
    pub block_size: i64,

    #[structopt(parse(from_os_str), long, help = "Path to CSV results")]
    pub out_csv: PathBuf,

    #[structopt(parse(from_os_str), long, help = "Optional FlatGeobuf output of block polygons")]
    pub out_fgb: Option<PathBuf>,

    #[structopt(long)]
    pub clean: bool,
}

pub fn vectorize_raster(args: &VectorizeArgs) -> Result<()> {
    // reject before touching the raster
    if args.block_size <= 0 {
        bail!("block size must be a positive integer, got {}", args.block_size);
    }
    let block_size = args.block_size as usize;

    if args.clean && args.out_csv.exists() {
        remove_file(&args.out_csv)?;
    }

    if args.out_csv.exists() {
        println!("{:?} already exists, nothing to do", &args.out_csv);
        return Ok(());
    }

    let now = Instant::now();

    let loader = RasterLoader::from_path(&args.input)?;
    let grid = loader.open()?;

    let projector = GdalProjector::from_wkt(&grid.crs.wkt)?;
    let table = build_feature_table(&grid, block_size, &projector)?;

    info!(
        "Writing {} block records to {:?}",
        table.records.len(),
        args.out_csv
    );

    write_csv(&table, &args.out_csv)?;

    if let Some(out_fgb) = &args.out_fgb {
        if args.clean && out_fgb.exists() {
            remove_file(out_fgb)?;
        }
        write_fgb(&table, out_fgb)?;
    }

    println!(
        "Vectorized {:?}: {} blocks ({}x{}) in {}",
        args.input,
        table.records.len(),
        table.num_block_rows,
        table.num_block_cols,
        format_duration(now.elapsed())
    );

    Ok(())
}

fn write_csv(table: &AggregatedFeatureSet, path: &Path) -> Result<()> {
    let f = File::create(path)?;
    let mut f = BufWriter::new(f);

    writeln!(f, "pixel_id,row,col,area,value,latitude,longitude,geometry")?;

    for r in &table.records {
        writeln!(
            f,
            "{},{},{},{},{},{},{},{}",
            r.pixel_id,
            r.row,
            r.col,
            r.area.map(|a| a.to_string()).unwrap_or_default(),
            r.value.map(|v| v.to_string()).unwrap_or_default(),
            r.latitude,
            r.longitude,
            quote_csv_string(&r.wkt_polygon())
        )?;
    }

    Ok(())
}

/// Block polygons with attributes, declared in the source raster CRS
fn write_fgb(table: &AggregatedFeatureSet, path: &Path) -> Result<()> {
    let driver = DriverManager::get_driver_by_name("FlatGeobuf")?;
    let mut ds = driver.create_vector_only(path)?;

    let srs = if table.crs_wkt.trim().is_empty() {
        None
    } else {
        Some(SpatialRef::from_wkt(&table.crs_wkt)?)
    };

    let layer_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("blocks")
        .to_string();

    let mut layer = ds.create_layer(LayerOptions {
        name: &layer_name,
        srs: srs.as_ref(),
        ty: OGRwkbGeometryType::wkbPolygon,
        ..Default::default()
    })?;

    layer.create_defn_fields(&[
        ("pixel_id", OGRFieldType::OFTInteger64),
        ("row", OGRFieldType::OFTInteger64),
        ("col", OGRFieldType::OFTInteger64),
        ("area", OGRFieldType::OFTReal),
        ("value", OGRFieldType::OFTReal),
        ("latitude", OGRFieldType::OFTReal),
        ("longitude", OGRFieldType::OFTReal),
    ])?;

    let field_names = ["pixel_id", "row", "col", "area", "value", "latitude", "longitude"];

    for r in &table.records {
        let mut ring = Geometry::empty(OGRwkbGeometryType::wkbLinearRing)?;

        for (i, (x, y)) in r
            .corners
            .iter()
            .chain(std::iter::once(&r.corners[0]))
            .enumerate()
        {
            ring.set_point_2d(i, (*x, *y));
        }

        let mut polygon = Geometry::empty(OGRwkbGeometryType::wkbPolygon)?;
        polygon.add_geometry(ring)?;

        let field_values = [
            FieldValue::Integer64Value(r.pixel_id as i64),
            FieldValue::Integer64Value(r.row as i64),
            FieldValue::Integer64Value(r.col as i64),
            FieldValue::RealValue(r.area.unwrap_or(f64::NAN)),
            FieldValue::RealValue(r.value.unwrap_or(f64::NAN)),
            FieldValue::RealValue(r.latitude),
            FieldValue::RealValue(r.longitude),
        ];

        layer.create_feature_fields(polygon, &field_names, &field_values)?;
    }

    info!("Wrote {} polygons to {:?}", table.records.len(), path);

    Ok(())
}
