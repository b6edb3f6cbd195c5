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
use anyhow::Result;
use raster_util::raster::{Preview, RasterLoader};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct PreviewArgs {
    #[structopt(parse(from_os_str), long, help = "Raster to describe")]
    pub input: PathBuf,

    #[structopt(long, default_value = "ascii", help = "ascii or json")]
    pub format: String,
}

pub fn preview_raster(args: &PreviewArgs) -> Result<()> {
    let loader = RasterLoader::from_path(&args.input)?;

    match loader.preview(&args.format)? {
        Preview::Ascii(text) => println!("{}", text),
        Preview::Json(record) => println!("{}", serde_json::to_string_pretty(&record)?),
    }

    Ok(())
}
