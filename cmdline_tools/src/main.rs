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
use log::LevelFilter;
use simple_logger::SimpleLogger;
use structopt::StructOpt;

use crate::cmd_preview::{preview_raster, PreviewArgs};
use crate::cmd_vectorize::{vectorize_raster, VectorizeArgs};

mod cmd_preview;
mod cmd_vectorize;

#[derive(StructOpt)]
struct Cli {
    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    #[structopt(help = "Aggregates a raster into a vector feature table of block polygons")]
    Vectorize(VectorizeArgs),

    #[structopt(help = "Prints raster metadata as ascii or json")]
    Preview(PreviewArgs),
}

fn run() -> Result<()> {
    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init()?;

    match &args.cmd {
        Command::Vectorize(a) => {
            vectorize_raster(a)?;
        }
        Command::Preview(a) => {
            preview_raster(a)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
