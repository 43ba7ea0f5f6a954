//! One-file reprojection utility, mostly used to convert Web Mercator
//! analysis outputs back to WGS84 for web-mapping consumption

use std::path::PathBuf;

use clap::Args;
use log::info;

use travelshed_core::io;
use travelshed_core::prelude::*;

#[derive(Args)]
pub struct ReprojectArgs {
    /// Input GeoJSON file
    #[arg(long, short)]
    pub input: PathBuf,

    /// Output GeoJSON file
    #[arg(long, short)]
    pub output: PathBuf,

    /// Target reference frame
    #[arg(long, default_value = "EPSG:4326")]
    pub to: Crs,

    /// Source frame override (default: the file's `crs` member, else EPSG:4326)
    #[arg(long)]
    pub from: Option<Crs>,
}

pub fn run(args: &ReprojectArgs) -> Result<(), Error> {
    io::reproject_file(&args.input, &args.output, args.from, args.to)?;
    info!(
        "Reprojected {} to {} as {}",
        args.input.display(),
        args.to,
        args.output.display()
    );
    Ok(())
}
