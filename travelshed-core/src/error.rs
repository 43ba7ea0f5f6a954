use thiserror::Error;

use crate::crs::Crs;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no points available for nearest-neighbor lookup")]
    NoPointsFound,
    #[error("attribute `{name}` not found; available attributes: {available}")]
    MissingAttribute { name: String, available: String },
    #[error("no isochrone polygon at any requested threshold from node {node}")]
    EmptyReachability { node: usize },
    #[error("unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),
    #[error("coordinate reference system mismatch: {left} vs {right}")]
    CrsMismatch { left: Crs, right: Crs },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}
