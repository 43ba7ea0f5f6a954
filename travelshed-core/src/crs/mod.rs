//! Coordinate reference frame handling
//!
//! Input layers arrive in geographic coordinates (EPSG:4326) and all
//! geometric work happens in spherical Web Mercator (EPSG:3857). The
//! transforms are the closed-form spherical Mercator formulas; no external
//! projection engine is involved.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

use geo::{Coord, Geometry, MapCoords, Point};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Equatorial radius of the WGS84 spheroid, meters
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude bound of the spherical Mercator domain, degrees
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Supported coordinate reference frames, identified by EPSG code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crs {
    /// Geographic WGS84 coordinates, degrees
    Wgs84,
    /// Spherical Web Mercator, meters
    WebMercator,
}

impl Crs {
    /// Resolves an EPSG code to a supported frame
    ///
    /// # Errors
    ///
    /// Returns an error for codes outside the supported set.
    pub fn from_epsg(code: u32) -> Result<Self, Error> {
        match code {
            4326 => Ok(Self::Wgs84),
            3857 | 900_913 => Ok(Self::WebMercator),
            other => Err(Error::UnsupportedCrs(format!(
                "EPSG:{other} (supported: EPSG:4326, EPSG:3857)"
            ))),
        }
    }

    pub fn epsg(self) -> u32 {
        match self {
            Self::Wgs84 => 4326,
            Self::WebMercator => 3857,
        }
    }

    /// True for frames expressed in degrees rather than meters
    pub fn is_geographic(self) -> bool {
        matches!(self, Self::Wgs84)
    }

    /// Legacy GeoJSON `crs` member name for this frame
    pub fn urn(self) -> String {
        format!("urn:ogc:def:crs:EPSG::{}", self.epsg())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl FromStr for Crs {
    type Err = Error;

    /// Accepts `EPSG:xxxx`, a bare code, or the legacy URN forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("urn:ogc:def:crs:OGC:1.3:CRS84") {
            return Ok(Self::Wgs84);
        }
        trimmed
            .rsplit(':')
            .next()
            .unwrap_or(trimmed)
            .parse::<u32>()
            .map_err(|_| Error::UnsupportedCrs(s.to_string()))
            .and_then(Self::from_epsg)
    }
}

fn mercator_forward(c: Coord<f64>) -> Coord<f64> {
    let lat = c.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    Coord {
        x: EARTH_RADIUS_M * c.x.to_radians(),
        y: EARTH_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln(),
    }
}

fn mercator_inverse(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS_M).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees(),
    }
}

/// Transforms a single coordinate between the supported frames
pub fn reproject_coord(c: Coord<f64>, from: Crs, to: Crs) -> Coord<f64> {
    if from == to {
        return c;
    }
    match (from, to) {
        (Crs::Wgs84, Crs::WebMercator) => mercator_forward(c),
        (Crs::WebMercator, Crs::Wgs84) => mercator_inverse(c),
        // Identical frames returned above
        _ => c,
    }
}

pub fn reproject_point(p: Point<f64>, from: Crs, to: Crs) -> Point<f64> {
    Point::from(reproject_coord(p.into(), from, to))
}

/// Reprojects any geometry by mapping every coordinate
pub fn reproject_geometry(geometry: &Geometry<f64>, from: Crs, to: Crs) -> Geometry<f64> {
    geometry.map_coords(|c| reproject_coord(c, from, to))
}
