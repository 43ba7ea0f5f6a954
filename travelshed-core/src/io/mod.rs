//! GeoJSON layer reading and writing
//!
//! Layers track their reference frame in memory. Files default to
//! EPSG:4326; a legacy `crs` foreign member is honored on read and written
//! back out for projected layers, since intermediate Web Mercator outputs
//! round-trip through GeoJSON in this pipeline.

use std::fs;
use std::path::Path;

use geo::{Geometry, LineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};
use itertools::Itertools;
use serde_json::json;

use crate::Error;
use crate::crs::{self, Crs};

/// One point feature: geometry plus its attribute map
#[derive(Debug, Clone)]
pub struct PointFeature {
    pub geometry: Point<f64>,
    pub properties: JsonObject,
}

impl PointFeature {
    /// Fetches a string attribute, failing with the list of attributes
    /// actually present on the feature
    pub fn require_str(&self, name: &str) -> Result<&str, Error> {
        self.properties
            .get(name)
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::MissingAttribute {
                name: name.to_string(),
                available: self.properties.keys().join(", "),
            })
    }
}

/// A loaded layer of point features with a tracked reference frame
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub features: Vec<PointFeature>,
    pub crs: Crs,
}

impl PointLayer {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Copy of the layer with every geometry reprojected
    pub fn to_crs(&self, target: Crs) -> Self {
        if self.crs == target {
            return self.clone();
        }
        let features = self
            .features
            .iter()
            .map(|feature| PointFeature {
                geometry: crs::reproject_point(feature.geometry, self.crs, target),
                properties: feature.properties.clone(),
            })
            .collect();
        Self {
            features,
            crs: target,
        }
    }
}

/// One road feature: a line chain plus its attribute map
#[derive(Debug, Clone)]
pub struct LineFeature {
    pub geometry: LineString<f64>,
    pub properties: JsonObject,
}

/// A loaded layer of line features with a tracked reference frame
#[derive(Debug, Clone)]
pub struct LineLayer {
    pub features: Vec<LineFeature>,
    pub crs: Crs,
}

/// Reads a GeoJSON file of point features
///
/// # Errors
///
/// Fails on unreadable/unparsable files and on non-point geometries.
pub fn read_point_layer(path: &Path) -> Result<PointLayer, Error> {
    parse_point_layer(&fs::read_to_string(path)?)
}

/// Reads a GeoJSON file of line features; `MultiLineString` geometries are
/// flattened into one feature per part, sharing the source attributes
pub fn read_line_layer(path: &Path) -> Result<LineLayer, Error> {
    parse_line_layer(&fs::read_to_string(path)?)
}

fn parse_point_layer(raw: &str) -> Result<PointLayer, Error> {
    let (collection, crs) = parse_collection(raw)?;
    let mut features = Vec::with_capacity(collection.features.len());
    for (idx, feature) in collection.features.into_iter().enumerate() {
        let properties = feature.properties.clone().unwrap_or_default();
        match feature_geometry(idx, feature)? {
            Geometry::Point(point) => features.push(PointFeature {
                geometry: point,
                properties,
            }),
            other => {
                return Err(Error::InvalidData(format!(
                    "feature {idx}: expected Point geometry, got {}",
                    geometry_kind(&other)
                )));
            }
        }
    }
    Ok(PointLayer { features, crs })
}

fn parse_line_layer(raw: &str) -> Result<LineLayer, Error> {
    let (collection, crs) = parse_collection(raw)?;
    let mut features = Vec::with_capacity(collection.features.len());
    for (idx, feature) in collection.features.into_iter().enumerate() {
        let properties = feature.properties.clone().unwrap_or_default();
        match feature_geometry(idx, feature)? {
            Geometry::LineString(line) => features.push(LineFeature {
                geometry: line,
                properties,
            }),
            Geometry::MultiLineString(lines) => {
                features.extend(lines.0.into_iter().map(|line| LineFeature {
                    geometry: line,
                    properties: properties.clone(),
                }));
            }
            other => {
                return Err(Error::InvalidData(format!(
                    "feature {idx}: expected LineString geometry, got {}",
                    geometry_kind(&other)
                )));
            }
        }
    }
    Ok(LineLayer { features, crs })
}

fn parse_collection(raw: &str) -> Result<(FeatureCollection, Crs), Error> {
    let geojson: GeoJson = raw
        .parse()
        .map_err(|e: geojson::Error| Error::GeoJsonError(e.to_string()))?;
    let collection =
        FeatureCollection::try_from(geojson).map_err(|e| Error::GeoJsonError(e.to_string()))?;
    let crs = collection_crs(&collection)?;
    Ok((collection, crs))
}

/// Frame declared by the legacy `crs` member, defaulting to WGS84
fn collection_crs(collection: &FeatureCollection) -> Result<Crs, Error> {
    let Some(name) = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
        .and_then(|member| member.get("properties"))
        .and_then(|properties| properties.get("name"))
        .and_then(JsonValue::as_str)
    else {
        return Ok(Crs::Wgs84);
    };
    name.parse()
}

fn feature_geometry(idx: usize, feature: Feature) -> Result<Geometry<f64>, Error> {
    let geometry = feature
        .geometry
        .ok_or_else(|| Error::GeoJsonError(format!("feature {idx} has no geometry")))?;
    Geometry::try_from(geometry).map_err(|e| Error::GeoJsonError(format!("feature {idx}: {e}")))
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Assembles an output feature from a geometry and its attribute map
pub fn feature(geometry: &Geometry<f64>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Writes a feature collection, attaching the legacy `crs` member for
/// anything not in WGS84
pub fn write_collection(path: &Path, features: Vec<Feature>, crs: Crs) -> Result<(), Error> {
    let foreign_members = (crs != Crs::Wgs84).then(|| {
        let mut members = JsonObject::new();
        members.insert(
            "crs".to_string(),
            json!({ "type": "name", "properties": { "name": crs.urn() } }),
        );
        members
    });
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    };
    let contents =
        serde_json::to_string(&collection).map_err(|e| Error::GeoJsonError(e.to_string()))?;
    fs::write(path, contents)?;
    Ok(())
}

/// Reprojects every feature of a GeoJSON file, preserving attributes
///
/// The source frame is the explicit override if given, else the file's
/// `crs` member, else WGS84.
pub fn reproject_file(
    input: &Path,
    output: &Path,
    from: Option<Crs>,
    to: Crs,
) -> Result<(), Error> {
    let (collection, file_crs) = parse_collection(&fs::read_to_string(input)?)?;
    let source = from.unwrap_or(file_crs);

    let mut features = Vec::with_capacity(collection.features.len());
    for (idx, mut feature) in collection.features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .take()
            .ok_or_else(|| Error::GeoJsonError(format!("feature {idx} has no geometry")))?;
        let geometry = Geometry::try_from(geometry)
            .map_err(|e| Error::GeoJsonError(format!("feature {idx}: {e}")))?;
        let reprojected = crs::reproject_geometry(&geometry, source, to);
        feature.geometry = Some(geojson::Geometry::new(geojson::Value::from(&reprojected)));
        features.push(feature);
    }
    write_collection(output, features, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHOOLS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-82.5, 28.3]},
                "properties": {"name": "Central Elementary", "grade": "K-5"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-82.6, 28.4]},
                "properties": {"name": "North Middle", "grade": "6-8"}
            }
        ]
    }"#;

    #[test]
    fn reads_points_with_default_crs() {
        let layer = parse_point_layer(SCHOOLS).unwrap();
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.crs, Crs::Wgs84);
        assert_eq!(layer.features[0].require_str("name").unwrap(), "Central Elementary");
    }

    #[test]
    fn missing_attribute_lists_available_keys() {
        let layer = parse_point_layer(SCHOOLS).unwrap();
        let err = layer.features[0].require_str("school_id").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("school_id"));
        assert!(message.contains("grade"));
        assert!(message.contains("name"));
    }

    #[test]
    fn honors_legacy_crs_member() {
        let raw = r#"{
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}},
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-9180000.0, 3290000.0]},
                    "properties": {}
                }
            ]
        }"#;
        let layer = parse_point_layer(raw).unwrap();
        assert_eq!(layer.crs, Crs::WebMercator);
    }

    #[test]
    fn rejects_lines_in_a_point_layer() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
                    "properties": {}
                }
            ]
        }"#;
        let err = parse_point_layer(raw).unwrap_err();
        assert!(err.to_string().contains("LineString"));
    }

    #[test]
    fn flattens_multilinestrings() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [
                            [[0.0, 0.0], [1.0, 0.0]],
                            [[1.0, 0.0], [1.0, 1.0]]
                        ]
                    },
                    "properties": {"oneway": "yes"}
                }
            ]
        }"#;
        let layer = parse_line_layer(raw).unwrap();
        assert_eq!(layer.features.len(), 2);
        assert_eq!(
            layer.features[1].properties.get("oneway"),
            Some(&JsonValue::from("yes"))
        );
    }

    #[test]
    fn reprojected_layer_keeps_properties() {
        let layer = parse_point_layer(SCHOOLS).unwrap();
        let projected = layer.to_crs(Crs::WebMercator);
        assert_eq!(projected.crs, Crs::WebMercator);
        assert_eq!(projected.features[1].require_str("name").unwrap(), "North Middle");
        // Web Mercator x for -82.5 degrees is far outside the degree range
        assert!(projected.features[0].geometry.x() < -9_000_000.0);
    }
}
