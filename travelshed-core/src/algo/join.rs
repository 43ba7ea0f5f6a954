//! Nearest-distance and containment spatial joins
//!
//! Both joins index the right-hand layer with an R-tree; containment
//! narrows candidates by envelope before the exact predicate.

use geo::{BoundingRect, Contains, Distance, Euclidean, Point, Polygon};
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

use crate::Error;
use crate::crs::Crs;
use crate::io::PointLayer;

type IndexedFacility = GeomWithData<[f64; 2], usize>;

fn facility_index(layer: &PointLayer) -> RTree<IndexedFacility> {
    let entries = layer
        .features
        .iter()
        .enumerate()
        .map(|(idx, feature)| {
            IndexedFacility::new([feature.geometry.x(), feature.geometry.y()], idx)
        })
        .collect::<Vec<_>>();
    RTree::bulk_load(entries)
}

/// Distance from every left-layer point to its nearest right-layer point,
/// in the shared frame's units
///
/// # Errors
///
/// Fails when the layers disagree on the reference frame or the right
/// layer is empty.
pub fn nearest_distance_join(left: &PointLayer, right: &PointLayer) -> Result<Vec<f64>, Error> {
    if left.crs != right.crs {
        return Err(Error::CrsMismatch {
            left: left.crs,
            right: right.crs,
        });
    }

    let index = facility_index(right);
    let mut distances = Vec::with_capacity(left.len());
    for feature in &left.features {
        let nearest = index
            .nearest_neighbor(&[feature.geometry.x(), feature.geometry.y()])
            .ok_or(Error::NoPointsFound)?;
        let [x, y] = *nearest.geom();
        distances.push(Euclidean.distance(feature.geometry, Point::new(x, y)));
    }
    Ok(distances)
}

/// Number of right-layer points contained in each polygon
///
/// # Errors
///
/// Fails when the polygons' frame differs from the facility layer's.
pub fn count_within(
    polygons: &[Polygon<f64>],
    crs: Crs,
    facilities: &PointLayer,
) -> Result<Vec<usize>, Error> {
    if facilities.crs != crs {
        return Err(Error::CrsMismatch {
            left: crs,
            right: facilities.crs,
        });
    }

    let index = facility_index(facilities);
    let counts = polygons
        .iter()
        .map(|polygon| {
            let Some(rect) = polygon.bounding_rect() else {
                return 0;
            };
            let envelope =
                AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
            index
                .locate_in_envelope(&envelope)
                .filter(|entry| {
                    let [x, y] = *entry.geom();
                    polygon.contains(&Point::new(x, y))
                })
                .count()
        })
        .collect();
    Ok(counts)
}
