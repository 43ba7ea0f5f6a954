//! Fixed-radius point buffers
//!
//! Buffers are circular dilations approximated by a closed regular ring.
//! The radius is in the units of the point's frame, so buffering only
//! makes sense in a projected frame (meters).

use std::f64::consts::PI;

use geo::{LineString, Point, Polygon};

/// Default number of ring segments approximating the circle outline
pub const BUFFER_SEGMENTS: usize = 64;

/// Circular buffer polygon around a point
pub fn buffer_point(center: &Point<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let n = segments.max(4);
    let r = radius.abs();

    let mut ring = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        ring.push((center.x() + r * angle.cos(), center.y() + r * angle.sin()));
    }
    // Close the ring
    ring.push(ring[0]);

    Polygon::new(LineString::from(ring), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::METERS_PER_MILE;
    use geo::{Area, Contains};

    #[test]
    fn buffer_contains_its_own_center() {
        let center = Point::new(-9_180_000.0, 3_290_000.0);
        let buffer = buffer_point(&center, 0.5 * METERS_PER_MILE, BUFFER_SEGMENTS);
        assert!(buffer.contains(&center));
    }

    #[test]
    fn buffer_area_approximates_a_circle() {
        let buffer = buffer_point(&Point::new(0.0, 0.0), 1000.0, BUFFER_SEGMENTS);
        let expected = PI * 1000.0 * 1000.0;
        let error = (buffer.unsigned_area() - expected).abs() / expected;
        assert!(error < 0.01, "area error {:.3}%", error * 100.0);
    }

    #[test]
    fn ring_is_closed_with_the_requested_segment_count() {
        let buffer = buffer_point(&Point::new(5.0, 5.0), 10.0, 32);
        let ring = buffer.exterior();
        assert_eq!(ring.0.len(), 33);
        assert_eq!(ring.0.first(), ring.0.last());
    }

    #[test]
    fn tiny_segment_counts_are_clamped() {
        let buffer = buffer_point(&Point::new(0.0, 0.0), 10.0, 1);
        assert_eq!(buffer.exterior().0.len(), 5);
    }
}
