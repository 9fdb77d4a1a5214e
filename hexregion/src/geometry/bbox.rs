//! Geographic bounding boxes with antimeridian handling.

use super::math::{constrain_lng, TWO_PI};
use crate::model::GeoCoord;

/// Bounding box in radians. When `east < west` the box crosses the
/// antimeridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BBox {
    /// Box of a closed loop. A loop with an edge spanning more than half the
    /// globe in longitude is taken to cross the antimeridian, and the box
    /// then runs from the smallest positive to the largest negative longitude.
    pub fn from_loop(verts: &[GeoCoord]) -> Self {
        if verts.is_empty() {
            return BBox { north: 0.0, south: 0.0, east: 0.0, west: 0.0 };
        }
        let mut b = BBox {
            north: f64::MIN,
            south: f64::MAX,
            east: f64::MIN,
            west: f64::MAX,
        };
        let mut min_pos_lng = f64::MAX;
        let mut max_neg_lng = f64::MIN;
        let mut transmeridian = false;
        let n = verts.len();
        for i in 0..n {
            let c = verts[i];
            let next = verts[(i + 1) % n];
            b.south = b.south.min(c.lat);
            b.north = b.north.max(c.lat);
            b.west = b.west.min(c.lng);
            b.east = b.east.max(c.lng);
            if c.lng > 0.0 && c.lng < min_pos_lng {
                min_pos_lng = c.lng;
            }
            if c.lng < 0.0 && c.lng > max_neg_lng {
                max_neg_lng = c.lng;
            }
            if (c.lng - next.lng).abs() > std::f64::consts::PI {
                transmeridian = true;
            }
        }
        if transmeridian {
            b.west = min_pos_lng;
            b.east = max_neg_lng;
        }
        b
    }

    #[inline]
    pub fn is_transmeridian(&self) -> bool {
        self.east < self.west
    }

    pub fn center(&self) -> GeoCoord {
        let east = if self.is_transmeridian() { self.east + TWO_PI } else { self.east };
        GeoCoord::new(
            (self.north + self.south) / 2.0,
            constrain_lng((east + self.west) / 2.0),
        )
    }

    pub fn contains(&self, p: GeoCoord) -> bool {
        let lng_in = if self.is_transmeridian() {
            p.lng >= self.west || p.lng <= self.east
        } else {
            p.lng >= self.west && p.lng <= self.east
        };
        p.lat >= self.south && p.lat <= self.north && lng_in
    }

    /// Corner used to estimate the box radius: the east corner on the edge
    /// nearest the equator, where the box is widest on the ground.
    pub fn widest_corner(&self) -> GeoCoord {
        let lat = if self.north.abs() > self.south.abs() { self.south } else { self.north };
        GeoCoord::new(lat, self.east)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(lat: f64, lng: f64) -> GeoCoord {
        GeoCoord::new(lat.to_radians(), lng.to_radians())
    }

    #[test]
    fn plain_box() {
        let sq = [deg(0.0, 0.0), deg(0.0, 10.0), deg(10.0, 10.0), deg(10.0, 0.0)];
        let b = BBox::from_loop(&sq);
        assert!(!b.is_transmeridian());
        assert!(b.contains(deg(5.0, 5.0)));
        assert!(!b.contains(deg(5.0, 11.0)));
        let c = b.center();
        assert!((c.lat - 5f64.to_radians()).abs() < 1e-12);
        assert!((c.lng - 5f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn antimeridian_box() {
        let sq = [deg(0.0, 170.0), deg(0.0, -170.0), deg(10.0, -170.0), deg(10.0, 170.0)];
        let b = BBox::from_loop(&sq);
        assert!(b.is_transmeridian());
        assert!(b.contains(deg(5.0, 179.0)));
        assert!(b.contains(deg(5.0, -179.0)));
        assert!(!b.contains(deg(5.0, 0.0)));
        assert!((b.center().lng.abs() - std::f64::consts::PI).abs() < 1e-9);
    }
}
