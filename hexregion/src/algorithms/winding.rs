//! Point-in-loop testing on the sphere.
//!
//! Ray casting along a parallel, with loops crossing the antimeridian
//! unwrapped by shifting negative longitudes a full turn east.

use crate::geometry::bbox::BBox;
use crate::geometry::math::TWO_PI;
use crate::model::GeoCoord;

#[inline]
fn normalize_lng(lng: f64, transmeridian: bool) -> f64 {
    if transmeridian && lng < 0.0 {
        lng + TWO_PI
    } else {
        lng
    }
}

/// Crossing-number test of `p` against the closed loop `verts`, with the
/// loop's box precomputed. Points on a vertex latitude or longitude are
/// nudged by one ulp-scale step so shared cell centers are never counted
/// twice.
pub fn point_in_loop(p: GeoCoord, verts: &[GeoCoord], bbox: &BBox) -> bool {
    if verts.len() < 3 || !bbox.contains(p) {
        return false;
    }
    let transmeridian = bbox.is_transmeridian();
    let mut inside = false;
    let mut lat = p.lat;
    let mut lng = normalize_lng(p.lng, transmeridian);
    let n = verts.len();
    for i in 0..n {
        let mut a = verts[i];
        let mut b = verts[(i + 1) % n];
        if a.lat > b.lat {
            std::mem::swap(&mut a, &mut b);
        }
        if lat == a.lat || lat == b.lat {
            lat += f64::EPSILON;
        }
        if lat < a.lat || lat > b.lat {
            continue;
        }
        let a_lng = normalize_lng(a.lng, transmeridian);
        let b_lng = normalize_lng(b.lng, transmeridian);
        if a_lng == lng || b_lng == lng {
            lng -= f64::EPSILON;
        }
        let ratio = (lat - a.lat) / (b.lat - a.lat);
        let test_lng = normalize_lng(a_lng + (b_lng - a_lng) * ratio, transmeridian);
        if test_lng > lng {
            inside = !inside;
        }
    }
    inside
}

/// A loop in radians with its bounding box.
#[derive(Clone, Debug)]
pub struct GeoLoop {
    pub verts: Vec<GeoCoord>,
    pub bbox: BBox,
}

impl GeoLoop {
    pub fn new(verts: Vec<GeoCoord>) -> Self {
        let bbox = BBox::from_loop(&verts);
        GeoLoop { verts, bbox }
    }

    #[inline]
    pub fn contains(&self, p: GeoCoord) -> bool {
        point_in_loop(p, &self.verts, &self.bbox)
    }
}

/// Inside the outer loop and outside every hole.
pub fn point_in_polygon(p: GeoCoord, outer: &GeoLoop, holes: &[GeoLoop]) -> bool {
    outer.contains(p) && !holes.iter().any(|h| h.contains(p))
}
