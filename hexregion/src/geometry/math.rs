use std::f64::consts::PI;

/// Authalic earth radius used by every distance and area conversion.
pub const EARTH_RADIUS_KM: f64 = 6371.007180918475;

pub const TWO_PI: f64 = 2.0 * PI;

#[inline]
pub fn degs_to_rads(d: f64) -> f64 { d * PI / 180.0 }

#[inline]
pub fn rads_to_degs(r: f64) -> f64 { r * 180.0 / PI }

/// Great-circle central angle between two (lat, lng) pairs, haversine form.
pub fn haversine_rads(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let sin_lat = ((lat2 - lat1) * 0.5).sin();
    let sin_lng = ((lng2 - lng1) * 0.5).sin();
    let a = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Wrap a longitude into [-PI, PI].
#[inline]
pub fn constrain_lng(mut lng: f64) -> f64 {
    while lng > PI { lng -= TWO_PI; }
    while lng < -PI { lng += TWO_PI; }
    lng
}

/// Shoelace area of a planar ring (signed, CCW positive).
pub fn ring_area(pts: &[(f64, f64)]) -> f64 {
    let n = pts.len();
    if n < 3 { return 0.0; }
    let mut a = 0.0;
    for i in 0..n {
        let (x1, y1) = pts[i];
        let (x2, y2) = pts[(i + 1) % n];
        a += x1 * y2 - x2 * y1;
    }
    0.5 * a
}
