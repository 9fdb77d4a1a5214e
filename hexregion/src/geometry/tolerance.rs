// Tolerances for spherical geometry in radians

pub const EPS_VERTEX: f64 = 1e-9;          // shared cell-vertex merge threshold (~6 mm)
pub const EPS_AREA: f64 = 1e-18;           // degenerate loop area (rad^2)

// Quantization grid for boundary vertex merging
pub const QUANT_SCALE: f64 = 1.0 / EPS_VERTEX;

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn quantize(v: f64) -> i64 { (v * QUANT_SCALE).round() as i64 }
