//! JSON boundary: strict parsing of untyped input and GeoJSON export.
//!
//! Anything that does not have the expected shape is an Argument error
//! raised before any grid work starts.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{GridError, Result};
use crate::geometry::limits::{MAX_HOLES, MAX_INPUT_CELLS, MAX_LOOP_VERTICES};
use crate::model::{CellBoundary, CellIndex, GeoPoint, MultiPolygon, Polygon};

fn arg(msg: impl Into<String>) -> GridError {
    GridError::Argument(msg.into())
}

/// Array of canonical hex strings or unsigned integers.
pub fn cells_from_value(v: &Value) -> Result<Vec<CellIndex>> {
    let arr = v
        .as_array()
        .ok_or_else(|| arg("cells: expected an array"))?;
    if arr.len() > MAX_INPUT_CELLS {
        return Err(arg(format!(
            "cells: {} elements (max {})",
            arr.len(),
            MAX_INPUT_CELLS
        )));
    }
    arr.iter()
        .enumerate()
        .map(|(i, e)| {
            let cell = match e {
                Value::String(s) => s.parse::<CellIndex>().ok(),
                Value::Number(n) => n.as_u64().and_then(CellIndex::from_raw),
                _ => None,
            };
            cell.ok_or_else(|| arg(format!("cells[{}]: expected a cell index, got {}", i, e)))
        })
        .collect()
}

pub fn cells_from_json(s: &str) -> Result<Vec<CellIndex>> {
    let v: Value = serde_json::from_str(s).map_err(|e| arg(format!("cells: {}", e)))?;
    cells_from_value(&v)
}

pub fn cells_to_value(cells: &[CellIndex]) -> Value {
    Value::Array(cells.iter().map(|c| Value::String(c.to_string())).collect())
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PolygonDe {
    outer: Vec<[f64; 2]>,
    #[serde(default)]
    holes: Vec<Vec<[f64; 2]>>,
}

fn ring_from_pairs(pairs: Vec<[f64; 2]>, what: &str) -> Result<CellBoundary> {
    if pairs.len() > MAX_LOOP_VERTICES {
        return Err(arg(format!("{}: too many vertices ({})", what, pairs.len())));
    }
    let mut verts = Vec::with_capacity(pairs.len());
    for [lat, lon] in pairs {
        let p = GeoPoint::new(lat, lon);
        if !p.is_in_range() {
            return Err(arg(format!("{}: vertex ({}, {}) out of range", what, lat, lon)));
        }
        verts.push(p);
    }
    Ok(CellBoundary::new(verts))
}

/// `{"outer": [[lat, lon], ...], "holes": [[[lat, lon], ...], ...]}` in degrees.
pub fn polygon_from_value(v: Value) -> Result<Polygon> {
    let de: PolygonDe = serde_json::from_value(v).map_err(|e| arg(format!("polygon: {}", e)))?;
    if de.holes.len() > MAX_HOLES {
        return Err(arg(format!("polygon: too many holes ({})", de.holes.len())));
    }
    let outer = ring_from_pairs(de.outer, "polygon.outer")?;
    let holes = de
        .holes
        .into_iter()
        .enumerate()
        .map(|(i, h)| ring_from_pairs(h, &format!("polygon.holes[{}]", i)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(outer, holes))
}

pub fn polygon_from_json(s: &str) -> Result<Polygon> {
    let v: Value = serde_json::from_str(s).map_err(|e| arg(format!("polygon: {}", e)))?;
    polygon_from_value(v)
}

fn closed_ring(b: &CellBoundary) -> Result<Vec<[f64; 2]>> {
    let first = b
        .vertices
        .first()
        .ok_or_else(|| GridError::OperationFailed("cannot export an empty ring".into()))?;
    let mut ring: Vec<[f64; 2]> = b.vertices.iter().map(|p| [p.lon, p.lat]).collect();
    ring.push([first.lon, first.lat]);
    Ok(ring)
}

impl Polygon {
    /// Outer ring then holes, each as closed `[lon, lat]` rings.
    pub fn to_geojson_rings(&self) -> Result<Vec<Vec<[f64; 2]>>> {
        let mut rings = Vec::with_capacity(1 + self.holes.len());
        rings.push(closed_ring(&self.outer)?);
        for h in &self.holes {
            rings.push(closed_ring(h)?);
        }
        Ok(rings)
    }
}

impl MultiPolygon {
    pub fn to_geojson_coordinates(&self) -> Result<Vec<Vec<Vec<[f64; 2]>>>> {
        self.polygons.iter().map(|p| p.to_geojson_rings()).collect()
    }

    /// A GeoJSON `MultiPolygon` geometry object.
    pub fn to_geojson_value(&self) -> Result<Value> {
        Ok(json!({
            "type": "MultiPolygon",
            "coordinates": self.to_geojson_coordinates()?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_accept_text_and_numbers() {
        let cells = cells_from_json(r#"["8928308280fffff", 617700169958293503]"#).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], cells[1]);
        assert_eq!(
            cells_to_value(&cells[..1]),
            json!(["8928308280fffff"])
        );
    }

    #[test]
    fn cells_reject_wrong_shapes() {
        for bad in [r#"{"a":1}"#, r#"[true]"#, r#"["nothex"]"#, r#"[0]"#, r#"[-3]"#, r#"[1.5]"#, "not json"] {
            assert!(
                matches!(cells_from_json(bad), Err(GridError::Argument(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn polygon_shape() {
        let p = polygon_from_json(
            r#"{"outer": [[0,0],[0,1],[1,1]], "holes": [[[0.2,0.5],[0.3,0.6],[0.4,0.5]]]}"#,
        )
        .unwrap();
        assert_eq!(p.outer.len(), 3);
        assert_eq!(p.outer.vertices[1], GeoPoint::new(0.0, 1.0));
        assert_eq!(p.holes.len(), 1);
        assert!(polygon_from_json(r#"{"outer": [[0,0]], "extra": 1}"#).is_err());
        assert!(polygon_from_json(r#"{"outer": [[0]]}"#).is_err());
        assert!(polygon_from_json(r#"{"holes": []}"#).is_err());
    }

    #[test]
    fn geojson_rings_are_closed_lon_lat() {
        let poly = Polygon::new(
            CellBoundary::new(vec![
                GeoPoint::new(1.0, 10.0),
                GeoPoint::new(2.0, 20.0),
                GeoPoint::new(3.0, 10.0),
            ]),
            vec![],
        );
        let rings = poly.to_geojson_rings().unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][0], [10.0, 1.0]);
        assert_eq!(rings[0].first(), rings[0].last());

        let mp = MultiPolygon { polygons: vec![poly] };
        let v = mp.to_geojson_value().unwrap();
        assert_eq!(v["type"], "MultiPolygon");
        assert_eq!(v["coordinates"][0][0][3], json!([10.0, 1.0]));

        let empty = MultiPolygon { polygons: vec![Polygon::default()] };
        assert!(matches!(empty.to_geojson_value(), Err(GridError::OperationFailed(_))));
    }
}
