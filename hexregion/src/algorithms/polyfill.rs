//! Polygon to cell set.
//!
//! Candidates are the disk around the cell at the polygon's bounding-box
//! center, with a radius large enough to cover the box; a candidate is kept
//! when its center lies inside the outer loop and outside every hole.

use tracing::debug;

use crate::algorithms::winding::{point_in_polygon, GeoLoop};
use crate::error::{GridError, Result};
use crate::geometry::bbox::BBox;
use crate::geometry::limits::{MAX_HOLES, MAX_LOOP_VERTICES};
use crate::geometry::math::{haversine_rads, EARTH_RADIUS_KM};
use crate::model::{CellBoundary, CellIndex, GeoCoord, Polygon};
use crate::provider::GridProvider;
use crate::{index_error, op_failed, Grid};

fn loop_coords(b: &CellBoundary, what: &str) -> Result<Vec<GeoCoord>> {
    if b.len() > MAX_LOOP_VERTICES {
        return Err(GridError::Argument(format!(
            "{} has {} vertices (max {})",
            what,
            b.len(),
            MAX_LOOP_VERTICES
        )));
    }
    b.vertices
        .iter()
        .map(|v| {
            if v.is_in_range() {
                Ok(v.to_coord())
            } else {
                Err(GridError::Argument(format!(
                    "{} has an out-of-range vertex ({}, {})",
                    what, v.lat, v.lon
                )))
            }
        })
        .collect()
}

fn distance_km(a: GeoCoord, b: GeoCoord) -> f64 {
    haversine_rads(a.lat, a.lng, b.lat, b.lng) * EARTH_RADIUS_KM
}

impl<P: GridProvider> Grid<P> {
    /// Upper bound on the number of cells `polygon_to_cells` can return.
    pub fn max_polygon_to_cells_size(&self, polygon: &Polygon, res: u8) -> Result<usize> {
        let (size, _, _) = self.fill_plan(polygon, res)?;
        Ok(size)
    }

    pub fn polygon_to_cells(&self, polygon: &Polygon, res: u8) -> Result<Vec<CellIndex>> {
        let (size, center, k) = self.fill_plan(polygon, res)?;
        let outer = GeoLoop::new(loop_coords(&polygon.outer, "outer loop")?);
        let holes = polygon
            .holes
            .iter()
            .map(|h| loop_coords(h, "hole").map(GeoLoop::new))
            .collect::<Result<Vec<_>>>()?;

        let mut out: Vec<Option<CellIndex>> = vec![None; size];
        let mut n = 0usize;
        for cell in self.grid_disk(center, k)? {
            let c = self.provider.cell_to_latlng(cell).map_err(index_error)?;
            if point_in_polygon(c, &outer, &holes) {
                let slot = out.get_mut(n).ok_or_else(|| {
                    GridError::OperationFailed("polygon fill exceeded its upper bound".into())
                })?;
                *slot = Some(cell);
                n += 1;
            }
        }
        debug!(res, bound = size, filled = n, "polygon fill");
        Ok(out.into_iter().flatten().collect())
    }

    /// Returns (upper bound, disk center cell, disk radius).
    fn fill_plan(&self, polygon: &Polygon, res: u8) -> Result<(usize, CellIndex, u32)> {
        self.check_res(res)?;
        if polygon.outer.is_empty() {
            return Err(GridError::Argument("outer loop has no vertices".into()));
        }
        if polygon.holes.len() > MAX_HOLES {
            return Err(GridError::Argument(format!(
                "{} holes (max {})",
                polygon.holes.len(),
                MAX_HOLES
            )));
        }
        let outer = loop_coords(&polygon.outer, "outer loop")?;
        for h in &polygon.holes {
            loop_coords(h, "hole")?;
        }
        let bbox = BBox::from_loop(&outer);
        let center = bbox.center();
        let center_cell = self.provider.latlng_to_cell(center, res).map_err(op_failed)?;
        let hex_center = self.provider.cell_to_latlng(center_cell).map_err(op_failed)?;
        let hex_boundary = self.provider.cell_to_boundary(center_cell).map_err(op_failed)?;
        let hex_radius_km = hex_boundary
            .first()
            .map(|v| distance_km(hex_center, *v))
            .ok_or_else(|| GridError::OperationFailed(format!("{} has no boundary", center_cell)))?;
        let bbox_radius_km = distance_km(center, bbox.widest_corner());
        // Rings of hexagons advance at least 1.5 radii each; one extra ring
        // absorbs the offset between the box center and its cell's center.
        let rings = (bbox_radius_km / (1.5 * hex_radius_km)).ceil();
        if !rings.is_finite() || rings > f64::from(u32::MAX - 1) {
            return Err(GridError::OperationFailed(format!(
                "polygon too large to fill at resolution {}",
                res
            )));
        }
        let k = rings as u32 + 1;
        let size = self.max_grid_disk_size(k)?;
        debug!(res, k, size, bbox_radius_km, hex_radius_km, "polygon fill bound");
        Ok((size, center_cell, k))
    }
}
