use crate::error::{self, respond};
use crate::interop;
use crate::Grid;
use hexregion::{AreaUnit, GeoPoint, GridConfig, GridError, GridIj, LengthUnit};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
impl Grid {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Grid {
        crate::Grid::rs_new()
    }

    /// `{ validate_resolution?, validate_index? }`. A malformed object throws
    /// the `argument` error envelope.
    pub fn from_config(config: JsValue) -> Result<Grid, JsValue> {
        match serde_wasm_bindgen::from_value::<GridConfig>(config) {
            Ok(cfg) => Ok(crate::Grid::rs_with_config(cfg)),
            Err(e) => {
                let e = GridError::Argument(format!("config: {}", e));
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                Err(error::grid(&e))
            }
        }
    }

    // Index model
    pub fn is_valid_cell(&self, cell: &str) -> bool {
        self.cell_arg(cell).map_or(false, |c| self.inner.is_valid_cell(c))
    }
    pub fn resolution(&self, cell: &str) -> JsValue {
        respond(self.cell_arg(cell).map(|c| self.inner.resolution(c)))
    }
    pub fn base_cell(&self, cell: &str) -> JsValue {
        respond(self.cell_arg(cell).map(|c| self.inner.base_cell(c)))
    }
    pub fn is_pentagon(&self, cell: &str) -> JsValue {
        respond(self.cell_arg(cell).map(|c| self.inner.is_pentagon(c)))
    }
    pub fn icosahedron_faces(&self, cell: &str) -> JsValue {
        respond(self.cell_arg(cell).and_then(|c| self.inner.icosahedron_faces(c)))
    }
    pub fn latlng_to_cell(&self, lat: f64, lon: f64, res: u8) -> JsValue {
        respond(self.inner.latlng_to_cell(GeoPoint::new(lat, lon), res))
    }
    /// `[lat, lon]` in degrees.
    pub fn cell_to_latlng(&self, cell: &str) -> JsValue {
        match self.cell_arg(cell).and_then(|c| self.inner.cell_to_latlng(c)) {
            Ok(p) => error::ok(interop::arr_f64(&[p.lat, p.lon]).into()),
            Err(e) => error::grid(&e),
        }
    }
    pub fn cell_to_boundary(&self, cell: &str) -> JsValue {
        let r = self.cell_arg(cell).and_then(|c| self.inner.cell_to_boundary(c));
        respond(r.map(|b| b.vertices.iter().map(|p| [p.lat, p.lon]).collect::<Vec<_>>()))
    }

    // Hierarchy
    pub fn parent(&self, cell: &str, res: u8) -> JsValue {
        respond(self.cell_arg(cell).and_then(|c| self.inner.parent(c, res)))
    }
    pub fn center_child(&self, cell: &str, res: u8) -> JsValue {
        respond(self.cell_arg(cell).and_then(|c| self.inner.center_child(c, res)))
    }
    pub fn children(&self, cell: &str, res: u8) -> JsValue {
        respond(self.cell_arg(cell).and_then(|c| self.inner.children(c, res)))
    }
    pub fn compact(&self, cells: JsValue) -> JsValue {
        respond(interop::cells_from_js(cells).and_then(|s| self.inner.compact(&s)))
    }
    pub fn uncompact(&self, cells: JsValue, res: u8) -> JsValue {
        respond(interop::cells_from_js(cells).and_then(|s| self.inner.uncompact(&s, res)))
    }

    // Regions
    pub fn polygon_to_cells(&self, polygon: JsValue, res: u8) -> JsValue {
        respond(interop::polygon_from_js(polygon).and_then(|p| self.inner.polygon_to_cells(&p, res)))
    }
    /// GeoJSON `MultiPolygon` geometry with closed `[lon, lat]` rings.
    pub fn cells_to_multi_polygon(&self, cells: JsValue) -> JsValue {
        respond(
            interop::cells_from_js(cells)
                .and_then(|s| self.inner.cells_to_multi_polygon(&s))
                .and_then(|mp| mp.to_geojson_value()),
        )
    }

    // Traversal
    pub fn grid_disk(&self, origin: &str, k: u32) -> JsValue {
        respond(self.cell_arg(origin).and_then(|c| self.inner.grid_disk(c, k)))
    }
    pub fn grid_disk_distances(&self, origin: &str, k: u32) -> JsValue {
        respond(self.cell_arg(origin).and_then(|c| self.inner.grid_disk_distances(c, k)))
    }
    pub fn grid_disk_unsafe(&self, origin: &str, k: u32) -> JsValue {
        respond(self.cell_arg(origin).and_then(|c| self.inner.grid_disk_unsafe(c, k)))
    }
    pub fn grid_ring_unsafe(&self, origin: &str, k: u32) -> JsValue {
        respond(self.cell_arg(origin).and_then(|c| self.inner.grid_ring_unsafe(c, k)))
    }
    pub fn grid_distance(&self, a: &str, b: &str) -> JsValue {
        let r = self
            .cell_arg(a)
            .and_then(|a| self.cell_arg(b).and_then(|b| self.inner.grid_distance(a, b)));
        respond(r)
    }
    pub fn grid_path(&self, a: &str, b: &str) -> JsValue {
        let r = self
            .cell_arg(a)
            .and_then(|a| self.cell_arg(b).and_then(|b| self.inner.grid_path(a, b)));
        respond(r)
    }
    pub fn are_neighbor_cells(&self, a: &str, b: &str) -> JsValue {
        let r = self
            .cell_arg(a)
            .and_then(|a| self.cell_arg(b).and_then(|b| self.inner.are_neighbor_cells(a, b)));
        respond(r)
    }

    // Local IJ
    pub fn cell_to_local_ij(&self, origin: &str, cell: &str, mode: u32) -> JsValue {
        let r = self.cell_arg(origin).and_then(|o| {
            self.cell_arg(cell)
                .and_then(|c| self.inner.cell_to_local_ij(o, c, mode))
        });
        respond(r)
    }
    pub fn local_ij_to_cell(&self, origin: &str, i: i32, j: i32, mode: u32) -> JsValue {
        respond(
            self.cell_arg(origin)
                .and_then(|o| self.inner.local_ij_to_cell(o, GridIj::new(i, j), mode)),
        )
    }

    // Directed edges
    pub fn cells_to_directed_edge(&self, origin: &str, destination: &str) -> JsValue {
        let r = self.cell_arg(origin).and_then(|o| {
            self.cell_arg(destination)
                .and_then(|d| self.inner.cells_to_directed_edge(o, d))
        });
        respond(r.map(|e| e.to_string()))
    }
    pub fn directed_edge_to_cells(&self, edge: &str) -> JsValue {
        let r = self
            .inner
            .parse_directed_edge(edge)
            .and_then(|e| self.inner.directed_edge_to_cells(e));
        respond(r.map(|(o, d)| [o, d]))
    }
    pub fn origin_to_directed_edges(&self, cell: &str) -> JsValue {
        let r = self
            .cell_arg(cell)
            .and_then(|c| self.inner.origin_to_directed_edges(c));
        respond(r.map(|v| v.iter().map(|e| e.to_string()).collect::<Vec<_>>()))
    }
    pub fn edge_length(&self, edge: &str, unit: i32) -> JsValue {
        let r = LengthUnit::try_from(unit as i64).and_then(|u| {
            self.inner
                .parse_directed_edge(edge)
                .and_then(|e| self.inner.edge_length(e, u))
        });
        respond(r)
    }

    // Measures
    pub fn hexagon_area_avg(&self, res: u8, unit: i32) -> JsValue {
        respond(AreaUnit::try_from(unit as i64).and_then(|u| self.inner.hexagon_area_avg(res, u)))
    }
    pub fn hexagon_edge_length_avg(&self, res: u8, unit: i32) -> JsValue {
        respond(
            LengthUnit::try_from(unit as i64)
                .and_then(|u| self.inner.hexagon_edge_length_avg(res, u)),
        )
    }
    pub fn cell_area(&self, cell: &str, unit: i32) -> JsValue {
        let r = AreaUnit::try_from(unit as i64)
            .and_then(|u| self.cell_arg(cell).and_then(|c| self.inner.cell_area(c, u)));
        respond(r)
    }
    pub fn great_circle_distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: i32) -> JsValue {
        let r = LengthUnit::try_from(unit as i64).and_then(|u| {
            self.inner
                .great_circle_distance(GeoPoint::new(lat1, lon1), GeoPoint::new(lat2, lon2), u)
        });
        respond(r)
    }
    /// Exact as a JS number for every resolution (max is below 2^53).
    pub fn num_cells(&self, res: u8) -> JsValue {
        respond(self.inner.num_cells(res).map(|n| n as f64))
    }
    pub fn res0_cells(&self) -> JsValue {
        respond(self.inner.res0_cells())
    }
    pub fn pentagons(&self, res: u8) -> JsValue {
        respond(self.inner.pentagons(res))
    }
}
