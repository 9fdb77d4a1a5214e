use h3o::{CoordIJ, LatLng, LocalIJ, Resolution};

use super::{GridProvider, ProviderResult, MAX_EDGES_PER_CELL};
use crate::error::ProviderError;
use crate::model::{AreaUnit, CellIndex, DirectedEdgeIndex, GeoCoord, GridIj, LengthUnit};

/// Default provider backed by the pure-Rust `h3o` implementation of H3.
#[derive(Debug, Default, Clone, Copy)]
pub struct H3oProvider;

impl H3oProvider {
    pub const fn new() -> Self {
        H3oProvider
    }
}

fn cell_in(cell: CellIndex) -> ProviderResult<h3o::CellIndex> {
    h3o::CellIndex::try_from(cell.raw())
        .map_err(|e| ProviderError::InvalidArgument(format!("cell {}: {}", cell, e)))
}

fn cell_out(cell: h3o::CellIndex) -> ProviderResult<CellIndex> {
    CellIndex::from_raw(u64::from(cell))
        .ok_or_else(|| ProviderError::Failed("backend produced the zero index".into()))
}

fn edge_in(edge: DirectedEdgeIndex) -> ProviderResult<h3o::DirectedEdgeIndex> {
    h3o::DirectedEdgeIndex::try_from(edge.raw())
        .map_err(|e| ProviderError::InvalidArgument(format!("edge {}: {}", edge, e)))
}

fn edge_out(edge: h3o::DirectedEdgeIndex) -> ProviderResult<DirectedEdgeIndex> {
    DirectedEdgeIndex::from_raw(u64::from(edge))
        .ok_or_else(|| ProviderError::Failed("backend produced the zero edge".into()))
}

fn res_in(res: u8) -> ProviderResult<Resolution> {
    Resolution::try_from(res)
        .map_err(|e| ProviderError::InvalidResolution(format!("{}: {}", res, e)))
}

fn coord_out(ll: LatLng) -> GeoCoord {
    GeoCoord::new(ll.lat_radians(), ll.lng_radians())
}

fn write_slot<T>(out: &mut [Option<T>], i: usize, value: T) -> ProviderResult<()> {
    match out.get_mut(i) {
        Some(slot) => {
            *slot = Some(value);
            Ok(())
        }
        None => Err(ProviderError::Size(format!(
            "output buffer of {} slots is too small",
            out.len()
        ))),
    }
}

impl GridProvider for H3oProvider {
    fn is_valid_cell(&self, cell: CellIndex) -> bool {
        h3o::CellIndex::try_from(cell.raw()).is_ok()
    }

    fn is_pentagon(&self, cell: CellIndex) -> ProviderResult<bool> {
        Ok(cell_in(cell)?.is_pentagon())
    }

    fn icosahedron_faces(&self, cell: CellIndex, out: &mut [Option<u8>]) -> ProviderResult<()> {
        let c = cell_in(cell)?;
        for (i, face) in c.icosahedron_faces().iter().enumerate() {
            write_slot(out, i, u8::from(face))?;
        }
        Ok(())
    }

    fn latlng_to_cell(&self, coord: GeoCoord, res: u8) -> ProviderResult<CellIndex> {
        let r = res_in(res)?;
        let ll = LatLng::from_radians(coord.lat, coord.lng)
            .map_err(|e| ProviderError::InvalidArgument(e.to_string()))?;
        cell_out(ll.to_cell(r))
    }

    fn cell_to_latlng(&self, cell: CellIndex) -> ProviderResult<GeoCoord> {
        Ok(coord_out(LatLng::from(cell_in(cell)?)))
    }

    fn cell_to_boundary(&self, cell: CellIndex) -> ProviderResult<Vec<GeoCoord>> {
        let c = cell_in(cell)?;
        Ok(c.boundary().iter().map(|ll| coord_out(*ll)).collect())
    }

    fn parent(&self, cell: CellIndex, res: u8) -> ProviderResult<CellIndex> {
        let c = cell_in(cell)?;
        let p = c.parent(res_in(res)?).ok_or_else(|| {
            ProviderError::InvalidResolution(format!(
                "no parent of {} at finer resolution {}",
                cell, res
            ))
        })?;
        cell_out(p)
    }

    fn center_child(&self, cell: CellIndex, res: u8) -> ProviderResult<CellIndex> {
        let c = cell_in(cell)?;
        let child = c.center_child(res_in(res)?).ok_or_else(|| {
            ProviderError::InvalidResolution(format!(
                "no child of {} at coarser resolution {}",
                cell, res
            ))
        })?;
        cell_out(child)
    }

    fn children_size(&self, cell: CellIndex, res: u8) -> ProviderResult<u64> {
        let c = cell_in(cell)?;
        let r = res_in(res)?;
        if res < u8::from(c.resolution()) {
            return Err(ProviderError::InvalidResolution(format!(
                "children of {} requested at coarser resolution {}",
                cell, res
            )));
        }
        Ok(c.children_count(r))
    }

    fn children(
        &self,
        cell: CellIndex,
        res: u8,
        out: &mut [Option<CellIndex>],
    ) -> ProviderResult<()> {
        let c = cell_in(cell)?;
        let r = res_in(res)?;
        for (i, child) in c.children(r).enumerate() {
            write_slot(out, i, cell_out(child)?)?;
        }
        Ok(())
    }

    fn are_neighbors(&self, a: CellIndex, b: CellIndex) -> ProviderResult<bool> {
        cell_in(a)?
            .is_neighbor_with(cell_in(b)?)
            .map_err(|e| ProviderError::InvalidArgument(e.to_string()))
    }

    fn grid_disk_distances_unsafe(
        &self,
        origin: CellIndex,
        k: u32,
        out: &mut [Option<CellIndex>],
        distances: &mut [u32],
    ) -> ProviderResult<()> {
        let c = cell_in(origin)?;
        for (i, item) in c.grid_disk_distances_fast(k).enumerate() {
            let (cell, d) = item.ok_or_else(|| {
                ProviderError::Pentagon(format!("disk of radius {} around {}", k, origin))
            })?;
            write_slot(out, i, cell_out(cell)?)?;
            if let Some(slot) = distances.get_mut(i) {
                *slot = d;
            }
        }
        Ok(())
    }

    fn grid_ring_unsafe(
        &self,
        origin: CellIndex,
        k: u32,
        out: &mut [Option<CellIndex>],
    ) -> ProviderResult<()> {
        let c = cell_in(origin)?;
        for (i, item) in c.grid_ring_fast(k).enumerate() {
            let cell = item.ok_or_else(|| {
                ProviderError::Pentagon(format!("ring of radius {} around {}", k, origin))
            })?;
            write_slot(out, i, cell_out(cell)?)?;
        }
        Ok(())
    }

    fn grid_distance(&self, a: CellIndex, b: CellIndex) -> ProviderResult<i64> {
        cell_in(a)?
            .grid_distance(cell_in(b)?)
            .map(i64::from)
            .map_err(|e| ProviderError::Failed(e.to_string()))
    }

    fn grid_path_size(&self, a: CellIndex, b: CellIndex) -> ProviderResult<usize> {
        let n = cell_in(a)?
            .grid_path_cells_size(cell_in(b)?)
            .map_err(|e| ProviderError::Failed(e.to_string()))?;
        usize::try_from(n).map_err(|_| ProviderError::Size(format!("negative path size {}", n)))
    }

    fn grid_path(
        &self,
        a: CellIndex,
        b: CellIndex,
        out: &mut [Option<CellIndex>],
    ) -> ProviderResult<()> {
        let cells = cell_in(a)?
            .grid_path_cells(cell_in(b)?)
            .map_err(|e| ProviderError::Failed(e.to_string()))?;
        for (i, item) in cells.enumerate() {
            let cell = item.map_err(|e| ProviderError::Failed(e.to_string()))?;
            write_slot(out, i, cell_out(cell)?)?;
        }
        Ok(())
    }

    fn cell_to_local_ij(&self, origin: CellIndex, cell: CellIndex) -> ProviderResult<GridIj> {
        let ij = cell_in(cell)?
            .to_local_ij(cell_in(origin)?)
            .map_err(|e| ProviderError::Failed(e.to_string()))?;
        Ok(GridIj::new(ij.coord.i, ij.coord.j))
    }

    fn local_ij_to_cell(&self, origin: CellIndex, ij: GridIj) -> ProviderResult<CellIndex> {
        let local = LocalIJ::new(cell_in(origin)?, CoordIJ::new(ij.i, ij.j));
        let c = h3o::CellIndex::try_from(local).map_err(|e| ProviderError::Failed(e.to_string()))?;
        cell_out(c)
    }

    fn is_valid_directed_edge(&self, edge: DirectedEdgeIndex) -> bool {
        h3o::DirectedEdgeIndex::try_from(edge.raw()).is_ok()
    }

    fn cells_to_directed_edge(
        &self,
        origin: CellIndex,
        destination: CellIndex,
    ) -> ProviderResult<DirectedEdgeIndex> {
        let e = cell_in(origin)?.edge(cell_in(destination)?).ok_or_else(|| {
            ProviderError::InvalidArgument(format!("{} and {} are not neighbors", origin, destination))
        })?;
        edge_out(e)
    }

    fn origin_to_directed_edges(
        &self,
        cell: CellIndex,
        out: &mut [Option<DirectedEdgeIndex>; MAX_EDGES_PER_CELL],
    ) -> ProviderResult<()> {
        for (i, e) in cell_in(cell)?.edges().enumerate() {
            write_slot(out, i, edge_out(e)?)?;
        }
        Ok(())
    }

    fn directed_edge_origin(&self, edge: DirectedEdgeIndex) -> ProviderResult<CellIndex> {
        cell_out(edge_in(edge)?.origin())
    }

    fn directed_edge_destination(&self, edge: DirectedEdgeIndex) -> ProviderResult<CellIndex> {
        cell_out(edge_in(edge)?.destination())
    }

    fn directed_edge_boundary(&self, edge: DirectedEdgeIndex) -> ProviderResult<Vec<GeoCoord>> {
        Ok(edge_in(edge)?
            .boundary()
            .iter()
            .map(|ll| coord_out(*ll))
            .collect())
    }

    fn hexagon_area_avg(&self, res: u8, unit: AreaUnit) -> ProviderResult<f64> {
        let r = res_in(res)?;
        match unit {
            AreaUnit::Km2 => Ok(r.area_km2()),
            AreaUnit::M2 => Ok(r.area_m2()),
            AreaUnit::Rads2 => Err(ProviderError::InvalidArgument(
                "average area has no radian form".into(),
            )),
        }
    }

    fn hexagon_edge_length_avg(&self, res: u8, unit: LengthUnit) -> ProviderResult<f64> {
        let r = res_in(res)?;
        match unit {
            LengthUnit::Km => Ok(r.edge_length_km()),
            LengthUnit::M => Ok(r.edge_length_m()),
            LengthUnit::Rads => Err(ProviderError::InvalidArgument(
                "average edge length has no radian form".into(),
            )),
        }
    }

    fn cell_area(&self, cell: CellIndex, unit: AreaUnit) -> ProviderResult<f64> {
        let c = cell_in(cell)?;
        Ok(match unit {
            AreaUnit::Km2 => c.area_km2(),
            AreaUnit::M2 => c.area_m2(),
            AreaUnit::Rads2 => c.area_rads2(),
        })
    }

    fn edge_length(&self, edge: DirectedEdgeIndex, unit: LengthUnit) -> ProviderResult<f64> {
        let e = edge_in(edge)?;
        Ok(match unit {
            LengthUnit::Km => e.length_km(),
            LengthUnit::M => e.length_m(),
            LengthUnit::Rads => e.length_rads(),
        })
    }

    fn num_cells(&self, res: u8) -> ProviderResult<u64> {
        Ok(res_in(res)?.cell_count())
    }

    fn res0_cells(&self, out: &mut [Option<CellIndex>]) -> ProviderResult<()> {
        for (i, c) in h3o::CellIndex::base_cells().enumerate() {
            write_slot(out, i, cell_out(c)?)?;
        }
        Ok(())
    }

    fn pentagons(&self, res: u8, out: &mut [Option<CellIndex>]) -> ProviderResult<()> {
        for (i, c) in res_in(res)?.pentagons().enumerate() {
            write_slot(out, i, cell_out(c)?)?;
        }
        Ok(())
    }
}
