//! Index construction, inspection and the parent/child hierarchy.

use crate::error::{GridError, Result};
use crate::geometry::limits::in_buffer_bounds;
use crate::model::{CellBoundary, CellIndex, GeoPoint};
use crate::provider::{GridProvider, MAX_FACE_COUNT, MAX_FACE_COUNT_PENTAGON};
use crate::{index_error, op_failed, Grid};

impl<P: GridProvider> Grid<P> {
    /// Wrap a raw value. Zero is never a cell; the structural check runs
    /// only when `validate_index` is on.
    pub fn cell(&self, raw: u64) -> Result<CellIndex> {
        let cell = CellIndex::from_raw(raw)
            .ok_or_else(|| GridError::InvalidIndex("zero is not a cell index".into()))?;
        if self.config.validate_index && !self.provider.is_valid_cell(cell) {
            return Err(GridError::InvalidIndex(format!("{} is not a valid cell", cell)));
        }
        Ok(cell)
    }

    pub fn parse_cell(&self, text: &str) -> Result<CellIndex> {
        let cell: CellIndex = text.parse()?;
        self.cell(cell.raw())
    }

    pub fn is_valid_cell(&self, cell: CellIndex) -> bool {
        self.provider.is_valid_cell(cell)
    }

    pub fn resolution(&self, cell: CellIndex) -> u8 {
        cell.resolution()
    }

    pub fn base_cell(&self, cell: CellIndex) -> u8 {
        cell.base_cell()
    }

    /// False for anything the provider rejects.
    pub fn is_pentagon(&self, cell: CellIndex) -> bool {
        self.provider.is_pentagon(cell).unwrap_or(false)
    }

    pub fn is_res_class_iii(&self, cell: CellIndex) -> bool {
        cell.is_res_class_iii()
    }

    pub fn max_face_count(&self, cell: CellIndex) -> usize {
        if self.is_pentagon(cell) {
            MAX_FACE_COUNT_PENTAGON
        } else {
            MAX_FACE_COUNT
        }
    }

    /// Faces the cell touches: one for interior cells, two across a face seam.
    /// Slots the provider leaves empty are dropped.
    pub fn icosahedron_faces(&self, cell: CellIndex) -> Result<Vec<u8>> {
        let mut out = vec![None; self.max_face_count(cell)];
        self.provider
            .icosahedron_faces(cell, &mut out)
            .map_err(index_error)?;
        Ok(out.into_iter().flatten().collect())
    }

    pub fn parent(&self, cell: CellIndex, res: u8) -> Result<CellIndex> {
        self.check_res(res)?;
        if res > cell.resolution() {
            return Err(GridError::InvalidResolution(format!(
                "parent of {} requested at finer resolution {}",
                cell, res
            )));
        }
        self.provider.parent(cell, res).map_err(index_error)
    }

    pub fn children_size(&self, cell: CellIndex, res: u8) -> Result<u64> {
        self.check_res(res)?;
        if res < cell.resolution() {
            return Err(GridError::InvalidResolution(format!(
                "children of {} requested at coarser resolution {}",
                cell, res
            )));
        }
        self.provider.children_size(cell, res).map_err(index_error)
    }

    pub fn children(&self, cell: CellIndex, res: u8) -> Result<Vec<CellIndex>> {
        let size = self.children_size(cell, res)?;
        if !in_buffer_bounds(size) {
            return Err(GridError::OperationFailed(format!(
                "{} children of {} exceed the buffer cap",
                size, cell
            )));
        }
        let mut out = vec![None; size as usize];
        self.provider
            .children(cell, res, &mut out)
            .map_err(index_error)?;
        Ok(out.into_iter().flatten().collect())
    }

    pub fn center_child(&self, cell: CellIndex, res: u8) -> Result<CellIndex> {
        self.check_res(res)?;
        if res < cell.resolution() {
            return Err(GridError::InvalidResolution(format!(
                "center child of {} requested at coarser resolution {}",
                cell, res
            )));
        }
        self.provider.center_child(cell, res).map_err(index_error)
    }

    pub fn latlng_to_cell(&self, point: GeoPoint, res: u8) -> Result<CellIndex> {
        self.check_res(res)?;
        if !point.is_in_range() {
            return Err(GridError::Argument(format!(
                "coordinate out of range ({}, {})",
                point.lat, point.lon
            )));
        }
        self.provider
            .latlng_to_cell(point.to_coord(), res)
            .map_err(op_failed)
    }

    pub fn cell_to_latlng(&self, cell: CellIndex) -> Result<GeoPoint> {
        let c = self.provider.cell_to_latlng(cell).map_err(index_error)?;
        Ok(c.to_point())
    }

    pub fn cell_to_boundary(&self, cell: CellIndex) -> Result<CellBoundary> {
        let verts = self.provider.cell_to_boundary(cell).map_err(index_error)?;
        Ok(CellBoundary::from_coords(&verts))
    }
}
