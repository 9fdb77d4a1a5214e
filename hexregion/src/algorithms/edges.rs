//! Directed edges between neighboring cells.

use crate::error::{GridError, Result};
use crate::model::{CellBoundary, CellIndex, DirectedEdgeIndex, LengthUnit};
use crate::provider::{GridProvider, MAX_EDGES_PER_CELL};
use crate::{index_error, op_failed, Grid};

impl<P: GridProvider> Grid<P> {
    pub fn directed_edge(&self, raw: u64) -> Result<DirectedEdgeIndex> {
        let edge = DirectedEdgeIndex::from_raw(raw)
            .ok_or_else(|| GridError::InvalidIndex("zero is not a directed edge".into()))?;
        if self.config.validate_index && !self.provider.is_valid_directed_edge(edge) {
            return Err(GridError::InvalidIndex(format!("{} is not a valid directed edge", edge)));
        }
        Ok(edge)
    }

    pub fn parse_directed_edge(&self, text: &str) -> Result<DirectedEdgeIndex> {
        let edge: DirectedEdgeIndex = text.parse()?;
        self.directed_edge(edge.raw())
    }

    pub fn is_valid_directed_edge(&self, edge: DirectedEdgeIndex) -> bool {
        self.provider.is_valid_directed_edge(edge)
    }

    /// Fails with OperationFailed when the cells are not neighbors.
    pub fn cells_to_directed_edge(
        &self,
        origin: CellIndex,
        destination: CellIndex,
    ) -> Result<DirectedEdgeIndex> {
        self.provider
            .cells_to_directed_edge(origin, destination)
            .map_err(op_failed)
    }

    /// Six edges for a hexagon, five for a pentagon.
    pub fn origin_to_directed_edges(&self, cell: CellIndex) -> Result<Vec<DirectedEdgeIndex>> {
        let mut out = [None; MAX_EDGES_PER_CELL];
        self.provider
            .origin_to_directed_edges(cell, &mut out)
            .map_err(index_error)?;
        Ok(out.into_iter().flatten().collect())
    }

    pub fn directed_edge_origin(&self, edge: DirectedEdgeIndex) -> Result<CellIndex> {
        self.provider.directed_edge_origin(edge).map_err(index_error)
    }

    pub fn directed_edge_destination(&self, edge: DirectedEdgeIndex) -> Result<CellIndex> {
        self.provider
            .directed_edge_destination(edge)
            .map_err(index_error)
    }

    pub fn directed_edge_to_cells(&self, edge: DirectedEdgeIndex) -> Result<(CellIndex, CellIndex)> {
        Ok((
            self.directed_edge_origin(edge)?,
            self.directed_edge_destination(edge)?,
        ))
    }

    pub fn directed_edge_to_boundary(&self, edge: DirectedEdgeIndex) -> Result<CellBoundary> {
        let verts = self
            .provider
            .directed_edge_boundary(edge)
            .map_err(index_error)?;
        Ok(CellBoundary::from_coords(&verts))
    }

    pub fn edge_length(&self, edge: DirectedEdgeIndex, unit: LengthUnit) -> Result<f64> {
        self.provider.edge_length(edge, unit).map_err(index_error)
    }

    /// Neighbors reached through outgoing edges, in edge order.
    pub(crate) fn edge_neighbors(&self, cell: CellIndex) -> Result<Vec<CellIndex>> {
        let edges = self.origin_to_directed_edges(cell)?;
        edges
            .into_iter()
            .map(|e| self.directed_edge_destination(e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{GeoPoint, Grid, GridError, LengthUnit};

    #[test]
    fn edges_roundtrip() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(37.775, -122.418), 9).unwrap();
        let edges = g.origin_to_directed_edges(c).unwrap();
        assert_eq!(edges.len(), 6);
        for e in edges {
            assert!(g.is_valid_directed_edge(e));
            let (o, d) = g.directed_edge_to_cells(e).unwrap();
            assert_eq!(o, c);
            assert!(g.are_neighbor_cells(o, d).unwrap());
            assert_eq!(g.cells_to_directed_edge(o, d).unwrap(), e);
            assert_eq!(g.directed_edge_to_boundary(e).unwrap().len(), 2);
            let km = g.edge_length(e, LengthUnit::Km).unwrap();
            let m = g.edge_length(e, LengthUnit::M).unwrap();
            assert!(km > 0.0 && (m - km * 1000.0).abs() < 1e-6 * m);
            let text = e.to_string();
            assert_eq!(g.parse_directed_edge(&text).unwrap(), e);
        }
    }

    #[test]
    fn pentagon_has_five_edges() {
        let g = Grid::new();
        let p = g.pentagons(4).unwrap()[0];
        assert_eq!(g.origin_to_directed_edges(p).unwrap().len(), 5);
    }

    #[test]
    fn non_neighbors_have_no_edge() {
        let g = Grid::new();
        let a = g.latlng_to_cell(GeoPoint::new(0.0, 0.0), 7).unwrap();
        let b = g.latlng_to_cell(GeoPoint::new(10.0, 10.0), 7).unwrap();
        assert!(matches!(
            g.cells_to_directed_edge(a, b),
            Err(GridError::OperationFailed(_))
        ));
        assert!(matches!(g.directed_edge(0), Err(GridError::InvalidIndex(_))));
    }
}
