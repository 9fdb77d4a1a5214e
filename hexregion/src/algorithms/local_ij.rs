use crate::error::{GridError, Result};
use crate::model::{CellIndex, GridIj};
use crate::provider::GridProvider;
use crate::Grid;

// Reserved mode argument; only the default projection exists.
const LOCAL_IJ_MODE: u32 = 0;

fn check_mode(mode: u32) -> Result<()> {
    if mode != LOCAL_IJ_MODE {
        return Err(GridError::Argument(format!(
            "local IJ mode must be {}, got {}",
            LOCAL_IJ_MODE, mode
        )));
    }
    Ok(())
}

impl<P: GridProvider> Grid<P> {
    /// Coordinates of `cell` in the planar frame anchored at `origin`.
    /// Fails when the two are too far apart or separated by a pentagon.
    pub fn cell_to_local_ij(&self, origin: CellIndex, cell: CellIndex, mode: u32) -> Result<GridIj> {
        check_mode(mode)?;
        self.provider
            .cell_to_local_ij(origin, cell)
            .map_err(|e| GridError::OperationFailed(format!("{} relative to {}: {}", cell, origin, e)))
    }

    pub fn local_ij_to_cell(&self, origin: CellIndex, ij: GridIj, mode: u32) -> Result<CellIndex> {
        check_mode(mode)?;
        self.provider.local_ij_to_cell(origin, ij).map_err(|e| {
            GridError::OperationFailed(format!("({}, {}) around {}: {}", ij.i, ij.j, origin, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{GeoPoint, Grid, GridError, GridIj};

    #[test]
    fn disk_roundtrips_through_ij() {
        let g = Grid::new();
        let origin = g.latlng_to_cell(GeoPoint::new(37.775, -122.418), 9).unwrap();
        for c in g.grid_disk(origin, 3).unwrap() {
            let ij = g.cell_to_local_ij(origin, c, 0).unwrap();
            assert_eq!(g.local_ij_to_cell(origin, ij, 0).unwrap(), c);
        }
    }

    #[test]
    fn nonzero_mode_rejected() {
        let g = Grid::new();
        let origin = g.latlng_to_cell(GeoPoint::new(0.0, 0.0), 5).unwrap();
        assert!(matches!(
            g.cell_to_local_ij(origin, origin, 1),
            Err(GridError::Argument(_))
        ));
        assert!(matches!(
            g.local_ij_to_cell(origin, GridIj::new(0, 0), 7),
            Err(GridError::Argument(_))
        ));
    }

    #[test]
    fn far_cells_fail() {
        let g = Grid::new();
        let a = g.latlng_to_cell(GeoPoint::new(0.0, 0.0), 9).unwrap();
        let b = g.latlng_to_cell(GeoPoint::new(60.0, 120.0), 9).unwrap();
        assert!(matches!(
            g.cell_to_local_ij(a, b, 0),
            Err(GridError::OperationFailed(_))
        ));
    }
}
