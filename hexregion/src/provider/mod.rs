//! The grid primitive contract consumed by the region algorithms.
//!
//! The icosahedral projection, digit arithmetic and base-cell tables live
//! behind this trait. Everything in `algorithms/` is written against it, so
//! an alternative backend (or a test double) only has to implement these
//! primitives.
//!
//! Variable-length fills follow the two-phase convention: the caller asks
//! for a size, allocates `vec![None; size]`, and the provider writes into
//! the slice. Slots the provider does not use stay `None`.

mod h3;

pub use self::h3::H3oProvider;

use crate::error::ProviderError;
use crate::model::{AreaUnit, CellIndex, DirectedEdgeIndex, GeoCoord, GridIj, LengthUnit};

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Faces a hexagon can touch.
pub const MAX_FACE_COUNT: usize = 2;

/// Pentagons sit on an icosahedron vertex and touch all five faces around it.
pub const MAX_FACE_COUNT_PENTAGON: usize = 5;

/// Outgoing edges of a hexagon; pentagons leave one slot empty.
pub const MAX_EDGES_PER_CELL: usize = 6;

pub const RES0_CELL_COUNT: usize = 122;

pub const PENTAGON_COUNT: usize = 12;

pub trait GridProvider {
    fn is_valid_cell(&self, cell: CellIndex) -> bool;

    fn is_pentagon(&self, cell: CellIndex) -> ProviderResult<bool>;

    /// Writes face numbers into `out`, sized by the caller from the pentagon flag.
    fn icosahedron_faces(&self, cell: CellIndex, out: &mut [Option<u8>]) -> ProviderResult<()>;

    fn latlng_to_cell(&self, coord: GeoCoord, res: u8) -> ProviderResult<CellIndex>;

    fn cell_to_latlng(&self, cell: CellIndex) -> ProviderResult<GeoCoord>;

    fn cell_to_boundary(&self, cell: CellIndex) -> ProviderResult<Vec<GeoCoord>>;

    fn parent(&self, cell: CellIndex, res: u8) -> ProviderResult<CellIndex>;

    fn center_child(&self, cell: CellIndex, res: u8) -> ProviderResult<CellIndex>;

    /// Number of descendants of `cell` at `res` (7 per level, fewer under a pentagon).
    fn children_size(&self, cell: CellIndex, res: u8) -> ProviderResult<u64>;

    fn children(&self, cell: CellIndex, res: u8, out: &mut [Option<CellIndex>])
        -> ProviderResult<()>;

    fn are_neighbors(&self, a: CellIndex, b: CellIndex) -> ProviderResult<bool>;

    /// Fast disk fill. Fails with [`ProviderError::Pentagon`] when the
    /// traversal meets pentagon distortion; the output is then unusable.
    fn grid_disk_distances_unsafe(
        &self,
        origin: CellIndex,
        k: u32,
        out: &mut [Option<CellIndex>],
        distances: &mut [u32],
    ) -> ProviderResult<()>;

    fn grid_ring_unsafe(
        &self,
        origin: CellIndex,
        k: u32,
        out: &mut [Option<CellIndex>],
    ) -> ProviderResult<()>;

    fn grid_distance(&self, a: CellIndex, b: CellIndex) -> ProviderResult<i64>;

    fn grid_path_size(&self, a: CellIndex, b: CellIndex) -> ProviderResult<usize>;

    fn grid_path(&self, a: CellIndex, b: CellIndex, out: &mut [Option<CellIndex>])
        -> ProviderResult<()>;

    fn cell_to_local_ij(&self, origin: CellIndex, cell: CellIndex) -> ProviderResult<GridIj>;

    fn local_ij_to_cell(&self, origin: CellIndex, ij: GridIj) -> ProviderResult<CellIndex>;

    fn is_valid_directed_edge(&self, edge: DirectedEdgeIndex) -> bool;

    fn cells_to_directed_edge(
        &self,
        origin: CellIndex,
        destination: CellIndex,
    ) -> ProviderResult<DirectedEdgeIndex>;

    fn origin_to_directed_edges(
        &self,
        cell: CellIndex,
        out: &mut [Option<DirectedEdgeIndex>; MAX_EDGES_PER_CELL],
    ) -> ProviderResult<()>;

    fn directed_edge_origin(&self, edge: DirectedEdgeIndex) -> ProviderResult<CellIndex>;

    fn directed_edge_destination(&self, edge: DirectedEdgeIndex) -> ProviderResult<CellIndex>;

    fn directed_edge_boundary(&self, edge: DirectedEdgeIndex) -> ProviderResult<Vec<GeoCoord>>;

    fn hexagon_area_avg(&self, res: u8, unit: AreaUnit) -> ProviderResult<f64>;

    fn hexagon_edge_length_avg(&self, res: u8, unit: LengthUnit) -> ProviderResult<f64>;

    fn cell_area(&self, cell: CellIndex, unit: AreaUnit) -> ProviderResult<f64>;

    fn edge_length(&self, edge: DirectedEdgeIndex, unit: LengthUnit) -> ProviderResult<f64>;

    fn num_cells(&self, res: u8) -> ProviderResult<u64>;

    fn res0_cells(&self, out: &mut [Option<CellIndex>]) -> ProviderResult<()>;

    fn pentagons(&self, res: u8, out: &mut [Option<CellIndex>]) -> ProviderResult<()>;
}
