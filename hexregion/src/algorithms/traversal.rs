//! Disk, ring, distance and path queries over grid adjacency.
//!
//! The provider's fast disk and ring fills assume no pentagon lies in
//! range. The `_unsafe` variants surface that as PentagonEncountered; the
//! plain variants fall back to an exact breadth-first walk over edges.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, error};

use crate::error::{GridError, ProviderError, Result};
use crate::geometry::limits::in_buffer_bounds;
use crate::model::CellIndex;
use crate::provider::GridProvider;
use crate::{index_error, Grid};

type DiskFill = (Vec<Option<CellIndex>>, Vec<u32>);

impl<P: GridProvider> Grid<P> {
    /// 3k(k+1)+1, the number of cells within distance k of a hexagon.
    pub fn max_grid_disk_size(&self, k: u32) -> Result<usize> {
        let k = u64::from(k);
        let n = k
            .checked_add(1)
            .and_then(|k1| k.checked_mul(k1))
            .and_then(|kk| kk.checked_mul(3))
            .and_then(|n| n.checked_add(1))
            .filter(|n| in_buffer_bounds(*n))
            .ok_or_else(|| GridError::OperationFailed(format!("disk of radius {} is too large", k)))?;
        Ok(n as usize)
    }

    pub fn grid_disk(&self, origin: CellIndex, k: u32) -> Result<Vec<CellIndex>> {
        let (cells, _) = self.fill_disk(origin, k, true)?;
        Ok(cells.into_iter().flatten().collect())
    }

    /// Cells bucketed by distance: `result[d]` holds the cells at exactly d steps.
    pub fn grid_disk_distances(&self, origin: CellIndex, k: u32) -> Result<Vec<Vec<CellIndex>>> {
        let fill = self.fill_disk(origin, k, true)?;
        Ok(bucket(fill, k))
    }

    pub fn grid_disk_unsafe(&self, origin: CellIndex, k: u32) -> Result<Vec<CellIndex>> {
        let (cells, _) = self.fill_disk(origin, k, false)?;
        Ok(cells.into_iter().flatten().collect())
    }

    pub fn grid_disk_distances_unsafe(
        &self,
        origin: CellIndex,
        k: u32,
    ) -> Result<Vec<Vec<CellIndex>>> {
        let fill = self.fill_disk(origin, k, false)?;
        Ok(bucket(fill, k))
    }

    /// Hollow ring at exactly distance k.
    pub fn grid_ring_unsafe(&self, origin: CellIndex, k: u32) -> Result<Vec<CellIndex>> {
        let size = if k == 0 { 1 } else { 6 * u64::from(k) };
        if !in_buffer_bounds(size) {
            return Err(GridError::OperationFailed(format!("ring of radius {} is too large", k)));
        }
        let mut out = vec![None; size as usize];
        self.provider
            .grid_ring_unsafe(origin, k, &mut out)
            .map_err(traversal_error)?;
        Ok(out.into_iter().flatten().collect())
    }

    pub fn grid_distance(&self, a: CellIndex, b: CellIndex) -> Result<i64> {
        self.provider.grid_distance(a, b).map_err(|e| {
            GridError::OperationFailed(format!("distance from {} to {}: {}", a, b, e))
        })
    }

    /// Number of cells on the line from `a` to `b`, endpoints included.
    pub fn grid_path_size(&self, a: CellIndex, b: CellIndex) -> Result<usize> {
        let n = self
            .provider
            .grid_path_size(a, b)
            .map_err(|e| GridError::LineSize(format!("line from {} to {}: {}", a, b, e)))?;
        if !in_buffer_bounds(n as u64) {
            return Err(GridError::LineSize(format!("line of {} cells is too long", n)));
        }
        Ok(n)
    }

    pub fn grid_path(&self, a: CellIndex, b: CellIndex) -> Result<Vec<CellIndex>> {
        let size = self.grid_path_size(a, b)?;
        let mut out = vec![None; size];
        if let Err(e) = self.provider.grid_path(a, b, &mut out) {
            // A line whose size was computable must also be fillable.
            error!(%a, %b, size, err = %e, "grid path fill failed after size query");
            return Err(GridError::OperationFailed(format!(
                "line from {} to {}: {}",
                a, b, e
            )));
        }
        Ok(out.into_iter().flatten().collect())
    }

    pub fn are_neighbor_cells(&self, a: CellIndex, b: CellIndex) -> Result<bool> {
        self.provider.are_neighbors(a, b).map_err(|e| {
            GridError::OperationFailed(format!("neighbor test {} / {}: {}", a, b, e))
        })
    }

    fn fill_disk(&self, origin: CellIndex, k: u32, fallback: bool) -> Result<DiskFill> {
        let size = self.max_grid_disk_size(k)?;
        let mut out = vec![None; size];
        let mut distances = vec![0u32; size];
        match self
            .provider
            .grid_disk_distances_unsafe(origin, k, &mut out, &mut distances)
        {
            Ok(()) => Ok((out, distances)),
            Err(ProviderError::Pentagon(msg)) if fallback => {
                debug!(%origin, k, reason = %msg, "pentagon in range, exact traversal");
                out.fill(None);
                self.disk_exact(origin, k, &mut out, &mut distances)?;
                Ok((out, distances))
            }
            Err(e) => Err(traversal_error(e)),
        }
    }

    /// Breadth-first walk over provider adjacency. Writes cells in visit
    /// order, so the origin is first and distances never decrease.
    fn disk_exact(
        &self,
        origin: CellIndex,
        k: u32,
        out: &mut [Option<CellIndex>],
        distances: &mut [u32],
    ) -> Result<()> {
        let mut seen: HashSet<CellIndex> = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(origin);
        queue.push_back((origin, 0u32));
        let mut n = 0usize;
        while let Some((cell, d)) = queue.pop_front() {
            let slot = out.get_mut(n).ok_or_else(|| {
                GridError::OperationFailed(format!("disk around {} overflowed its buffer", origin))
            })?;
            *slot = Some(cell);
            distances[n] = d;
            n += 1;
            if d == k {
                continue;
            }
            for next in self.edge_neighbors(cell)? {
                if seen.insert(next) {
                    queue.push_back((next, d + 1));
                }
            }
        }
        Ok(())
    }
}

fn bucket((cells, distances): DiskFill, k: u32) -> Vec<Vec<CellIndex>> {
    let mut buckets = vec![Vec::new(); k as usize + 1];
    for (cell, d) in cells.into_iter().zip(distances) {
        if let (Some(c), Some(b)) = (cell, buckets.get_mut(d as usize)) {
            b.push(c);
        }
    }
    buckets
}

fn traversal_error(e: ProviderError) -> GridError {
    match e {
        ProviderError::Pentagon(m) => GridError::PentagonEncountered(m),
        other => index_error(other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{GeoPoint, Grid, GridError};

    #[test]
    fn disk_cardinality_away_from_pentagons() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(37.775, -122.418), 9).unwrap();
        for k in 0..5u32 {
            let disk = g.grid_disk(c, k).unwrap();
            assert_eq!(disk.len(), g.max_grid_disk_size(k).unwrap());
            assert_eq!(disk.len() as u32, 3 * k * (k + 1) + 1);
            let buckets = g.grid_disk_distances(c, k).unwrap();
            assert_eq!(buckets.len(), k as usize + 1);
            assert_eq!(buckets[0], vec![c]);
            for (d, b) in buckets.iter().enumerate().skip(1) {
                assert_eq!(b.len(), 6 * d);
                for cell in b {
                    assert_eq!(g.grid_distance(c, *cell).unwrap(), d as i64);
                }
            }
        }
    }

    #[test]
    fn ring_sizes() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(10.0, 20.0), 6).unwrap();
        assert_eq!(g.grid_ring_unsafe(c, 0).unwrap(), vec![c]);
        assert_eq!(g.grid_ring_unsafe(c, 3).unwrap().len(), 18);
    }

    #[test]
    fn pentagon_disk_falls_back() {
        let g = Grid::new();
        let p = g.pentagons(5).unwrap()[0];
        assert!(matches!(
            g.grid_disk_unsafe(p, 2),
            Err(GridError::PentagonEncountered(_))
        ));
        assert!(matches!(
            g.grid_ring_unsafe(p, 1),
            Err(GridError::PentagonEncountered(_))
        ));
        let disk = g.grid_disk(p, 2).unwrap();
        // 1 + 5 + 10 around a pentagon.
        assert_eq!(disk.len(), 16);
        let uniq: HashSet<_> = disk.iter().collect();
        assert_eq!(uniq.len(), disk.len());
        let buckets = g.grid_disk_distances(p, 2).unwrap();
        assert_eq!(buckets[1].len(), 5);
    }

    #[test]
    fn path_endpoints_and_steps() {
        let g = Grid::new();
        let a = g.latlng_to_cell(GeoPoint::new(37.775, -122.418), 8).unwrap();
        let b = g.latlng_to_cell(GeoPoint::new(37.8, -122.3), 8).unwrap();
        let path = g.grid_path(a, b).unwrap();
        let dist = g.grid_distance(a, b).unwrap();
        assert_eq!(path.len() as i64, dist + 1);
        assert_eq!(path.first(), Some(&a));
        assert_eq!(path.last(), Some(&b));
        for w in path.windows(2) {
            assert!(g.are_neighbor_cells(w[0], w[1]).unwrap());
        }
    }

    #[test]
    fn path_across_resolutions_is_line_size_error() {
        let g = Grid::new();
        let p = GeoPoint::new(1.0, 1.0);
        let a = g.latlng_to_cell(p, 8).unwrap();
        let b = g.latlng_to_cell(p, 9).unwrap();
        assert!(matches!(g.grid_path(a, b), Err(GridError::LineSize(_))));
        assert!(matches!(g.grid_distance(a, b), Err(GridError::OperationFailed(_))));
        assert!(matches!(g.are_neighbor_cells(a, b), Err(GridError::OperationFailed(_))));
    }
}
