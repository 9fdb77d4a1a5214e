//! Compaction of cell sets across resolutions and its inverse.
//!
//! Levels are processed from the finest resolution present upward. At each
//! level the working set is the input cells of that resolution plus the
//! parents promoted from the level below; a complete sibling set is
//! replaced by its parent. The output buffer is sized to the input, which
//! bounds the result since every promotion only shrinks it.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{GridError, ProviderError, Result};
use crate::geometry::limits::in_buffer_bounds;
use crate::model::{CellIndex, MAX_RESOLUTION};
use crate::provider::GridProvider;
use crate::Grid;

fn compact_err(e: ProviderError) -> GridError {
    GridError::Compact(e.to_string())
}

fn uncompact_err(e: ProviderError) -> GridError {
    match e {
        ProviderError::InvalidResolution(m) => GridError::InvalidResolution(m),
        other => GridError::Uncompact(other.to_string()),
    }
}

impl<P: GridProvider> Grid<P> {
    /// Input must be unique valid cells. Several resolutions may appear only
    /// when no cell covers another, which makes compacted output acceptable
    /// input again.
    pub fn compact(&self, cells: &[CellIndex]) -> Result<Vec<CellIndex>> {
        if cells.is_empty() {
            return Ok(Vec::new());
        }
        let mut seen = HashSet::with_capacity(cells.len());
        let mut min_res = MAX_RESOLUTION;
        let mut max_res = 0;
        for &c in cells {
            if !self.provider.is_valid_cell(c) {
                return Err(GridError::Compact(format!("{} is not a valid cell", c)));
            }
            if !seen.insert(c) {
                return Err(GridError::Compact(format!("duplicate cell {}", c)));
            }
            min_res = min_res.min(c.resolution());
            max_res = max_res.max(c.resolution());
        }
        if min_res < max_res {
            for &c in cells {
                for r in min_res..c.resolution() {
                    let a = self.provider.parent(c, r).map_err(compact_err)?;
                    if seen.contains(&a) {
                        return Err(GridError::Compact(format!("{} is covered by {}", c, a)));
                    }
                }
            }
        }

        let mut out: Vec<Option<CellIndex>> = vec![None; cells.len()];
        let mut written = 0usize;
        let mut carried: Vec<CellIndex> = Vec::new();
        for level in (1..=max_res).rev() {
            let mut current = carried;
            current.extend(cells.iter().copied().filter(|c| c.resolution() == level));
            if current.is_empty() {
                carried = Vec::new();
                continue;
            }
            let parent_res = level - 1;
            let mut parents = Vec::with_capacity(current.len());
            let mut counts: HashMap<CellIndex, u64> = HashMap::new();
            let mut order = Vec::new();
            for &c in &current {
                let p = self.provider.parent(c, parent_res).map_err(compact_err)?;
                let n = counts.entry(p).or_insert(0);
                if *n == 0 {
                    order.push(p);
                }
                *n += 1;
                parents.push(p);
            }
            let mut complete = HashSet::new();
            for p in order {
                let need = self.provider.children_size(p, level).map_err(compact_err)?;
                if counts.get(&p).copied() == Some(need) {
                    complete.insert(p);
                }
            }
            let mut next = Vec::with_capacity(complete.len());
            let mut promoted = HashSet::with_capacity(complete.len());
            for (c, p) in current.iter().zip(&parents) {
                if complete.contains(p) {
                    if promoted.insert(*p) {
                        next.push(*p);
                    }
                } else {
                    push_out(&mut out, &mut written, *c)?;
                }
            }
            debug!(level, promoted = next.len(), kept = written, "compaction level");
            carried = next;
        }
        for c in carried
            .into_iter()
            .chain(cells.iter().copied().filter(|c| c.resolution() == 0))
        {
            push_out(&mut out, &mut written, c)?;
        }
        Ok(out.into_iter().flatten().collect())
    }

    /// Expand every cell to its descendants at `res`.
    pub fn uncompact(&self, cells: &[CellIndex], res: u8) -> Result<Vec<CellIndex>> {
        self.check_res(res)?;
        let mut total: u64 = 0;
        let mut sizes = Vec::with_capacity(cells.len());
        for &c in cells {
            if c.resolution() > res {
                return Err(GridError::Uncompact(format!(
                    "{} is finer than resolution {}",
                    c, res
                )));
            }
            let n = self.provider.children_size(c, res).map_err(uncompact_err)?;
            total = total
                .checked_add(n)
                .filter(|t| in_buffer_bounds(*t))
                .ok_or_else(|| GridError::Uncompact(format!("expansion to resolution {} is too large", res)))?;
            sizes.push(n as usize);
        }
        debug!(inputs = cells.len(), total, res, "uncompact size");
        let mut out = vec![None; total as usize];
        let mut offset = 0usize;
        for (&c, n) in cells.iter().zip(sizes) {
            self.provider
                .children(c, res, &mut out[offset..offset + n])
                .map_err(uncompact_err)?;
            offset += n;
        }
        Ok(out.into_iter().flatten().collect())
    }
}

fn push_out(out: &mut [Option<CellIndex>], written: &mut usize, c: CellIndex) -> Result<()> {
    let slot = out
        .get_mut(*written)
        .ok_or_else(|| GridError::Compact("compaction grew its input".into()))?;
    *slot = Some(c);
    *written += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{CellIndex, GeoPoint, Grid, GridError};

    fn set(v: &[CellIndex]) -> HashSet<CellIndex> {
        v.iter().copied().collect()
    }

    #[test]
    fn seven_siblings_become_parent() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(37.775, -122.418), 5).unwrap();
        let p = g.parent(c, 4).unwrap();
        let sibs = g.children(p, 5).unwrap();
        assert_eq!(g.compact(&sibs).unwrap(), vec![p]);
        // One short: nothing to promote.
        assert_eq!(set(&g.compact(&sibs[1..]).unwrap()), set(&sibs[1..]));
    }

    #[test]
    fn compacts_several_levels() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(-33.9, 151.2), 3).unwrap();
        let fine = g.uncompact(&[c], 6).unwrap();
        assert_eq!(fine.len(), 343);
        assert_eq!(g.compact(&fine).unwrap(), vec![c]);
    }

    #[test]
    fn pentagon_siblings() {
        let g = Grid::new();
        let p = g.pentagons(2).unwrap()[3];
        let kids = g.children(p, 3).unwrap();
        assert_eq!(kids.len(), 6);
        assert_eq!(g.compact(&kids).unwrap(), vec![p]);
    }

    #[test]
    fn roundtrip_and_idempotence() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(48.85, 2.35), 7).unwrap();
        let disk = g.grid_disk(c, 6).unwrap();
        let once = g.compact(&disk).unwrap();
        assert!(once.len() < disk.len());
        assert_eq!(set(&g.compact(&once).unwrap()), set(&once));
        assert_eq!(set(&g.uncompact(&once, 7).unwrap()), set(&disk));
    }

    #[test]
    fn rejects_bad_input() {
        let g = Grid::new();
        let c = g.latlng_to_cell(GeoPoint::new(1.0, 1.0), 6).unwrap();
        let d = g.latlng_to_cell(GeoPoint::new(1.0, 1.0), 7).unwrap();
        assert!(matches!(g.compact(&[c, c]), Err(GridError::Compact(_))));
        let parent = g.parent(d, 6).unwrap();
        assert!(matches!(g.compact(&[parent, d]), Err(GridError::Compact(_))));
        let bogus = CellIndex::from_raw(0x1).unwrap();
        assert!(matches!(g.compact(&[bogus]), Err(GridError::Compact(_))));
        assert!(g.compact(&[]).unwrap().is_empty());

        assert!(matches!(g.uncompact(&[d], 6), Err(GridError::Uncompact(_))));
        assert!(matches!(g.uncompact(&[c], 16), Err(GridError::InvalidResolution(_))));
        assert_eq!(g.uncompact(&[c], 6).unwrap(), vec![c]);
    }
}
