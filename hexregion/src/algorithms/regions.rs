//! Cell set to MultiPolygon.
//!
//! Cells are grouped into connected components by breadth-first search over
//! provider adjacency. Each component's cell boundaries are merged into a
//! vertex arena; every boundary contributes directed edges, and an edge
//! whose reverse is already present is interior to the component, so both
//! cancel. What remains is the component boundary, traced into closed
//! loops. Hexagon boundaries wind counter-clockwise, so the outer loop keeps
//! that orientation and holes run the other way.

use std::collections::{HashMap, HashSet, VecDeque};
use std::f64::consts::PI;

use tracing::trace;

use crate::error::{GridError, Result};
use crate::geometry::math::{ring_area, TWO_PI};
use crate::geometry::tolerance::{approx_eq, quantize, EPS_AREA, EPS_VERTEX};
use crate::model::{CellBoundary, CellIndex, GeoCoord, MultiPolygon, Polygon};
use crate::provider::GridProvider;
use crate::{index_error, Grid};

#[cfg(feature = "region_prof")]
use std::time::Instant;

/// Boundary vertices of one component, merged across neighboring cells.
#[derive(Default)]
struct VertexArena {
    verts: Vec<GeoCoord>,
    index: HashMap<(i64, i64), usize>,
}

impl VertexArena {
    // Neighboring cells compute shared vertices independently, so equal
    // vertices may differ in the last bits and straddle a quantization
    // boundary; look in the 3x3 block of keys around the vertex.
    fn intern(&mut self, c: GeoCoord) -> usize {
        let lng = if approx_eq(c.lng, -PI, EPS_VERTEX) { PI } else { c.lng };
        let c = GeoCoord::new(c.lat, lng);
        let (qa, qn) = (quantize(c.lat), quantize(c.lng));
        for da in -1..=1 {
            for dn in -1..=1 {
                if let Some(&id) = self.index.get(&(qa + da, qn + dn)) {
                    let v = self.verts[id];
                    if approx_eq(v.lat, c.lat, EPS_VERTEX) && approx_eq(v.lng, c.lng, EPS_VERTEX) {
                        return id;
                    }
                }
            }
        }
        let id = self.verts.len();
        self.verts.push(c);
        self.index.insert((qa, qn), id);
        id
    }
}

/// Directed boundary edges in insertion order; cancelled edges are tombstoned.
#[derive(Default)]
struct EdgeSet {
    edges: Vec<(usize, usize)>,
    alive: Vec<bool>,
    lookup: HashMap<(usize, usize), usize>,
}

impl EdgeSet {
    fn add(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        if let Some(rev) = self.lookup.remove(&(b, a)) {
            self.alive[rev] = false;
            return;
        }
        let id = self.edges.len();
        self.edges.push((a, b));
        self.alive.push(true);
        self.lookup.insert((a, b), id);
    }
}

/// Trace the surviving edges into closed loops of vertex ids.
fn trace_loops(edges: &EdgeSet) -> Result<Vec<Vec<usize>>> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, &(a, _)) in edges.edges.iter().enumerate() {
        if edges.alive[i] {
            outgoing.entry(a).or_default().push(i);
        }
    }
    let mut used = vec![false; edges.edges.len()];
    let mut loops = Vec::new();
    for start in 0..edges.edges.len() {
        if !edges.alive[start] || used[start] {
            continue;
        }
        let origin = edges.edges[start].0;
        let mut ring = Vec::new();
        let mut e = start;
        let mut guard = 0usize;
        loop {
            used[e] = true;
            let (a, b) = edges.edges[e];
            ring.push(a);
            if b == origin {
                break;
            }
            let next = outgoing
                .get(&b)
                .and_then(|cands| cands.iter().copied().find(|c| !used[*c]));
            match next {
                Some(n) => e = n,
                None => {
                    return Err(GridError::OperationFailed(format!(
                        "boundary loop starting at vertex {} cannot be closed",
                        origin
                    )))
                }
            }
            guard += 1;
            if guard > edges.edges.len() {
                return Err(GridError::OperationFailed("boundary trace did not terminate".into()));
            }
        }
        loops.push(ring);
    }
    Ok(loops)
}

/// Planar area with longitudes unwrapped along the loop, so loops crossing
/// the antimeridian measure the same as anywhere else.
fn unwrapped_area(ring: &[GeoCoord]) -> f64 {
    let mut pts = Vec::with_capacity(ring.len());
    let mut prev: Option<f64> = None;
    for c in ring {
        let mut lng = c.lng;
        if let Some(p) = prev {
            while lng - p > PI {
                lng -= TWO_PI;
            }
            while p - lng > PI {
                lng += TWO_PI;
            }
        }
        prev = Some(lng);
        pts.push((lng, c.lat));
    }
    ring_area(&pts)
}

impl<P: GridProvider> Grid<P> {
    /// Input cells must be valid and share one resolution; duplicates are
    /// ignored. Polygons come out in component discovery order.
    pub fn cells_to_multi_polygon(&self, cells: &[CellIndex]) -> Result<MultiPolygon> {
        #[cfg(feature = "region_prof")]
        let t_all = Instant::now();

        let mut members = HashSet::with_capacity(cells.len());
        let mut ordered = Vec::with_capacity(cells.len());
        let res = cells.first().map(|c| c.resolution());
        for &c in cells {
            if !self.provider.is_valid_cell(c) {
                return Err(GridError::Argument(format!("{} is not a valid cell", c)));
            }
            if Some(c.resolution()) != res {
                return Err(GridError::Argument(format!(
                    "mixed resolutions in cell set ({} at {})",
                    c,
                    c.resolution()
                )));
            }
            if members.insert(c) {
                ordered.push(c);
            }
        }

        let mut visited: HashSet<CellIndex> = HashSet::with_capacity(ordered.len());
        let mut polygons = Vec::new();
        for &seed in &ordered {
            if !visited.insert(seed) {
                continue;
            }
            let mut component = vec![seed];
            let mut queue = VecDeque::from([seed]);
            while let Some(c) = queue.pop_front() {
                for n in self.edge_neighbors(c)? {
                    if members.contains(&n) && visited.insert(n) {
                        component.push(n);
                        queue.push_back(n);
                    }
                }
            }
            polygons.push(self.component_polygon(&component)?);
        }

        #[cfg(feature = "region_prof")]
        tracing::debug!(
            cells = ordered.len(),
            polygons = polygons.len(),
            total_ms = t_all.elapsed().as_secs_f64() * 1000.0,
            "cells_to_multi_polygon"
        );
        Ok(MultiPolygon { polygons })
    }

    fn component_polygon(&self, component: &[CellIndex]) -> Result<Polygon> {
        let mut arena = VertexArena::default();
        let mut edges = EdgeSet::default();
        for &c in component {
            let boundary = self.provider.cell_to_boundary(c).map_err(index_error)?;
            let ids: Vec<usize> = boundary.iter().map(|v| arena.intern(*v)).collect();
            for i in 0..ids.len() {
                edges.add(ids[i], ids[(i + 1) % ids.len()]);
            }
        }
        let loops: Vec<Vec<GeoCoord>> = trace_loops(&edges)?
            .into_iter()
            .map(|ring| ring.into_iter().map(|id| arena.verts[id]).collect())
            .collect();
        trace!(
            cells = component.len(),
            vertices = arena.verts.len(),
            loops = loops.len(),
            "component traced"
        );
        drop(arena);

        let areas: Vec<f64> = loops.iter().map(|l| unwrapped_area(l).abs()).collect();
        let outer_ix = areas
            .iter()
            .enumerate()
            .filter(|(_, a)| **a > EPS_AREA)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            // Every edge cancelled: the component covers the whole sphere,
            // which has no polygon form.
            .ok_or_else(|| {
                GridError::OperationFailed(format!(
                    "component of {} cells has no boundary (covers the globe)",
                    component.len()
                ))
            })?;
        let mut outer = CellBoundary::default();
        let mut holes = Vec::new();
        for (i, l) in loops.iter().enumerate() {
            if i == outer_ix {
                outer = CellBoundary::from_coords(l);
            } else if areas[i] > EPS_AREA {
                holes.push(CellBoundary::from_coords(l));
            }
        }
        Ok(Polygon::new(outer, holes))
    }
}
