use hexregion::{CellIndex, GeoPoint, Grid};
use proptest::prelude::*;
use std::collections::HashSet;

fn point_strategy() -> impl Strategy<Value = GeoPoint> {
    (-85.0f64..85.0, -180.0f64..180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

#[derive(Clone, Debug)]
enum Probe {
    // Pick two cells out of the disk around the origin by index.
    Pair { k: u32, i: usize, j: usize },
    Triple { k: u32, i: usize, j: usize, l: usize },
}

fn probe_strategy() -> impl Strategy<Value = Probe> {
    prop_oneof![
        (1u32..4, any::<usize>(), any::<usize>()).prop_map(|(k, i, j)| Probe::Pair { k, i, j }),
        (1u32..5, any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(k, i, j, l)| Probe::Triple { k, i, j, l }),
    ]
}

fn set(v: &[CellIndex]) -> HashSet<CellIndex> {
    v.iter().copied().collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn text_roundtrip(p in point_strategy(), res in 0u8..=15) {
        let g = Grid::new();
        let c = g.latlng_to_cell(p, res).unwrap();
        let text = c.to_string();
        prop_assert!(text.len() <= 16);
        prop_assert_eq!(g.parse_cell(&text).unwrap(), c);
        prop_assert_eq!(text.parse::<CellIndex>().unwrap().to_string(), text);
    }

    #[test]
    fn parent_children_contain_cell_once(p in point_strategy(), res in 1u8..=15) {
        let g = Grid::new();
        let c = g.latlng_to_cell(p, res).unwrap();
        let parent = g.parent(c, res - 1).unwrap();
        let kids = g.children(parent, res).unwrap();
        prop_assert_eq!(kids.iter().filter(|k| **k == c).count(), 1);
        prop_assert_eq!(kids.len() as u64, g.children_size(parent, res).unwrap());
    }

    #[test]
    fn center_within_one_edge(p in point_strategy(), res in 0u8..=15) {
        let g = Grid::new();
        let c = g.latlng_to_cell(p, res).unwrap();
        let center = g.cell_to_latlng(c).unwrap();
        let d = g.great_circle_distance(p, center, hexregion::LengthUnit::Km).unwrap();
        let boundary = g.cell_to_boundary(c).unwrap();
        let radius = boundary
            .vertices
            .iter()
            .map(|v| g.great_circle_distance(center, *v, hexregion::LengthUnit::Km).unwrap())
            .fold(0.0f64, f64::max);
        prop_assert!(d <= radius * 1.0001, "d={} radius={}", d, radius);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn disk_partitions_by_distance(p in point_strategy(), res in 2u8..=10, k in 0u32..6) {
        let g = Grid::new();
        let origin = g.latlng_to_cell(p, res).unwrap();
        // Only pentagon-free neighborhoods have the textbook cardinality.
        let fast = g.grid_disk_unsafe(origin, k);
        prop_assume!(fast.is_ok());
        let disk = g.grid_disk(origin, k).unwrap();
        prop_assert_eq!(disk.len() as u32, 1 + 3 * k * (k + 1));
        let buckets = g.grid_disk_distances(origin, k).unwrap();
        prop_assert_eq!(buckets.len(), k as usize + 1);
        let mut union = HashSet::new();
        for b in &buckets {
            for c in b {
                prop_assert!(union.insert(*c), "cell {} in two buckets", c);
            }
        }
        prop_assert_eq!(union, set(&disk));
        prop_assert_eq!(g.grid_disk(origin, 0).unwrap(), vec![origin]);
    }

    #[test]
    fn adjacency_and_distance_laws(p in point_strategy(), res in 3u8..=10, probe in probe_strategy()) {
        let g = Grid::new();
        let origin = g.latlng_to_cell(p, res).unwrap();
        let k = match probe { Probe::Pair { k, .. } | Probe::Triple { k, .. } => k };
        // Stay inside a pentagon-free region twice the probe radius wide.
        prop_assume!(g.grid_disk_unsafe(origin, 2 * k).is_ok());
        let disk = g.grid_disk(origin, k).unwrap();
        match probe {
            Probe::Pair { i, j, .. } => {
                let a = disk[i % disk.len()];
                let b = disk[j % disk.len()];
                prop_assert_eq!(
                    g.are_neighbor_cells(a, b).unwrap(),
                    g.are_neighbor_cells(b, a).unwrap()
                );
                prop_assert_eq!(
                    g.are_neighbor_cells(a, b).unwrap(),
                    g.grid_distance(a, b).unwrap() == 1
                );
            }
            Probe::Triple { i, j, l, .. } => {
                let a = disk[i % disk.len()];
                let b = disk[j % disk.len()];
                let c = disk[l % disk.len()];
                let ac = g.grid_distance(a, c).unwrap();
                let ab = g.grid_distance(a, b).unwrap();
                let bc = g.grid_distance(b, c).unwrap();
                prop_assert!(ac <= ab + bc, "{} > {} + {}", ac, ab, bc);
            }
        }
    }

    #[test]
    fn compaction_laws(p in point_strategy(), res in 2u8..=9, k in 0u32..8) {
        let g = Grid::new();
        let origin = g.latlng_to_cell(p, res).unwrap();
        let disk = g.grid_disk(origin, k).unwrap();
        let once = g.compact(&disk).unwrap();
        let twice = g.compact(&once).unwrap();
        prop_assert_eq!(set(&once), set(&twice));
        prop_assert_eq!(set(&g.uncompact(&once, res).unwrap()), set(&disk));
        // No element covers another.
        let compacted = set(&once);
        for c in &once {
            for r in 0..c.resolution() {
                prop_assert!(!compacted.contains(&g.parent(*c, r).unwrap()));
            }
        }
    }
}
