#[cfg(feature = "bench_regions")]
use hexregion::{GeoPoint, Grid};
#[cfg(feature = "bench_regions")]
use std::time::Instant;

#[cfg(not(feature = "bench_regions"))]
fn main() {
    panic!("regions_bench requires --features bench_regions");
}

#[cfg(feature = "bench_regions")]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut k = 30u32; // disk of 3k(k+1)+1 cells
    let mut res = 9u8;
    let mut repeats = 10usize;
    for a in &args[1..] {
        if let Some(val) = a.strip_prefix("--k=") {
            if let Ok(v) = val.parse() {
                k = v;
            }
        } else if let Some(val) = a.strip_prefix("--res=") {
            if let Ok(v) = val.parse() {
                res = v;
            }
        } else if let Some(val) = a.strip_prefix("--repeats=") {
            if let Ok(v) = val.parse() {
                repeats = v;
            }
        }
    }

    let g = Grid::new();
    let origin = match g.latlng_to_cell(GeoPoint::new(37.775, -122.418), res) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("bad resolution: {}", e);
            return;
        }
    };
    let disk = match g.grid_disk(origin, k) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("disk failed: {}", e);
            return;
        }
    };

    let mut extract_times = Vec::with_capacity(repeats);
    let mut fill_times = Vec::with_capacity(repeats);
    let mut compact_times = Vec::with_capacity(repeats);
    let mut filled = 0usize;
    for _ in 0..repeats {
        let t = Instant::now();
        let mp = g.cells_to_multi_polygon(&disk);
        extract_times.push(t.elapsed().as_secs_f64() * 1000.0);

        // Refill the extracted outline.
        if let Some(poly) = mp.ok().and_then(|m| m.polygons.into_iter().next()) {
            let t = Instant::now();
            filled = g.polygon_to_cells(&poly, res).map(|c| c.len()).unwrap_or(0);
            fill_times.push(t.elapsed().as_secs_f64() * 1000.0);
        }

        let t = Instant::now();
        let _ = g.compact(&disk);
        compact_times.push(t.elapsed().as_secs_f64() * 1000.0);
    }
    let avg = |v: &[f64]| if v.is_empty() { 0.0 } else { v.iter().sum::<f64>() / v.len() as f64 };

    println!(
        "res={} k={} cells={} refilled={} avg_extract_ms={:.3} avg_fill_ms={:.3} avg_compact_ms={:.3}",
        res,
        k,
        disk.len(),
        filled,
        avg(&extract_times),
        avg(&fill_times),
        avg(&compact_times)
    );
}
