// Centralized allocation caps to harden against untrusted sizes (JSON/wasm)

// Two-phase buffers: no size query may ask for more slots than this
pub const MAX_BUFFER_CELLS: usize = 50_000_000;

// Input caps
pub const MAX_INPUT_CELLS: usize = 10_000_000;
pub const MAX_LOOP_VERTICES: usize = 1_000_000;
pub const MAX_HOLES: usize = 100_000;

#[inline]
pub fn in_buffer_bounds(n: u64) -> bool { n <= MAX_BUFFER_CELLS as u64 }
