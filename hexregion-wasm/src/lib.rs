use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Grid {
    pub(crate) inner: hexregion::Grid,
}

impl Grid {
    pub fn rs_new() -> Grid {
        Grid { inner: hexregion::Grid::new() }
    }
    pub fn rs_with_config(config: hexregion::GridConfig) -> Grid {
        Grid { inner: hexregion::Grid::with_config(config) }
    }
    pub(crate) fn cell_arg(&self, text: &str) -> hexregion::Result<hexregion::CellIndex> {
        self.inner.parse_cell(text)
    }
}
