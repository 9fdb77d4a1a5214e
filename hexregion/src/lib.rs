pub mod config;
pub mod error;
pub mod json;
pub mod model;
pub mod provider;
pub mod geometry {
    pub mod bbox;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod compact;
    pub mod edges;
    pub mod hierarchy;
    pub mod local_ij;
    pub mod measures;
    pub mod polyfill;
    pub mod regions;
    pub mod traversal;
    pub mod winding;
}

pub use config::GridConfig;
pub use error::{GridError, ProviderError, Result};
pub use model::{
    AreaUnit, CellBoundary, CellIndex, DirectedEdgeIndex, GeoCoord, GeoPoint, GridIj, LengthUnit,
    MultiPolygon, Polygon, MAX_RESOLUTION,
};
pub use provider::{GridProvider, H3oProvider};

/// Entry point for every grid operation.
///
/// Owns the primitive provider and the validation toggles; holds no other
/// state, so one value can serve independent calls from many threads when
/// the provider allows it.
#[derive(Debug, Clone)]
pub struct Grid<P: GridProvider = H3oProvider> {
    pub(crate) provider: P,
    pub(crate) config: GridConfig,
}

impl Grid<H3oProvider> {
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    pub fn with_config(config: GridConfig) -> Self {
        Grid { provider: H3oProvider::new(), config }
    }
}

impl Default for Grid<H3oProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: GridProvider> Grid<P> {
    pub fn with_provider(provider: P, config: GridConfig) -> Self {
        Grid { provider, config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Short-circuits out-of-range resolutions when validation is on.
    /// With validation off the provider reports them instead.
    pub(crate) fn check_res(&self, res: u8) -> Result<()> {
        if self.config.validate_resolution && res > MAX_RESOLUTION {
            return Err(GridError::InvalidResolution(format!(
                "resolution {} is outside 0..={}",
                res, MAX_RESOLUTION
            )));
        }
        Ok(())
    }
}

/// Provider failure on an index-taking query: a rejected index is the
/// caller's fault, anything else is an operation failure.
pub(crate) fn index_error(e: ProviderError) -> GridError {
    match e {
        ProviderError::InvalidResolution(m) => GridError::InvalidResolution(m),
        ProviderError::InvalidArgument(m) => GridError::InvalidIndex(m),
        other => GridError::OperationFailed(other.to_string()),
    }
}

/// Provider failure where the operation has no dedicated error class.
pub(crate) fn op_failed(e: ProviderError) -> GridError {
    match e {
        ProviderError::InvalidResolution(m) => GridError::InvalidResolution(m),
        other => GridError::OperationFailed(other.to_string()),
    }
}
