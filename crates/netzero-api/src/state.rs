use netzero_core::Result;
use netzero_geo::UpstreamExpander;

use crate::config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub expander: UpstreamExpander,
}

impl AppState {
    pub fn new(expander: UpstreamExpander) -> Self {
        Self { expander }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(UpstreamExpander::new(config.upstream_timeout)?))
    }
}
