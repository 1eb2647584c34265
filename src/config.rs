// Configuration selecting which modules to build, and in which order
use serde::Deserialize;
use tracing::debug;

use crate::error::MemResult;
use crate::module::Module;
use crate::parameters::ParameterSet;
use crate::pool::Pool;
use crate::registry::ModuleRegistry;

/// Ordered list of module configurations.
///
/// Loaded from JSON of the form
///
/// ```json
/// {"modules": [
///     {"type": "FlatTransferFunctionOnTheta", "name": "tf_theta",
///      "parameters": {"ps_point": "cuba::ps_points/0", "reco_particle": "input::particles/0"}}
/// ]}
/// ```
///
/// Each entry's `type` selects a factory from a [`ModuleRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub modules: Vec<ParameterSet>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> MemResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        debug!("Loaded configuration with {} module(s)", config.modules.len());
        Ok(config)
    }

    pub fn add_module(&mut self, parameters: ParameterSet) {
        self.modules.push(parameters);
    }

    /// Build every configured module, in order, registering their outputs in
    /// `pool`. Inputs are bound afterwards with [`Pool::check_inputs`].
    pub fn instantiate(
        &self,
        registry: &ModuleRegistry,
        pool: &mut Pool,
    ) -> MemResult<Vec<Box<dyn Module>>> {
        self.modules
            .iter()
            .map(|parameters| registry.create(pool, parameters))
            .collect()
    }

    /// Total number of sampling dimensions the integrator must allocate.
    pub fn dimensions(modules: &[Box<dyn Module>]) -> usize {
        modules.iter().map(|module| module.dimensions()).sum()
    }
}
