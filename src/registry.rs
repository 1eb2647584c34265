// Explicit module factory map, populated at process start
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{MemError, MemResult};
use crate::flat_transfer_function_on_theta::{self, FlatTransferFunctionOnTheta};
use crate::module::Module;
use crate::parameters::ParameterSet;
use crate::pool::Pool;

/// Builds a module from its parameters, registering its outputs in the pool.
pub type ModuleFactory = fn(&mut Pool, &ParameterSet) -> MemResult<Box<dyn Module>>;

// Process-wide registry holding every built-in module type
pub static REGISTRY: Lazy<Mutex<ModuleRegistry>> =
    Lazy::new(|| Mutex::new(ModuleRegistry::with_builtin_modules()));

/// Mapping from module type name (the `type` field of a module's
/// configuration) to the factory that builds it.
///
/// A process-wide instance is exposed via [`ModuleRegistry::global`]; tests
/// and embedders that need isolation can build their own with
/// [`ModuleRegistry::new`] or [`ModuleRegistry::with_builtin_modules`].
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    factories: HashMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all modules shipped by this crate
    pub fn with_builtin_modules() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            flat_transfer_function_on_theta::MODULE_TYPE.to_string(),
            FlatTransferFunctionOnTheta::create,
        );
        registry
    }

    pub fn register(&mut self, module_type: &str, factory: ModuleFactory) -> MemResult<()> {
        if self.factories.contains_key(module_type) {
            return Err(MemError::DuplicateModuleType(module_type.to_string()));
        }
        debug!("Registering module type {}", module_type);
        self.factories.insert(module_type.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, module_type: &str) -> bool {
        self.factories.contains_key(module_type)
    }

    /// Registered type names, sorted
    pub fn available(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the module described by `parameters`.
    pub fn create(&self, pool: &mut Pool, parameters: &ParameterSet) -> MemResult<Box<dyn Module>> {
        let factory = self
            .factories
            .get(parameters.module_type())
            .ok_or_else(|| MemError::UnknownModuleType(parameters.module_type().to_string()))?;
        factory(pool, parameters)
    }

    /// Get the global registry instance
    pub fn global() -> std::sync::MutexGuard<'static, Self> {
        REGISTRY
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
