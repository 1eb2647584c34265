//! Building blocks for Matrix Element Method integrations.
//!
//! Modules read and write named slots of a [`Pool`], are built from a
//! [`ParameterSet`] through a [`ModuleRegistry`], and report how many
//! unit-hypercube dimensions they consume.

mod config;
mod error;
mod input_tag;
mod lorentz;
mod module;
mod parameters;
mod pool;
mod registry;

pub mod flat_transfer_function_on_theta;

pub use config::Config;
pub use error::{MemError, MemResult};
pub use flat_transfer_function_on_theta::{remap_theta, FlatTransferFunctionOnTheta, ThetaRemap};
pub use input_tag::InputTag;
pub use lorentz::LorentzVector;
pub use module::{Module, Status};
pub use parameters::ParameterSet;
pub use pool::{Pool, PoolValue, SlotKey, Value};
pub use registry::{ModuleFactory, ModuleRegistry, REGISTRY};
