//! Flat transfer function on a particle's polar angle.
//!
//! Mainly a testing tool: the transfer function is constant (= 1) over
//! theta in [0, pi], so integrating over the generated angle reproduces
//! phase-space volumes and validates phase-space generators.
//!
//! Adds **1** dimension to the integration.
//!
//! | Input | Type | Description |
//! |---|---|---|
//! | `ps_point` | `f64` | Phase-space point in [0, 1] from the sampler. |
//! | `reco_particle` | [`LorentzVector`] | Reconstructed particle; supplies E, \|p\| and phi. |
//!
//! | Output | Type | Description |
//! |---|---|---|
//! | `output` | [`LorentzVector`] | Generated particle, differing from `reco_particle` only by theta. |
//! | `TF_times_jacobian` | `f64` | Transfer function (1) times the jacobian of [0,1] -> [0,pi]. |

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::error::MemResult;
use crate::input_tag::InputTag;
use crate::lorentz::LorentzVector;
use crate::module::{Module, Status};
use crate::parameters::ParameterSet;
use crate::pool::{Pool, SlotKey};

pub const MODULE_TYPE: &str = "FlatTransferFunctionOnTheta";

/// Result of one theta remapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaRemap {
    pub output: LorentzVector,
    pub tf_times_jacobian: f64,
}

/// Map `ps_point` onto theta = pi * ps_point and rebuild `reco_particle`
/// with that polar angle, keeping |p|, phi and E.
///
/// `ps_point` is not checked against [0, 1]; the sampler guarantees it.
pub fn remap_theta(ps_point: f64, reco_particle: &LorentzVector) -> ThetaRemap {
    let new_theta = PI * ps_point;
    let output = LorentzVector::from_spherical(
        reco_particle.p(),
        new_theta,
        reco_particle.phi(),
        reco_particle.e(),
    );

    ThetaRemap {
        output,
        tf_times_jacobian: PI,
    }
}

#[derive(Debug)]
pub struct FlatTransferFunctionOnTheta {
    name: String,
    ps_point: InputTag,
    input: InputTag,
    output: SlotKey,
    tf_times_jacobian: SlotKey,
}

impl FlatTransferFunctionOnTheta {
    pub fn new(pool: &mut Pool, parameters: &ParameterSet) -> MemResult<Self> {
        let name = parameters.module_name().to_string();

        let ps_point: InputTag = parameters.get("ps_point")?;
        ps_point.resolve(pool);

        let input: InputTag = parameters.get("reco_particle")?;
        input.resolve(pool);

        let output = pool.produce(&name, "output", LorentzVector::default())?;
        let tf_times_jacobian = pool.produce(&name, "TF_times_jacobian", 0.0)?;

        debug!(
            "Created {} '{}' (ps_point={}, reco_particle={})",
            MODULE_TYPE, name, ps_point, input
        );

        Ok(Self {
            name,
            ps_point,
            input,
            output,
            tf_times_jacobian,
        })
    }

    /// Factory used by the module registry.
    pub fn create(pool: &mut Pool, parameters: &ParameterSet) -> MemResult<Box<dyn Module>> {
        Ok(Box::new(Self::new(pool, parameters)?))
    }

    pub fn output_slot(&self) -> &SlotKey {
        &self.output
    }

    pub fn tf_times_jacobian_slot(&self) -> &SlotKey {
        &self.tf_times_jacobian
    }
}

impl Module for FlatTransferFunctionOnTheta {
    fn name(&self) -> &str {
        &self.name
    }

    fn work(&self, pool: &mut Pool) -> MemResult<Status> {
        let ps_point: f64 = pool.get(&self.ps_point)?;
        let reco_particle: LorentzVector = pool.get(&self.input)?;

        let remap = remap_theta(ps_point, &reco_particle);
        trace!(
            "{}: ps_point={} -> theta={}",
            self.name,
            ps_point,
            PI * ps_point
        );

        pool.put(&self.output, remap.output)?;
        pool.put(&self.tf_times_jacobian, remap.tf_times_jacobian)?;

        Ok(Status::Ok)
    }

    fn dimensions(&self) -> usize {
        1
    }
}
