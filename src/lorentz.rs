use serde::{Deserialize, Serialize};

/// Energy-momentum four-vector stored in Cartesian form (px, py, pz, E).
///
/// Spherical quantities (|p|, theta, phi) are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Build a vector from momentum magnitude, polar angle, azimuthal angle and energy.
    pub fn from_spherical(p: f64, theta: f64, phi: f64, e: f64) -> Self {
        let sin_theta = theta.sin();
        Self {
            px: p * sin_theta * phi.cos(),
            py: p * sin_theta * phi.sin(),
            pz: p * theta.cos(),
            e,
        }
    }

    /// Overwrite all four components at once.
    pub fn set_coordinates(&mut self, px: f64, py: f64, pz: f64, e: f64) {
        *self = Self::new(px, py, pz, e);
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    /// Momentum magnitude |p|.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        (self.px * self.px + self.py * self.py).sqrt()
    }

    /// Polar angle in [0, pi]; 0 for the null vector.
    pub fn theta(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 && self.pz == 0.0 {
            return 0.0;
        }
        self.pt().atan2(self.pz)
    }

    /// Azimuthal angle in (-pi, pi]; 0 when the vector lies on the z axis.
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            return 0.0;
        }
        self.py.atan2(self.px)
    }

    /// Invariant mass. Spacelike vectors return a negative value.
    pub fn m(&self) -> f64 {
        let p = self.p();
        let m2 = self.e * self.e - p * p;
        if m2 >= 0.0 {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }
}
