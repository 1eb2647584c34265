// Per-thread storage shared by all modules of one integration
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::mem::discriminant;

use tracing::{debug, warn};

use crate::error::{MemError, MemResult};
use crate::input_tag::InputTag;
use crate::lorentz::LorentzVector;

/// Address of a slot in the pool: the producing module and the output name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub module: String,
    pub name: String,
}

impl SlotKey {
    pub fn new(module: &str, name: &str) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

/// Values a slot can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    Doubles(Vec<f64>),
    Vector(LorentzVector),
    Vectors(Vec<LorentzVector>),
}

/// Conversion between Rust types and pool values.
pub trait PoolValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;

    /// Read one element of a vector-valued slot, for indexed input tags.
    fn from_element(_value: &Value, _index: usize) -> Option<Self> {
        None
    }

    fn into_value(self) -> Value;
}

impl PoolValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(x) => Some(*x),
            _ => None,
        }
    }

    fn from_element(value: &Value, index: usize) -> Option<Self> {
        match value {
            Value::Doubles(xs) => xs.get(index).copied(),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Double(self)
    }
}

impl PoolValue for Vec<f64> {
    const TYPE_NAME: &'static str = "Vec<f64>";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Doubles(xs) => Some(xs.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Doubles(self)
    }
}

impl PoolValue for LorentzVector {
    const TYPE_NAME: &'static str = "LorentzVector";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    fn from_element(value: &Value, index: usize) -> Option<Self> {
        match value {
            Value::Vectors(vs) => vs.get(index).copied(),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Vector(self)
    }
}

impl PoolValue for Vec<LorentzVector> {
    const TYPE_NAME: &'static str = "Vec<LorentzVector>";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vectors(vs) => Some(vs.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Vectors(self)
    }
}

/// Named value slots written by producers and read by consumers.
///
/// Modules register their outputs with [`Pool::produce`] at construction and
/// declare their inputs through [`InputTag::resolve`]. Once every module is
/// built, [`Pool::check_inputs`] binds the two sides.
#[derive(Debug, Default)]
pub struct Pool {
    slots: HashMap<SlotKey, Value>,
    required: HashSet<SlotKey>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new output slot owned by the pool.
    pub fn produce<T: PoolValue>(
        &mut self,
        module: &str,
        name: &str,
        initial: T,
    ) -> MemResult<SlotKey> {
        let key = SlotKey::new(module, name);
        if self.slots.contains_key(&key) {
            return Err(MemError::DuplicateOutput(key.to_string()));
        }
        debug!("Registering output {} ({})", key, T::TYPE_NAME);
        self.slots.insert(key.clone(), initial.into_value());
        Ok(key)
    }

    /// Overwrite the content of an existing slot. The value type must match
    /// the one the slot was produced with.
    pub fn put<T: PoolValue>(&mut self, key: &SlotKey, value: T) -> MemResult<()> {
        let slot = self
            .slots
            .get_mut(key)
            .ok_or_else(|| MemError::UnresolvedInput(key.to_string()))?;
        let value = value.into_value();
        if discriminant(&*slot) != discriminant(&value) {
            return Err(MemError::TypeMismatch {
                slot: key.to_string(),
                expected: T::TYPE_NAME,
            });
        }
        *slot = value;
        Ok(())
    }

    /// Typed read through an input tag.
    pub fn get<T: PoolValue>(&self, tag: &InputTag) -> MemResult<T> {
        let key = tag.slot();
        let value = self
            .slots
            .get(&key)
            .ok_or_else(|| MemError::UnresolvedInput(tag.to_string()))?;
        let typed = match tag.index {
            Some(index) => T::from_element(value, index),
            None => T::from_value(value),
        };
        typed.ok_or_else(|| MemError::TypeMismatch {
            slot: tag.to_string(),
            expected: T::TYPE_NAME,
        })
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    pub(crate) fn require(&mut self, key: SlotKey) {
        self.required.insert(key);
    }

    /// Inputs declared by some module but produced by none, sorted.
    pub fn unresolved_inputs(&self) -> Vec<SlotKey> {
        let mut missing: Vec<SlotKey> = self
            .required
            .iter()
            .filter(|key| !self.slots.contains_key(*key))
            .cloned()
            .collect();
        missing.sort();
        missing
    }

    /// Binding step: fail on the first input nobody produces.
    pub fn check_inputs(&self) -> MemResult<()> {
        let missing = self.unresolved_inputs();
        for key in &missing {
            warn!("Input {} is required but never produced", key);
        }
        match missing.into_iter().next() {
            Some(key) => Err(MemError::UnresolvedInput(key.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produce_and_get() {
        let mut pool = Pool::new();
        let key = pool.produce("tf", "weight", 2.0).unwrap();
        assert!(pool.contains(&key));

        let value: f64 = pool.get(&InputTag::new("tf", "weight")).unwrap();
        assert_eq!(value, 2.0);
    }

    #[test]
    fn test_duplicate_output_is_rejected() {
        let mut pool = Pool::new();
        pool.produce("tf", "weight", 1.0).unwrap();
        let err = pool.produce("tf", "weight", 1.0).unwrap_err();
        assert!(matches!(err, MemError::DuplicateOutput(ref s) if s == "tf::weight"));
    }

    #[test]
    fn test_put_overwrites_value() {
        let mut pool = Pool::new();
        let key = pool.produce("tf", "output", LorentzVector::default()).unwrap();
        let v = LorentzVector::new(1.0, 2.0, 3.0, 4.0);
        pool.put(&key, v).unwrap();
        assert_eq!(pool.get::<LorentzVector>(&InputTag::new("tf", "output")).unwrap(), v);
    }

    #[test]
    fn test_put_checks_type_and_existence() {
        let mut pool = Pool::new();
        let key = pool.produce("tf", "weight", 1.0).unwrap();
        let err = pool.put(&key, LorentzVector::default()).unwrap_err();
        assert!(matches!(err, MemError::TypeMismatch { .. }));

        let err = pool.put(&SlotKey::new("nobody", "x"), 1.0).unwrap_err();
        assert!(matches!(err, MemError::UnresolvedInput(_)));
    }

    #[test]
    fn test_indexed_read() {
        let mut pool = Pool::new();
        pool.produce("cuba", "ps_points", vec![0.25, 0.75]).unwrap();

        let second: f64 = pool.get(&InputTag::indexed("cuba", "ps_points", 1)).unwrap();
        assert_eq!(second, 0.75);

        let out_of_range = pool.get::<f64>(&InputTag::indexed("cuba", "ps_points", 2));
        assert!(matches!(out_of_range, Err(MemError::TypeMismatch { .. })));

        let whole: Vec<f64> = pool.get(&InputTag::new("cuba", "ps_points")).unwrap();
        assert_eq!(whole, vec![0.25, 0.75]);

        let particles = vec![LorentzVector::new(0.0, 0.0, 1.0, 1.0), LorentzVector::default()];
        pool.produce("input", "particles", particles.clone()).unwrap();
        let first: LorentzVector = pool.get(&InputTag::indexed("input", "particles", 0)).unwrap();
        assert_eq!(first, particles[0]);
    }

    #[test]
    fn test_typed_read_mismatch() {
        let mut pool = Pool::new();
        pool.produce("tf", "weight", 1.0).unwrap();
        let err = pool
            .get::<LorentzVector>(&InputTag::new("tf", "weight"))
            .unwrap_err();
        assert!(matches!(err, MemError::TypeMismatch { expected: "LorentzVector", .. }));
    }

    #[test]
    fn test_check_inputs_reports_unbound_slots() {
        let mut pool = Pool::new();
        InputTag::new("input", "particles").resolve(&mut pool);
        InputTag::indexed("cuba", "ps_points", 0).resolve(&mut pool);

        assert_eq!(
            pool.unresolved_inputs(),
            vec![SlotKey::new("cuba", "ps_points"), SlotKey::new("input", "particles")]
        );
        let err = pool.check_inputs().unwrap_err();
        assert!(matches!(err, MemError::UnresolvedInput(ref s) if s == "cuba::ps_points"));

        pool.produce("cuba", "ps_points", vec![0.5]).unwrap();
        pool.produce("input", "particles", LorentzVector::default()).unwrap();
        assert!(pool.check_inputs().is_ok());
    }
}
