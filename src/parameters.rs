use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{MemError, MemResult};

/// Configuration of one module instance: which factory to use, the instance
/// name its outputs are published under, and its raw parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterSet {
    #[serde(rename = "type")]
    module_type: String,
    name: String,
    #[serde(default)]
    parameters: Map<String, JsonValue>,
}

impl ParameterSet {
    pub fn new(module_type: &str, name: &str) -> Self {
        Self {
            module_type: module_type.to_string(),
            name: name.to_string(),
            parameters: Map::new(),
        }
    }

    /// Builder-style parameter insertion, mostly useful in tests.
    pub fn with(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<JsonValue>) {
        self.parameters.insert(key.to_string(), value.into());
    }

    pub fn module_type(&self) -> &str {
        &self.module_type
    }

    pub fn module_name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Typed lookup of a parameter.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> MemResult<T> {
        let raw = self
            .parameters
            .get(key)
            .ok_or_else(|| MemError::MissingParameter {
                module: self.name.clone(),
                parameter: key.to_string(),
            })?;
        T::deserialize(raw).map_err(|source| MemError::InvalidParameter {
            module: self.name.clone(),
            parameter: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_tag::InputTag;

    #[test]
    fn test_parameter_set_from_json() {
        let params: ParameterSet = serde_json::from_str(
            r#"{
                "type": "FlatTransferFunctionOnTheta",
                "name": "tf_theta",
                "parameters": {"ps_point": "cuba::ps_points/0", "scale": 2.5}
            }"#,
        )
        .unwrap();
        assert_eq!(params.module_type(), "FlatTransferFunctionOnTheta");
        assert_eq!(params.module_name(), "tf_theta");
        assert!(params.exists("scale"));
        assert_eq!(params.get::<f64>("scale").unwrap(), 2.5);
        assert_eq!(
            params.get::<InputTag>("ps_point").unwrap(),
            InputTag::indexed("cuba", "ps_points", 0)
        );
    }

    #[test]
    fn test_parameters_default_to_empty() {
        let params: ParameterSet =
            serde_json::from_str(r#"{"type": "A", "name": "a"}"#).unwrap();
        assert!(!params.exists("anything"));
    }

    #[test]
    fn test_missing_parameter() {
        let params = ParameterSet::new("A", "a");
        let err = params.get::<f64>("absent").unwrap_err();
        assert!(matches!(
            err,
            MemError::MissingParameter { ref module, ref parameter } if module == "a" && parameter == "absent"
        ));
    }

    #[test]
    fn test_invalid_parameter() {
        let params = ParameterSet::new("A", "a").with("tag", "not a tag");
        let err = params.get::<InputTag>("tag").unwrap_err();
        assert!(matches!(err, MemError::InvalidParameter { .. }));

        let err = params.get::<f64>("tag").unwrap_err();
        assert!(matches!(err, MemError::InvalidParameter { .. }));
    }
}
