use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{MemError, MemResult};
use crate::pool::{Pool, SlotKey};

/// Reference to a value produced by another module (or by the sampler).
///
/// Written as `module::parameter`, or `module::parameter/index` to select one
/// element of a vector-valued slot such as `cuba::ps_points/0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct InputTag {
    pub module: String,
    pub parameter: String,
    pub index: Option<usize>,
}

impl InputTag {
    pub fn new(module: &str, parameter: &str) -> Self {
        Self {
            module: module.to_string(),
            parameter: parameter.to_string(),
            index: None,
        }
    }

    pub fn indexed(module: &str, parameter: &str, index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::new(module, parameter)
        }
    }

    /// The pool slot this tag points into (the index is not part of the slot).
    pub fn slot(&self) -> SlotKey {
        SlotKey::new(&self.module, &self.parameter)
    }

    /// Declare this tag as an input of the calling module. The slot itself is
    /// bound later, once every module has registered its outputs.
    pub fn resolve(&self, pool: &mut Pool) {
        pool.require(self.slot());
    }
}

impl FromStr for InputTag {
    type Err = MemError;

    fn from_str(s: &str) -> MemResult<Self> {
        let invalid = || MemError::InvalidInputTag(s.to_string());

        let (module, rest) = s.split_once("::").ok_or_else(invalid)?;
        let (parameter, index) = match rest.split_once('/') {
            Some((parameter, index)) => {
                let index = index.parse::<usize>().map_err(|_| invalid())?;
                (parameter, Some(index))
            }
            None => (rest, None),
        };

        if module.is_empty() || parameter.is_empty() || parameter.contains("::") {
            return Err(invalid());
        }

        Ok(Self {
            module: module.to_string(),
            parameter: parameter.to_string(),
            index,
        })
    }
}

impl TryFrom<String> for InputTag {
    type Error = MemError;

    fn try_from(s: String) -> MemResult<Self> {
        s.parse()
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.parameter)?;
        if let Some(index) = self.index {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_tag() {
        let tag: InputTag = "input::particles".parse().unwrap();
        assert_eq!(tag, InputTag::new("input", "particles"));
        assert_eq!(tag.index, None);
        assert_eq!(tag.to_string(), "input::particles");
    }

    #[test]
    fn test_parse_indexed_tag() {
        let tag: InputTag = "cuba::ps_points/3".parse().unwrap();
        assert_eq!(tag, InputTag::indexed("cuba", "ps_points", 3));
        assert_eq!(tag.to_string(), "cuba::ps_points/3");
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        for bad in [
            "no_separator",
            "::parameter",
            "module::",
            "a::b::c",
            "cuba::ps_points/",
            "cuba::ps_points/-1",
            "cuba::ps_points/x",
        ] {
            let result = bad.parse::<InputTag>();
            assert!(
                matches!(result, Err(MemError::InvalidInputTag(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let tag: InputTag = serde_json::from_str(r#""cuba::ps_points/0""#).unwrap();
        assert_eq!(tag, InputTag::indexed("cuba", "ps_points", 0));

        let bad = serde_json::from_str::<InputTag>(r#""broken""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_slot_ignores_index() {
        let tag = InputTag::indexed("cuba", "ps_points", 1);
        assert_eq!(tag.slot(), SlotKey::new("cuba", "ps_points"));
    }
}
