use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Dotted location in a config tree, e.g. `angleAxis.startAngle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath(String);

impl ConfigPath {
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(ConfigError::InvalidPath(path.to_string()));
        }
        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }
}

impl std::fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value written to a config leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Number(f64),
    Text(String),
    Numbers(Vec<f64>),
    Texts(Vec<String>),
}

impl ConfigValue {
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            ConfigValue::Numbers(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn into_number(self) -> Result<f64, PatchFailure> {
        match self {
            ConfigValue::Number(n) => Ok(n),
            _ => Err(PatchFailure::TypeMismatch("a number")),
        }
    }

    pub(crate) fn into_numbers(self) -> Result<Vec<f64>, PatchFailure> {
        match self {
            ConfigValue::Numbers(v) => Ok(v),
            _ => Err(PatchFailure::TypeMismatch("an array of numbers")),
        }
    }

    pub(crate) fn into_texts(self) -> Result<Vec<String>, PatchFailure> {
        match self {
            ConfigValue::Texts(v) => Ok(v),
            // `[]` deserializes as the first array variant.
            ConfigValue::Numbers(v) if v.is_empty() => Ok(Vec::new()),
            _ => Err(PatchFailure::TypeMismatch("an array of strings")),
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Number(v)
    }
}

impl From<Vec<f64>> for ConfigValue {
    fn from(v: Vec<f64>) -> Self {
        ConfigValue::Numbers(v)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(v: Vec<String>) -> Self {
        ConfigValue::Texts(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Text(v.to_string())
    }
}

/// One leaf write, as reported to the store's listener.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMutation {
    pub path: ConfigPath,
    pub value: ConfigValue,
}

/// Why a setter rejected a write. The store attaches the full path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchFailure {
    UnknownField,
    TypeMismatch(&'static str),
}

impl PatchFailure {
    pub fn at(self, path: &ConfigPath) -> ConfigError {
        match self {
            PatchFailure::UnknownField => ConfigError::UnknownPath(path.to_string()),
            PatchFailure::TypeMismatch(expected) => ConfigError::TypeMismatch {
                path: path.to_string(),
                expected,
            },
        }
    }
}

/// Setter-based write access to a config section by path segments.
pub trait Patchable {
    fn set(&mut self, segments: &[&str], value: ConfigValue) -> Result<(), PatchFailure>;
}

/// Appends a mutation for `path` when `old != new`.
pub(crate) fn push_if_changed<T>(out: &mut Vec<PathMutation>, path: &str, old: &T, new: &T)
where
    T: PartialEq + Clone + Into<ConfigValue>,
{
    if old != new {
        out.push(PathMutation {
            path: ConfigPath(path.to_string()),
            value: new.clone().into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigPath, ConfigValue};
    use crate::error::ConfigError;

    #[test]
    fn parses_dotted_paths() {
        let path = ConfigPath::parse("angleAxis.tick.distance").expect("valid");
        assert_eq!(path.segments(), vec!["angleAxis", "tick", "distance"]);
        assert_eq!(path.to_string(), "angleAxis.tick.distance");
    }

    #[test]
    fn rejects_empty_segments() {
        for bad in ["", ".", "data.", ".data", "a..b"] {
            assert_eq!(
                ConfigPath::parse(bad),
                Err(ConfigError::InvalidPath(bad.to_string()))
            );
        }
    }

    #[test]
    fn json_values_pick_variants() {
        let n = ConfigValue::from_json(serde_json::json!(1.5)).expect("number");
        assert_eq!(n, ConfigValue::Number(1.5));
        let v = ConfigValue::from_json(serde_json::json!([1, 2])).expect("numbers");
        assert_eq!(v, ConfigValue::Numbers(vec![1.0, 2.0]));
        let s = ConfigValue::from_json(serde_json::json!(["A", "B"])).expect("texts");
        assert_eq!(s, ConfigValue::Texts(vec!["A".to_string(), "B".to_string()]));
        assert!(ConfigValue::from_json(serde_json::json!({"a": 1})).is_err());
        // No config leaf holds a flag.
        assert!(ConfigValue::from_json(serde_json::json!(true)).is_err());
    }

    #[test]
    fn empty_array_is_accepted_as_texts() {
        let v = ConfigValue::from_json(serde_json::json!([])).expect("array");
        assert_eq!(v.into_texts(), Ok(Vec::new()));
    }
}
