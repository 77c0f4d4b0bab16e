#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `angleAxis.scaleWeight`, `radiusAxis.categories` and `data.dataset`
    /// must have one entry per category.
    LengthMismatch {
        scale_weight: usize,
        categories: usize,
        dataset: usize,
    },
    EmptyWeights,
    NonPositiveWeight {
        index: usize,
        weight: f64,
    },
    NonFiniteValue {
        path: String,
    },
    InvalidRange {
        min: f64,
        max: f64,
    },
    NonPositiveValue {
        path: String,
        value: f64,
    },
    InvalidPath(String),
    UnknownPath(String),
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LengthMismatch {
                scale_weight,
                categories,
                dataset,
            } => write!(
                f,
                "length mismatch: scaleWeight has {scale_weight}, categories has {categories}, dataset has {dataset}"
            ),
            ConfigError::EmptyWeights => write!(f, "angleAxis.scaleWeight is empty"),
            ConfigError::NonPositiveWeight { index, weight } => {
                write!(f, "angleAxis.scaleWeight[{index}] must be positive (got {weight})")
            }
            ConfigError::NonFiniteValue { path } => write!(f, "{path} must be finite"),
            ConfigError::InvalidRange { min, max } => {
                write!(f, "angleAxis range is empty: minValue {min} >= maxValue {max}")
            }
            ConfigError::NonPositiveValue { path, value } => {
                write!(f, "{path} must be positive (got {value})")
            }
            ConfigError::InvalidPath(path) => write!(f, "malformed config path: {path:?}"),
            ConfigError::UnknownPath(path) => write!(f, "no config field at {path}"),
            ConfigError::TypeMismatch { path, expected } => {
                write!(f, "{path} expects {expected}")
            }
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
