use std::fmt;

/// Errors raised while binding wire parameters to typed values.
#[derive(Debug)]
pub enum ConversionError {
    /// A wire value could not be converted to its scalar target.
    InvalidScalar {
        key: String,
        target: String,
        value: String,
        reason: String,
    },
    /// A required parameter or property was not addressed by any key.
    MissingRequired { key: String, target: String },
    /// A map entry's key segment does not convert to the key type. `key` is
    /// the full wire key of the entry.
    InvalidMapKey { key: String, target: String },
    /// A bound argument does not deserialize into the requested Rust type.
    Argument {
        index: usize,
        source: serde_json::Error,
    },
}

impl ConversionError {
    /// The wire key the failure refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConversionError::InvalidScalar { key, .. }
            | ConversionError::MissingRequired { key, .. }
            | ConversionError::InvalidMapKey { key, .. } => Some(key),
            ConversionError::Argument { .. } => None,
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidScalar {
                key,
                target,
                value,
                reason,
            } => write!(
                f,
                "cannot convert `{}` = {:?} to {}: {}",
                key, value, target, reason
            ),
            ConversionError::MissingRequired { key, target } => {
                write!(f, "missing required parameter `{}` ({})", key, target)
            }
            ConversionError::InvalidMapKey { key, target } => {
                write!(f, "map entry `{}` does not have a valid {} key", key, target)
            }
            ConversionError::Argument { index, source } => {
                write!(f, "argument {} has an unexpected shape: {}", index, source)
            }
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Argument { source, .. } => Some(source),
            _ => None,
        }
    }
}
