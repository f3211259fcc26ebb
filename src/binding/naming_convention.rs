use crate::constants::{DEFAULT_INDEX_CLOSE, DEFAULT_INDEX_OPEN, DEFAULT_PROPERTY_SEPARATOR};
use serde::Deserialize;
use std::fmt;

/// How nested binding targets are addressed in a flat parameter map.
///
/// With the defaults a composite property is `user.name`, the second element
/// of a composite list is `users[1]` (its properties `users[1].name`) and a
/// map entry is `scores.alice`.
///
/// Every delimiter is non-empty. Deserialization goes through
/// [`NamingConvention::new`], so a config with an empty delimiter is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NamingConventionFields")]
pub struct NamingConvention {
    property_separator: String,
    index_open: String,
    index_close: String,
}

/// Raised when a [`NamingConvention`] is given an empty delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingConventionError {
    EmptyDelimiter(&'static str),
}

impl fmt::Display for NamingConventionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingConventionError::EmptyDelimiter(field) => {
                write!(f, "naming convention `{}` must not be empty", field)
            }
        }
    }
}

impl std::error::Error for NamingConventionError {}

#[derive(Deserialize)]
#[serde(default)]
struct NamingConventionFields {
    property_separator: String,
    index_open: String,
    index_close: String,
}

impl Default for NamingConventionFields {
    fn default() -> Self {
        Self {
            property_separator: DEFAULT_PROPERTY_SEPARATOR.to_string(),
            index_open: DEFAULT_INDEX_OPEN.to_string(),
            index_close: DEFAULT_INDEX_CLOSE.to_string(),
        }
    }
}

impl TryFrom<NamingConventionFields> for NamingConvention {
    type Error = NamingConventionError;

    fn try_from(fields: NamingConventionFields) -> Result<Self, Self::Error> {
        Self::new(fields.property_separator, fields.index_open, fields.index_close)
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            property_separator: DEFAULT_PROPERTY_SEPARATOR.to_string(),
            index_open: DEFAULT_INDEX_OPEN.to_string(),
            index_close: DEFAULT_INDEX_CLOSE.to_string(),
        }
    }
}

impl NamingConvention {
    pub fn new(
        property_separator: impl Into<String>,
        index_open: impl Into<String>,
        index_close: impl Into<String>,
    ) -> Result<Self, NamingConventionError> {
        let convention = Self {
            property_separator: property_separator.into(),
            index_open: index_open.into(),
            index_close: index_close.into(),
        };
        for (field, delimiter) in [
            ("property_separator", &convention.property_separator),
            ("index_open", &convention.index_open),
            ("index_close", &convention.index_close),
        ] {
            if delimiter.is_empty() {
                return Err(NamingConventionError::EmptyDelimiter(field));
            }
        }
        Ok(convention)
    }

    pub fn property_separator(&self) -> &str {
        &self.property_separator
    }

    pub fn index_open(&self) -> &str {
        &self.index_open
    }

    pub fn index_close(&self) -> &str {
        &self.index_close
    }

    /// `prefix` + separator + `name`.
    pub fn property(&self, prefix: &str, name: &str) -> String {
        format!("{prefix}{}{name}", self.property_separator)
    }

    /// `prefix` + open + `index` + close.
    pub fn element(&self, prefix: &str, index: usize) -> String {
        format!("{prefix}{}{index}{}", self.index_open, self.index_close)
    }

    /// The namespace under which properties and map entries of `prefix` live.
    pub fn namespace(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.property_separator)
    }

    /// Element indices addressed under `prefix`, ascending and distinct.
    pub fn indices<'a>(&self, prefix: &str, keys: impl Iterator<Item = &'a str>) -> Vec<usize> {
        let opening = format!("{prefix}{}", self.index_open);
        let mut indices: Vec<usize> = keys
            .filter_map(|key| key.strip_prefix(opening.as_str()))
            .filter_map(|rest| {
                let end = rest.find(self.index_close.as_str())?;
                rest[..end].parse().ok()
            })
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// The segment right after `namespace` in `key`, up to the next separator
    /// or index delimiter.
    pub fn next_segment<'k>(&self, namespace: &str, key: &'k str) -> Option<&'k str> {
        let rest = key.strip_prefix(namespace)?;
        let end = [
            rest.find(self.property_separator.as_str()),
            rest.find(self.index_open.as_str()),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
        let segment = &rest[..end];
        (!segment.is_empty()).then_some(segment)
    }

    /// Whether anything in `keys` addresses `prefix` itself, one of its
    /// properties, or one of its elements.
    pub fn addresses<'a>(&self, prefix: &str, mut keys: impl Iterator<Item = &'a str>) -> bool {
        let namespace = self.namespace(prefix);
        let opening = format!("{prefix}{}", self.index_open);
        keys.any(|key| key == prefix || key.starts_with(&namespace) || key.starts_with(&opening))
    }
}

#[cfg(test)]
mod tests {
    use super::{NamingConvention, NamingConventionError};

    #[test]
    fn finds_sorted_indices() {
        let convention = NamingConvention::default();
        let keys = ["users[2].name", "users[0].name", "users[2].age", "other[1]", "users[x]"];
        assert_eq!(convention.indices("users", keys.into_iter()), vec![0, 2]);
    }

    #[test]
    fn extracts_next_segment() {
        let convention = NamingConvention::default();
        assert_eq!(convention.next_segment("m.", "m.alice"), Some("alice"));
        assert_eq!(convention.next_segment("m.", "m.bob.age"), Some("bob"));
        assert_eq!(convention.next_segment("m.", "m.carol[0]"), Some("carol"));
        assert_eq!(convention.next_segment("m.", "m."), None);
        assert_eq!(convention.next_segment("m.", "n.alice"), None);
    }

    #[test]
    fn supports_custom_delimiters() {
        let convention = NamingConvention::new("_", "(", ")").unwrap();
        assert_eq!(convention.property("user", "name"), "user_name");
        assert_eq!(convention.element("ids", 3), "ids(3)");
    }

    #[test]
    fn rejects_empty_delimiters() {
        assert_eq!(
            NamingConvention::new("", "[", "]"),
            Err(NamingConventionError::EmptyDelimiter("property_separator"))
        );
        assert_eq!(
            NamingConvention::new(".", "[", ""),
            Err(NamingConventionError::EmptyDelimiter("index_close"))
        );
    }
}
