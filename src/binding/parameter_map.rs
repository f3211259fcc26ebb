use indexmap::IndexMap;

/// Flat multimap of wire-supplied parameters.
///
/// Keys keep the order of their first occurrence and every key maps to the
/// values seen for it, in encounter order. A key that never appeared is absent
/// rather than mapped to an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `key=value&key2=value2` body.
    ///
    /// Runs of `&` and runs of `=` each act as a single delimiter, so
    /// `a==1&&b=2` parses the same as `a=1&b=2`. Only the first run of `=` in
    /// a pair splits it; the remainder is kept verbatim as the value. A pair
    /// without `=` gets the empty value. Empty segments are skipped and values
    /// are not percent-decoded.
    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();

        for pair in text.split('&').filter(|pair| !pair.is_empty()) {
            match pair.find('=') {
                Some(at) => {
                    let value = pair[at..].trim_start_matches('=');
                    map.insert(&pair[..at], value);
                }
                None => map.insert(pair, ""),
            }
        }

        map
    }

    /// Appends `value` to the sequence for `key`.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        match self.entries.get_mut(key) {
            Some(values) => values.push(value.into()),
            None => {
                self.entries.insert(key.to_string(), vec![value.into()]);
            }
        }
    }

    /// Every value for `key`, in encounter order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys starting with `namespace`, in first-occurrence order.
    pub fn keys_with_prefix<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a str> {
        self.keys().filter(move |key| key.starts_with(namespace))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-encodes the map as a body accepted by [`ParameterMap::parse`].
    ///
    /// Values of a repeated key are emitted together, at the position of the
    /// key's first occurrence.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .flat_map(|(key, values)| values.iter().map(move |value| format!("{key}={value}")))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key.as_ref(), value);
        }
        map
    }
}
