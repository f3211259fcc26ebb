use crate::{
    constants::{CONTENT_DISPOSITION, CONTENT_TYPE},
    header::ContentType,
};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderField {
    /// Canonical spelling used when the field is re-emitted.
    name: String,
    values: Vec<String>,
}

/// Wire metadata accompanying an invocation body.
///
/// Field names are case-insensitive for lookup and are re-emitted in their
/// canonical form (`content-type` becomes `Content-Type`). Fields keep the
/// order in which they were first set; a field may carry several values.
///
/// A `Header` is created per invocation by the transport and lent to the
/// formatter, which may set `Content-Type` and `Content-Disposition` while
/// serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: IndexMap<String, HeaderField>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to a single value, discarding any previous values.
    ///
    /// A replaced field keeps its original position.
    pub fn put(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.get_mut(&Self::key(name)) {
            Some(field) => field.values = vec![value],
            None => {
                self.fields.insert(
                    Self::key(name),
                    HeaderField {
                        name: Self::canonical_name(name),
                        values: vec![value],
                    },
                );
            }
        }
    }

    /// Adds a value to `name`, keeping any values already present.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.fields
            .entry(Self::key(name))
            .or_insert_with(|| HeaderField {
                name: Self::canonical_name(name),
                values: Vec::new(),
            })
            .values
            .push(value.into());
    }

    /// Returns the first value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&Self::key(name))
            .and_then(|field| field.values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.fields
            .get(&Self::key(name))
            .map(|field| field.values.as_slice())
            .unwrap_or(&[])
    }

    /// Removes every value of `name`, returning them.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.fields
            .shift_remove(&Self::key(name))
            .map(|field| field.values)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&Self::key(name))
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(canonical name, value)` pairs in serialization order.
    ///
    /// A field with several values yields one pair per value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.values().flat_map(|field| {
            field
                .values
                .iter()
                .map(move |value| (field.name.as_str(), value.as_str()))
        })
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.put(CONTENT_TYPE, content_type);
    }

    /// The `Content-Type` field exactly as it was set.
    pub fn content_type_raw(&self) -> Option<&str> {
        self.get(CONTENT_TYPE)
    }

    /// The `Content-Type` field split into its essence and charset.
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type_raw().map(ContentType::parse)
    }

    pub fn set_content_disposition(&mut self, disposition: impl Into<String>) {
        self.put(CONTENT_DISPOSITION, disposition);
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.get(CONTENT_DISPOSITION)
    }

    #[inline]
    fn key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }

    /// Title-cases each `-` separated segment (`x-request-id` -> `X-Request-Id`).
    fn canonical_name(name: &str) -> String {
        name.trim()
            .split('-')
            .map(|segment| {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_ascii_uppercase().to_string()
                            + &chars.as_str().to_ascii_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::Header;

    #[test]
    fn canonicalizes_names() {
        assert_eq!(Header::canonical_name("content-TYPE"), "Content-Type");
        assert_eq!(Header::canonical_name(" x-request-id "), "X-Request-Id");
        assert_eq!(Header::canonical_name("etag"), "Etag");
    }
}
