use std::fmt;

/// A parsed `Content-Type` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Lowercased `type/subtype` without parameters (e.g. `application/json`).
    pub essence: String,

    /// The `charset` parameter, if one was given.
    pub charset: Option<String>,
}

impl ContentType {
    /// Parses a raw header value such as `Application/JSON; charset="utf-8"`.
    ///
    /// Parsing never fails; unknown parameters are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(';');
        let essence = parts
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let charset = parts.find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                let value = value.trim().trim_matches('"').trim();
                (!value.is_empty()).then(|| value.to_string())
            } else {
                None
            }
        });

        Self { essence, charset }
    }

    /// Matches the essence against a top-level type such as `image/`.
    pub fn is_type(&self, top_level: &str) -> bool {
        self.essence.starts_with(top_level)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.charset {
            Some(charset) => write!(f, "{}; charset={}", self.essence, charset),
            None => write!(f, "{}", self.essence),
        }
    }
}
