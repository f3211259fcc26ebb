use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A file sent as a binary payload, optionally under a declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrapper {
    path: PathBuf,
    name: Option<String>,
}

impl FileWrapper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    /// Overrides the name announced to the receiver.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared name, or the final component of the path.
    pub fn file_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => file_name_of(&self.path),
        }
    }
}

/// The value handed to [`InvocationFormatter::serialize`](crate::InvocationFormatter::serialize).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A structured value, encoded by the JSON codec.
    Value(Value),
    File(FileWrapper),
    /// A bare file reference.
    Path(PathBuf),
}

impl Payload {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Payload::Value)
    }

    /// The file behind this payload and the name to announce for it.
    pub fn as_file(&self) -> Option<(&Path, String)> {
        match self {
            Payload::File(wrapper) => Some((wrapper.path(), wrapper.file_name())),
            Payload::Path(path) => Some((path.as_path(), file_name_of(path))),
            Payload::Value(_) => None,
        }
    }

    /// The value to encode as JSON; files encode as their path.
    pub fn to_json_value(&self) -> Value {
        match self {
            Payload::Value(value) => value.clone(),
            Payload::File(wrapper) => Value::String(wrapper.path().to_string_lossy().into_owned()),
            Payload::Path(path) => Value::String(path.to_string_lossy().into_owned()),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

impl From<FileWrapper> for Payload {
    fn from(wrapper: FileWrapper) -> Self {
        Payload::File(wrapper)
    }
}

impl From<PathBuf> for Payload {
    fn from(path: PathBuf) -> Self {
        Payload::Path(path)
    }
}

impl From<&Path> for Payload {
    fn from(path: &Path) -> Self {
        Payload::Path(path.to_path_buf())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
