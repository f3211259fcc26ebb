use crate::binding::{ConversionError, Describe, scalar_conversion::convert_scalar};
use serde_json::Value;
use std::fmt;

/// Scalar targets a single wire value converts into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// UTC timestamp; RFC 3339, `YYYY-MM-DD HH:MM:SS` or epoch milliseconds.
    DateTime,
    /// One of a fixed set of variant names.
    Enum(Vec<String>),
}

impl ScalarKind {
    /// Converts a single textual value, as found under `key`, to this kind.
    ///
    /// An empty value (other than for strings) converts to `null`.
    pub fn convert(&self, key: &str, raw: &str) -> Result<Value, ConversionError> {
        convert_scalar(key, self, Some(raw), true)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarKind::I8
                | ScalarKind::I16
                | ScalarKind::I32
                | ScalarKind::I64
                | ScalarKind::U8
                | ScalarKind::U16
                | ScalarKind::U32
                | ScalarKind::U64
                | ScalarKind::F32
                | ScalarKind::F64
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Char => "char",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Enum(variants) => return write!(f, "enum({})", variants.join("|")),
        };
        f.write_str(name)
    }
}

/// Structural classification of a declared parameter type.
///
/// Built once per method signature and reused for every call; the binder
/// branches on it instead of inspecting types at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    /// Nullable wrapper; absence binds to `null` instead of a default.
    Optional(Box<TypeDescriptor>),
    Array(Box<TypeDescriptor>),
    List(Box<TypeDescriptor>),
    /// Ordered by first occurrence, duplicates removed.
    Set(Box<TypeDescriptor>),
    Map {
        key: ScalarKind,
        value: Box<TypeDescriptor>,
        /// Statically known key space. `None` discovers keys from the wire.
        keys: Option<Vec<String>>,
    },
    Composite(CompositeDescriptor),
}

impl TypeDescriptor {
    pub fn of<T: Describe>() -> Self {
        T::describe()
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }

    pub fn set(element: TypeDescriptor) -> Self {
        TypeDescriptor::Set(Box::new(element))
    }

    pub fn map(key: ScalarKind, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key,
            value: Box::new(value),
            keys: None,
        }
    }

    /// A map whose keys are fixed in advance and bound like properties.
    pub fn keyed_map<I, S>(key: ScalarKind, value: TypeDescriptor, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeDescriptor::Map {
            key,
            value: Box::new(value),
            keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether the target is filled from a single wire value.
    pub fn is_scalar(&self) -> bool {
        match self {
            TypeDescriptor::Scalar(_) => true,
            TypeDescriptor::Optional(inner) => inner.is_scalar(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(kind) => write!(f, "{kind}"),
            TypeDescriptor::Optional(inner) => write!(f, "optional<{inner}>"),
            TypeDescriptor::Array(element) => write!(f, "array<{element}>"),
            TypeDescriptor::List(element) => write!(f, "list<{element}>"),
            TypeDescriptor::Set(element) => write!(f, "set<{element}>"),
            TypeDescriptor::Map { key, value, .. } => write!(f, "map<{key}, {value}>"),
            TypeDescriptor::Composite(composite) => f.write_str(&composite.name),
        }
    }
}

/// A bean-like type bound property by property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeDescriptor {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub descriptor: TypeDescriptor,
    /// Fail the bind when nothing on the wire addresses this property.
    pub required: bool,
}

impl CompositeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property described by `T`.
    pub fn field<T: Describe>(self, name: impl Into<String>) -> Self {
        self.property(name, T::describe(), false)
    }

    /// Adds a property described by `T` that must be present on the wire.
    pub fn required_field<T: Describe>(self, name: impl Into<String>) -> Self {
        self.property(name, T::describe(), true)
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
        required: bool,
    ) -> Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            descriptor,
            required,
        });
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::Composite(self)
    }
}
