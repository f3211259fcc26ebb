use crate::binding::{
    CompositeDescriptor, ConversionError, NamingConvention, ParameterDescriptor, ParameterMap,
    ScalarKind, TypeDescriptor,
    scalar_conversion::{convert_scalar, validate_key},
};
use serde_json::{Map, Value};

/// Binds a flat [`ParameterMap`] to values shaped by a [`TypeDescriptor`].
///
/// The provider holds only its [`NamingConvention`], so one instance can
/// serve any number of concurrent calls. Identical inputs always produce equal
/// outputs.
///
/// Binding rules, given a `prefix`:
/// - scalars take the first value under `prefix`;
/// - collections of scalars take every value under `prefix`, in order, falling
///   back to indexed keys (`prefix[0]`, `prefix[1]`, ...) when `prefix` itself
///   is absent;
/// - collections of non-scalars bind one element per index found under
///   `prefix[`;
/// - composites bind each property under `prefix.property`;
/// - maps bind each key found under `prefix.` (or each statically known key).
///
/// Bound values are `serde_json::Value`s, so they deserialize into the Rust
/// types the descriptors were taken from.
#[derive(Debug, Clone, Default)]
pub struct ConversionProvider {
    convention: NamingConvention,
}

impl ConversionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convention(convention: NamingConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Binds the value addressed by `prefix` to `target`.
    pub fn convert(
        &self,
        prefix: &str,
        target: &TypeDescriptor,
        parameters: &ParameterMap,
    ) -> Result<Value, ConversionError> {
        self.bind(prefix, target, parameters, false)
    }

    /// Binds a declared method parameter under `prefix`, enforcing
    /// [`ParameterDescriptor::required`].
    pub fn convert_parameter(
        &self,
        prefix: &str,
        parameter: &ParameterDescriptor,
        parameters: &ParameterMap,
    ) -> Result<Value, ConversionError> {
        if parameter.required && !self.convention.addresses(prefix, parameters.keys()) {
            return Err(ConversionError::MissingRequired {
                key: prefix.to_string(),
                target: parameter.descriptor.to_string(),
            });
        }

        let value = self.convert(prefix, &parameter.descriptor, parameters)?;
        tracing::trace!(prefix, target = %parameter.descriptor, "bound parameter");
        Ok(value)
    }

    fn bind(
        &self,
        prefix: &str,
        target: &TypeDescriptor,
        parameters: &ParameterMap,
        nullable: bool,
    ) -> Result<Value, ConversionError> {
        match target {
            TypeDescriptor::Scalar(kind) => {
                convert_scalar(prefix, kind, parameters.first(prefix), nullable)
            }
            TypeDescriptor::Optional(inner) => {
                if inner.is_scalar() {
                    self.bind(prefix, inner, parameters, true)
                } else if self.convention.addresses(prefix, parameters.keys()) {
                    self.bind(prefix, inner, parameters, false)
                } else {
                    Ok(Value::Null)
                }
            }
            TypeDescriptor::Array(element) | TypeDescriptor::List(element) => {
                self.bind_collection(prefix, element, parameters, false)
            }
            TypeDescriptor::Set(element) => self.bind_collection(prefix, element, parameters, true),
            TypeDescriptor::Map { key, value, keys } => {
                self.bind_map(prefix, key, value, keys.as_deref(), parameters)
            }
            TypeDescriptor::Composite(composite) => {
                self.bind_composite(prefix, composite, parameters)
            }
        }
    }

    fn bind_collection(
        &self,
        prefix: &str,
        element: &TypeDescriptor,
        parameters: &ParameterMap,
        distinct: bool,
    ) -> Result<Value, ConversionError> {
        let mut elements = Vec::new();

        if let Some((kind, nullable)) = scalar_of(element) {
            match parameters.get(prefix) {
                Some(values) => {
                    for value in values {
                        elements.push(convert_scalar(prefix, kind, Some(value), nullable)?);
                    }
                }
                None => {
                    for index in self.convention.indices(prefix, parameters.keys()) {
                        let key = self.convention.element(prefix, index);
                        for value in parameters.get(&key).unwrap_or_default() {
                            elements.push(convert_scalar(&key, kind, Some(value), nullable)?);
                        }
                    }
                }
            }
        } else {
            for index in self.convention.indices(prefix, parameters.keys()) {
                let key = self.convention.element(prefix, index);
                elements.push(self.bind(&key, element, parameters, false)?);
            }
        }

        if distinct {
            let mut seen = Vec::with_capacity(elements.len());
            for element in elements {
                if !seen.contains(&element) {
                    seen.push(element);
                }
            }
            elements = seen;
        }

        Ok(Value::Array(elements))
    }

    fn bind_composite(
        &self,
        prefix: &str,
        composite: &CompositeDescriptor,
        parameters: &ParameterMap,
    ) -> Result<Value, ConversionError> {
        let mut object = Map::new();

        for property in &composite.properties {
            let key = self.convention.property(prefix, &property.name);
            if property.required && !self.convention.addresses(&key, parameters.keys()) {
                return Err(ConversionError::MissingRequired {
                    key,
                    target: property.descriptor.to_string(),
                });
            }
            let value = self.bind(&key, &property.descriptor, parameters, false)?;
            object.insert(property.name.clone(), value);
        }

        Ok(Value::Object(object))
    }

    fn bind_map(
        &self,
        prefix: &str,
        key_kind: &ScalarKind,
        value: &TypeDescriptor,
        known_keys: Option<&[String]>,
        parameters: &ParameterMap,
    ) -> Result<Value, ConversionError> {
        let entry_keys: Vec<String> = match known_keys {
            Some(keys) => keys.to_vec(),
            None => {
                let namespace = self.convention.namespace(prefix);
                let mut discovered: Vec<String> = Vec::new();
                for key in parameters.keys_with_prefix(&namespace) {
                    if let Some(segment) = self.convention.next_segment(&namespace, key) {
                        if !discovered.iter().any(|seen| seen == segment) {
                            discovered.push(segment.to_string());
                        }
                    }
                }
                discovered
            }
        };

        let mut object = Map::new();
        for entry_key in entry_keys {
            let key = self.convention.property(prefix, &entry_key);
            validate_key(&key, key_kind, &entry_key)?;
            let bound = self.bind(&key, value, parameters, false)?;
            object.insert(entry_key, bound);
        }

        Ok(Value::Object(object))
    }
}

/// The scalar kind behind `descriptor` and whether absence binds to `null`.
fn scalar_of(descriptor: &TypeDescriptor) -> Option<(&ScalarKind, bool)> {
    match descriptor {
        TypeDescriptor::Scalar(kind) => Some((kind, false)),
        TypeDescriptor::Optional(inner) => match inner.as_ref() {
            TypeDescriptor::Scalar(kind) => Some((kind, true)),
            _ => None,
        },
        _ => None,
    }
}
