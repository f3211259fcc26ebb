use crate::error::CodecError;
use courier::binding::{CompositeDescriptor, ScalarKind, TypeDescriptor};
use serde_json::{Map, Value};
use std::io::Write;

/// Value-level JSON encoding, injected into the formatters.
///
/// The codec owns the JSON grammar; the formatters only decide when and how
/// to call it.
pub trait JsonCodec: Send + Sync {
    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), CodecError>;

    /// Decodes `bytes` into a value of exactly the shape of `target`.
    fn decode(&self, bytes: &[u8], target: &TypeDescriptor) -> Result<Value, CodecError>;

    /// Decodes a JSON array whose elements take the shapes of `targets`, by
    /// position.
    fn decode_tuple(
        &self,
        bytes: &[u8],
        targets: &[TypeDescriptor],
    ) -> Result<Vec<Value>, CodecError>;
}

/// [`JsonCodec`] backed by `serde_json`.
///
/// Decoded values are checked against their descriptor: scalars must have the
/// right JSON type and fit their width, dates and enum names are normalized,
/// sets drop duplicates and required composite properties must be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn encode(&self, value: &Value, out: &mut dyn Write) -> Result<(), CodecError> {
        serde_json::to_writer(out, value)?;
        Ok(())
    }

    fn decode(&self, bytes: &[u8], target: &TypeDescriptor) -> Result<Value, CodecError> {
        let value: Value = serde_json::from_slice(bytes)?;
        conform(value, target, "$")
    }

    fn decode_tuple(
        &self,
        bytes: &[u8],
        targets: &[TypeDescriptor],
    ) -> Result<Vec<Value>, CodecError> {
        let elements = match serde_json::from_slice::<Value>(bytes)? {
            Value::Array(elements) if elements.len() == targets.len() => elements,
            Value::Array(elements) => {
                return Err(shape_error(
                    "$",
                    &format!("{} arguments", targets.len()),
                    format!("found {} elements", elements.len()),
                ));
            }
            other => {
                return Err(shape_error(
                    "$",
                    "an argument array",
                    format!("found {}", type_name(&other)),
                ));
            }
        };

        elements
            .into_iter()
            .zip(targets)
            .enumerate()
            .map(|(index, (element, target))| conform(element, target, &format!("$[{index}]")))
            .collect()
    }
}

fn conform(value: Value, target: &TypeDescriptor, path: &str) -> Result<Value, CodecError> {
    match (target, value) {
        (TypeDescriptor::Optional(_), Value::Null) => Ok(Value::Null),
        (TypeDescriptor::Optional(inner), value) => conform(value, inner, path),
        (TypeDescriptor::Scalar(kind), value) => conform_scalar(value, kind, path),
        (
            TypeDescriptor::Array(element) | TypeDescriptor::List(element),
            Value::Array(elements),
        ) => conform_elements(elements, element, path).map(Value::Array),
        (TypeDescriptor::Set(element), Value::Array(elements)) => {
            let mut distinct: Vec<Value> = Vec::with_capacity(elements.len());
            for element in conform_elements(elements, element, path)? {
                if !distinct.contains(&element) {
                    distinct.push(element);
                }
            }
            Ok(Value::Array(distinct))
        }
        (
            TypeDescriptor::Map {
                key,
                value: entry_target,
                keys,
            },
            Value::Object(object),
        ) => {
            let mut conformed = Map::new();
            for (entry_key, entry) in object {
                if let Some(known) = keys {
                    if !known.contains(&entry_key) {
                        continue;
                    }
                }
                if key.convert(path, &entry_key).is_err() {
                    return Err(shape_error(
                        path,
                        &key.to_string(),
                        format!("invalid map key {entry_key:?}"),
                    ));
                }
                let entry_path = format!("{path}.{entry_key}");
                let entry = conform(entry, entry_target, &entry_path)?;
                conformed.insert(entry_key, entry);
            }
            Ok(Value::Object(conformed))
        }
        (TypeDescriptor::Composite(composite), Value::Object(object)) => {
            conform_composite(object, composite, path)
        }
        (target, value) => Err(shape_error(
            path,
            &target.to_string(),
            format!("found {}", type_name(&value)),
        )),
    }
}

fn conform_elements(
    elements: Vec<Value>,
    element: &TypeDescriptor,
    path: &str,
) -> Result<Vec<Value>, CodecError> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, value)| conform(value, element, &format!("{path}[{index}]")))
        .collect()
}

fn conform_composite(
    mut object: Map<String, Value>,
    composite: &CompositeDescriptor,
    path: &str,
) -> Result<Value, CodecError> {
    for property in &composite.properties {
        let property_path = format!("{path}.{}", property.name);
        match object.remove(&property.name) {
            Some(value) => {
                let value = conform(value, &property.descriptor, &property_path)?;
                object.insert(property.name.clone(), value);
            }
            None if property.required => {
                return Err(shape_error(
                    &property_path,
                    &property.descriptor.to_string(),
                    "required property is missing".into(),
                ));
            }
            None => {}
        }
    }
    Ok(Value::Object(object))
}

fn conform_scalar(value: Value, kind: &ScalarKind, path: &str) -> Result<Value, CodecError> {
    let mismatch = |value: &Value| {
        shape_error(path, &kind.to_string(), format!("found {}", type_name(value)))
    };

    match (kind, value) {
        (ScalarKind::Bool, value @ Value::Bool(_)) => Ok(value),
        (ScalarKind::F64, value @ Value::Number(_)) => Ok(value),
        (kind, Value::Number(number)) if kind.is_numeric() => kind
            .convert(path, &number.to_string())
            .map_err(|e| shape_error(path, &kind.to_string(), e.to_string())),
        (ScalarKind::String, value @ Value::String(_)) => Ok(value),
        (
            ScalarKind::Char | ScalarKind::Date | ScalarKind::DateTime | ScalarKind::Enum(_),
            Value::String(text),
        ) => kind
            .convert(path, &text)
            .map_err(|e| shape_error(path, &kind.to_string(), e.to_string())),
        (ScalarKind::DateTime, Value::Number(number)) => kind
            .convert(path, &number.to_string())
            .map_err(|e| shape_error(path, &kind.to_string(), e.to_string())),
        (_, value) => Err(mismatch(&value)),
    }
}

fn shape_error(path: &str, expected: &str, reason: String) -> CodecError {
    CodecError::Shape {
        path: path.to_string(),
        expected: expected.to_string(),
        reason,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(body: &str, target: &TypeDescriptor) -> Result<Value, CodecError> {
        SerdeJsonCodec.decode(body.as_bytes(), target)
    }

    #[test]
    fn integers_must_fit_their_width() {
        let target = TypeDescriptor::Scalar(ScalarKind::U8);
        assert_eq!(decode("200", &target).unwrap(), json!(200));
        assert!(decode("300", &target).is_err());
        assert!(decode("1.5", &target).is_err());
        assert!(decode("\"7\"", &target).is_err());
    }

    #[test]
    fn f32_must_be_finite_at_its_width() {
        let target = TypeDescriptor::Scalar(ScalarKind::F32);
        assert!(decode("1.5", &target).is_ok());
        assert!(decode("1e39", &target).is_err());

        let wide = TypeDescriptor::Scalar(ScalarKind::F64);
        assert_eq!(decode("1e39", &wide).unwrap(), json!(1e39));
    }

    #[test]
    fn nested_mismatch_reports_path() {
        let target = TypeDescriptor::list(TypeDescriptor::Scalar(ScalarKind::Bool));
        match decode("[true, 3]", &target) {
            Err(CodecError::Shape { path, .. }) => assert_eq!(path, "$[1]"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn sets_drop_duplicates() {
        let target = TypeDescriptor::set(TypeDescriptor::Scalar(ScalarKind::I32));
        assert_eq!(decode("[2, 1, 2]", &target).unwrap(), json!([2, 1]));
    }

    #[test]
    fn required_composite_property() {
        let target = CompositeDescriptor::new("Point")
            .required_field::<i32>("x")
            .field::<i32>("y")
            .build();
        assert_eq!(decode(r#"{"x": 1}"#, &target).unwrap(), json!({"x": 1}));
        assert!(decode(r#"{"y": 1}"#, &target).is_err());
    }

    #[test]
    fn tuple_length_must_match() {
        let targets = [
            TypeDescriptor::Scalar(ScalarKind::String),
            TypeDescriptor::Scalar(ScalarKind::I64),
        ];
        assert_eq!(
            SerdeJsonCodec.decode_tuple(br#"["a", 2]"#, &targets).unwrap(),
            vec![json!("a"), json!(2)]
        );
        assert!(SerdeJsonCodec.decode_tuple(br#"["a"]"#, &targets).is_err());
        assert!(SerdeJsonCodec.decode_tuple(br#"{"a": 2}"#, &targets).is_err());
    }
}
