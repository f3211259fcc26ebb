use crate::binding::{ConversionError, ScalarKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts the first wire value of `key` (if any) to `kind`.
///
/// `nullable` selects `null` over the kind's default when the value is absent.
/// An empty value counts as absent for every kind except strings.
pub(crate) fn convert_scalar(
    key: &str,
    kind: &ScalarKind,
    raw: Option<&str>,
    nullable: bool,
) -> Result<Value, ConversionError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() || *kind == ScalarKind::String => raw,
        _ if nullable => return Ok(Value::Null),
        _ => return Ok(default_for(kind)),
    };

    let invalid = |reason: String| ConversionError::InvalidScalar {
        key: key.to_string(),
        target: kind.to_string(),
        value: raw.to_string(),
        reason,
    };

    macro_rules! integer {
        ($ty:ty) => {
            raw.trim()
                .parse::<$ty>()
                .map(Value::from)
                .map_err(|e| invalid(e.to_string()))
        };
    }

    match kind {
        ScalarKind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| invalid("expected true/false, 1/0, on/off or yes/no".into())),
        ScalarKind::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::String(c.to_string())),
                _ => Err(invalid("expected exactly one character".into())),
            }
        }
        ScalarKind::I8 => integer!(i8),
        ScalarKind::I16 => integer!(i16),
        ScalarKind::I32 => integer!(i32),
        ScalarKind::I64 => integer!(i64),
        ScalarKind::U8 => integer!(u8),
        ScalarKind::U16 => integer!(u16),
        ScalarKind::U32 => integer!(u32),
        ScalarKind::U64 => integer!(u64),
        ScalarKind::F32 => {
            let parsed = raw.trim().parse::<f32>().map_err(|e| invalid(e.to_string()))?;
            finite(f64::from(parsed)).ok_or_else(|| invalid("not a finite number".into()))
        }
        ScalarKind::F64 => {
            let parsed = raw.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
            finite(parsed).ok_or_else(|| invalid("not a finite number".into()))
        }
        ScalarKind::String => Ok(Value::String(raw.to_string())),
        ScalarKind::Date => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
            .map_err(|e| invalid(e.to_string())),
        ScalarKind::DateTime => parse_date_time(raw.trim())
            .map(|timestamp| {
                Value::String(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            })
            .ok_or_else(|| {
                invalid("expected RFC 3339, `YYYY-MM-DD HH:MM:SS` or epoch milliseconds".into())
            }),
        ScalarKind::Enum(variants) => variants
            .iter()
            .find(|variant| variant.as_str() == raw)
            .or_else(|| {
                variants
                    .iter()
                    .find(|variant| variant.eq_ignore_ascii_case(raw.trim()))
            })
            .map(|variant| Value::String(variant.clone()))
            .ok_or_else(|| invalid(format!("expected one of {}", variants.join(", ")))),
    }
}

/// Validates the map key `segment`, found in the wire key `key`, against the
/// map's key kind.
pub(crate) fn validate_key(
    key: &str,
    kind: &ScalarKind,
    segment: &str,
) -> Result<(), ConversionError> {
    match convert_scalar(key, kind, Some(segment), false) {
        Ok(Value::Null) | Err(_) => Err(ConversionError::InvalidMapKey {
            key: key.to_string(),
            target: kind.to_string(),
        }),
        Ok(_) => Ok(()),
    }
}

fn default_for(kind: &ScalarKind) -> Value {
    match kind {
        ScalarKind::Bool => Value::Bool(false),
        ScalarKind::F32 | ScalarKind::F64 => Value::from(0.0),
        kind if kind.is_numeric() => Value::from(0),
        ScalarKind::String => Value::String(String::new()),
        _ => Value::Null,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn finite(value: f64) -> Option<Value> {
    Number::from_f64(value).map(Value::Number)
}

fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT) {
        return Some(naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}
