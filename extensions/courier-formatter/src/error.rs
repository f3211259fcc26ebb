use crate::Payload;
use courier::binding::{ConversionError, MethodDescriptor};
use std::fmt;
use std::io;

/// Errors raised by a [`JsonCodec`](crate::JsonCodec).
#[derive(Debug)]
pub enum CodecError {
    /// The bytes are not valid JSON, or the value could not be written.
    Json(serde_json::Error),
    /// The decoded value does not fit the destination descriptor.
    Shape {
        path: String,
        expected: String,
        reason: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Json(e) => write!(f, "JSON error: {}", e),
            CodecError::Shape {
                path,
                expected,
                reason,
            } => write!(f, "`{}` does not fit {}: {}", path, expected, reason),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Json(e) => Some(e),
            CodecError::Shape { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Json(e)
    }
}

/// The root cause of a [`FormatterError`].
#[derive(Debug)]
pub enum FormatterCause {
    /// Reading the input, writing the output, or opening a file failed.
    Io(io::Error),
    /// A wire value could not be bound to its parameter.
    Conversion(ConversionError),
    Codec(CodecError),
    /// The caller named a charset with no known encoding.
    UnsupportedCharset(String),
    /// A JSON body carried a different number of arguments than declared.
    ArgumentCount { expected: usize, actual: usize },
}

impl fmt::Display for FormatterCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterCause::Io(e) => write!(f, "I/O error: {}", e),
            FormatterCause::Conversion(e) => write!(f, "conversion error: {}", e),
            FormatterCause::Codec(e) => write!(f, "codec error: {}", e),
            FormatterCause::UnsupportedCharset(label) => {
                write!(f, "unsupported charset {:?}", label)
            }
            FormatterCause::ArgumentCount { expected, actual } => {
                write!(f, "expected {} arguments, found {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for FormatterCause {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatterCause::Io(e) => Some(e),
            FormatterCause::Conversion(e) => Some(e),
            FormatterCause::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FormatterCause {
    fn from(e: io::Error) -> Self {
        FormatterCause::Io(e)
    }
}

impl From<ConversionError> for FormatterCause {
    fn from(e: ConversionError) -> Self {
        FormatterCause::Conversion(e)
    }
}

impl From<CodecError> for FormatterCause {
    fn from(e: CodecError) -> Self {
        FormatterCause::Codec(e)
    }
}

/// What the formatter was working on when it failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatterSubject {
    /// The value being serialized.
    Payload(Payload),
    /// The bytes read from the input stream before the failure.
    Input(Vec<u8>),
}

/// The single error kind surfaced by formatters.
///
/// Carries the root cause together with the formatter's algorithm, the
/// offending payload or input, and the method being bound (`None` when
/// serializing).
#[derive(Debug)]
pub struct FormatterError {
    cause: FormatterCause,
    algorithm: String,
    subject: FormatterSubject,
    method: Option<MethodDescriptor>,
}

impl FormatterError {
    pub fn serializing(cause: FormatterCause, algorithm: &str, payload: &Payload) -> Self {
        Self {
            cause,
            algorithm: algorithm.to_string(),
            subject: FormatterSubject::Payload(payload.clone()),
            method: None,
        }
    }

    pub fn deserializing(
        cause: FormatterCause,
        algorithm: &str,
        input: Vec<u8>,
        method: &MethodDescriptor,
    ) -> Self {
        Self {
            cause,
            algorithm: algorithm.to_string(),
            subject: FormatterSubject::Input(input),
            method: Some(method.clone()),
        }
    }

    pub fn cause(&self) -> &FormatterCause {
        &self.cause
    }

    /// Algorithm identifier of the formatter that failed.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn subject(&self) -> &FormatterSubject {
        &self.subject
    }

    pub fn method(&self) -> Option<&MethodDescriptor> {
        self.method.as_ref()
    }

    /// The wire key named by an underlying conversion failure.
    pub fn offending_key(&self) -> Option<&str> {
        match &self.cause {
            FormatterCause::Conversion(e) => e.key(),
            _ => None,
        }
    }
}

impl fmt::Display for FormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.method {
            Some(method) => write!(
                f,
                "{} formatter failed to deserialize arguments of {}: {}",
                self.algorithm, method, self.cause
            ),
            None => write!(
                f,
                "{} formatter failed to serialize payload: {}",
                self.algorithm, self.cause
            ),
        }
    }
}

impl std::error::Error for FormatterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Errors raised while assembling a [`FormatterRegistry`](crate::FormatterRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterRegistryError {
    AlreadyRegistered(String),
}

impl fmt::Display for FormatterRegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterRegistryError::AlreadyRegistered(algorithm) => {
                write!(f, "a formatter for {} is already registered", algorithm)
            }
        }
    }
}

impl std::error::Error for FormatterRegistryError {}
