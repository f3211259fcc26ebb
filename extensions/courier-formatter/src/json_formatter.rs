use crate::{
    FormatterConfig, InvocationFormatter, JsonCodec, Payload, SerdeJsonCodec, charset,
    constants::JSON_ALGORITHM,
    error::{FormatterCause, FormatterError},
    formatter_interface::{flush_after, read_body},
};
use courier::{
    binding::{Arguments, MethodDescriptor, TypeDescriptor},
    header::Header,
};
use serde_json::Value;
use std::{
    io::{Read, Write},
    sync::Arc,
};

/// Formatter for the `application/json` algorithm.
///
/// Value marshalling is delegated to the injected [`JsonCodec`].
pub struct JsonFormatter {
    codec: Arc<dyn JsonCodec>,
    config: FormatterConfig,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::default())
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self::with_codec(Arc::new(SerdeJsonCodec), config)
    }

    pub fn with_codec(codec: Arc<dyn JsonCodec>, config: FormatterConfig) -> Self {
        tracing::debug!(
            algorithm = JSON_ALGORITHM,
            transcoding = config.transcoding,
            "created formatter"
        );
        Self { codec, config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn decode_arguments(
        &self,
        header: &Header,
        body: &[u8],
        charset: &str,
        method: &MethodDescriptor,
    ) -> Result<Arguments, FormatterCause> {
        let encoding = charset::resolve(&charset::effective(header, charset))?;
        let text = charset::decode(body, encoding);

        let values = match method.parameters.as_slice() {
            [] => Vec::new(),
            [parameter] => vec![self.codec.decode(text.as_bytes(), &parameter.descriptor)?],
            parameters => {
                let targets: Vec<TypeDescriptor> = parameters
                    .iter()
                    .map(|parameter| parameter.descriptor.clone())
                    .collect();
                self.codec.decode_tuple(text.as_bytes(), &targets)?
            }
        };

        if values.len() != method.arity() {
            return Err(FormatterCause::ArgumentCount {
                expected: method.arity(),
                actual: values.len(),
            });
        }

        tracing::trace!(method = %method.name, arguments = values.len(), "decoded JSON body");
        Ok(Arguments::new(values))
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationFormatter for JsonFormatter {
    fn algorithm(&self) -> &str {
        JSON_ALGORITHM
    }

    fn serialize(
        &self,
        header: &mut Header,
        payload: &Payload,
        out: &mut dyn Write,
        charset: &str,
    ) -> Result<(), FormatterError> {
        let value = payload.to_json_value();
        let written = write_json_body(
            self.codec.as_ref(),
            self.config.transcoding,
            header,
            &value,
            out,
            charset,
        );

        flush_after(out, written).map_err(|cause| {
            tracing::debug!(algorithm = JSON_ALGORITHM, error = %cause, "serialize failed");
            FormatterError::serializing(cause, JSON_ALGORITHM, payload)
        })
    }

    fn deserialize(
        &self,
        header: &Header,
        input: &mut dyn Read,
        charset: &str,
        method: &MethodDescriptor,
    ) -> Result<Arguments, FormatterError> {
        let body = read_body(input).map_err(|(cause, partial)| {
            FormatterError::deserializing(cause, JSON_ALGORITHM, partial, method)
        })?;

        match self.decode_arguments(header, &body, charset, method) {
            Ok(arguments) => Ok(arguments),
            Err(cause) => {
                tracing::debug!(
                    algorithm = JSON_ALGORITHM,
                    method = %method.name,
                    error = %cause,
                    "deserialize failed"
                );
                Err(FormatterError::deserializing(cause, JSON_ALGORITHM, body, method))
            }
        }
    }
}

/// Sets a JSON content type and writes `value` through `codec`.
///
/// With `transcoding` the codec's UTF-8 output is re-encoded into `charset`
/// before it reaches `out`.
pub(crate) fn write_json_body(
    codec: &dyn JsonCodec,
    transcoding: bool,
    header: &mut Header,
    value: &Value,
    out: &mut dyn Write,
    charset: &str,
) -> Result<(), FormatterCause> {
    let label = charset::effective(header, charset);
    header.set_content_type(JSON_ALGORITHM);

    if transcoding {
        let encoding = charset::resolve(&label)?;
        let mut utf8 = Vec::new();
        codec.encode(value, &mut utf8)?;
        out.write_all(&charset::encode(&utf8, encoding)?)?;
    } else {
        codec.encode(value, out)?;
    }

    Ok(())
}
