use crate::{
    ContentTypeSniffer, FormatterConfig, InvocationFormatter, JsonCodec, MagicSniffer, Payload,
    SerdeJsonCodec, charset,
    constants::{FILE_CONTENT_TYPE, INLINE_CONTENT_TYPE_PREFIX, URL_ALGORITHM},
    error::{FormatterCause, FormatterError},
    formatter_interface::{flush_after, read_body},
    json_formatter::write_json_body,
};
use courier::{
    binding::{Arguments, ConversionProvider, MethodDescriptor, ParameterMap, binding_prefix},
    header::{ContentType, Header},
};
use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::Path,
    sync::Arc,
};

/// Formatter for the `application/url` algorithm.
///
/// Requests arrive as `key=value&...` bodies and are bound to the target
/// method's parameters by the [`ConversionProvider`]. Responses are either a
/// streamed file, typed by the [`ContentTypeSniffer`], or a JSON value written
/// by the [`JsonCodec`].
pub struct UrlFormatter {
    codec: Arc<dyn JsonCodec>,
    sniffer: Arc<dyn ContentTypeSniffer>,
    provider: ConversionProvider,
    config: FormatterConfig,
}

impl UrlFormatter {
    /// A formatter with transcoding enabled and magic-number sniffing.
    pub fn new() -> Self {
        Self::with_config(FormatterConfig::default().with_transcoding(true))
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        tracing::debug!(
            algorithm = URL_ALGORITHM,
            transcoding = config.transcoding,
            "created formatter"
        );
        Self {
            codec: Arc::new(SerdeJsonCodec),
            sniffer: Arc::new(MagicSniffer::new()),
            provider: ConversionProvider::with_convention(config.naming.clone()),
            config,
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_sniffer(mut self, sniffer: Arc<dyn ContentTypeSniffer>) -> Self {
        self.sniffer = sniffer;
        self
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn write_file(
        &self,
        header: &mut Header,
        path: &Path,
        file_name: &str,
        out: &mut dyn Write,
    ) -> Result<(), FormatterCause> {
        let content_type = self
            .sniffer
            .sniff(path)
            .into_iter()
            .next()
            .unwrap_or_else(|| FILE_CONTENT_TYPE.to_string());

        header.set_content_type(content_type.as_str());
        if !ContentType::parse(&content_type).is_type(INLINE_CONTENT_TYPE_PREFIX) {
            header.set_content_disposition(attachment_disposition(file_name));
        }

        // The reader owns the file handle; it closes when this scope ends.
        let mut reader = BufReader::with_capacity(self.config.copy_buffer_size, File::open(path)?);
        let copied = io::copy(&mut reader, out)?;

        tracing::debug!(
            path = %path.display(),
            content_type = %content_type,
            bytes = copied,
            "streamed file payload"
        );
        Ok(())
    }

    fn bind_arguments(
        &self,
        header: &Header,
        body: &[u8],
        charset: &str,
        method: &MethodDescriptor,
    ) -> Result<Arguments, FormatterCause> {
        let encoding = charset::resolve(&charset::effective(header, charset))?;
        let parameters = ParameterMap::parse(&charset::decode(body, encoding));

        let mut arguments = Vec::with_capacity(method.arity());
        for (index, parameter) in method.parameters.iter().enumerate() {
            let prefix = binding_prefix(index, parameter);
            arguments.push(self.provider.convert_parameter(&prefix, parameter, &parameters)?);
        }

        tracing::trace!(
            method = %method.name,
            keys = parameters.len(),
            arguments = arguments.len(),
            "bound URL-form body"
        );
        Ok(Arguments::new(arguments))
    }
}

impl Default for UrlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationFormatter for UrlFormatter {
    fn algorithm(&self) -> &str {
        URL_ALGORITHM
    }

    fn serialize(
        &self,
        header: &mut Header,
        payload: &Payload,
        out: &mut dyn Write,
        charset: &str,
    ) -> Result<(), FormatterError> {
        let written = match payload.as_file() {
            Some((path, file_name)) => self.write_file(header, path, &file_name, out),
            None => write_json_body(
                self.codec.as_ref(),
                self.config.transcoding,
                header,
                &payload.to_json_value(),
                out,
                charset,
            ),
        };

        flush_after(out, written).map_err(|cause| {
            tracing::debug!(algorithm = URL_ALGORITHM, error = %cause, "serialize failed");
            FormatterError::serializing(cause, URL_ALGORITHM, payload)
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
            FormatterError::deserializing(cause, URL_ALGORITHM, partial, method)
        })?;

        match self.bind_arguments(header, &body, charset, method) {
            Ok(arguments) => Ok(arguments),
            Err(cause) => {
                tracing::debug!(
                    algorithm = URL_ALGORITHM,
                    method = %method.name,
                    error = %cause,
                    "deserialize failed"
                );
                Err(FormatterError::deserializing(cause, URL_ALGORITHM, body, method))
            }
        }
    }
}

/// `attachment; filename=<name>` with the UTF-8 name form-urlencoded.
fn attachment_disposition(file_name: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(file_name.as_bytes()).collect();
    format!("attachment; filename={encoded}")
}

#[cfg(test)]
mod tests {
    use super::attachment_disposition;

    #[test]
    fn encodes_file_names() {
        assert_eq!(attachment_disposition("report.pdf"), "attachment; filename=report.pdf");
        assert_eq!(
            attachment_disposition("annual report.pdf"),
            "attachment; filename=annual+report.pdf"
        );
        assert_eq!(
            attachment_disposition("résumé.txt"),
            "attachment; filename=r%C3%A9sum%C3%A9.txt"
        );
    }
}
