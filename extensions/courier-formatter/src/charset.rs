use crate::error::FormatterCause;
use courier::{constants::DEFAULT_CHARSET, header::Header};
use encoding_rs::Encoding;

/// The charset to use for a body: the caller's, else the one announced in the
/// header's `Content-Type`, else UTF-8.
pub(crate) fn effective(header: &Header, requested: &str) -> String {
    if !requested.trim().is_empty() {
        return requested.to_string();
    }
    header
        .content_type()
        .and_then(|content_type| content_type.charset)
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Resolves a charset label (`UTF-8`, `iso-8859-1`, `Shift_JIS`, ...).
pub(crate) fn resolve(label: &str) -> Result<&'static Encoding, FormatterCause> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| FormatterCause::UnsupportedCharset(label.to_string()))
}

/// Decodes `bytes`, replacing malformed sequences.
pub(crate) fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!(
            charset = encoding.name(),
            "replaced malformed sequences while decoding body"
        );
    }
    text.into_owned()
}

/// Encodes UTF-8 `bytes` into `encoding`.
///
/// Unmappable characters become numeric character references. UTF-16 labels
/// produce UTF-8, as encoders exist only for ASCII-compatible encodings.
pub(crate) fn encode(bytes: &[u8], encoding: &'static Encoding) -> Result<Vec<u8>, FormatterCause> {
    if encoding == encoding_rs::UTF_8 {
        return Ok(bytes.to_vec());
    }

    let text = std::str::from_utf8(bytes).map_err(|e| {
        FormatterCause::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    let (encoded, used, had_unmappable) = encoding.encode(text);
    if had_unmappable || used != encoding {
        tracing::debug!(
            requested = encoding.name(),
            used = used.name(),
            had_unmappable,
            "transcoded body lossily"
        );
    }
    Ok(encoded.into_owned())
}
