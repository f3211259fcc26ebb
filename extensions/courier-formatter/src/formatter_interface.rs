use crate::{
    Payload,
    error::{FormatterCause, FormatterError},
};
use courier::{
    binding::{Arguments, MethodDescriptor},
    header::Header,
};
use std::io::{Read, Write};

/// Converts between an in-process invocation and its wire representation.
///
/// Implementations are stateless per call, so one instance may serve many
/// concurrent invocations. All I/O is blocking; callers on an async runtime
/// should move calls off the scheduler threads (see the `tokio_support`
/// feature).
pub trait InvocationFormatter: Send + Sync {
    /// MIME-type string naming the wire encoding, used as a registry key.
    fn algorithm(&self) -> &str;

    /// Writes `payload` to `out` and sets the header fields describing it.
    ///
    /// `out` is flushed on every exit path. Failures carry the payload and no
    /// method.
    fn serialize(
        &self,
        header: &mut Header,
        payload: &Payload,
        out: &mut dyn Write,
        charset: &str,
    ) -> Result<(), FormatterError>;

    /// Reads `input` to its end and binds it to the parameters of `method`.
    ///
    /// The result holds one value per declared parameter, in declaration
    /// order. Any failure aborts the whole call; no partial arguments are
    /// returned.
    fn deserialize(
        &self,
        header: &Header,
        input: &mut dyn Read,
        charset: &str,
        method: &MethodDescriptor,
    ) -> Result<Arguments, FormatterError>;
}

/// Flushes `out` whatever `result` is, reporting the first failure.
pub(crate) fn flush_after<T>(
    out: &mut dyn Write,
    result: Result<T, FormatterCause>,
) -> Result<T, FormatterCause> {
    let flushed = out.flush();
    let value = result?;
    flushed?;
    Ok(value)
}

/// Reads `input` to its end.
///
/// On failure the bytes read so far are handed back alongside the cause.
pub(crate) fn read_body(input: &mut dyn Read) -> Result<Vec<u8>, (FormatterCause, Vec<u8>)> {
    let mut body = Vec::new();
    match input.read_to_end(&mut body) {
        Ok(_) => Ok(body),
        Err(e) => Err((FormatterCause::Io(e), body)),
    }
}
