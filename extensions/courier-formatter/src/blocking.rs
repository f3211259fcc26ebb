use crate::{InvocationFormatter, Payload, error::{FormatterCause, FormatterError}};
use courier::{
    binding::{Arguments, MethodDescriptor},
    header::Header,
};
use std::{io, sync::Arc};

/// Runs [`InvocationFormatter::deserialize`] over a buffered body on Tokio's
/// blocking pool.
pub async fn spawn_deserialize(
    formatter: Arc<dyn InvocationFormatter>,
    header: Header,
    body: Vec<u8>,
    charset: String,
    method: MethodDescriptor,
) -> Result<Arguments, FormatterError> {
    let algorithm = formatter.algorithm().to_string();
    let task_method = method.clone();

    tokio::task::spawn_blocking(move || {
        formatter.deserialize(&header, &mut body.as_slice(), &charset, &task_method)
    })
    .await
    .unwrap_or_else(|e| {
        Err(FormatterError::deserializing(
            FormatterCause::Io(io::Error::other(e)),
            &algorithm,
            Vec::new(),
            &method,
        ))
    })
}

/// Runs [`InvocationFormatter::serialize`] on Tokio's blocking pool, returning
/// the updated header and the written bytes.
pub async fn spawn_serialize(
    formatter: Arc<dyn InvocationFormatter>,
    mut header: Header,
    payload: Payload,
    charset: String,
) -> Result<(Header, Vec<u8>), FormatterError> {
    let algorithm = formatter.algorithm().to_string();
    let task_payload = payload.clone();

    tokio::task::spawn_blocking(move || {
        let mut out = Vec::new();
        formatter
            .serialize(&mut header, &task_payload, &mut out, &charset)
            .map(|()| (header, out))
    })
    .await
    .unwrap_or_else(|e| {
        Err(FormatterError::serializing(
            FormatterCause::Io(io::Error::other(e)),
            &algorithm,
            &payload,
        ))
    })
}
