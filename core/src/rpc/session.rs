// core/src/rpc/session.rs
use std::io::{self, Read};

use super::invoker::{Close, Invoker};
use crate::codec::{encode_to_vec, Decode, Encode};
use crate::error::InvokeError;
use crate::utils::{HELLO_FUNCTION, HELLO_INSTANCE};

/// Incoming result stream that is closed when it goes out of scope.
///
/// Close failures are logged and otherwise dropped: by the time the reader is
/// released the outcome of the call is already decided.
pub struct ClosingReader<'a, R: Read + Close> {
    inner: R,
    instance: &'a str,
    name: &'a str,
}

impl<'a, R: Read + Close> ClosingReader<'a, R> {
    pub fn new(inner: R, instance: &'a str, name: &'a str) -> Self {
        Self {
            inner,
            instance,
            name,
        }
    }
}

impl<R: Read + Close> Read for ClosingReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Close> Drop for ClosingReader<'_, R> {
    fn drop(&mut self) {
        if let Err(err) = self.inner.close() {
            log::error!(
                "failed to close reader, instance: {}, name: {}, err: {}",
                self.instance,
                self.name,
                err
            );
        }
    }
}

/// Invokes `name` on `instance` and decodes its single result.
///
/// Parameters are handed to the invoker in encoded form, so the outgoing
/// stream is closed right away. The incoming stream is closed on every path
/// out of this function.
pub fn invoke<I, P, T>(
    invoker: &I,
    instance: &str,
    name: &str,
    params: &P,
) -> Result<T, InvokeError>
where
    I: Invoker + ?Sized,
    P: Encode + ?Sized,
    T: Decode,
{
    let params = encode_to_vec(params).map_err(|source| InvokeError::Params {
        name: name.to_string(),
        source,
    })?;

    let (mut outgoing, incoming) = invoker
        .invoke(instance, name, &params)
        .map_err(|source| InvokeError::Invoke {
            name: name.to_string(),
            source,
        })?;
    let mut incoming = ClosingReader::new(incoming, instance, name);

    if let Err(err) = outgoing.close() {
        log::debug!(
            "failed to close outgoing stream, instance: {}, name: {}, err: {}",
            instance,
            name,
            err
        );
    }

    T::decode(&mut incoming).map_err(|source| InvokeError::Result { index: 0, source })
}

/// Calls `wrpc-examples:hello/handler.hello`.
pub fn hello<I: Invoker + ?Sized>(invoker: &I) -> Result<String, InvokeError> {
    invoke(invoker, HELLO_INSTANCE, HELLO_FUNCTION, &())
}
