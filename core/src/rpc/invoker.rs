// core/src/rpc/invoker.rs
use std::io::{self, Read, Write};

/// A stream half that must be released explicitly.
pub trait Close {
    fn close(&mut self) -> io::Result<()>;
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Mechanism that starts a remote invocation.
///
/// Given the target instance, the function name and the already encoded
/// parameters, it returns the outgoing parameter stream and the incoming
/// result stream of the call. How the bytes travel is up to the implementor.
pub trait Invoker {
    type Outgoing: Write + Close;
    type Incoming: Read + Close;

    fn invoke(
        &self,
        instance: &str,
        name: &str,
        params: &[u8],
    ) -> io::Result<(Self::Outgoing, Self::Incoming)>;
}

impl<I: Invoker + ?Sized> Invoker for &I {
    type Outgoing = I::Outgoing;
    type Incoming = I::Incoming;

    fn invoke(
        &self,
        instance: &str,
        name: &str,
        params: &[u8],
    ) -> io::Result<(Self::Outgoing, Self::Incoming)> {
        (**self).invoke(instance, name, params)
    }
}
