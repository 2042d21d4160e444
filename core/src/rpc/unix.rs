// core/src/rpc/unix.rs
//! Invocation over a Unix domain socket.
//!
//! One connection per call. The client writes `string(instance)`,
//! `string(name)` and the encoded parameters, then shuts down its write half.
//! The server answers with the encoded results and closes the connection.

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::invoker::{Close, Invoker};
use crate::codec::{read_string, write_string};
use crate::error::DecodeError;

/// Writes the instance and function name that open every request.
pub fn write_request_header<W: Write + ?Sized>(
    w: &mut W,
    instance: &str,
    name: &str,
) -> io::Result<()> {
    write_string(w, instance)?;
    write_string(w, name)
}

/// Reads the instance and function name of a request.
pub fn read_request_header<R: Read + ?Sized>(r: &mut R) -> Result<(String, String), DecodeError> {
    let instance = read_string(r)?;
    let name = read_string(r)?;
    Ok((instance, name))
}

#[derive(Debug, Clone)]
pub struct UnixInvoker {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl UnixInvoker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Applies `timeout` to every read and write on the call's socket.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> io::Result<UnixStream> {
        let stream = UnixStream::connect(&self.path).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("failed to connect to socket {}: {}", self.path.display(), err),
            )
        })?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;
        Ok(stream)
    }
}

/// Write half of a call's connection.
pub struct Outgoing(BufWriter<UnixStream>);

impl Write for Outgoing {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl Close for Outgoing {
    fn close(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.0.get_ref().shutdown(Shutdown::Write)
    }
}

/// Read half of a call's connection.
pub struct Incoming(BufReader<UnixStream>);

impl Read for Incoming {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Close for Incoming {
    fn close(&mut self) -> io::Result<()> {
        self.0.get_ref().shutdown(Shutdown::Read)
    }
}

impl Invoker for UnixInvoker {
    type Outgoing = Outgoing;
    type Incoming = Incoming;

    fn invoke(
        &self,
        instance: &str,
        name: &str,
        params: &[u8],
    ) -> io::Result<(Outgoing, Incoming)> {
        let stream = self.connect()?;
        log::debug!(
            "invoking {}.{} over {} with {} parameter byte(s)",
            instance,
            name,
            self.path.display(),
            params.len()
        );

        let mut outgoing = BufWriter::new(stream.try_clone()?);
        write_request_header(&mut outgoing, instance, name)?;
        outgoing.write_all(params)?;
        outgoing.flush()?;

        Ok((Outgoing(outgoing), Incoming(BufReader::new(stream))))
    }
}
