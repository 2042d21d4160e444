// core/src/codec/mod.rs
pub mod string;
pub mod varint;

use crate::error::DecodeError;
use std::io::{self, Read, Write};

pub use string::{read_string, write_string};
pub use varint::{read_length, write_length};

/// A value that can be written as invocation parameters or results.
pub trait Encode {
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()>;
}

/// A value that can be read back from an incoming stream.
pub trait Decode: Sized {
    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError>;
}

/// No parameters: writes nothing.
impl Encode for () {
    fn encode<W: Write + ?Sized>(&self, _w: &mut W) -> io::Result<()> {
        Ok(())
    }
}

impl Encode for str {
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        write_string(w, self)
    }
}

impl Encode for String {
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        write_string(w, self)
    }
}

impl Encode for u32 {
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        write_length(w, *self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        (**self).encode(w)
    }
}

impl Decode for String {
    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        read_string(r)
    }
}

impl Decode for u32 {
    fn decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        read_length(r)
    }
}

/// Encodes `value` into a fresh buffer.
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    value.encode(&mut buf)?;
    Ok(buf)
}

/// Reads a single byte, `None` on a clean end of stream.
pub(crate) fn read_byte<R: Read + ?Sized>(r: &mut R) -> io::Result<Option<u8>> {
    let mut b = [0u8; 1];
    loop {
        match r.read(&mut b) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(b[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}
