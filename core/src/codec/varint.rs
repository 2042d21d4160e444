// core/src/codec/varint.rs
//! Little-endian base-128 length prefix, bounded to 32 bits.
//!
//! Each byte carries 7 payload bits, least significant group first. Bit 7 set
//! means another byte follows. A `u32` never needs more than 5 bytes, and the
//! 5th byte may only carry the top 4 bits.

use std::io::{self, Read, Write};

use super::read_byte;
use crate::error::DecodeError;

/// Maximum number of bytes in an encoded length.
pub const MAX_LENGTH_BYTES: usize = 5;

/// Reads one length prefix off `r`.
pub fn read_length<R: Read + ?Sized>(r: &mut R) -> Result<u32, DecodeError> {
    let mut x: u32 = 0;
    let mut s: u32 = 0;
    for i in 0..MAX_LENGTH_BYTES {
        log::debug!("reading string length byte {}", i);
        let b = match read_byte(r) {
            Ok(Some(b)) => b,
            Ok(None) if i == 0 => return Err(DecodeError::Eof),
            Ok(None) => {
                return Err(DecodeError::Truncated {
                    consumed: i,
                    source: io::ErrorKind::UnexpectedEof.into(),
                })
            }
            Err(err) if i == 0 => return Err(DecodeError::LengthRead(err)),
            Err(err) => {
                return Err(DecodeError::Truncated {
                    consumed: i,
                    source: err,
                })
            }
        };
        if s == 28 && b > 0x0f {
            return Err(DecodeError::LengthOverflow);
        }
        if b & 0x80 == 0 {
            return Ok(x | u32::from(b) << s);
        }
        x |= u32::from(b & 0x7f) << s;
        s += 7;
    }
    Err(DecodeError::LengthOverflow)
}

/// Writes `x` as a length prefix.
pub fn write_length<W: Write + ?Sized>(w: &mut W, mut x: u32) -> io::Result<()> {
    let mut buf = [0u8; MAX_LENGTH_BYTES];
    let mut n = 0;
    while x >= 0x80 {
        buf[n] = (x as u8 & 0x7f) | 0x80;
        x >>= 7;
        n += 1;
    }
    buf[n] = x as u8;
    w.write_all(&buf[..=n])
}

/// Number of bytes `write_length` produces for `x`.
pub fn encoded_len(mut x: u32) -> usize {
    let mut n = 1;
    while x >= 0x80 {
        n += 1;
        x >>= 7;
    }
    n
}
