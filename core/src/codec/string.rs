// core/src/codec/string.rs
use std::io::{self, Read, Write};

use super::varint::{read_length, write_length};
use crate::error::DecodeError;

/// Upper bound on the up-front allocation for a body, the rest grows with the data.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Reads a length-prefixed UTF-8 string off `r`.
///
/// Short reads are retried until the declared length has arrived. The stream
/// ending first is reported as [`DecodeError::BodyTruncated`].
pub fn read_string<R: Read + ?Sized>(r: &mut R) -> Result<String, DecodeError> {
    let len = read_length(r)?;
    log::debug!("reading string bytes, len {}", len);

    let mut buf = Vec::with_capacity((len as usize).min(PREALLOC_LIMIT));
    (&mut *r)
        .take(u64::from(len))
        .read_to_end(&mut buf)
        .map_err(DecodeError::BodyRead)?;
    if buf.len() < len as usize {
        return Err(DecodeError::BodyTruncated {
            expected: len,
            received: buf.len(),
        });
    }

    String::from_utf8(buf).map_err(DecodeError::InvalidUtf8)
}

/// Writes `s` with its length prefix.
pub fn write_string<W: Write + ?Sized>(w: &mut W, s: &str) -> io::Result<()> {
    let len = u32::try_from(s.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "string length overflows a 32-bit integer",
        )
    })?;
    write_length(w, len)?;
    w.write_all(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use std::io::Cursor;

    #[test]
    fn test_hello() {
        let mut r = Cursor::new(b"\x05hello".to_vec());
        assert_eq!(read_string(&mut r).unwrap(), "hello");
        assert_eq!(r.position(), 6);
    }

    #[test]
    fn test_empty_string() {
        let mut r: &[u8] = &[0x00];
        assert_eq!(read_string(&mut r).unwrap(), "");
    }

    #[test]
    fn test_truncated_body() {
        let mut r: &[u8] = b"\x05hel";
        let err = read_string(&mut r).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BodyTruncated {
                expected: 5,
                received: 3
            }
        ));
        assert!(err.is_truncation());
        assert_eq!(err.stage(), Stage::Body);
    }

    #[test]
    fn test_invalid_utf8_keeps_raw_bytes() {
        let mut r: &[u8] = &[0x03, b'a', 0x80, b'b'];
        let err = read_string(&mut r).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8(_)));
        assert_eq!(err.raw_bytes(), Some(&[b'a', 0x80, b'b'][..]));
        assert_eq!(err.lossy_value().as_deref(), Some("a\u{fffd}b"));
        assert_eq!(err.stage(), Stage::Utf8);
    }

    /// Hands out at most one byte per read.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_short_reads_are_accumulated() {
        let mut r = Trickle(b"\x0bhello world");
        assert_eq!(read_string(&mut r).unwrap(), "hello world");
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_body_io_failure() {
        let mut r = (&b"\x04ab"[..]).chain(BrokenPipe);
        match read_string(&mut r) {
            Err(DecodeError::BodyRead(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected body read failure, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_read_multibyte() {
        let value = "héllo, 世界";
        let mut buf = Vec::new();
        write_string(&mut buf, value).unwrap();
        assert_eq!(buf[0] as usize, value.len());
        assert_eq!(read_string(&mut buf.as_slice()).unwrap(), value);
    }
}
