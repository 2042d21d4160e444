// core/src/error.rs
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Failure while decoding a single value off a byte stream.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The stream ended before the first length byte.
    #[error("failed to read string length byte: end of stream")]
    Eof,
    /// Reading the first length byte failed.
    #[error("failed to read string length byte")]
    LengthRead(#[source] io::Error),
    /// The stream failed or ended in the middle of a length prefix.
    #[error("failed to read string length byte: stream truncated after {consumed} byte(s)")]
    Truncated {
        consumed: usize,
        #[source]
        source: io::Error,
    },
    #[error("string length overflows a 32-bit integer")]
    LengthOverflow,
    #[error("failed to read string bytes")]
    BodyRead(#[source] io::Error),
    #[error("failed to read string bytes: expected {expected}, got {received}")]
    BodyTruncated { expected: u32, received: usize },
    /// The body was read in full but is not UTF-8; the raw bytes stay on the error.
    #[error("string is not valid UTF-8")]
    InvalidUtf8(#[source] FromUtf8Error),
}

impl DecodeError {
    /// Raw bytes of a body that failed UTF-8 validation.
    pub fn raw_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodeError::InvalidUtf8(err) => Some(err.as_bytes()),
            _ => None,
        }
    }

    /// Lossy rendering of an invalid body, for diagnostics only.
    pub fn lossy_value(&self) -> Option<String> {
        self.raw_bytes()
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
    }

    pub fn stage(&self) -> Stage {
        match self {
            DecodeError::Eof
            | DecodeError::LengthRead(_)
            | DecodeError::Truncated { .. }
            | DecodeError::LengthOverflow => Stage::Length,
            DecodeError::BodyRead(_) | DecodeError::BodyTruncated { .. } => Stage::Body,
            DecodeError::InvalidUtf8(_) => Stage::Utf8,
        }
    }

    /// True when the stream ended before the value was complete.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            DecodeError::Truncated { .. } | DecodeError::BodyTruncated { .. }
        )
    }
}

/// The step of an invocation at which it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Invoke,
    Params,
    Length,
    Body,
    Utf8,
}

/// Failure of one remote invocation, wrapped with the step that failed.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("failed to invoke `{name}`")]
    Invoke {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode parameters of `{name}`")]
    Params {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read result {index}")]
    Result {
        index: usize,
        #[source]
        source: DecodeError,
    },
}

impl InvokeError {
    pub fn stage(&self) -> Stage {
        match self {
            InvokeError::Invoke { .. } => Stage::Invoke,
            InvokeError::Params { .. } => Stage::Params,
            InvokeError::Result { source, .. } => source.stage(),
        }
    }

    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            InvokeError::Result { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Lossy rendering of a result that failed UTF-8 validation.
    pub fn lossy_value(&self) -> Option<String> {
        self.decode_error().and_then(DecodeError::lossy_value)
    }
}
