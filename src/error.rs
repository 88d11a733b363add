use thiserror::Error;

/// Malformed or over-limit data received from the server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unexpected response length: expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },

    #[error("unexpected response type: expected {expected}, got {actual}")]
    UnexpectedType { expected: i64, actual: i64 },

    #[error("{field} too long: {len} bytes exceeds limit of {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("response exceeds receive limit of {limit} bytes")]
    ResponseTooLarge { limit: usize },

    #[error("response header count exceeds limit of {limit}")]
    TooManyHeaders { limit: usize },

    #[error("response header entry exceeds limit of {limit} bytes")]
    HeaderTooLong { limit: usize },

    #[error("response body exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type Result<T> = std::result::Result<T, Error>;
