//! Error types for ring signature operations

use thiserror::Error;

/// Result type alias for ring signature operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, signing, verifying or decoding
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The ring holds no public key
    #[error("Invalid ring: ring is empty")]
    EmptyRing,

    /// Two ring members denote the same point
    #[error("Invalid ring: ring contains duplicates")]
    DuplicateRingMember,

    /// Coordinates do not satisfy the curve equation
    #[error("Point is not on curve: {0}")]
    NotOnCurve(String),

    /// Point is on the curve but unusable in a protocol role
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    /// Ring and responses must have one entry per member
    #[error("Length mismatch: {ring} ring members but {responses} responses")]
    LengthMismatch { ring: usize, responses: usize },

    /// A response is zero or not reduced modulo the curve order
    #[error("Invalid response at index {0}: responses must lie in [1, N)")]
    InvalidResponse(usize),

    /// Curve name not supported
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    /// Operation mixes points from different curves
    #[error("Curve mismatch: {0}")]
    CurveMismatch(String),

    /// Scalar outside of [0, N)
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// Bound or index outside of its allowed range
    #[error("Out of range: {0}")]
    Range(String),

    /// Malformed serialized input
    #[error("Decoding error: {0}")]
    Decode(String),
}

/// Coarse classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural or input validation failure
    Validation,
    /// Unsupported curve or cross-curve operation
    Curve,
    /// Scalar or bound out of range
    Range,
    /// Serialized data could not be decoded
    Decode,
}

impl Error {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyRing
            | Error::DuplicateRingMember
            | Error::NotOnCurve(_)
            | Error::InvalidPoint(_)
            | Error::LengthMismatch { .. }
            | Error::InvalidResponse(_) => ErrorKind::Validation,
            Error::UnknownCurve(_) | Error::CurveMismatch(_) => ErrorKind::Curve,
            Error::InvalidScalar(_) | Error::Range(_) => ErrorKind::Range,
            Error::Decode(_) => ErrorKind::Decode,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::Decode(e.to_string())
    }
}
