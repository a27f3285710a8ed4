use std::fmt;
use std::io;

/// Alias for a `Result` with the error type defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced while decoding or encoding a document.
///
/// Every error is terminal for the in-flight call: nothing is retried, and
/// no field is silently defaulted to mask a failure. The first failing
/// stage aborts the pipeline and returns here.
#[derive(Debug)]
pub enum Error {
    /// The binary container framing was invalid. The payload pins down
    /// which framing rule was broken.
    Framing(FramingError),
    /// The JSON document was structurally invalid: not parseable as JSON,
    /// or a field held a value of the wrong type.
    Schema(String),
    /// A size taken from untrusted input exceeded a configured quota. The
    /// allocation it would have driven was never attempted.
    QuotaExceeded {
        step: &'static str,
        requested: usize,
        max: usize,
    },
    /// A buffer's payload could not be materialized.
    Resource(ResourceError),
    /// Semantic constraint violation. This crate performs no semantic
    /// validation itself; the variant is the channel through which an
    /// external validation layer reports using the same error type.
    Validation(String),
    /// Transport failure on the caller-supplied input or output stream.
    Io(io::Error),
}

/// Ways a binary container can fail to frame correctly.
#[derive(Debug)]
pub enum FramingError {
    /// The container's version field doesn't match the supported version.
    VersionMismatch { supported: u32, actual: u32 },
    /// The declared total length disagrees with the framed chunks.
    LengthMismatch { declared: usize, actual: usize },
    /// The first chunk was missing or did not carry the JSON type tag.
    MissingJsonChunk,
    /// More than one chunk carried the JSON type tag.
    ExtraJsonChunk,
    /// The stream ended before a length field's promised byte count.
    Truncated { step: &'static str, expected: usize },
}

/// Ways a single buffer can fail to resolve.
#[derive(Debug)]
pub enum ResourceError {
    /// The buffer declared a byte length of zero.
    EmptyBuffer,
    /// The buffer declared no locator and no container chunk is available
    /// to bind it to.
    MissingUri,
    /// The locator contained a parent-directory traversal segment. The
    /// read capability was not invoked.
    UnsafeUri(String),
    /// The embedded data URI payload failed to decode.
    EmbeddedData(String),
    /// The injected read capability failed, or none was configured.
    Read(io::Error),
    /// The materialized payload length differs from the declared length.
    SizeMismatch { declared: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Framing(err) => write!(f, "Container framing error: {}", err),
            Error::Schema(msg) => write!(f, "Schema error: {}", msg),
            Error::QuotaExceeded {
                step,
                requested,
                max,
            } => write!(
                f,
                "Quota exceeded on step [{}]: requested {}, maximum allowed is {}",
                step, requested, max
            ),
            Error::Resource(err) => write!(f, "Resource error: {}", err),
            Error::Validation(msg) => write!(f, "Validation failed: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FramingError::VersionMismatch { supported, actual } => write!(
                f,
                "Container version is {}, only version {} is supported",
                actual, supported
            ),
            FramingError::LengthMismatch { declared, actual } => write!(
                f,
                "Container declares {} total bytes, but its chunks frame {}",
                declared, actual
            ),
            FramingError::MissingJsonChunk => {
                f.write_str("Container has no JSON chunk in first position")
            }
            FramingError::ExtraJsonChunk => f.write_str("Container has more than one JSON chunk"),
            FramingError::Truncated { step, expected } => write!(
                f,
                "Stream ended on step [{}] before {} promised bytes",
                step, expected
            ),
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceError::EmptyBuffer => f.write_str("Buffer declares a byte length of zero"),
            ResourceError::MissingUri => {
                f.write_str("Buffer declares no locator and no container chunk binds to it")
            }
            ResourceError::UnsafeUri(uri) => {
                write!(f, "Locator contains a parent-directory segment: {}", uri)
            }
            ResourceError::EmbeddedData(msg) => {
                write!(f, "Embedded data URI failed to decode: {}", msg)
            }
            ResourceError::Read(err) => write!(f, "Resource read failed: {}", err),
            ResourceError::SizeMismatch { declared, actual } => write!(
                f,
                "Buffer declares {} bytes but its payload resolved to {}",
                declared, actual
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Resource(ResourceError::Read(err)) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FramingError> for Error {
    fn from(err: FramingError) -> Self {
        Error::Framing(err)
    }
}

impl From<ResourceError> for Error {
    fn from(err: ResourceError) -> Self {
        Error::Resource(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Schema(err.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
