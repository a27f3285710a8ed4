//! Materializing buffer payloads.
//!
//! A declared buffer obtains its bytes from exactly one source, tried in
//! fixed priority order: an embedded base64 data URI, an external locator
//! handed to the injected [`ResourceReader`] capability, or the binary
//! container's chunk (first buffer only). Every path quota-checks the
//! declared size immediately before the allocation that will hold the
//! payload, and the resolved length must equal the declared length
//! exactly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Read};

use crate::buffer::Buffer;
use crate::error::{ResourceError, Result};
use crate::quota::ReadQuotas;

/// The injected read capability for external resources.
///
/// This is the crate's only I/O seam: any filesystem, network, or
/// in-memory implementation is valid. The capability never observes a
/// locator containing a parent-directory traversal segment; such locators
/// are rejected before it is invoked.
pub trait ResourceReader {
    /// Open the resource at `uri` for reading.
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read>>;
}

impl<F> ResourceReader for F
where
    F: Fn(&str) -> io::Result<Box<dyn Read>>,
{
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read>> {
        self(uri)
    }
}

/// Resolves declared buffers into materialized payloads.
pub(crate) struct BufferResolver<'a> {
    pub quotas: ReadQuotas,
    pub resources: Option<&'a dyn ResourceReader>,
    /// Binary chunk split out of the container, if the input was one.
    pub binary_chunk: Option<Vec<u8>>,
}

impl BufferResolver<'_> {
    /// Materialize the payload for the buffer at `index`.
    pub fn resolve(&self, index: usize, buffer: &Buffer) -> Result<Vec<u8>> {
        let declared = buffer.byte_length as usize;
        if declared == 0 {
            return Err(ResourceError::EmptyBuffer.into());
        }

        if buffer.is_embedded_resource() {
            self.quotas.check_allocation("embedded buffer", declared)?;
            let data = buffer.embedded_data()?;
            return check_length(declared, data);
        }

        if !buffer.uri.is_empty() {
            if has_traversal_segment(&buffer.uri) {
                return Err(ResourceError::UnsafeUri(buffer.uri.clone()).into());
            }
            let resources = self.resources.ok_or_else(|| {
                ResourceError::Read(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "no resource reader configured",
                ))
            })?;
            self.quotas.check_allocation("external buffer", declared)?;
            let stream = resources.open(&buffer.uri).map_err(ResourceError::Read)?;
            // One byte past the declared length detects oversized sources
            // without ever reading past declared + 1.
            let mut data = Vec::with_capacity(declared);
            stream
                .take(declared as u64 + 1)
                .read_to_end(&mut data)
                .map_err(ResourceError::Read)?;
            return check_length(declared, data);
        }

        match (&self.binary_chunk, index) {
            (Some(chunk), 0) => {
                self.quotas.check_allocation("container buffer", declared)?;
                if chunk.len() < declared {
                    return Err(ResourceError::SizeMismatch {
                        declared,
                        actual: chunk.len(),
                    }
                    .into());
                }
                // The chunk may trail alignment padding past the declared
                // length.
                Ok(chunk[..declared].to_vec())
            }
            _ => Err(ResourceError::MissingUri.into()),
        }
    }
}

fn check_length(declared: usize, data: Vec<u8>) -> Result<Vec<u8>> {
    if data.len() != declared {
        return Err(ResourceError::SizeMismatch {
            declared,
            actual: data.len(),
        }
        .into());
    }
    Ok(data)
}

fn has_traversal_segment(uri: &str) -> bool {
    uri.split(['/', '\\']).any(|segment| segment == "..")
}
