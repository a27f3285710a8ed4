//! Decoding documents from JSON or binary-container streams.

use std::io::{self, Read};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::glb::{self, GLB_MAGIC};
use crate::quota::ReadQuotas;
use crate::resolve::{BufferResolver, ResourceReader};

/// Decodes one document from a byte stream.
///
/// The pipeline is linear with no backward transitions: detect the wire
/// form, split container chunks if binary, unmarshal the JSON into the
/// document graph, quota-check the buffer collection, then resolve every
/// buffer payload. The first failing stage aborts the decode; a partial
/// document is never returned as success.
///
/// A decoder is consumed by [`decode`][Decoder::decode]. Its quota
/// configuration is fixed once set; share the [`ReadQuotas`] value across
/// decoders for concurrent decodes.
pub struct Decoder<R> {
    source: R,
    resources: Option<Box<dyn ResourceReader>>,
    quotas: ReadQuotas,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder with no external-resource capability. Buffers
    /// referencing external locators will fail to resolve.
    pub fn new(source: R) -> Self {
        Decoder {
            source,
            resources: None,
            quotas: ReadQuotas::default(),
        }
    }

    /// Create a decoder that materializes external locators through
    /// `resources`.
    pub fn with_resources(source: R, resources: Box<dyn ResourceReader>) -> Self {
        Decoder {
            source,
            resources: Some(resources),
            quotas: ReadQuotas::default(),
        }
    }

    /// Replace the default quotas.
    pub fn quotas(mut self, quotas: ReadQuotas) -> Self {
        self.quotas = quotas;
        self
    }

    /// Run the decode pipeline to completion.
    pub fn decode(mut self) -> Result<Document> {
        let (json, binary_chunk) = self.read_payload()?;
        let mut doc: Document = serde_json::from_slice(&json)?;
        self.quotas.check_buffer_count(doc.buffers.len())?;

        let resolver = BufferResolver {
            quotas: self.quotas,
            resources: self.resources.as_deref(),
            binary_chunk,
        };
        for (index, buffer) in doc.buffers.iter_mut().enumerate() {
            buffer.data = resolver.resolve(index, buffer)?;
        }
        Ok(doc)
    }

    /// Detect the wire form from the first four bytes and produce the
    /// JSON document bytes plus the container's binary chunk, if any.
    fn read_payload(&mut self) -> Result<(Vec<u8>, Option<Vec<u8>>)> {
        let mut head = [0u8; 4];
        let filled = fill(&mut self.source, &mut head)?;
        if filled == 4 && u32::from_le_bytes(head) == GLB_MAGIC {
            let chunks = glb::read_after_magic(&mut self.source, &self.quotas)?;
            Ok((chunks.json, chunks.bin))
        } else {
            let mut json = head[..filled].to_vec();
            self.source.read_to_end(&mut json)?;
            Ok((json, None))
        }
    }
}

/// Read into `buf` until it is full or the stream ends; returns the byte
/// count actually read.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        }
    }
    Ok(filled)
}
