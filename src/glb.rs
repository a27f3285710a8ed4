//! Binary container framing.
//!
//! A binary container opens with a fixed 12-byte header (magic, version,
//! total declared length) followed by framed chunks: a u32 payload
//! length, a u32 type tag, and exactly that many payload bytes. The first
//! chunk must carry the JSON type tag; an optional second chunk carries
//! the raw payload bound to the first buffer. The reader consumes exactly
//! the bytes its already-validated length fields promise: it stops at the
//! declared total rather than waiting for end of stream, and rejects any
//! chunk that would frame past it.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crate::error::{Error, FramingError, Result};
use crate::quota::ReadQuotas;

/// Magic number opening a binary container ("glTF", little-endian).
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// Container format version this crate reads and writes.
pub const GLB_VERSION: u32 = 2;
/// Type tag of the JSON chunk ("JSON").
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// Type tag of the raw binary chunk ("BIN\0").
pub const CHUNK_BIN: u32 = 0x004E_4942;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Chunks split out of a binary container stream.
#[derive(Clone, Debug)]
pub(crate) struct GlbChunks {
    /// Payload of the JSON chunk.
    pub json: Vec<u8>,
    /// Payload of the optional binary chunk.
    pub bin: Option<Vec<u8>>,
}

/// Read the remainder of a binary container whose 4-byte magic has
/// already been consumed. Chunk payload allocations are quota-checked
/// before they happen; chunks past the second are drained without
/// allocation. Iteration is bounded by the declared total length, so a
/// stream with trailing bytes past the container is never read into.
pub(crate) fn read_after_magic<R: Read>(reader: &mut R, quotas: &ReadQuotas) -> Result<GlbChunks> {
    let version = read_u32(reader, "container version")?;
    if version != GLB_VERSION {
        return Err(FramingError::VersionMismatch {
            supported: GLB_VERSION,
            actual: version,
        }
        .into());
    }
    let declared = read_u32(reader, "container length")? as usize;

    let mut framed = HEADER_LEN;
    let mut json = None;
    let mut bin = None;
    while framed < declared {
        if declared - framed < CHUNK_HEADER_LEN {
            // Trailing bytes too short to frame another chunk.
            return Err(FramingError::LengthMismatch {
                declared,
                actual: framed,
            }
            .into());
        }
        let (len, tag) = read_chunk_header(reader)?;
        if framed + CHUNK_HEADER_LEN + len > declared {
            return Err(FramingError::LengthMismatch {
                declared,
                actual: framed + CHUNK_HEADER_LEN + len,
            }
            .into());
        }
        if tag == CHUNK_JSON {
            if json.is_some() {
                return Err(FramingError::ExtraJsonChunk.into());
            }
            quotas.check_allocation("json chunk", len)?;
            json = Some(read_payload(reader, len, "json chunk")?);
        } else if json.is_none() {
            return Err(FramingError::MissingJsonChunk.into());
        } else if bin.is_none() {
            quotas.check_allocation("binary chunk", len)?;
            bin = Some(read_payload(reader, len, "binary chunk")?);
        } else {
            drain_payload(reader, len, "extra chunk")?;
        }
        framed += CHUNK_HEADER_LEN + len;
    }

    match json {
        Some(json) => Ok(GlbChunks { json, bin }),
        None => Err(FramingError::MissingJsonChunk.into()),
    }
}

/// Write a complete binary container. Chunk payloads are padded to
/// 4-byte alignment: the JSON chunk with spaces, the binary chunk with
/// zeros. The declared total length covers the padding.
pub(crate) fn write_glb<W: Write>(writer: &mut W, json: &[u8], bin: Option<&[u8]>) -> Result<()> {
    let json_pad = padding(json.len());
    let total = HEADER_LEN
        + CHUNK_HEADER_LEN
        + json.len()
        + json_pad
        + bin.map_or(0, |b| CHUNK_HEADER_LEN + b.len() + padding(b.len()));
    let total = u32::try_from(total).map_err(|_| {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "document too large for a binary container",
        ))
    })?;

    writer.write_u32::<LittleEndian>(GLB_MAGIC)?;
    writer.write_u32::<LittleEndian>(GLB_VERSION)?;
    writer.write_u32::<LittleEndian>(total)?;

    writer.write_u32::<LittleEndian>((json.len() + json_pad) as u32)?;
    writer.write_u32::<LittleEndian>(CHUNK_JSON)?;
    writer.write_all(json)?;
    writer.write_all(&b"    "[..json_pad])?;

    if let Some(bin) = bin {
        let bin_pad = padding(bin.len());
        writer.write_u32::<LittleEndian>((bin.len() + bin_pad) as u32)?;
        writer.write_u32::<LittleEndian>(CHUNK_BIN)?;
        writer.write_all(bin)?;
        writer.write_all(&[0u8; 4][..bin_pad])?;
    }
    Ok(())
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

fn read_u32<R: Read>(reader: &mut R, step: &'static str) -> Result<u32> {
    reader.read_u32::<LittleEndian>().map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FramingError::Truncated { step, expected: 4 }.into()
        } else {
            Error::Io(err)
        }
    })
}

fn read_chunk_header<R: Read>(reader: &mut R) -> Result<(usize, u32)> {
    let mut header = [0u8; CHUNK_HEADER_LEN];
    reader.read_exact(&mut header).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Framing(FramingError::Truncated {
                step: "chunk header",
                expected: CHUNK_HEADER_LEN,
            })
        } else {
            Error::Io(err)
        }
    })?;
    let len = u32::from_le_bytes(header[..4].try_into().unwrap()) as usize;
    let tag = u32::from_le_bytes(header[4..].try_into().unwrap());
    Ok((len, tag))
}

fn read_payload<R: Read>(reader: &mut R, len: usize, step: &'static str) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Framing(FramingError::Truncated {
                step,
                expected: len,
            })
        } else {
            Error::Io(err)
        }
    })?;
    Ok(payload)
}

/// Skip `len` payload bytes without allocating for them.
fn drain_payload<R: Read>(reader: &mut R, len: usize, step: &'static str) -> Result<()> {
    let copied = io::copy(&mut reader.take(len as u64), &mut io::sink())?;
    if copied as usize != len {
        return Err(FramingError::Truncated {
            step,
            expected: len,
        }
        .into());
    }
    Ok(())
}
