//! gltf-pack reads and writes glTF 2.0 assets in both of their wire
//! forms: a plain UTF-8 JSON document, or the GLB binary container
//! embedding a JSON chunk plus an optional raw binary chunk. It is built
//! to load documents from untrusted sources: every allocation whose size
//! comes from the input is gated behind configurable quotas, and external
//! resource locators are screened before any I/O happens.
//!
//! The crate deals in structure, not meaning. Decoding gives every absent
//! field its canonical default (sentinel indices, identity transforms,
//! unit factors) and encoding elides fields sitting at those defaults, so
//! a decode/encode pair reproduces the format's implicit-default
//! conventions exactly. Semantic validation of the result (index ranges,
//! code membership) is left to the caller, as is all concrete I/O: the
//! only way the decoder touches the outside world is through the
//! [`ResourceReader`] capability the caller supplies.
//!
//! ```
//! use gltf_pack::{Decoder, Encoder, ReadQuotas};
//!
//! let json = br#"{"asset":{"version":"2.0"},"nodes":[{"name":"root"}]}"#;
//! let quotas = ReadQuotas {
//!     max_single_allocation: 1 << 20,
//!     max_buffer_count: 4,
//! };
//! let doc = Decoder::new(&json[..]).quotas(quotas).decode()?;
//! assert_eq!(doc.nodes[0].name, "root");
//!
//! let mut out = Vec::new();
//! Encoder::new(&mut out).encode(&doc)?;
//! assert_eq!(out, json);
//! # Ok::<(), gltf_pack::Error>(())
//! ```

pub mod animation;
pub mod buffer;
pub mod camera;
pub mod decode;
pub mod document;
pub mod encode;
mod error;
pub mod glb;
mod index;
pub mod material;
pub mod mesh;
pub mod node;
pub mod quota;
mod resolve;

pub use self::decode::Decoder;
pub use self::document::{Asset, Document, Extensions, Scene};
pub use self::encode::Encoder;
pub use self::error::{Error, FramingError, ResourceError, Result};
pub use self::index::INDEX_NONE;
pub use self::quota::{ReadQuotas, UNLIMITED};
pub use self::resolve::ResourceReader;
