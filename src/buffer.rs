//! Buffers and the typed views into them.
//!
//! A [`Buffer`] declares a byte length and optionally a resource locator;
//! its payload is materialized during decoding and never crosses the JSON
//! wire itself. [`BufferView`] and [`Accessor`] are pure metadata over a
//! buffer's bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Extensions;
use crate::error::{ResourceError, Result};
use crate::index::index_is_none;

/// Data URI prefix carrying a base64 binary payload inline.
pub(crate) const OCTET_STREAM_URI: &str = "data:application/octet-stream;base64";

/// Accessor element shapes.
pub const SCALAR: &str = "SCALAR";
pub const VEC2: &str = "VEC2";
pub const VEC3: &str = "VEC3";
pub const VEC4: &str = "VEC4";
pub const MAT2: &str = "MAT2";
pub const MAT3: &str = "MAT3";
pub const MAT4: &str = "MAT4";

/// Accessor component type, as a GL type code.
///
/// The set is open: decoding preserves codes outside the named constants,
/// and membership checking belongs to a validation layer outside this
/// crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentType(pub u32);

impl ComponentType {
    pub const BYTE: ComponentType = ComponentType(5120);
    pub const UNSIGNED_BYTE: ComponentType = ComponentType(5121);
    pub const SHORT: ComponentType = ComponentType(5122);
    pub const UNSIGNED_SHORT: ComponentType = ComponentType(5123);
    pub const UNSIGNED_INT: ComponentType = ComponentType(5125);
    pub const FLOAT: ComponentType = ComponentType(5126);
}

/// Intended GL binding target of a buffer view. Zero means undeclared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(pub u32);

impl Target {
    pub const ARRAY_BUFFER: Target = Target(34962);
    pub const ELEMENT_ARRAY_BUFFER: Target = Target(34963);
}

/// A span of raw bytes backing geometry, animation, or skinning data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Buffer {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Resource locator: an embedded data URI, a relative external
    /// locator, or empty when the payload binds to the container's
    /// binary chunk.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uri: String,
    /// Declared payload size in bytes. Always present on the wire.
    pub byte_length: u32,
    /// Materialized payload. Filled during decoding, never serialized.
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl Buffer {
    /// Create a buffer with default field values.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the locator carries the payload inline as a base64 data
    /// URI.
    pub fn is_embedded_resource(&self) -> bool {
        self.uri.starts_with(OCTET_STREAM_URI)
    }

    /// Re-encode the payload into the locator following the data-URI
    /// convention, making the buffer self-contained.
    pub fn embed_resource(&mut self) {
        self.uri = format!("{},{}", OCTET_STREAM_URI, STANDARD.encode(&self.data));
    }

    /// Decode the payload embedded in the locator. Returns an empty
    /// vector when the locator is not an embedded resource.
    pub fn embedded_data(&self) -> Result<Vec<u8>> {
        if !self.is_embedded_resource() {
            return Ok(Vec::new());
        }
        let payload = &self.uri[OCTET_STREAM_URI.len() + 1..];
        STANDARD
            .decode(payload)
            .map_err(|err| ResourceError::EmbeddedData(err.to_string()).into())
    }
}

/// A view into a buffer, generally representing a subset of it.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BufferView {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Index of the buffer this view reads from.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub buffer: i32,
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub byte_offset: u32,
    /// Length of the view in bytes. Always present on the wire.
    pub byte_length: u32,
    /// Stride between vertex attributes. Zero means tightly packed.
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub byte_stride: u32,
    #[serde(skip_serializing_if = "target_is_unset")]
    pub target: Target,
}

impl BufferView {
    /// Create a buffer view with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A typed view into a buffer view, defining how its bytes are read as
/// elements.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Accessor {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub buffer_view: i32,
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub byte_offset: u32,
    /// Component type code. Always present on the wire.
    pub component_type: ComponentType,
    /// Whether integer components should be normalized on read.
    #[serde(skip_serializing_if = "is_false")]
    pub normalized: bool,
    /// Number of elements this accessor spans. Always present on the
    /// wire.
    pub count: u32,
    /// Element shape (one of the [`SCALAR`]..[`MAT4`] codes). Always
    /// present on the wire.
    #[serde(rename = "type")]
    pub type_: String,
    /// Maximum value of each component in this attribute.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub max: Vec<f64>,
    /// Minimum value of each component in this attribute.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub min: Vec<f64>,
    /// Sparse storage of elements deviating from their initialization
    /// value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse: Option<Sparse>,
}

impl Accessor {
    /// Create an accessor with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sparse storage of attributes deviating from their initialization
/// value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sparse {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Number of deviating elements. Always present on the wire.
    pub count: u32,
    /// Locations of the deviating elements. Always present on the wire.
    pub indices: SparseIndices,
    /// Displaced values for the deviating elements. Always present on the
    /// wire.
    pub values: SparseValues,
}

/// Index array pointing at the accessor elements that deviate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparseIndices {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// View holding the index data. Always present on the wire.
    pub buffer_view: u32,
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub byte_offset: u32,
    /// Component type code of the indices. Always present on the wire.
    pub component_type: ComponentType,
}

/// Displaced accessor values pointed at by the sparse indices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparseValues {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// View holding the value data. Always present on the wire.
    pub buffer_view: u32,
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub byte_offset: u32,
}

fn u32_is_zero(v: &u32) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn target_is_unset(t: &Target) -> bool {
    t.0 == 0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::INDEX_NONE;

    #[test]
    fn accessor_defaults() {
        let acc = Accessor::new();
        assert_eq!(acc.buffer_view, INDEX_NONE);
        assert_eq!(acc.component_type, ComponentType(0));
        assert_eq!(acc.count, 0);
    }

    #[test]
    fn accessor_absent_fields_keep_defaults() {
        let acc: Accessor =
            serde_json::from_str(r#"{"componentType":5123,"count":36,"type":"SCALAR"}"#).unwrap();
        assert_eq!(acc.buffer_view, INDEX_NONE);
        assert_eq!(acc.byte_offset, 0);
        assert_eq!(acc.component_type, ComponentType::UNSIGNED_SHORT);
        assert_eq!(acc.type_, SCALAR);
        assert!(!acc.normalized);
    }

    #[test]
    fn accessor_sentinel_elides_but_zero_survives() {
        let mut acc = Accessor::new();
        acc.component_type = ComponentType::FLOAT;
        acc.count = 4;
        acc.type_ = VEC3.to_string();
        let json = serde_json::to_string(&acc).unwrap();
        assert!(!json.contains("bufferView"));

        acc.buffer_view = 0;
        let json = serde_json::to_string(&acc).unwrap();
        assert!(json.contains(r#""bufferView":0"#));
    }

    #[test]
    fn unknown_component_code_round_trips() {
        let acc: Accessor =
            serde_json::from_str(r#"{"componentType":9999,"count":1,"type":"SCALAR"}"#).unwrap();
        assert_eq!(acc.component_type, ComponentType(9999));
        let json = serde_json::to_string(&acc).unwrap();
        assert!(json.contains(r#""componentType":9999"#));
    }

    #[test]
    fn buffer_embedded_resource() {
        let mut buffer = Buffer::new();
        buffer.byte_length = 3;
        buffer.data = vec![1, 2, 3];
        assert!(!buffer.is_embedded_resource());

        buffer.embed_resource();
        assert!(buffer.is_embedded_resource());
        assert_eq!(buffer.uri, "data:application/octet-stream;base64,AQID");
        assert_eq!(buffer.embedded_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn buffer_bad_base64_fails() {
        let buffer = Buffer {
            uri: "data:application/octet-stream;base64,@@@".to_string(),
            byte_length: 3,
            ..Buffer::new()
        };
        assert!(buffer.embedded_data().is_err());
    }

    #[test]
    fn buffer_data_never_serialized() {
        let buffer = Buffer {
            byte_length: 4,
            data: vec![9, 9, 9, 9],
            ..Buffer::new()
        };
        let json = serde_json::to_string(&buffer).unwrap();
        assert_eq!(json, r#"{"byteLength":4}"#);
    }

    #[test]
    fn buffer_view_round_trip() {
        let wire = r#"{"buffer":0,"byteOffset":72,"byteLength":432,"target":34962}"#;
        let view: BufferView = serde_json::from_str(wire).unwrap();
        assert_eq!(view.buffer, 0);
        assert_eq!(view.target, Target::ARRAY_BUFFER);
        assert_eq!(serde_json::to_string(&view).unwrap(), wire);
    }

    #[test]
    fn buffer_view_defaults_elide() {
        let view: BufferView = serde_json::from_str(r#"{"byteLength":8}"#).unwrap();
        assert_eq!(view.buffer, INDEX_NONE);
        assert_eq!(serde_json::to_string(&view).unwrap(), r#"{"byteLength":8}"#);
    }
}
