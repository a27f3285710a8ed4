//! The document graph root and asset metadata.
//!
//! A [`Document`] owns ordered collections of every entity kind; entities
//! reference each other by index into the sibling collection, never by
//! ownership. Entities are produced either by decoding or by the
//! default-filled constructors, and live exactly as long as the document
//! that owns them.

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::animation::Animation;
use crate::buffer::{Accessor, Buffer, BufferView};
use crate::camera::Camera;
use crate::index::index_is_none;
use crate::material::{Image, Material, Sampler, Texture};
use crate::mesh::Mesh;
use crate::node::{Node, Skin};

/// Extension objects keyed by extension name, carried through decoding
/// and encoding unchanged.
pub type Extensions = BTreeMap<String, Value>;

/// Metadata about the asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Asset {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// A copyright message suitable for display to credit the content
    /// creator.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub copyright: String,
    /// Tool that generated this asset. Useful for debugging.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub generator: String,
    /// The format version this asset targets. Always present on the wire.
    pub version: String,
    /// The minimum format version needed to load this asset.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub min_version: String,
}

/// The root object of a decoded or to-be-encoded asset.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Names of extensions used anywhere in this document.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions_used: Vec<String>,
    /// Names of extensions required to load this document.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions_required: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<Animation>,
    /// Asset metadata. Always present on the wire.
    pub asset: Asset,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Buffer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buffer_views: Vec<BufferView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cameras: Vec<Camera>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<Mesh>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samplers: Vec<Sampler>,
    /// Index of the scene to show first. The sentinel means the document
    /// declares no preferred scene, which is not the same thing as
    /// preferring scene 0: the sentinel encodes as an omitted field, and
    /// an omitted field decodes back to the sentinel.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub scene: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skins: Vec<Skin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub textures: Vec<Texture>,
}

impl Document {
    /// Create an empty document with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A list of root nodes forming one displayable scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scene {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Indices of the scene's root nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<u32>,
}

impl Scene {
    /// Create a scene with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}
