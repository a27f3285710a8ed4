//! Meshes and their renderable primitives.

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::document::Extensions;
use crate::index::index_is_none;

/// Mesh attribute semantics ("POSITION", "NORMAL", ...) mapped to
/// accessor indices. Keys serialize in sorted order.
pub type Attribute = BTreeMap<String, u32>;

/// Primitive topology, as a GL mode code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveMode(pub u32);

impl PrimitiveMode {
    pub const POINTS: PrimitiveMode = PrimitiveMode(0);
    pub const LINES: PrimitiveMode = PrimitiveMode(1);
    pub const LINE_LOOP: PrimitiveMode = PrimitiveMode(2);
    pub const LINE_STRIP: PrimitiveMode = PrimitiveMode(3);
    pub const TRIANGLES: PrimitiveMode = PrimitiveMode(4);
    pub const TRIANGLE_STRIP: PrimitiveMode = PrimitiveMode(5);
    pub const TRIANGLE_FAN: PrimitiveMode = PrimitiveMode(6);
}

/// A set of primitives to be rendered. A node's transform places the
/// mesh in the scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mesh {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Geometry to render. Always present on the wire.
    pub primitives: Vec<Primitive>,
    /// Weights applied to the morph targets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
}

impl Mesh {
    /// Create a mesh with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Geometry to be rendered with a given material.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Primitive {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Attribute semantics mapped to accessor indices. Always present on
    /// the wire.
    pub attributes: Attribute,
    /// Accessor holding the vertex indices.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub indices: i32,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub material: i32,
    #[educe(Default(expression = PrimitiveMode::TRIANGLES))]
    #[serde(skip_serializing_if = "mode_is_triangles")]
    pub mode: PrimitiveMode,
    /// Morph targets, each a set of attribute displacements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Attribute>,
}

impl Primitive {
    /// Create a primitive with triangle topology and no references.
    pub fn new() -> Self {
        Self::default()
    }
}

fn mode_is_triangles(mode: &PrimitiveMode) -> bool {
    *mode == PrimitiveMode::TRIANGLES
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::INDEX_NONE;

    #[test]
    fn primitive_defaults() {
        let prim = Primitive::new();
        assert_eq!(prim.mode, PrimitiveMode::TRIANGLES);
        assert_eq!(prim.indices, INDEX_NONE);
        assert_eq!(prim.material, INDEX_NONE);
        assert_eq!(
            serde_json::to_string(&prim).unwrap(),
            r#"{"attributes":{}}"#
        );
    }

    #[test]
    fn absent_mode_decodes_to_triangles() {
        let prim: Primitive =
            serde_json::from_str(r#"{"attributes":{"POSITION":1},"indices":0}"#).unwrap();
        assert_eq!(prim.mode, PrimitiveMode::TRIANGLES);
        assert_eq!(prim.indices, 0);
        assert_eq!(prim.material, INDEX_NONE);
    }

    #[test]
    fn explicit_mode_round_trips() {
        let wire = r#"{"attributes":{"POSITION":0},"mode":0}"#;
        let prim: Primitive = serde_json::from_str(wire).unwrap();
        assert_eq!(prim.mode, PrimitiveMode::POINTS);
        assert_eq!(serde_json::to_string(&prim).unwrap(), wire);
    }

    #[test]
    fn attributes_serialize_sorted() {
        let mut prim = Primitive::new();
        prim.attributes.insert("TEXCOORD_0".to_string(), 4);
        prim.attributes.insert("NORMAL".to_string(), 2);
        prim.attributes.insert("POSITION".to_string(), 1);
        assert_eq!(
            serde_json::to_string(&prim).unwrap(),
            r#"{"attributes":{"NORMAL":2,"POSITION":1,"TEXCOORD_0":4}}"#
        );
    }

    #[test]
    fn mesh_round_trip_idempotent() {
        let mut mesh = Mesh::new();
        mesh.name = "Cube".to_string();
        let mut prim = Primitive::new();
        prim.attributes.insert("POSITION".to_string(), 1);
        prim.indices = 0;
        prim.material = 0;
        mesh.primitives.push(prim);
        let json = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
