//! Nodes of the transform hierarchy and skins.

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Extensions;
use crate::index::index_is_none;

/// Column-major identity transform, the canonical default for a node's
/// matrix.
pub const IDENTITY_MATRIX: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// A node in the transform hierarchy.
///
/// One transform representation is meaningful per instance: either the
/// 4x4 `matrix`, or the translation/rotation/scale triple. The canonical
/// default is the identity either way.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Node {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub camera: i32,
    /// Indices of this node's children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub skin: i32,
    /// A 4x4 transformation matrix stored in column-major order.
    #[educe(Default(expression = IDENTITY_MATRIX))]
    #[serde(skip_serializing_if = "matrix_is_identity")]
    pub matrix: [f64; 16],
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub mesh: i32,
    /// Unit quaternion rotation in the order (x, y, z, w), where w is the
    /// scalar.
    #[educe(Default(expression = [0.0, 0.0, 0.0, 1.0]))]
    #[serde(skip_serializing_if = "rotation_is_identity")]
    pub rotation: [f64; 4],
    /// Scaling factors along the x, y, and z axes.
    #[educe(Default(expression = [1.0, 1.0, 1.0]))]
    #[serde(skip_serializing_if = "scale_is_unit")]
    pub scale: [f64; 3],
    /// Translation along the x, y, and z axes.
    #[serde(skip_serializing_if = "translation_is_zero")]
    pub translation: [f64; 3],
    /// Weights of the instantiated morph target.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
}

impl Node {
    /// Create a node with the identity transform and no references.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Joints and inverse-bind matrices for vertex skinning.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Skin {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Accessor holding the floating-point 4x4 inverse-bind matrices.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub inverse_bind_matrices: i32,
    /// Node used as the skeleton root. At the sentinel, joint transforms
    /// resolve to the scene root.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub skeleton: i32,
    /// Indices of skeleton nodes used as joints. Always present on the
    /// wire.
    pub joints: Vec<u32>,
}

impl Skin {
    /// Create a skin with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matrix_is_identity(matrix: &[f64; 16]) -> bool {
    *matrix == IDENTITY_MATRIX
}

fn rotation_is_identity(rotation: &[f64; 4]) -> bool {
    *rotation == [0.0, 0.0, 0.0, 1.0]
}

fn scale_is_unit(scale: &[f64; 3]) -> bool {
    *scale == [1.0, 1.0, 1.0]
}

fn translation_is_zero(translation: &[f64; 3]) -> bool {
    *translation == [0.0, 0.0, 0.0]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::INDEX_NONE;

    #[test]
    fn default_node_encodes_empty() {
        let node = Node::new();
        assert_eq!(node.matrix, IDENTITY_MATRIX);
        assert_eq!(node.rotation, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(node.scale, [1.0, 1.0, 1.0]);
        assert_eq!(node.camera, INDEX_NONE);
        assert_eq!(node.skin, INDEX_NONE);
        assert_eq!(node.mesh, INDEX_NONE);
        assert_eq!(serde_json::to_string(&node).unwrap(), "{}");
    }

    #[test]
    fn absent_transform_decodes_to_identity() {
        let node: Node = serde_json::from_str(r#"{"name":"root","mesh":0}"#).unwrap();
        assert_eq!(node.matrix, IDENTITY_MATRIX);
        assert_eq!(node.rotation, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(node.scale, [1.0, 1.0, 1.0]);
        assert_eq!(node.translation, [0.0, 0.0, 0.0]);
        assert_eq!(node.mesh, 0);
        assert_eq!(node.camera, INDEX_NONE);
    }

    #[test]
    fn explicit_transform_round_trips() {
        let wire = r#"{"rotation":[-0.3,0.0,0.0,0.9],"translation":[0.5,0.5,3.0]}"#;
        let node: Node = serde_json::from_str(wire).unwrap();
        assert_eq!(node.rotation, [-0.3, 0.0, 0.0, 0.9]);
        assert_eq!(node.scale, [1.0, 1.0, 1.0]);
        assert_eq!(serde_json::to_string(&node).unwrap(), wire);
    }

    #[test]
    fn node_round_trip_idempotent() {
        let mut node = Node::new();
        node.name = "pivot".to_string();
        node.children = vec![1, 2];
        node.mesh = 3;
        node.scale = [2.0, 2.0, 2.0];
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn skin_sentinels_elide() {
        let skin = Skin {
            joints: vec![0, 1],
            ..Skin::new()
        };
        assert_eq!(
            serde_json::to_string(&skin).unwrap(),
            r#"{"joints":[0,1]}"#
        );
        let back: Skin = serde_json::from_str(r#"{"joints":[0,1]}"#).unwrap();
        assert_eq!(back.inverse_bind_matrices, INDEX_NONE);
        assert_eq!(back.skeleton, INDEX_NONE);
    }
}
