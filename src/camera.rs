//! Camera projections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Extensions;

/// Camera projection kinds.
pub const PERSPECTIVE: &str = "perspective";
pub const ORTHOGRAPHIC: &str = "orthographic";

/// A camera projection. A node references a camera to place it in the
/// scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Camera {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orthographic: Option<Orthographic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perspective: Option<Perspective>,
    /// One of the [`PERSPECTIVE`], [`ORTHOGRAPHIC`] codes. Always present
    /// on the wire.
    #[serde(rename = "type")]
    pub type_: String,
}

impl Camera {
    /// Create a camera with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Properties of an orthographic projection matrix.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Orthographic {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Horizontal magnification of the view.
    pub xmag: f64,
    /// Vertical magnification of the view.
    pub ymag: f64,
    /// Distance to the far clipping plane.
    pub zfar: f64,
    /// Distance to the near clipping plane.
    pub znear: f64,
}

/// Properties of a perspective projection matrix.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Perspective {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Aspect ratio of the field of view. Zero means unset.
    #[serde(skip_serializing_if = "f64_is_zero")]
    pub aspect_ratio: f64,
    /// Vertical field of view in radians.
    pub yfov: f64,
    /// Distance to the far clipping plane. Zero means unset (infinite
    /// projection).
    #[serde(skip_serializing_if = "f64_is_zero")]
    pub zfar: f64,
    /// Distance to the near clipping plane.
    pub znear: f64,
}

fn f64_is_zero(v: &f64) -> bool {
    *v == 0.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn perspective_round_trip() {
        let wire =
            r#"{"perspective":{"aspectRatio":1.0,"yfov":0.7,"zfar":100.0,"znear":0.01},"type":"perspective"}"#;
        let camera: Camera = serde_json::from_str(wire).unwrap();
        assert_eq!(camera.type_, PERSPECTIVE);
        let persp = camera.perspective.as_ref().unwrap();
        assert_eq!(persp.yfov, 0.7);
        assert_eq!(serde_json::to_string(&camera).unwrap(), wire);
    }

    #[test]
    fn perspective_unset_planes_elide() {
        let camera = Camera {
            perspective: Some(Perspective {
                yfov: 0.7,
                znear: 0.01,
                ..Perspective::default()
            }),
            type_: PERSPECTIVE.to_string(),
            ..Camera::new()
        };
        assert_eq!(
            serde_json::to_string(&camera).unwrap(),
            r#"{"perspective":{"yfov":0.7,"znear":0.01},"type":"perspective"}"#
        );
    }

    #[test]
    fn orthographic_fields_always_present() {
        let camera = Camera {
            orthographic: Some(Orthographic {
                xmag: 1.0,
                ymag: 1.0,
                zfar: 100.0,
                znear: 0.01,
                ..Orthographic::default()
            }),
            type_: ORTHOGRAPHIC.to_string(),
            ..Camera::new()
        };
        let json = serde_json::to_string(&camera).unwrap();
        assert!(json.contains(r#""xmag":1.0"#));
        assert!(json.contains(r#""znear":0.01"#));
        let back: Camera = serde_json::from_str(&json).unwrap();
        assert_eq!(back, camera);
    }
}
