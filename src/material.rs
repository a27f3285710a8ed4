//! Materials, textures, samplers, and images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Extensions;
use crate::error::{ResourceError, Result};
use crate::index::index_is_none;

/// Alpha rendering modes.
pub const OPAQUE: &str = "OPAQUE";
pub const MASK: &str = "MASK";
pub const BLEND: &str = "BLEND";

/// Data URI prefixes for embedded images.
pub(crate) const IMAGE_PNG_URI: &str = "data:image/png;base64";
pub(crate) const IMAGE_JPEG_URI: &str = "data:image/jpeg;base64";

/// Texture magnification filter, as a GL code. Zero means unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MagFilter(pub u32);

impl MagFilter {
    pub const NEAREST: MagFilter = MagFilter(9728);
    pub const LINEAR: MagFilter = MagFilter(9729);
}

/// Texture minification filter, as a GL code. Zero means unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinFilter(pub u32);

impl MinFilter {
    pub const NEAREST: MinFilter = MinFilter(9728);
    pub const LINEAR: MinFilter = MinFilter(9729);
    pub const NEAREST_MIPMAP_NEAREST: MinFilter = MinFilter(9984);
    pub const LINEAR_MIPMAP_NEAREST: MinFilter = MinFilter(9985);
    pub const NEAREST_MIPMAP_LINEAR: MinFilter = MinFilter(9986);
    pub const LINEAR_MIPMAP_LINEAR: MinFilter = MinFilter(9987);
}

/// Texture coordinate wrapping mode, as a GL code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrappingMode(pub u32);

impl WrappingMode {
    pub const CLAMP_TO_EDGE: WrappingMode = WrappingMode(33071);
    pub const MIRRORED_REPEAT: WrappingMode = WrappingMode(33648);
    pub const REPEAT: WrappingMode = WrappingMode(10497);
}

/// The appearance of a primitive.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Material {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_texture: Option<NormalTexture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occlusion_texture: Option<OcclusionTexture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_texture: Option<TextureInfo>,
    #[serde(skip_serializing_if = "rgb_is_black")]
    pub emissive_factor: [f64; 3],
    /// One of the [`OPAQUE`], [`MASK`], [`BLEND`] codes.
    #[educe(Default(expression = String::from(OPAQUE)))]
    #[serde(skip_serializing_if = "alpha_mode_is_default")]
    pub alpha_mode: String,
    /// Alpha cutoff applied in [`MASK`] mode.
    #[educe(Default = 0.5)]
    #[serde(skip_serializing_if = "cutoff_is_default")]
    pub alpha_cutoff: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub double_sided: bool,
}

impl Material {
    /// Create an opaque material with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parameters of the metallic-roughness material model.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[educe(Default(expression = [1.0, 1.0, 1.0, 1.0]))]
    #[serde(skip_serializing_if = "rgba_is_opaque_white")]
    pub base_color_factor: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color_texture: Option<TextureInfo>,
    #[educe(Default = 1.0)]
    #[serde(skip_serializing_if = "factor_is_one")]
    pub metallic_factor: f64,
    #[educe(Default = 1.0)]
    #[serde(skip_serializing_if = "factor_is_one")]
    pub roughness_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metallic_roughness_texture: Option<TextureInfo>,
}

impl PbrMetallicRoughness {
    /// Create metallic-roughness parameters at their canonical defaults.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A reference to a texture.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TextureInfo {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub index: i32,
    /// TEXCOORD attribute set used for texture coordinate mapping.
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub tex_coord: u32,
}

impl TextureInfo {
    /// Create a reference to the texture at `index`.
    pub fn new(index: i32) -> Self {
        TextureInfo {
            index,
            ..Self::default()
        }
    }
}

/// A reference to a normal texture.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalTexture {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub index: i32,
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub tex_coord: u32,
    /// Scalar applied to each normal vector component.
    #[educe(Default = 1.0)]
    #[serde(skip_serializing_if = "factor_is_one")]
    pub scale: f64,
}

impl NormalTexture {
    /// Create a reference to the normal texture at `index`.
    pub fn new(index: i32) -> Self {
        NormalTexture {
            index,
            ..Self::default()
        }
    }
}

/// A reference to an occlusion texture.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct OcclusionTexture {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub index: i32,
    #[serde(skip_serializing_if = "u32_is_zero")]
    pub tex_coord: u32,
    /// Scalar applied to the occlusion values.
    #[educe(Default = 1.0)]
    #[serde(skip_serializing_if = "factor_is_one")]
    pub strength: f64,
}

impl OcclusionTexture {
    /// Create a reference to the occlusion texture at `index`.
    pub fn new(index: i32) -> Self {
        OcclusionTexture {
            index,
            ..Self::default()
        }
    }
}

/// A texture and its sampler.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Texture {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub sampler: i32,
    /// Image used by this texture.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub source: i32,
}

impl Texture {
    /// Create a texture with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Filtering and wrapping modes of a texture.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Sampler {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "mag_filter_is_unset")]
    pub mag_filter: MagFilter,
    #[serde(skip_serializing_if = "min_filter_is_unset")]
    pub min_filter: MinFilter,
    #[educe(Default(expression = WrappingMode::REPEAT))]
    #[serde(skip_serializing_if = "wrap_is_repeat")]
    pub wrap_s: WrappingMode,
    #[educe(Default(expression = WrappingMode::REPEAT))]
    #[serde(skip_serializing_if = "wrap_is_repeat")]
    pub wrap_t: WrappingMode,
}

impl Sampler {
    /// Create a sampler with repeat wrapping and unset filters.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Image data used to create a texture, referenced by locator or by
/// buffer view (in which case `mime_type` is mandatory).
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uri: String,
    /// "image/png" or "image/jpeg". Mandatory when the image reads from
    /// a buffer view.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mime_type: String,
    /// View holding the image bytes, as an alternative to the locator.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub buffer_view: i32,
}

impl Image {
    /// Create an image with default field values.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the locator carries the image inline as a base64 data
    /// URI.
    pub fn is_embedded_resource(&self) -> bool {
        self.uri.starts_with(IMAGE_PNG_URI) || self.uri.starts_with(IMAGE_JPEG_URI)
    }

    /// Decode the image bytes embedded in the locator. Returns an empty
    /// vector when the locator is not an embedded resource.
    pub fn embedded_data(&self) -> Result<Vec<u8>> {
        if !self.is_embedded_resource() {
            return Ok(Vec::new());
        }
        let prefix = if self.uri.starts_with(IMAGE_JPEG_URI) {
            IMAGE_JPEG_URI
        } else {
            IMAGE_PNG_URI
        };
        STANDARD
            .decode(&self.uri[prefix.len() + 1..])
            .map_err(|err| ResourceError::EmbeddedData(err.to_string()).into())
    }
}

fn u32_is_zero(v: &u32) -> bool {
    *v == 0
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn factor_is_one(v: &f64) -> bool {
    *v == 1.0
}

fn cutoff_is_default(v: &f64) -> bool {
    *v == 0.5
}

fn rgb_is_black(v: &[f64; 3]) -> bool {
    *v == [0.0, 0.0, 0.0]
}

fn rgba_is_opaque_white(v: &[f64; 4]) -> bool {
    *v == [1.0, 1.0, 1.0, 1.0]
}

fn alpha_mode_is_default(mode: &str) -> bool {
    mode.is_empty() || mode == OPAQUE
}

fn mag_filter_is_unset(filter: &MagFilter) -> bool {
    filter.0 == 0
}

fn min_filter_is_unset(filter: &MinFilter) -> bool {
    filter.0 == 0
}

fn wrap_is_repeat(mode: &WrappingMode) -> bool {
    *mode == WrappingMode::REPEAT
}
