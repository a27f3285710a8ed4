//! Keyframe animations.

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Extensions;
use crate::index::index_is_none;

/// Keyframe interpolation algorithms.
pub const LINEAR: &str = "LINEAR";
pub const STEP: &str = "STEP";
pub const CUBICSPLINE: &str = "CUBICSPLINE";

/// Animated node properties.
pub const TRANSLATION: &str = "translation";
pub const ROTATION: &str = "rotation";
pub const SCALE: &str = "scale";
pub const WEIGHTS: &str = "weights";

/// A named set of animation channels and their samplers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Animation {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Channels targeting node properties. Always present on the wire.
    pub channels: Vec<Channel>,
    /// Keyframe samplers the channels draw from. Always present on the
    /// wire.
    pub samplers: Vec<AnimationSampler>,
}

impl Animation {
    /// Create an animation with default field values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Input and output accessors combined with an interpolation algorithm,
/// defining a keyframe graph.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationSampler {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    /// Accessor holding the keyframe input values.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub input: i32,
    /// One of the [`LINEAR`], [`STEP`], [`CUBICSPLINE`] codes.
    #[educe(Default(expression = String::from(LINEAR)))]
    #[serde(skip_serializing_if = "interpolation_is_default")]
    pub interpolation: String,
    /// Accessor holding the keyframe output values.
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub output: i32,
}

impl AnimationSampler {
    /// Create a sampler with linear interpolation and no references.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Targets an animation sampler at a node property.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Channel {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub sampler: i32,
    /// Node property driven by the sampler. Always present on the wire.
    pub target: ChannelTarget,
}

impl Channel {
    /// Create a channel referencing the sampler at `sampler`.
    pub fn new(sampler: i32) -> Self {
        Channel {
            sampler,
            ..Self::default()
        }
    }
}

/// The node and property an animation channel drives.
#[derive(Educe, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelTarget {
    #[serde(skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[educe(Default = -1)]
    #[serde(skip_serializing_if = "index_is_none")]
    pub node: i32,
    /// One of the [`TRANSLATION`], [`ROTATION`], [`SCALE`], [`WEIGHTS`]
    /// codes. Always present on the wire.
    pub path: String,
}

impl ChannelTarget {
    /// Create a target driving `path` on an unset node.
    pub fn new(path: impl Into<String>) -> Self {
        ChannelTarget {
            path: path.into(),
            ..Self::default()
        }
    }
}

fn interpolation_is_default(interpolation: &str) -> bool {
    interpolation.is_empty() || interpolation == LINEAR
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::index::INDEX_NONE;

    #[test]
    fn sampler_defaults() {
        let sampler = AnimationSampler::new();
        assert_eq!(sampler.input, INDEX_NONE);
        assert_eq!(sampler.output, INDEX_NONE);
        assert_eq!(sampler.interpolation, LINEAR);
        assert_eq!(serde_json::to_string(&sampler).unwrap(), "{}");
    }

    #[test]
    fn absent_interpolation_decodes_to_linear() {
        let sampler: AnimationSampler =
            serde_json::from_str(r#"{"input":0,"output":1}"#).unwrap();
        assert_eq!(sampler.interpolation, LINEAR);
        assert_eq!(sampler.input, 0);
        assert_eq!(sampler.output, 1);
    }

    #[test]
    fn explicit_interpolation_round_trips() {
        let wire = r#"{"input":0,"interpolation":"STEP","output":1}"#;
        let sampler: AnimationSampler = serde_json::from_str(wire).unwrap();
        assert_eq!(sampler.interpolation, STEP);
        assert_eq!(serde_json::to_string(&sampler).unwrap(), wire);
    }

    #[test]
    fn channel_target_round_trip_idempotent() {
        let mut channel = Channel::new(0);
        channel.target = ChannelTarget::new(ROTATION);
        channel.target.node = 2;
        let json = serde_json::to_string(&channel).unwrap();
        assert_eq!(json, r#"{"sampler":0,"target":{"node":2,"path":"rotation"}}"#);
        let back: Channel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, channel);
    }

    #[test]
    fn channel_sentinel_sampler_elides() {
        let channel = Channel::new(INDEX_NONE);
        let json = serde_json::to_string(&channel).unwrap();
        assert_eq!(json, r#"{"target":{"path":""}}"#);
        let back: Channel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sampler, INDEX_NONE);
        assert_eq!(back.target.node, INDEX_NONE);
    }
}
