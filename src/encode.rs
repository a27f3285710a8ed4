//! Encoding documents to JSON or binary-container streams.

use std::io::Write;

use crate::document::Document;
use crate::error::Result;
use crate::glb;

/// Encodes one document to a byte stream.
///
/// The structural inverse of [`Decoder`][crate::decode::Decoder]: every
/// entity serializes through its default-eliding rules, producing compact
/// JSON in canonical field order. With [`binary`][Encoder::binary] set,
/// the output is the binary container framing instead, carrying the first
/// locator-less buffer's payload as the binary chunk.
pub struct Encoder<W> {
    sink: W,
    binary: bool,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder producing plain JSON output.
    pub fn new(sink: W) -> Self {
        Encoder {
            sink,
            binary: false,
        }
    }

    /// Select binary-container output instead of plain JSON.
    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Serialize `doc` into the sink.
    pub fn encode(mut self, doc: &Document) -> Result<()> {
        let json = serde_json::to_vec(doc)?;
        if self.binary {
            let bin = doc
                .buffers
                .first()
                .filter(|b| b.uri.is_empty() && !b.data.is_empty())
                .map(|b| b.data.as_slice());
            glb::write_glb(&mut self.sink, &json, bin)
        } else {
            self.sink.write_all(&json)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::buffer::Buffer;
    use crate::decode::Decoder;
    use crate::document::Scene;
    use crate::index::INDEX_NONE;
    use rand::RngCore;
    use std::io::Cursor;

    fn encode_json(doc: &Document) -> String {
        let mut out = Vec::new();
        Encoder::new(&mut out).encode(doc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn canonical_json_reproduced_byte_for_byte() {
        // Already omits every default-valued field.
        let wire = concat!(
            r#"{"accessors":[{"bufferView":0,"componentType":5123,"count":36,"type":"SCALAR"}],"#,
            r#""asset":{"generator":"test","version":"2.0"},"#,
            r#""buffers":[{"uri":"data:application/octet-stream;base64,AQID","byteLength":3}],"#,
            r#""bufferViews":[{"buffer":0,"byteLength":3,"target":34963}],"#,
            r#""meshes":[{"name":"tri","primitives":[{"attributes":{"POSITION":0},"indices":0}]}],"#,
            r#""nodes":[{"name":"root","mesh":0}],"#,
            r#""scene":0,"scenes":[{"nodes":[0]}]}"#
        );
        let doc = Decoder::new(wire.as_bytes()).decode().unwrap();
        assert_eq!(encode_json(&doc), wire);
    }

    #[test]
    fn sentinel_scene_encodes_without_scene_member() {
        let mut doc = Document::new();
        doc.asset.version = "2.0".to_string();
        doc.scenes.push(Scene::new());
        let json = encode_json(&doc);
        assert!(!json.contains(r#""scene""#));

        let back = Decoder::new(json.as_bytes()).decode().unwrap();
        assert_eq!(back.scene, INDEX_NONE);
    }

    #[test]
    fn glb_round_trip_with_random_payload() {
        let mut payload = vec![0u8; 301];
        rand::thread_rng().fill_bytes(&mut payload);

        let mut doc = Document::new();
        doc.asset.version = "2.0".to_string();
        doc.buffers.push(Buffer {
            byte_length: payload.len() as u32,
            data: payload.clone(),
            ..Buffer::new()
        });

        let mut stream = Vec::new();
        Encoder::new(&mut stream).binary(true).encode(&doc).unwrap();
        assert_eq!(&stream[..4], b"glTF");
        assert_eq!(stream.len() % 4, 0);

        let back = Decoder::new(Cursor::new(stream)).decode().unwrap();
        assert_eq!(back.buffers[0].data, payload);
        assert_eq!(back, doc);
    }

    #[test]
    fn glb_without_loose_buffer_has_no_binary_chunk() {
        let mut doc = Document::new();
        doc.asset.version = "2.0".to_string();
        let mut buffer = Buffer {
            byte_length: 3,
            data: vec![1, 2, 3],
            ..Buffer::new()
        };
        buffer.embed_resource();
        doc.buffers.push(buffer);

        let mut stream = Vec::new();
        Encoder::new(&mut stream).binary(true).encode(&doc).unwrap();
        let back = Decoder::new(Cursor::new(stream)).decode().unwrap();
        assert_eq!(back.buffers[0].data, vec![1, 2, 3]);
        assert!(back.buffers[0].is_embedded_resource());
    }

    #[test]
    fn encode_decode_idempotent_for_mutated_entities() {
        let mut doc = Document::new();
        doc.asset.version = "2.0".to_string();
        doc.asset.copyright = "nobody".to_string();
        let mut node = crate::node::Node::new();
        node.translation = [0.5, 0.5, 3.0];
        node.camera = 0;
        doc.nodes.push(node);
        let mut material = crate::material::Material::new();
        material.alpha_mode = crate::material::BLEND.to_string();
        material.double_sided = true;
        doc.materials.push(material);

        let back = Decoder::new(encode_json(&doc).as_bytes()).decode().unwrap();
        assert_eq!(back, doc);
    }
}
