//! Attaching extension payloads to exported document entities.
//!
//! The in-progress export document is made of `gltf_json` objects; vendor
//! extensions live in the open `others` map of each entity's `extensions`
//! object.

use serde_json::{json, Map, Value};

/// A document entity that can carry vendor extensions.
///
/// Implementations create the entity's `extensions` object on demand and
/// hand out its open extension map.
pub trait ExtensionHost {
    fn extension_map(&mut self) -> &mut Map<String, Value>;
}

impl ExtensionHost for gltf_json::Node {
    fn extension_map(&mut self) -> &mut Map<String, Value> {
        &mut self.extensions.get_or_insert_with(Default::default).others
    }
}

impl ExtensionHost for gltf_json::Material {
    fn extension_map(&mut self) -> &mut Map<String, Value> {
        &mut self.extensions.get_or_insert_with(Default::default).others
    }
}

impl ExtensionHost for gltf_json::Scene {
    fn extension_map(&mut self) -> &mut Map<String, Value> {
        &mut self.extensions.get_or_insert_with(Default::default).others
    }
}

/// Sets `extensions[key]` on the entity to the standard extension wrapper.
///
/// Last write for a key wins; entries under other keys are left alone.
pub fn attach(
    entity: &mut impl ExtensionHost,
    key: &str,
    payload: Map<String, Value>,
    required: bool,
) {
    entity.extension_map().insert(
        key.to_string(),
        json!({
            "name": key,
            "data": payload,
            "required": required,
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::empty_document_node;

    fn empty_node() -> gltf_json::Node {
        empty_document_node("node")
    }

    #[test]
    fn attach_creates_extensions_map_and_wrapper() {
        let mut node = empty_node();
        let mut payload = Map::new();
        payload.insert("radius".into(), json!(0.25));
        attach(&mut node, "TR_data", payload, false);

        let extensions = node.extensions.as_ref().unwrap();
        assert_eq!(
            extensions.others.get("TR_data").unwrap(),
            &json!({
                "name": "TR_data",
                "data": { "radius": 0.25 },
                "required": false,
            })
        );
    }

    #[test]
    fn attach_last_write_wins_for_the_same_key() {
        let mut node = empty_node();
        let mut first = Map::new();
        first.insert("a".into(), json!(1));
        attach(&mut node, "TR_data", first, false);

        let mut second = Map::new();
        second.insert("b".into(), json!(2));
        attach(&mut node, "TR_data", second, true);

        let extensions = node.extensions.as_ref().unwrap();
        assert_eq!(extensions.others.len(), 1);
        assert_eq!(
            extensions.others.get("TR_data").unwrap(),
            &json!({
                "name": "TR_data",
                "data": { "b": 2 },
                "required": true,
            })
        );
    }

    #[test]
    fn attach_preserves_other_extension_entries() {
        let mut node = empty_node();
        node.extension_map()
            .insert("KHR_other_vendor".into(), json!({ "kept": true }));

        attach(&mut node, "TR_data", Map::new(), false);

        let extensions = node.extensions.as_ref().unwrap();
        assert_eq!(extensions.others.len(), 2);
        assert_eq!(
            extensions.others.get("KHR_other_vendor").unwrap(),
            &json!({ "kept": true })
        );
    }
}
