//! Pure payload mapping: scene entities and shader inputs to extension
//! attribute maps.
//!
//! A return value of `None` means "attach nothing"; the writer never
//! receives an implicit empty payload.

use serde_json::{json, Map, Value};

use crate::graph::NodeGraph;
use crate::scene::{LightKind, Material, ObjectData, ProbeKind, SceneObject};

/// Principled BSDF input identifiers, as exposed by the host shader system
const INPUT_TRANSMISSION: &str = "Transmission";
const INPUT_EMISSION: &str = "Emission";
const INPUT_EMISSION_STRENGTH: &str = "Emission Strength";

/// Builds the per-node extension payload for a classified scene object.
///
/// Objects without renderer-specific fields produce no payload at all.
/// Light kinds without extra fields still produce an (empty) `light`
/// sub-object, so the renderer can tell lights apart from plain nodes.
pub fn object_payload(object: &SceneObject) -> Option<Map<String, Value>> {
    let mut data = Map::new();

    match &object.data {
        ObjectData::Light(light) => {
            let mut light_data = Map::new();
            match light.kind {
                LightKind::Point | LightKind::Spot => {
                    light_data.insert("radius".into(), json!(light.shadow_soft_size));
                }
                LightKind::Sun => {
                    // In radians, max angle from direction that is still lit.
                    light_data.insert("angle".into(), json!(light.angle / 2.0));
                }
                LightKind::Area => {}
            }
            data.insert("light".into(), Value::Object(light_data));
        }
        ObjectData::LightProbe(probe) => {
            let mut probe_data = Map::new();
            probe_data.insert("type".into(), json!(probe.kind.type_tag()));
            if probe.kind == ProbeKind::Grid {
                // The Y/Z axes are swapped relative to the probe's native
                // order; kept as-is to match what the renderer reads.
                probe_data.insert("resolution_x".into(), json!(probe.grid_resolution[0]));
                probe_data.insert("resolution_y".into(), json!(probe.grid_resolution[2]));
                probe_data.insert("resolution_z".into(), json!(probe.grid_resolution[1]));
            }
            probe_data.insert("radius".into(), json!(probe.influence_distance));
            probe_data.insert("clip_near".into(), json!(probe.clip_start));
            probe_data.insert("clip_far".into(), json!(probe.clip_end));
            data.insert("light_probe".into(), Value::Object(probe_data));
        }
        ObjectData::Mesh(mesh) => {
            let mut mesh_data = Map::new();
            mesh_data.insert(
                "shadow_terminator_offset".into(),
                json!(mesh.shadow_terminator_offset),
            );
            data.insert("mesh".into(), Value::Object(mesh_data));
        }
        ObjectData::Other => return None,
    }

    Some(data)
}

/// Builds the material extension payload from the material's node graph.
///
/// Returns `None` when the graph has no principled shading node. Keys are
/// only present when the corresponding input resolves to a usable value.
pub fn material_payload(material: &Material) -> Option<Map<String, Value>> {
    let graph: &NodeGraph = &material.graph;
    let principled = graph.find_node(|n| n.kind.is_principled())?;
    let node = graph.node(principled)?;

    let transmission = node
        .input(INPUT_TRANSMISSION)
        .and_then(|socket| socket.value.as_scalar());
    let emission = node
        .input(INPUT_EMISSION)
        .and_then(|socket| socket.value.as_color());
    let emission_strength = node
        .input(INPUT_EMISSION_STRENGTH)
        .and_then(|socket| socket.value.as_scalar());

    let mut data = Map::new();

    if let Some(transmission) = transmission {
        data.insert("transmission".into(), json!(transmission));
    }

    if let Some(color) = emission {
        let strength = emission_strength.unwrap_or(1.0);
        let scaled: Vec<f32> = color.iter().map(|component| component * strength).collect();
        data.insert("emission".into(), json!(scaled));
    }

    Some(data)
}
