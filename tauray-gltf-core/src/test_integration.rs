//! End-to-end test of the hook flow over a small but complete scene.

use serde_json::json;

use crate::graph::{
    ImageSettings, ImageSource, Interpolation, NodeGraph, NodeKind, Projection, ShaderNode,
    SocketValue,
};
use crate::image::ImageTable;
use crate::scene::{
    LightData, LightKind, Material, MeshData, ObjectData, ProbeData, ProbeKind, SceneObject,
    SceneWorld,
};
use crate::test_util::{empty_document_material, empty_document_node, empty_document_scene};
use crate::TaurayExtension;

fn example_objects() -> Vec<SceneObject> {
    vec![
        SceneObject::new(
            "spot",
            ObjectData::Light(LightData {
                kind: LightKind::Spot,
                shadow_soft_size: 0.25,
                angle: 0.0,
            }),
        ),
        SceneObject::new(
            "sun",
            ObjectData::Light(LightData {
                kind: LightKind::Sun,
                shadow_soft_size: 0.0,
                angle: 0.5,
            }),
        ),
        SceneObject::new(
            "probe",
            ObjectData::LightProbe(ProbeData {
                kind: ProbeKind::Grid,
                influence_distance: 4.0,
                clip_start: 0.5,
                clip_end: 128.0,
                grid_resolution: [4, 8, 16],
            }),
        ),
        SceneObject::new(
            "floor",
            ObjectData::Mesh(MeshData {
                shadow_terminator_offset: 0.25,
            }),
        ),
        SceneObject::new("camera", ObjectData::Other),
    ]
}

fn example_material() -> Material {
    let mut graph = NodeGraph::new();
    graph.add_node(
        ShaderNode::new(NodeKind::Principled)
            .with_input("Transmission", SocketValue::Scalar(0.5))
            .with_input("Emission", SocketValue::Color([1.0, 0.5, 0.0]))
            .with_input("Emission Strength", SocketValue::Scalar(2.0))
            .with_output("BSDF"),
    );
    Material::new("emitter", graph)
}

fn example_world() -> SceneWorld {
    let mut graph = NodeGraph::new();
    let envmap = graph.add_node(
        ShaderNode::new(NodeKind::EnvironmentTexture(ImageSettings {
            image: Some(ImageSource::new("studio").with_uri("studio.exr")),
            interpolation: Interpolation::Linear,
            projection: Projection::Equirectangular,
        }))
        .with_output("Color"),
    );
    let background = graph.add_node(
        ShaderNode::new(NodeKind::Background)
            .with_input("Color", SocketValue::Unset)
            .with_input("Strength", SocketValue::Scalar(1.5))
            .with_output("Background"),
    );
    graph.connect(envmap, "Color", background, "Color").unwrap();
    SceneWorld::new(graph)
}

#[test]
fn full_export_pass_attaches_all_extension_blocks() {
    let mut extension = TaurayExtension::new(ImageTable::new());

    // Node hooks, once per exported object.
    let mut document_nodes = Vec::new();
    for object in example_objects() {
        let mut node = empty_document_node(&object.name);
        extension.on_node(&mut node, &object);
        document_nodes.push(node);
    }

    // Material hook.
    let source_material = example_material();
    let mut document_material = empty_document_material(&source_material.name);
    extension.on_material_pbr(&mut document_material, &source_material, None);

    // Scene hook.
    let mut world = example_world();
    let links_before = world.graph.link_set();
    let mut document_scene = empty_document_scene("Scene");
    extension
        .on_scene(&mut document_scene, Some(&mut world))
        .unwrap();
    assert_eq!(world.graph.link_set(), links_before);

    // The camera contributed nothing; everything else did.
    assert!(document_nodes[4].extensions.is_none());
    let node_data: Vec<_> = document_nodes[..4]
        .iter()
        .map(|node| {
            node.extensions
                .as_ref()
                .unwrap()
                .others
                .get("TR_data")
                .unwrap()
                .get("data")
                .unwrap()
                .clone()
        })
        .collect();

    assert_eq!(node_data[0], json!({ "light": { "radius": 0.25 } }));
    assert_eq!(node_data[1], json!({ "light": { "angle": 0.25 } }));
    assert_eq!(
        node_data[2],
        json!({
            "light_probe": {
                "type": "GRID",
                "resolution_x": 4,
                "resolution_y": 16,
                "resolution_z": 8,
                "radius": 4.0,
                "clip_near": 0.5,
                "clip_far": 128.0,
            }
        })
    );
    assert_eq!(
        node_data[3],
        json!({ "mesh": { "shadow_terminator_offset": 0.25 } })
    );

    let material_data = document_material
        .extensions
        .as_ref()
        .unwrap()
        .others
        .get("TR_data")
        .unwrap()
        .get("data")
        .unwrap();
    assert_eq!(
        material_data,
        &json!({ "transmission": 0.5, "emission": [2.0, 1.0, 0.0] })
    );

    let scene_data = document_scene
        .extensions
        .as_ref()
        .unwrap()
        .others
        .get("TR_data")
        .unwrap()
        .get("data")
        .unwrap();
    assert_eq!(scene_data, &json!({ "envmap": 0, "envmap_factor": 1.5 }));

    // One gathered image ends up in the document image table.
    let images = extension.into_gatherer().into_images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].name.as_deref(), Some("studio"));
}

#[test]
fn attached_extensions_serialize_into_the_document_json() {
    let extension = TaurayExtension::new(ImageTable::new());
    let mut node = empty_document_node("spot");
    extension.on_node(
        &mut node,
        &SceneObject::new(
            "spot",
            ObjectData::Light(LightData {
                kind: LightKind::Spot,
                shadow_soft_size: 0.25,
                angle: 0.0,
            }),
        ),
    );

    let serialized = serde_json::to_value(&node).unwrap();
    assert_eq!(
        serialized,
        json!({
            "name": "spot",
            "extensions": {
                "TR_data": {
                    "name": "TR_data",
                    "data": { "light": { "radius": 0.25 } },
                    "required": false,
                }
            }
        })
    );
}
