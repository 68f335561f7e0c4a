//! Constructors for bare in-progress document entities used across tests.

use gltf_json::validation::Checked;

pub(crate) fn empty_document_node(name: &str) -> gltf_json::Node {
    gltf_json::Node {
        camera: None,
        children: None,
        extensions: None,
        extras: Default::default(),
        matrix: None,
        mesh: None,
        name: Some(name.to_string()),
        rotation: None,
        scale: None,
        translation: None,
        skin: None,
        weights: None,
    }
}

pub(crate) fn empty_document_material(name: &str) -> gltf_json::Material {
    gltf_json::Material {
        alpha_cutoff: None,
        alpha_mode: Checked::Valid(gltf_json::material::AlphaMode::Opaque),
        double_sided: false,
        name: Some(name.to_string()),
        pbr_metallic_roughness: gltf_json::material::PbrMetallicRoughness {
            base_color_factor: gltf_json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
            base_color_texture: None,
            metallic_factor: gltf_json::material::StrengthFactor(1.0),
            roughness_factor: gltf_json::material::StrengthFactor(1.0),
            metallic_roughness_texture: None,
            extensions: None,
            extras: Default::default(),
        },
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: gltf_json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        extensions: None,
        extras: Default::default(),
    }
}

pub(crate) fn empty_document_scene(name: &str) -> gltf_json::Scene {
    gltf_json::Scene {
        extensions: None,
        extras: Default::default(),
        name: Some(name.to_string()),
        nodes: Vec::new(),
    }
}
