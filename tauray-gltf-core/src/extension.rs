//! The extension hook surface invoked by the host export pipeline.
//!
//! One hook per exported node, one per exported material, one for the
//! scene/world. Each invocation classifies, extracts and writes
//! independently; no state crosses invocations except the enable flag and
//! the image-export collaborator.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use tracing::debug;

use crate::builder;
use crate::envmap::{EnvmapRewire, SOCKET_COLOR, SOCKET_STRENGTH};
use crate::image::GatherImage;
use crate::scene::{Material, SceneObject, SceneWorld};
use crate::writer;

/// Name of the vendor extension block in exported glTF documents
pub const EXTENSION_NAME: &str = "TR_data";

/// Whether loaders must understand the extension to use the asset
pub const EXTENSION_REQUIRED: bool = false;

/// User-facing export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Include renderer data in the exported glTF file
    pub enabled: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Export-time extension gatherer.
///
/// Holds the enable flag and the image-export collaborator; everything
/// else is created fresh per hook invocation and discarded once the
/// payload is written.
pub struct TaurayExtension<G> {
    settings: ExportSettings,
    images: G,
}

impl<G: GatherImage> TaurayExtension<G> {
    pub fn new(images: G) -> Self {
        Self::with_settings(ExportSettings::default(), images)
    }

    pub fn with_settings(settings: ExportSettings, images: G) -> Self {
        Self { settings, images }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Recover the collaborator, e.g. to read back the gathered images
    pub fn into_gatherer(self) -> G {
        self.images
    }

    /// Per-node hook: attaches light, light probe or mesh data to the
    /// exported document node.
    pub fn on_node(&self, node: &mut gltf_json::Node, object: &SceneObject) {
        if !self.settings.enabled {
            return;
        }
        let Some(payload) = builder::object_payload(object) else {
            return;
        };
        debug!("Attaching {} node data for '{}'", EXTENSION_NAME, object.name);
        writer::attach(node, EXTENSION_NAME, payload, EXTENSION_REQUIRED);
    }

    /// Per-material hook: attaches transmission and emission data read
    /// from the material's principled shading node.
    ///
    /// The combined occlusion/roughness/metallic texture is part of the
    /// host's hook contract but carries nothing this extension needs.
    pub fn on_material_pbr(
        &self,
        material: &mut gltf_json::Material,
        source: &Material,
        _orm_texture: Option<&gltf_json::texture::Info>,
    ) {
        if !self.settings.enabled {
            return;
        }
        let Some(payload) = builder::material_payload(source) else {
            debug!(
                "Material '{}' has no principled shading node, skipping",
                source.name
            );
            return;
        };
        debug!("Attaching {} material data for '{}'", EXTENSION_NAME, source.name);
        writer::attach(material, EXTENSION_NAME, payload, EXTENSION_REQUIRED);
    }

    /// Scene hook: serializes the world's environment map through a
    /// temporary flat proxy node and attaches it with the background
    /// strength factor.
    ///
    /// A missing world, background node or environment texture node is a
    /// silent skip. A collaborator failure propagates, but only after the
    /// world graph has been restored.
    pub fn on_scene(
        &mut self,
        scene: &mut gltf_json::Scene,
        world: Option<&mut SceneWorld>,
    ) -> Result<()> {
        if !self.settings.enabled {
            return Ok(());
        }
        let Some(world) = world else {
            return Ok(());
        };
        let graph = &mut world.graph;

        let Some(background) = graph.find_node(|n| n.kind.is_background()) else {
            debug!("World has no background node, skipping environment export");
            return Ok(());
        };
        let Some(envmap) = graph.find_node(|n| n.kind.is_environment_texture()) else {
            debug!("World has no environment texture node, skipping environment export");
            return Ok(());
        };

        let envmap_factor = graph
            .input_value(background, SOCKET_STRENGTH)
            .and_then(|value| value.as_scalar())
            .unwrap_or(1.0);

        let rewire = EnvmapRewire::apply(graph, background, envmap)?;
        let gathered = self.images.gather_image(graph, background, SOCKET_COLOR);
        rewire.restore(graph);
        let image = gathered?;

        let mut data = Map::new();
        data.insert("envmap".into(), json!(image.value() as u64));
        data.insert("envmap_factor".into(), json!(envmap_factor));
        debug!("Attaching {} scene data (envmap image {})", EXTENSION_NAME, image.value());
        writer::attach(scene, EXTENSION_NAME, data, EXTENSION_REQUIRED);
        Ok(())
    }
}
