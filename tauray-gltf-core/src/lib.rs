//! # Tauray glTF extension core
//!
//! Core engine for gathering Tauray renderer data during glTF export and
//! writing it into the `TR_data` vendor extension block of the emitted
//! document.
//!
//! The host export pipeline invokes one hook per exported node, one per
//! exported material and one for the scene/world; each hook classifies
//! the source entity, extracts the renderer-specific fields and attaches
//! them to the in-progress `gltf_json` document entity:
//!
//! - Lights, light probes and meshes contribute per-node data (soft
//!   shadow radius, sun angle, probe grid resolution, shadow terminator
//!   offset).
//! - Materials contribute transmission and emission read from the
//!   principled shading node of their shader graph.
//! - The world environment map is serialized by temporarily substituting
//!   a flat image proxy node into the world graph, so the image-export
//!   collaborator can be reused, and restoring the wiring afterwards.
//!
//! ## Quick start
//!
//! ```rust
//! use tauray_gltf_core::{ImageTable, TaurayExtension};
//! # use tauray_gltf_core::{ObjectData, SceneObject};
//!
//! let mut extension = TaurayExtension::new(ImageTable::new());
//! # let object = SceneObject::new("camera", ObjectData::Other);
//! # let mut node = gltf_json::Node {
//! #     camera: None, children: None, extensions: None,
//! #     extras: Default::default(), matrix: None, mesh: None,
//! #     name: None, rotation: None, scale: None, translation: None,
//! #     skin: None, weights: None,
//! # };
//! // Invoked by the host once per exported node:
//! extension.on_node(&mut node, &object);
//! ```

pub mod builder;
pub mod envmap;
pub mod extension;
pub mod graph;
pub mod image;
pub mod scene;
pub mod writer;

#[cfg(test)]
pub mod test_integration;
#[cfg(test)]
pub(crate) mod test_util;

// Re-export commonly used types
pub use envmap::{EnvmapRewire, RewireError, SOCKET_COLOR, SOCKET_STRENGTH};
pub use extension::{ExportSettings, TaurayExtension, EXTENSION_NAME, EXTENSION_REQUIRED};
pub use graph::{
    GraphError, ImageSettings, ImageSource, Interpolation, Link, NodeGraph, NodeId, NodeKind,
    Projection, ShaderNode, Socket, SocketValue,
};
pub use image::{GatherImage, ImageTable};
pub use scene::{
    LightData, LightKind, Material, MeshData, ObjectData, ObjectKind, ProbeData, ProbeKind,
    SceneObject, SceneWorld,
};
pub use writer::{attach, ExtensionHost};

/// Version information for the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize structured logging for the library
pub fn init() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tauray_gltf_core=info")
        .with_target(false)
        .try_init();
    Ok(())
}
