use serde::{Deserialize, Serialize};

use crate::graph::NodeGraph;

/// Kind of a scene object as seen by the export hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Light(LightKind),
    LightProbe(ProbeKind),
    Mesh,
    Other,
}

/// Light sub-kinds understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Point,
    Spot,
    Sun,
    Area,
}

/// Light probe sub-kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeKind {
    Grid,
    Cubemap,
    Planar,
}

impl ProbeKind {
    /// Host-facing type tag, as emitted in extension payloads
    pub fn type_tag(&self) -> &'static str {
        match self {
            ProbeKind::Grid => "GRID",
            ProbeKind::Cubemap => "CUBEMAP",
            ProbeKind::Planar => "PLANAR",
        }
    }
}

/// Renderer-relevant fields of a light object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightData {
    pub kind: LightKind,
    /// Soft shadow source radius, in meters
    pub shadow_soft_size: f32,
    /// Full angular diameter of a sun light, in radians
    pub angle: f32,
}

/// Renderer-relevant fields of a light probe object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeData {
    pub kind: ProbeKind,
    /// Influence radius, in meters
    pub influence_distance: f32,
    pub clip_start: f32,
    pub clip_end: f32,
    /// Sample counts along the probe's native X, Y and Z axes
    pub grid_resolution: [u32; 3],
}

/// Renderer-relevant fields of a mesh object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Per-object shadow terminator offset from the render engine settings
    pub shadow_terminator_offset: f32,
}

/// Kind-specific data block of a scene object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectData {
    Light(LightData),
    LightProbe(ProbeData),
    Mesh(MeshData),
    /// Cameras, empties and anything else the extension has no fields for
    Other,
}

/// A scene object as handed to the per-node export hook.
///
/// The host export pipeline owns these; hooks only read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Classify this object for extension gathering.
    ///
    /// Total over all object data; anything without renderer-specific
    /// fields maps to [`ObjectKind::Other`].
    pub fn classify(&self) -> ObjectKind {
        match &self.data {
            ObjectData::Light(light) => ObjectKind::Light(light.kind),
            ObjectData::LightProbe(probe) => ObjectKind::LightProbe(probe.kind),
            ObjectData::Mesh(_) => ObjectKind::Mesh,
            ObjectData::Other => ObjectKind::Other,
        }
    }
}

/// A material with its shader node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub graph: NodeGraph,
}

impl Material {
    pub fn new(name: impl Into<String>, graph: NodeGraph) -> Self {
        Self {
            name: name.into(),
            graph,
        }
    }
}

/// The world/environment shading setup of a scene.
///
/// The scene hook is the only place that mutates the graph, and it is
/// required to restore it before returning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneWorld {
    pub graph: NodeGraph,
}

impl SceneWorld {
    pub fn new(graph: NodeGraph) -> Self {
        Self { graph }
    }
}
