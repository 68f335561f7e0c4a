//! Shader node graph data structures and operations.
//!
//! Materials and the world environment are shaded by a directed graph of
//! typed nodes connected via named input/output sockets. The extension
//! hooks search these graphs for specific node kinds and, for the
//! environment map, temporarily rewire them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a node within one graph
pub type NodeId = usize;

/// Errors from graph mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("source node {0} does not exist")]
    MissingSourceNode(NodeId),

    #[error("target node {0} does not exist")]
    MissingTargetNode(NodeId),

    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),
}

/// Texture filtering mode of an image-bearing node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    Closest,
    Cubic,
}

/// Mapping from texture coordinates to image space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Flat,
    Box,
    Sphere,
    Tube,
    Equirectangular,
    MirrorBall,
}

/// Source image referenced by a texture node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub name: String,
    pub uri: Option<String>,
}

impl ImageSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// Image reference and sampling state shared by texture node kinds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSettings {
    pub image: Option<ImageSource>,
    pub interpolation: Interpolation,
    pub projection: Projection,
}

/// Type tag of a shader node.
///
/// Only the kinds the extension inspects are distinguished; every other
/// node type collapses into [`NodeKind::Other`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    /// World background shading node
    Background,
    /// Environment texture lookup (equirectangular by default)
    EnvironmentTexture(ImageSettings),
    /// Flat image texture lookup
    ImageTexture(ImageSettings),
    /// Principled BSDF surface shader
    Principled,
    Other,
}

impl NodeKind {
    pub fn is_background(&self) -> bool {
        matches!(self, NodeKind::Background)
    }

    pub fn is_environment_texture(&self) -> bool {
        matches!(self, NodeKind::EnvironmentTexture(_))
    }

    pub fn is_image_texture(&self) -> bool {
        matches!(self, NodeKind::ImageTexture(_))
    }

    pub fn is_principled(&self) -> bool {
        matches!(self, NodeKind::Principled)
    }
}

/// Unlinked default value of a socket
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SocketValue {
    Scalar(f32),
    Color([f32; 3]),
    Vector([f32; 3]),
    #[default]
    Unset,
}

impl SocketValue {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            SocketValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f32; 3]> {
        match self {
            SocketValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// A named connection point on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    pub identifier: String,
    pub value: SocketValue,
}

impl Socket {
    pub fn new(identifier: impl Into<String>, value: SocketValue) -> Self {
        Self {
            identifier: identifier.into(),
            value,
        }
    }
}

/// A typed processing node in a shader graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
}

impl ShaderNode {
    /// Creates a node; the id is assigned when the node is added to a graph
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: 0,
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, identifier: impl Into<String>, value: SocketValue) -> Self {
        self.inputs.push(Socket::new(identifier, value));
        self
    }

    pub fn with_output(mut self, identifier: impl Into<String>) -> Self {
        self.outputs.push(Socket::new(identifier, SocketValue::Unset));
        self
    }

    /// Look up an input socket by its stable identifier
    pub fn input(&self, identifier: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.identifier == identifier)
    }

    pub fn output(&self, identifier: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.identifier == identifier)
    }

    /// Image settings for texture node kinds, `None` otherwise
    pub fn image_settings(&self) -> Option<&ImageSettings> {
        match &self.kind {
            NodeKind::EnvironmentTexture(settings) | NodeKind::ImageTexture(settings) => {
                Some(settings)
            }
            _ => None,
        }
    }
}

/// A directed link between an output socket and an input socket.
///
/// Identity is the full (source node, source socket, destination node,
/// destination socket) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from_node: NodeId,
    pub from_socket: String,
    pub to_node: NodeId,
    pub to_socket: String,
}

impl Link {
    pub fn new(
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        }
    }
}

/// A set of typed nodes plus the directed links between their sockets.
///
/// Node iteration order is insertion order; searches must not assume any
/// other ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: Vec<ShaderNode>,
    links: Vec<Link>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph and returns its assigned id
    pub fn add_node(&mut self, mut node: ShaderNode) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.push(node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node and all links incident to it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<ShaderNode> {
        let index = self.nodes.iter().position(|n| n.id == node_id)?;
        self.links
            .retain(|link| link.from_node != node_id && link.to_node != node_id);
        Some(self.nodes.remove(index))
    }

    pub fn node(&self, node_id: NodeId) -> Option<&ShaderNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut ShaderNode> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    pub fn nodes(&self) -> &[ShaderNode] {
        &self.nodes
    }

    /// Connects an output socket to an input socket.
    ///
    /// An input socket holds at most one incoming link; an existing link
    /// into the target socket is removed and returned so callers can
    /// restore it later.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Result<Option<Link>, GraphError> {
        if from_node == to_node {
            return Err(GraphError::SelfConnection(from_node));
        }
        if self.node(from_node).is_none() {
            return Err(GraphError::MissingSourceNode(from_node));
        }
        if self.node(to_node).is_none() {
            return Err(GraphError::MissingTargetNode(to_node));
        }

        let to_socket = to_socket.into();
        let displaced = self
            .links
            .iter()
            .position(|link| link.to_node == to_node && link.to_socket == to_socket)
            .map(|index| self.links.remove(index));

        self.links
            .push(Link::new(from_node, from_socket, to_node, to_socket));
        Ok(displaced)
    }

    /// Removes a link by identity; returns whether it was present
    pub fn disconnect(&mut self, link: &Link) -> bool {
        let before = self.links.len();
        self.links.retain(|l| l != link);
        self.links.len() != before
    }

    /// Finds the first node matching the predicate, in insertion order
    pub fn find_node(&self, predicate: impl Fn(&ShaderNode) -> bool) -> Option<NodeId> {
        self.nodes.iter().find(|n| predicate(n)).map(|n| n.id)
    }

    /// The link feeding the given input socket, if any
    pub fn incoming(&self, node_id: NodeId, socket: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|link| link.to_node == node_id && link.to_socket == socket)
    }

    /// Unlinked default value of the given input socket
    pub fn input_value(&self, node_id: NodeId, socket: &str) -> Option<&SocketValue> {
        self.node(node_id)
            .and_then(|node| node.input(socket))
            .map(|socket| &socket.value)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Snapshot of the current link set, for before/after comparison
    pub fn link_set(&self) -> Vec<Link> {
        self.links.clone()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
