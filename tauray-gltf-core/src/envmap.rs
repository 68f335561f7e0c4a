//! Scoped rewiring of the world graph for environment map export.
//!
//! The image-export collaborator only accepts flat image texture inputs,
//! so the environment texture node cannot be serialized directly. The
//! transaction substitutes a flat proxy node in front of the background
//! node's color input, and restores the original wiring afterwards. The
//! caller must invoke [`EnvmapRewire::restore`] before propagating any
//! collaborator failure, so the user's world graph is never left
//! corrupted.

use thiserror::Error;
use tracing::trace;

use crate::graph::{
    GraphError, ImageSettings, Link, NodeGraph, NodeId, NodeKind, Projection, ShaderNode,
};

/// Background node color input / texture node color output identifier
pub const SOCKET_COLOR: &str = "Color";
/// Background node strength input identifier
pub const SOCKET_STRENGTH: &str = "Strength";

/// Errors from setting up the rewire
#[derive(Debug, Error)]
pub enum RewireError {
    #[error("node {0} is not an environment texture node")]
    NotAnEnvironmentTexture(NodeId),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Bounded-lifetime substitution of a flat image proxy for the
/// environment texture node.
///
/// Records the link it removed and the node it added; [`restore`] undoes
/// both exactly, in success and failure paths alike.
///
/// [`restore`]: EnvmapRewire::restore
#[derive(Debug)]
#[must_use = "the rewire must be restored before returning to the caller"]
pub struct EnvmapRewire {
    proxy: NodeId,
    added: Link,
    removed: Option<Link>,
}

impl EnvmapRewire {
    /// Substitutes a flat image proxy in front of the background node's
    /// color input.
    ///
    /// The proxy copies the environment texture node's image and
    /// interpolation; its projection is forced to flat because that is
    /// what the downstream image export accepts.
    pub fn apply(
        graph: &mut NodeGraph,
        background: NodeId,
        envmap: NodeId,
    ) -> Result<Self, RewireError> {
        let settings = graph
            .node(envmap)
            .and_then(|node| match &node.kind {
                NodeKind::EnvironmentTexture(settings) => Some(settings.clone()),
                _ => None,
            })
            .ok_or(RewireError::NotAnEnvironmentTexture(envmap))?;
        if graph.node(background).is_none() {
            return Err(GraphError::MissingTargetNode(background).into());
        }

        let proxy_settings = ImageSettings {
            image: settings.image.clone(),
            interpolation: settings.interpolation,
            projection: Projection::Flat,
        };
        let proxy = graph.add_node(
            ShaderNode::new(NodeKind::ImageTexture(proxy_settings)).with_output(SOCKET_COLOR),
        );
        let removed = match graph.connect(proxy, SOCKET_COLOR, background, SOCKET_COLOR) {
            Ok(removed) => removed,
            Err(err) => {
                graph.remove_node(proxy);
                return Err(err.into());
            }
        };
        trace!("Substituted flat image proxy {} for environment texture {}", proxy, envmap);

        Ok(Self {
            proxy,
            added: Link::new(proxy, SOCKET_COLOR, background, SOCKET_COLOR),
            removed,
        })
    }

    /// The temporary flat image node
    pub fn proxy(&self) -> NodeId {
        self.proxy
    }

    /// Restores the graph to its pre-transaction state: the proxy link
    /// and node are removed and the displaced link is re-added.
    pub fn restore(self, graph: &mut NodeGraph) {
        graph.disconnect(&self.added);
        graph.remove_node(self.proxy);
        if let Some(link) = self.removed {
            trace!("Restoring original link into the background color input");
            let _ = graph.connect(link.from_node, link.from_socket, link.to_node, link.to_socket);
        }
    }
}
