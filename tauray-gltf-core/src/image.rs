//! Image-export collaborator seam.
//!
//! Serializing an image-bearing shader input into the document's image
//! table is owned by the surrounding export pipeline, not by this crate.
//! The [`GatherImage`] trait is that seam; [`ImageTable`] is the bundled
//! implementation used when no host pipeline is wrapped.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use gltf_json::{Image, Index};
use tracing::debug;

use crate::graph::{NodeGraph, NodeId, Projection};

/// External routine that serializes the image feeding an input socket into
/// the document's image table and returns a reference usable in a JSON
/// payload.
pub trait GatherImage {
    fn gather_image(
        &mut self,
        graph: &NodeGraph,
        node: NodeId,
        input: &str,
    ) -> Result<Index<Image>>;
}

/// Document image table that accepts flat image texture inputs.
///
/// Like the host exporter's image gathering, it refuses anything that is
/// not a flat image texture node carrying an image; environment texture
/// nodes must be rewired through a flat proxy first.
#[derive(Debug, Default)]
pub struct ImageTable {
    images: Vec<Image>,
    by_name: HashMap<String, u32>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Consumes the table, yielding the document's image array
    pub fn into_images(self) -> Vec<Image> {
        self.images
    }
}

impl GatherImage for ImageTable {
    fn gather_image(
        &mut self,
        graph: &NodeGraph,
        node: NodeId,
        input: &str,
    ) -> Result<Index<Image>> {
        let link = graph
            .incoming(node, input)
            .with_context(|| format!("input socket '{input}' has no incoming link"))?;
        let source = graph
            .node(link.from_node)
            .context("link source node is missing from the graph")?;

        let settings = match source.image_settings() {
            Some(settings) if source.kind.is_image_texture() => settings,
            _ => bail!(
                "image export expects a flat image texture node feeding '{input}'"
            ),
        };
        if settings.projection != Projection::Flat {
            bail!("image texture node feeding '{input}' must use flat projection");
        }
        let image = settings
            .image
            .as_ref()
            .context("image texture node carries no image")?;

        if let Some(&index) = self.by_name.get(&image.name) {
            return Ok(Index::new(index));
        }

        let index = self.images.len() as u32;
        debug!(
            "Serializing image '{}' into the document image table at index {}",
            image.name, index
        );
        self.images.push(Image {
            buffer_view: None,
            mime_type: None,
            name: Some(image.name.clone()),
            uri: image.uri.clone(),
            extensions: None,
            extras: Default::default(),
        });
        self.by_name.insert(image.name.clone(), index);
        Ok(Index::new(index))
    }
}
