//! Scene descriptions handed over by the asset loader
//!
//! The loader resolves model files into plain node bundles; this module only turns
//! those bundles into a live `SceneGraph`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineResult;
use super::graph::SceneGraph;
use super::node::{NodeCategory, NodeOptions};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Root node bundles in traversal order
    pub nodes: Vec<NodeOptions>,
}

impl SceneDescription {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        log::debug!(
            "[SceneDescription] Loaded {} bytes from {}",
            raw.len(),
            path.as_ref().display()
        );
        Self::from_json_str(&raw)
    }
}

impl SceneGraph {
    /// Build a graph from a description.
    ///
    /// The player camera's spawn anchor is linked to the first spawn-anchor node
    /// when the description leaves it unset.
    pub fn from_description(description: &SceneDescription) -> EngineResult<Self> {
        let mut graph = SceneGraph::new();
        for options in &description.nodes {
            graph.add_node(options)?;
        }

        let anchor = graph.find_first(NodeCategory::SpawnAnchor);
        if let (Some(player), Some(anchor)) = (graph.find_first(NodeCategory::Player), anchor) {
            if let Some(camera) = graph.node_mut(player)?.camera.as_mut() {
                if camera.spawn_anchor.is_none() {
                    camera.spawn_anchor = Some(anchor);
                }
            }
        }

        log::debug!(
            "[SceneGraph] Built scene with {} nodes ({} roots)",
            graph.len(),
            graph.roots().len()
        );
        Ok(graph)
    }
}
