use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::scene::{RenderFrame, Shape};

/// Draw layers in back-to-front paint order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SceneLayer {
    Grid,
    Axis,
    Continuous,
    Discrete,
    Focus,
    Brush,
    Scrubber,
}

impl SceneLayer {
    pub const ALL: [Self; 7] = [
        Self::Grid,
        Self::Axis,
        Self::Continuous,
        Self::Discrete,
        Self::Focus,
        Self::Brush,
        Self::Scrubber,
    ];
}

/// Stable identity of one retained draw command; diffing between render
/// passes is keyed on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey {
    pub layer: SceneLayer,
    pub id: String,
}

impl NodeKey {
    #[must_use]
    pub fn new(layer: SceneLayer, id: impl Into<String>) -> Self {
        Self {
            layer,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub shape: Shape,
    pub visible: bool,
}

/// Retained scene: the set of live draw commands keyed by identity.
///
/// Panels produce target node lists per layer; the engine diffs targets
/// against this scene and either writes shapes directly or hands the change
/// to the animation layer.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    nodes: IndexMap<NodeKey, SceneNode>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_shape(&mut self, key: NodeKey, shape: Shape) {
        match self.nodes.get_mut(&key) {
            Some(node) => node.shape = shape,
            None => {
                self.nodes.insert(
                    key,
                    SceneNode {
                        shape,
                        visible: true,
                    },
                );
            }
        }
    }

    /// Toggles visibility without discarding the node; returns `false` when
    /// the key is unknown.
    pub fn set_visible(&mut self, key: &NodeKey, visible: bool) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &NodeKey) -> Option<SceneNode> {
        self.nodes.shift_remove(key)
    }

    /// Keys of one layer, in insertion order.
    #[must_use]
    pub fn layer_keys(&self, layer: SceneLayer) -> Vec<NodeKey> {
        self.nodes
            .keys()
            .filter(|key| key.layer == layer)
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// Flattens visible nodes into a draw-ordered frame (layer order first,
    /// insertion order within a layer).
    #[must_use]
    pub fn to_frame(&self, viewport: Viewport) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport);
        for layer in SceneLayer::ALL {
            for (key, node) in &self.nodes {
                if key.layer == layer && node.visible {
                    frame.shapes.push(node.shape.clone());
                }
            }
        }
        frame
    }
}
