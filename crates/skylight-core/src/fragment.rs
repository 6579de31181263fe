//! Fragment types - declarative descriptions of what a component renders
//!
//! A fragment is a plain value tree. Components build them fresh on every
//! call; the rendering layer (Bevy, DOM) realizes them.

use serde::{Deserialize, Serialize};

/// A child element of a rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    /// Uniform light with no position and no decay
    AmbientLight { intensity: f32 },
    /// Omnidirectional light at a fixed world position
    PointLight { position: [f32; 3] },
    /// Interactive rotate/pan/zoom about a focal point.
    ///
    /// Takes no per-element parameters; tuning lives in
    /// [`crate::config::ControlsConfig`].
    OrbitControls,
}

/// A rendering surface and its ordered children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFragment {
    pub children: Vec<SceneNode>,
}

impl SceneFragment {
    pub fn new(children: Vec<SceneNode>) -> Self {
        Self { children }
    }

    /// Intensities of every ambient light, in child order
    pub fn ambient_lights(&self) -> impl Iterator<Item = f32> + '_ {
        self.children.iter().filter_map(|node| match node {
            SceneNode::AmbientLight { intensity } => Some(*intensity),
            _ => None,
        })
    }

    /// Positions of every point light, in child order
    pub fn point_lights(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.children.iter().filter_map(|node| match node {
            SceneNode::PointLight { position } => Some(*position),
            _ => None,
        })
    }

    /// Number of orbit controllers declared on this surface
    pub fn orbit_controls(&self) -> usize {
        self.children
            .iter()
            .filter(|node| matches!(node, SceneNode::OrbitControls))
            .count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A node in a page fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageNode {
    /// Block container with a CSS class name
    Container { class: String, children: Vec<PageNode> },
    /// Static heading text (`level` 1-6)
    Heading { level: u8, text: String },
    /// An embedded rendering surface
    Scene(SceneFragment),
}

impl PageNode {
    pub fn children(&self) -> &[PageNode] {
        match self {
            PageNode::Container { children, .. } => children,
            _ => &[],
        }
    }
}

/// A page description rooted at a single node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFragment {
    pub root: PageNode,
}

impl PageFragment {
    pub fn new(root: PageNode) -> Self {
        Self { root }
    }

    /// All nodes in depth-first, document order
    pub fn nodes(&self) -> Vec<&PageNode> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            // Reverse so the first child is visited first
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// `(level, text)` of every heading, in document order
    pub fn headings(&self) -> Vec<(u8, &str)> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                PageNode::Heading { level, text } => Some((*level, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Every embedded scene, in document order
    pub fn scenes(&self) -> Vec<&SceneFragment> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                PageNode::Scene(scene) => Some(scene),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
