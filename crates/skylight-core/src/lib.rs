//! Skylight Core - Declarative page/scene fragments and viewer configuration
//!
//! This crate provides the engine-free side of Skylight:
//! - Scene and page fragment types describing what is rendered
//! - The `SceneView` and `PageRoot` components, as pure fragment builders
//! - Viewer configuration (window, camera, controls, lighting, logging)

pub mod config;
pub mod fragment;
pub mod page_root;
pub mod scene_view;

pub use config::{ConfigError, ViewerConfig};
pub use fragment::{PageFragment, PageNode, SceneFragment, SceneNode};
pub use page_root::{page_root, PAGE_CLASS, PAGE_HEADING};
pub use scene_view::{scene_view, AMBIENT_INTENSITY, POINT_LIGHT_POSITION};
