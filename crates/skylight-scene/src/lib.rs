//! Skylight Scene - Bevy realization of Skylight fragments
//!
//! This crate mounts the engine-free fragments from `skylight-core` into a
//! Bevy world. It is shared by the browser build (skylight-web) and the
//! desktop runner (skylight-desktop).

pub mod app;
pub mod camera;
pub mod mount;
pub mod page;

pub use app::{build_app, PageShell};
pub use camera::{OrbitCamera, OrbitCameraPlugin};
pub use mount::{mount_scene, unmount_scene, MountedScene, SceneSurface, SceneViewPlugin, SceneViewSource};
pub use page::{PageShellPlugin, PageShellSource};
