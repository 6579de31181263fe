//! Bevy application setup

use bevy::prelude::*;
use skylight_core::{PageFragment, ViewerConfig};
use tracing::{info, warn};

use crate::camera::OrbitCameraPlugin;
use crate::mount::{SceneViewPlugin, SceneViewSource};
use crate::page::{PageShellPlugin, PageShellSource};

/// Where the page around the scene is composed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShell {
    /// The host page already holds the heading and the canvas
    Dom,
    /// The heading is drawn inside the window with bevy_ui
    Native,
}

/// Primary window for a page: bound to the page canvas in the browser,
/// titled after the page heading on the desktop
pub fn primary_window(config: &ViewerConfig, page: &PageFragment, shell: PageShell) -> Window {
    let title = config
        .window
        .title
        .clone()
        .or_else(|| page.headings().first().map(|(_, text)| text.to_string()))
        .unwrap_or_else(|| "Skylight".to_string());

    Window {
        title,
        canvas: match shell {
            PageShell::Dom => Some(config.window.canvas.clone()),
            PageShell::Native => None,
        },
        fit_canvas_to_parent: config.window.fit_canvas_to_parent,
        ..default()
    }
}

/// Assemble the Bevy app that renders `page`
pub fn build_app(config: &ViewerConfig, page: &PageFragment, shell: PageShell) -> App {
    let [r, g, b] = config.window.clear_color;
    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(r, g, b)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(primary_window(config, page, shell)),
            ..default()
        }));

    let scenes = page.scenes();
    match scenes.as_slice() {
        [] => warn!("Page has no scene view; only the page shell is rendered"),
        [scene, rest @ ..] => {
            if !rest.is_empty() {
                warn!(extra = rest.len(), "Page has more than one scene view; mounting the first");
            }
            app.insert_resource(SceneViewSource {
                fragment: (*scene).clone(),
                config: config.clone(),
            })
            .add_plugins(SceneViewPlugin)
            .add_plugins(OrbitCameraPlugin);
        }
    }

    if shell == PageShell::Native {
        app.insert_resource(PageShellSource(page.clone()))
            .add_plugins(PageShellPlugin);
    }

    info!(?shell, "Viewer app assembled");
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use skylight_core::page_root;

    #[test]
    fn test_dom_window_binds_canvas() {
        let config = ViewerConfig::default();
        let window = primary_window(&config, &page_root(), PageShell::Dom);

        assert_eq!(window.canvas.as_deref(), Some("#skylight-canvas"));
        assert!(window.fit_canvas_to_parent);
        assert_eq!(window.title, "Welcome to the 3D Web Application");
    }

    #[test]
    fn test_native_window_has_no_canvas() {
        let mut config = ViewerConfig::default();
        config.window.title = Some("Desk".to_string());
        let window = primary_window(&config, &page_root(), PageShell::Native);

        assert_eq!(window.canvas, None);
        assert_eq!(window.title, "Desk");
    }
}
