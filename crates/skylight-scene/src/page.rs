//! Native page shell - page headings drawn over the scene with bevy_ui
//!
//! The browser build composes the page in the DOM instead; this plugin is
//! only added for the desktop runner.

use bevy::prelude::*;
use skylight_core::PageFragment;

/// Base font size that heading sizes scale from
const BASE_FONT_SIZE: f32 = 16.0;

/// Page fragment rendered by [`PageShellPlugin`]
#[derive(Debug, Clone, Resource)]
pub struct PageShellSource(pub PageFragment);

/// Marker component for the page container node
#[derive(Component)]
pub struct PageContainer;

/// Marker component for heading text nodes
#[derive(Component)]
pub struct PageHeading {
    pub level: u8,
}

pub struct PageShellPlugin;

impl Plugin for PageShellPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_page_shell);
    }
}

/// Font size for a heading level, following the usual browser scale
/// (h1 = 2em ... h6 = 0.67em)
pub fn heading_font_size(level: u8) -> f32 {
    let scale = match level {
        0 | 1 => 2.0,
        2 => 1.5,
        3 => 1.17,
        4 => 1.0,
        5 => 0.83,
        _ => 0.67,
    };
    BASE_FONT_SIZE * scale
}

fn spawn_page_shell(mut commands: Commands, page: Res<PageShellSource>) {
    let headings = page.0.headings();
    commands
        .spawn((
            PageContainer,
            Name::new("page_container"),
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(BASE_FONT_SIZE)),
                ..default()
            },
        ))
        .with_children(|container| {
            for (level, text) in headings {
                container.spawn((
                    PageHeading { level },
                    Text::new(text),
                    TextFont {
                        font_size: heading_font_size(level),
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });
}
