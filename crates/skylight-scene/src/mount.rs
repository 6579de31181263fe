//! Mounting scene fragments - rendering surface, camera and lights
//!
//! A mounted surface is one root entity. The surface owns a default camera
//! the way a canvas does; the fragment's children are realized against it
//! in order:
//! - ambient lights become the camera's `AmbientLight` (intensities add up)
//! - point lights become child entities at their fixed positions
//! - orbit controls attach an [`OrbitCamera`] to the camera
//!
//! Unmounting despawns the whole hierarchy, which releases the render
//! resources the engine allocated for the camera and lights.

use bevy::prelude::*;
use skylight_core::{SceneFragment, SceneNode, ViewerConfig};
use tracing::{debug, info, warn};

use crate::camera::OrbitCamera;

/// Marker component for a mounted rendering surface
#[derive(Component)]
pub struct SceneSurface;

/// Marker component for the camera owned by a surface
#[derive(Component)]
pub struct SurfaceCamera;

/// Marker component for point lights spawned from a fragment
#[derive(Component)]
pub struct SceneLight;

/// Fragment and configuration mounted by [`SceneViewPlugin`] at startup
#[derive(Debug, Clone, Resource)]
pub struct SceneViewSource {
    pub fragment: SceneFragment,
    pub config: ViewerConfig,
}

/// The surface mounted at startup
#[derive(Debug, Clone, Copy, Resource)]
pub struct MountedScene(pub Entity);

/// Plugin that mounts the [`SceneViewSource`] fragment on startup
pub struct SceneViewPlugin;

impl Plugin for SceneViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, mount_scene_view);
    }
}

fn mount_scene_view(world: &mut World) {
    let Some(source) = world.get_resource::<SceneViewSource>().cloned() else {
        warn!("No scene view source configured; nothing to mount");
        return;
    };
    let surface = mount_scene(world, &source.fragment, &source.config);
    world.insert_resource(MountedScene(surface));
}

/// Realize `fragment` in `world` and return the surface entity
pub fn mount_scene(world: &mut World, fragment: &SceneFragment, config: &ViewerConfig) -> Entity {
    let camera_config = &config.camera;
    let lighting = &config.lighting;
    let eye = Vec3::from_array(camera_config.position);

    let surface = world
        .spawn((
            SceneSurface,
            Name::new("scene_surface"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let camera = world
        .spawn((
            SurfaceCamera,
            Name::new("surface_camera"),
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: camera_config.fov_degrees.to_radians(),
                near: camera_config.near,
                far: camera_config.far,
                ..default()
            }),
            Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
            ChildOf(surface),
        ))
        .id();

    let mut ambient_brightness = None;
    for node in &fragment.children {
        match node {
            SceneNode::AmbientLight { intensity } => {
                let brightness = lighting.ambient_brightness(*intensity);
                *ambient_brightness.get_or_insert(0.0) += brightness;
            }
            SceneNode::PointLight { position } => {
                let position = Vec3::from_array(*position);
                world.spawn((
                    SceneLight,
                    Name::new("point_light"),
                    PointLight {
                        intensity: lighting.point_light_intensity,
                        range: lighting.point_light_range,
                        shadows_enabled: false,
                        ..default()
                    },
                    Transform::from_translation(position),
                    ChildOf(surface),
                ));
                debug!(?position, "Spawned point light");
            }
            SceneNode::OrbitControls => {
                let orbit = OrbitCamera::from_eye(eye, Vec3::ZERO, &config.controls);
                world.entity_mut(camera).insert(orbit);
            }
        }
    }

    // A surface without an ambient light gets none, not the engine default
    world.entity_mut(camera).insert(AmbientLight {
        color: Color::WHITE,
        brightness: ambient_brightness.unwrap_or(0.0),
        ..default()
    });

    info!(
        surface = ?surface,
        children = fragment.children.len(),
        "Mounted scene surface"
    );
    surface
}

/// Despawn a mounted surface and everything under it.
///
/// Returns `false` (with a warning) when `surface` is not a mounted surface.
pub fn unmount_scene(world: &mut World, surface: Entity) -> bool {
    if world.get::<SceneSurface>(surface).is_none() {
        warn!(surface = ?surface, "Unmount requested for an entity that is not a mounted surface");
        return false;
    }
    world.despawn(surface);
    info!(surface = ?surface, "Unmounted scene surface");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use skylight_core::scene_view;

    #[derive(Debug, PartialEq)]
    struct Census {
        surfaces: usize,
        cameras: usize,
        ambient: Vec<f32>,
        point_lights: Vec<Vec3>,
        orbit_cameras: usize,
    }

    fn census(world: &mut World) -> Census {
        let surfaces = world.query::<&SceneSurface>().iter(world).count();
        let cameras = world.query::<&SurfaceCamera>().iter(world).count();
        let ambient = world
            .query::<&AmbientLight>()
            .iter(world)
            .map(|light| light.brightness)
            .collect();
        let point_lights = world
            .query_filtered::<&Transform, With<PointLight>>()
            .iter(world)
            .map(|transform| transform.translation)
            .collect();
        let orbit_cameras = world.query::<&OrbitCamera>().iter(world).count();
        Census {
            surfaces,
            cameras,
            ambient,
            point_lights,
            orbit_cameras,
        }
    }

    #[test]
    fn test_mount_scene_view() {
        let mut world = World::new();
        let surface = mount_scene(&mut world, &scene_view(), &ViewerConfig::default());

        assert_eq!(
            census(&mut world),
            Census {
                surfaces: 1,
                cameras: 1,
                ambient: vec![200.0],
                point_lights: vec![Vec3::splat(10.0)],
                orbit_cameras: 1,
            }
        );

        let children = world.get::<Children>(surface).unwrap();
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_orbit_camera_shares_surface_camera() {
        let mut world = World::new();
        mount_scene(&mut world, &scene_view(), &ViewerConfig::default());

        let mut query = world.query_filtered::<(&Transform, &OrbitCamera), With<SurfaceCamera>>();
        let (transform, orbit) = query.single(&world).unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 5.0));
        assert!(orbit.eye().distance(transform.translation) < 1e-4);
    }

    #[test]
    fn test_ambient_lights_accumulate() {
        let fragment = SceneFragment::new(vec![
            SceneNode::AmbientLight { intensity: 0.25 },
            SceneNode::AmbientLight { intensity: 0.5 },
        ]);
        let mut world = World::new();
        mount_scene(&mut world, &fragment, &ViewerConfig::default());

        let found = census(&mut world);
        assert_eq!(found.ambient, vec![300.0]);
        assert_eq!(found.orbit_cameras, 0);
        assert!(found.point_lights.is_empty());
    }

    #[test]
    fn test_unmount_removes_hierarchy() {
        let mut world = World::new();
        let surface = mount_scene(&mut world, &scene_view(), &ViewerConfig::default());

        assert!(unmount_scene(&mut world, surface));
        assert_eq!(
            census(&mut world),
            Census {
                surfaces: 0,
                cameras: 0,
                ambient: vec![],
                point_lights: vec![],
                orbit_cameras: 0,
            }
        );

        // Second unmount is a no-op
        assert!(!unmount_scene(&mut world, surface));
    }

    #[test]
    fn test_unmount_rejects_non_surface() {
        let mut world = World::new();
        let other = world.spawn(Name::new("not_a_surface")).id();
        assert!(!unmount_scene(&mut world, other));
        assert!(world.get_entity(other).is_ok());
    }

    #[test]
    fn test_mount_cycles_are_identical() {
        let mut world = World::new();
        let config = ViewerConfig::default();

        let surface = mount_scene(&mut world, &scene_view(), &config);
        let first = census(&mut world);
        unmount_scene(&mut world, surface);

        for _ in 0..3 {
            let surface = mount_scene(&mut world, &scene_view(), &config);
            assert_eq!(census(&mut world), first);
            unmount_scene(&mut world, surface);
        }
    }

    #[test]
    fn test_plugin_mounts_on_startup() {
        let mut app = App::new();
        app.insert_resource(SceneViewSource {
            fragment: scene_view(),
            config: ViewerConfig::default(),
        })
        .add_plugins(SceneViewPlugin);
        app.update();

        let mounted = *app.world().resource::<MountedScene>();
        assert!(app.world().get::<SceneSurface>(mounted.0).is_some());
        assert_eq!(census(app.world_mut()).point_lights, vec![Vec3::splat(10.0)]);
    }
}
