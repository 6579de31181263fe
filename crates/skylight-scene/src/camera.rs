//! Orbit camera controls

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use skylight_core::config::ControlsConfig;

/// Radians of rotation per pixel of drag at `rotate_speed = 1.0`
const ROTATE_SENSITIVITY: f32 = 0.005;
/// World units of pan per pixel, per unit of orbit distance
const PAN_SENSITIVITY: f32 = 0.002;
/// Distance multiplier per wheel line at `zoom_speed = 1.0`
const ZOOM_STEP: f32 = 0.95;
/// Pixel-unit wheel deltas are converted to lines with this ratio
const PIXELS_PER_LINE: f32 = 100.0;
/// Pixels of middle-button drag per zoom line
const DOLLY_PIXELS_PER_LINE: f32 = 25.0;
/// Keep elevation just short of the poles so `looking_at` stays defined
const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
/// Smallest allowed orbit distance
const MIN_DISTANCE: f32 = 1e-3;
/// Damping factors are defined per frame at this rate
const REFERENCE_FPS: f32 = 60.0;

/// Orbit controller state, attached to the surface camera.
///
/// Input moves the goal values; [`OrbitCamera::step`] eases the current
/// values toward them (or snaps when damping is off).
#[derive(Debug, Clone, Component)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Rotation about +Y, measured from +Z toward +X
    pub azimuth: f32,
    /// Angle above the XZ plane
    pub elevation: f32,
    pub distance: f32,
    goal_target: Vec3,
    goal_azimuth: f32,
    goal_elevation: f32,
    goal_distance: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Per-frame damping factor, `None` when damping is disabled
    pub damping: Option<f32>,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Orbit about `target` starting from the camera at `eye`
    pub fn from_eye(eye: Vec3, target: Vec3, controls: &ControlsConfig) -> Self {
        let min_distance = controls.min_distance.max(MIN_DISTANCE);
        let max_distance = controls.max_distance.unwrap_or(f32::INFINITY).max(min_distance);

        let offset = eye - target;
        let distance = offset.length().clamp(min_distance, max_distance);
        let (azimuth, elevation) = if offset.length_squared() > 0.0 {
            let elevation = (offset.y / offset.length()).clamp(-1.0, 1.0).asin();
            (offset.x.atan2(offset.z), elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION))
        } else {
            (0.0, 0.0)
        };

        Self {
            target,
            azimuth,
            elevation,
            distance,
            goal_target: target,
            goal_azimuth: azimuth,
            goal_elevation: elevation,
            goal_distance: distance,
            rotate_speed: controls.rotate_speed,
            pan_speed: controls.pan_speed,
            zoom_speed: controls.zoom_speed,
            damping: controls.enable_damping.then_some(controls.damping_factor),
            min_distance,
            max_distance,
        }
    }

    /// Rotate by a pointer drag, in pixels
    pub fn rotate(&mut self, delta: Vec2) {
        let sensitivity = ROTATE_SENSITIVITY * self.rotate_speed;
        self.goal_azimuth -= delta.x * sensitivity;
        // Dragging down lifts the camera
        self.goal_elevation =
            (self.goal_elevation + delta.y * sensitivity).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Pan the target in the view plane by a pointer drag, in pixels
    pub fn pan(&mut self, delta: Vec2) {
        let (right, up) = self.view_axes();
        let speed = self.distance * PAN_SENSITIVITY * self.pan_speed;
        self.goal_target += (-right * delta.x + up * delta.y) * speed;
    }

    /// Zoom by wheel lines; positive values move the camera closer
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_by_factor(ZOOM_STEP.powf(lines * self.zoom_speed));
    }

    /// Multiply the goal distance, e.g. by a pinch ratio
    pub fn zoom_by_factor(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.goal_distance =
                (self.goal_distance * factor).clamp(self.min_distance, self.max_distance);
        }
    }

    /// Advance toward the goal pose by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let t = match self.damping {
            Some(factor) => 1.0 - (1.0 - factor).powf(dt * REFERENCE_FPS),
            None => 1.0,
        };
        self.azimuth += (self.goal_azimuth - self.azimuth) * t;
        self.elevation += (self.goal_elevation - self.elevation) * t;
        self.distance += (self.goal_distance - self.distance) * t;
        self.target = self.target.lerp(self.goal_target, t);
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        self.target + Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Camera right and up vectors for the current orientation
    fn view_axes(&self) -> (Vec3, Vec3) {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let right = Vec3::new(cos_az, 0.0, -sin_az);
        let up = Vec3::new(-sin_el * sin_az, cos_el, -sin_el * cos_az);
        (right, up)
    }

    pub fn goal_distance(&self) -> f32 {
        self.goal_distance
    }

    pub fn goal_target(&self) -> Vec3 {
        self.goal_target
    }
}

/// Plugin for orbit camera input handling
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, orbit_camera_system);
    }
}

/// Camera motion derived from the active touches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchGesture {
    /// One-finger drag, in pixels
    pub rotate: Option<Vec2>,
    /// Two-finger drag of the midpoint, in pixels
    pub pan: Option<Vec2>,
    /// Two-finger distance ratio, previous over current
    pub pinch: Option<f32>,
}

/// Classify touches given as `(position, delta)` pairs
pub fn touch_gesture(points: &[(Vec2, Vec2)]) -> TouchGesture {
    match points {
        [(_, delta)] => TouchGesture {
            rotate: Some(*delta),
            ..default()
        },
        [(pos_a, delta_a), (pos_b, delta_b)] => {
            let current = pos_a.distance(*pos_b);
            let previous = (*pos_a - *delta_a).distance(*pos_b - *delta_b);
            TouchGesture {
                rotate: None,
                pan: Some((*delta_a + *delta_b) * 0.5),
                pinch: Some(previous / current.max(1.0)),
            }
        }
        _ => TouchGesture::default(),
    }
}

/// Wheel movement in lines, whatever unit the platform reports
pub fn scroll_lines(scroll: &AccumulatedMouseScroll) -> f32 {
    match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    }
}

/// Feed pointer and touch input to every orbit camera and update its
/// transform.
///
/// Left drag rotates, middle drag dollies, right drag pans and the wheel
/// zooms. One finger rotates; two fingers pan and pinch.
pub fn orbit_camera_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    touches: Res<Touches>,
    time: Res<Time>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let motion = mouse_motion.delta;
    let wheel = scroll_lines(&mouse_scroll);
    let points: Vec<(Vec2, Vec2)> = touches
        .iter()
        .map(|touch| (touch.position(), touch.delta()))
        .collect();
    let gesture = touch_gesture(&points);

    for (mut orbit, mut transform) in &mut cameras {
        if mouse_buttons.pressed(MouseButton::Left) {
            orbit.rotate(motion);
        }
        if mouse_buttons.pressed(MouseButton::Middle) {
            // Dragging up moves closer
            orbit.zoom(-motion.y / DOLLY_PIXELS_PER_LINE);
        }
        if mouse_buttons.pressed(MouseButton::Right) {
            orbit.pan(motion);
        }
        if wheel != 0.0 {
            orbit.zoom(wheel);
        }
        if let Some(delta) = gesture.rotate {
            orbit.rotate(delta);
        }
        if let Some(delta) = gesture.pan {
            orbit.pan(delta);
        }
        if let Some(factor) = gesture.pinch {
            orbit.zoom_by_factor(factor);
        }

        orbit.step(time.delta_secs());
        *transform = orbit.transform();
    }
}
