//! SceneView - a lit rendering surface with orbit camera controls

use crate::fragment::{SceneFragment, SceneNode};

/// Intensity of the uniform ambient light
pub const AMBIENT_INTENSITY: f32 = 0.5;

/// World position of the point light
pub const POINT_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];

/// Build the scene view fragment.
///
/// The surface always holds exactly three children, in this order: the
/// ambient light, the point light and the orbit controls.
pub fn scene_view() -> SceneFragment {
    SceneFragment::new(vec![
        SceneNode::AmbientLight {
            intensity: AMBIENT_INTENSITY,
        },
        SceneNode::PointLight {
            position: POINT_LIGHT_POSITION,
        },
        SceneNode::OrbitControls,
    ])
}
