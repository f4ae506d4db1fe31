use glam::{vec3, Vec3};

pub const APP_NAME: &str = "OpenGL Pyramid";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// Aspect ratio of the window at creation time. The projection matrix keeps
/// using this value even after a resize; only the viewport follows the window.
pub const ASPECT_RATIO: f32 = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Point every camera preset looks at.
pub const SCENE_CENTER: Vec3 = Vec3::ZERO;

/// Eye positions for the front, top and side presets, in that order.
pub const CAMERA_EYES: [Vec3; 3] = [
    vec3(0.0, 0.0, 10.0),
    vec3(0.0, 10.0, 0.0),
    vec3(10.0, 0.0, 0.0),
];

pub const VERTEX_SHADER_PATH: &str = "vertex_shader.glsl";
pub const FRAGMENT_SHADER_PATH: &str = "fragment_shader.glsl";

pub const PYRAMID_COUNT: usize = 3;
const PYRAMID_SPACING: f32 = 2.0;

/// World-space translation of pyramid instance `index`, spread along the X
/// axis and centered on the origin.
pub fn instance_offset(index: usize) -> Vec3 {
    vec3(index as f32 * PYRAMID_SPACING - PYRAMID_SPACING, 0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_offsets_are_centered_on_origin() {
        assert_eq!(instance_offset(0), vec3(-2.0, 0.0, 0.0));
        assert_eq!(instance_offset(1), vec3(0.0, 0.0, 0.0));
        assert_eq!(instance_offset(2), vec3(2.0, 0.0, 0.0));
    }
}
