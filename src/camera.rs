use glam::{vec3, Mat4, Vec3};

use crate::constants::{
    ASPECT_RATIO, CAMERA_EYES, FAR_PLANE, FOV_Y_DEGREES, NEAR_PLANE, SCENE_CENTER,
};

/// The three preset viewpoints, selectable with the 1/2/3 keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraView {
    Front = 0,
    Top = 1,
    Side = 2,
}

/// Look-at camera state. There is no continuous motion; the camera only jumps
/// between the presets in [`CAMERA_EYES`].
#[derive(Debug, Clone)]
pub struct CameraState {
    pub active: CameraView,
    pub forward: Vec3,
    pub up: Vec3,
}

impl CameraState {
    /// The initial forward is the fixed constant (0, 0, -1) rather than being
    /// derived from the front eye; the two coincide for that eye position.
    pub fn new() -> CameraState {
        CameraState {
            active: CameraView::Front,
            forward: vec3(0.0, 0.0, -1.0),
            up: Vec3::Y,
        }
    }

    pub fn eye(&self) -> Vec3 {
        CAMERA_EYES[self.active as usize]
    }

    /// Switch to a preset and point the camera back at the scene center.
    ///
    /// Only the top view replaces the up vector (a straight-down view is
    /// degenerate with an Y-up basis); the other presets leave it as-is, so
    /// switching away from the top view keeps its up vector.
    pub fn select(&mut self, view: CameraView) {
        self.active = view;
        self.forward = (SCENE_CENTER - self.eye()).normalize();
        if view == CameraView::Top {
            self.up = vec3(0.0, 0.0, -1.0);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        Mat4::look_at_rh(eye, eye + self.forward, self.up)
    }

    /// Perspective projection with GL clip-space depth. The aspect ratio is
    /// the window's creation-time ratio, resize or not.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            FOV_Y_DEGREES.to_radians(),
            ASPECT_RATIO,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PRESETS: [CameraView; 3] = [CameraView::Front, CameraView::Top, CameraView::Side];

    #[test]
    fn view_matrix_maps_eye_to_view_space_origin() {
        for view in PRESETS {
            let mut camera = CameraState::new();
            camera.select(view);
            let eye_in_view = camera.view_matrix().transform_point3(camera.eye());
            assert_abs_diff_eq!(eye_in_view.x, 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(eye_in_view.y, 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(eye_in_view.z, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn every_preset_looks_at_the_scene_center() {
        for view in PRESETS {
            let mut camera = CameraState::new();
            camera.select(view);
            let center_in_view = camera.view_matrix().transform_point3(SCENE_CENTER);
            assert_abs_diff_eq!(center_in_view.x, 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(center_in_view.y, 0.0, epsilon = 1e-5);
            assert!(center_in_view.z < 0.0);
        }
    }

    #[test]
    fn top_view_forces_up_vector() {
        let mut camera = CameraState::new();
        camera.select(CameraView::Top);
        assert_eq!(camera.up, vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn front_and_side_leave_up_vector_untouched() {
        let mut camera = CameraState::new();
        camera.select(CameraView::Side);
        assert_eq!(camera.up, Vec3::Y);

        camera.select(CameraView::Top);
        camera.select(CameraView::Side);
        assert_eq!(camera.up, vec3(0.0, 0.0, -1.0));

        camera.select(CameraView::Front);
        assert_eq!(camera.up, vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn initial_forward_matches_the_front_preset() {
        let initial = CameraState::new();
        let mut selected = CameraState::new();
        selected.select(CameraView::Front);
        assert_abs_diff_eq!(initial.forward.x, selected.forward.x, epsilon = 1e-6);
        assert_abs_diff_eq!(initial.forward.y, selected.forward.y, epsilon = 1e-6);
        assert_abs_diff_eq!(initial.forward.z, selected.forward.z, epsilon = 1e-6);
    }
}
