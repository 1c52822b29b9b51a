use glam::Vec3;

use crate::camera::PerspectiveCamera;

const ROTATE_SPEED: f32 = 0.01;
const PITCH_LIMIT: f32 = 1.5;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;

/// Orbit-style camera control: drag rotates around a target point
///
/// Yaw/pitch/distance describe the camera position on a sphere around the
/// target. Zoom is carried but disabled for the interactive scene.
pub struct OrbitControls {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    pub zoom_enabled: bool,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl OrbitControls {
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target: Vec3::ZERO,
            zoom_enabled: false,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Camera position on the orbit sphere
    pub fn position(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, scroll: f32) {
        if !self.zoom_enabled {
            return;
        }
        let factor = if scroll > 0.0 { 0.9 } else { 1.1 };
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_cursor = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed a cursor position; rotates while a drag is active. Returns true
    /// when the orbit changed.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> bool {
        let moved = if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                let dx = (x - last_x) as f32;
                let dy = (y - last_y) as f32;
                self.rotate(dx * ROTATE_SPEED, dy * ROTATE_SPEED);
                true
            } else {
                false
            }
        } else {
            false
        };
        if self.dragging {
            self.last_cursor = Some((x, y));
        }
        moved
    }

    /// Write the orbit pose into the camera
    pub fn apply_to(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}
