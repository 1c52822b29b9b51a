use std::collections::hash_map::RandomState;
use std::path::PathBuf;

use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::core::Viewport;
use crate::environment::{Background, EnvironmentLoader, FALLBACK_COLOR_HEX};
use crate::math::{self, linear_from_hex};
use crate::scene::{scatter_offset, AmbientLight, BubblePrototype, NodeId, SceneGraph};

// === Constants ===

pub const BUBBLE_COUNT: usize = 2000;
pub const BUBBLE_RADIUS: f32 = 0.5;
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_DISTANCE: f32 = 2.0;

/// Cursor travel between press and release above which the gesture is a
/// drag, not a click
const CLICK_SLOP: f64 = 4.0;

/// What a pointer click did to the bubble field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Removed { remaining: usize },
    /// The last bubble was removed and a fresh wave spawned
    Respawned,
    Miss,
}

/// Owns the scene graph, camera, and interaction state
///
/// Everything here is CPU-side; the renderer reads this state each frame
/// but never mutates it.
pub struct SceneController {
    pub viewport: Viewport,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub scene: SceneGraph,
    pub prototype: BubblePrototype,
    pub ambient: AmbientLight,
    pub background: Background,
    generation: u64,
    scatter_state: RandomState,
    cursor: Option<(f64, f64)>,
    press_cursor: Option<(f64, f64)>,
    loader: Option<EnvironmentLoader>,
}

impl SceneController {
    pub fn new(viewport: Viewport) -> Self {
        let mut camera = PerspectiveCamera::new(
            CAMERA_FOV_DEGREES,
            viewport.aspect(),
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let controls = OrbitControls::new(CAMERA_DISTANCE);
        controls.apply_to(&mut camera);

        let mut controller = Self {
            viewport,
            camera,
            controls,
            scene: SceneGraph::new(),
            prototype: BubblePrototype::new(),
            ambient: AmbientLight::new([1.0, 1.0, 1.0], 1.0),
            background: Background::Pending,
            generation: 0,
            scatter_state: RandomState::new(),
            cursor: None,
            press_cursor: None,
            loader: None,
        };
        controller.populate_bubbles();
        println!("Scene created: {} bubbles", controller.count());
        controller
    }

    /// Live bubble count; always equal to the number of scene nodes
    pub fn count(&self) -> usize {
        self.scene.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Adds a full wave of bubbles at hashed integer offsets
    ///
    /// Additive on purpose: respawn stacks a new wave onto whatever is
    /// still in the scene (nothing, when triggered by depletion).
    pub fn populate_bubbles(&mut self) {
        for index in 0..BUBBLE_COUNT {
            let offset = scatter_offset(&self.scatter_state, self.generation, index as u32);
            self.scene.add(offset);
        }
        self.generation += 1;
    }

    // === Environment ===

    /// Kicks off the HDR decode on a worker thread
    pub fn start_environment_load(&mut self, path: PathBuf) {
        self.loader = Some(EnvironmentLoader::spawn(path));
        self.background = Background::Pending;
    }

    /// Polls the loader; true when the background state changed this call
    pub fn poll_environment(&mut self) -> bool {
        let Some(loader) = &self.loader else {
            return false;
        };
        let Some(result) = loader.try_take() else {
            return false;
        };
        self.loader = None;

        match result {
            Ok(map) => self.background = Background::Environment(map),
            Err(error) => {
                eprintln!("Failed to load environment map: {:#}", error);
                self.background = Background::Fallback(linear_from_hex(FALLBACK_COLOR_HEX));
            }
        }
        true
    }

    // === Input ===

    /// Latest pointer position in logical pixels
    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
        self.controls.on_cursor_moved(x, y);
    }

    /// Starts a drag anchored at the current cursor position
    pub fn mouse_pressed(&mut self) {
        self.controls.set_dragging(true);
        if let Some((x, y)) = self.cursor {
            self.controls.on_cursor_moved(x, y);
        }
        self.press_cursor = self.cursor;
    }

    /// Ends the gesture; a release within the click slop is a click
    pub fn mouse_released(&mut self) -> ClickOutcome {
        self.controls.set_dragging(false);
        let press = self.press_cursor.take();
        let (Some((press_x, press_y)), Some((x, y))) = (press, self.cursor) else {
            return ClickOutcome::Miss;
        };

        let travel = ((x - press_x).powi(2) + (y - press_y).powi(2)).sqrt();
        if travel > CLICK_SLOP {
            return ClickOutcome::Miss;
        }
        self.handle_click()
    }

    /// Raycasts from the current cursor and removes the nearest hit bubble
    ///
    /// Prints the remaining count on every removal. Removing the last
    /// bubble respawns a full wave within the same call.
    pub fn handle_click(&mut self) -> ClickOutcome {
        let Some((x, y)) = self.cursor else {
            return ClickOutcome::Miss;
        };
        let Some((id, _)) = self.pick_at(x, y) else {
            return ClickOutcome::Miss;
        };

        self.scene.remove(id);
        let remaining = self.count();
        println!("Bubbles remaining: {}", remaining);

        if remaining == 0 {
            self.populate_bubbles();
            return ClickOutcome::Respawned;
        }
        ClickOutcome::Removed { remaining }
    }

    /// Nearest bubble under the given screen point, with its ray distance
    pub fn pick_at(&self, x: f64, y: f64) -> Option<(NodeId, f32)> {
        if self.viewport.is_empty() {
            return None;
        }
        let inv_view_proj = self.camera.view_projection().inverse();
        let ray = math::ray_from_screen(
            x as f32,
            y as f32,
            self.viewport.width as f32,
            self.viewport.height as f32,
            inv_view_proj,
        );

        let mut nearest: Option<(NodeId, f32)> = None;
        for node in self.scene.iter() {
            if let Some(t) = math::intersect_sphere(&ray, node.offset, BUBBLE_RADIUS) {
                if nearest.map_or(true, |(_, best)| t < best) {
                    nearest = Some((node.id, t));
                }
            }
        }
        nearest
    }

    // === Frame ===

    /// Ignores zero-area sizes, which minimized windows report
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    pub fn update(&mut self, _delta: f32) {
        self.controls.apply_to(&mut self.camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn test_controller() -> SceneController {
        SceneController::new(Viewport::new(800, 600, 1.0))
    }

    /// Controller with a single bubble at a known offset
    fn lone_bubble_controller(offset: Vec3) -> SceneController {
        let mut controller = test_controller();
        controller.scene.clear();
        controller.scene.add(offset);
        controller
    }

    #[test]
    fn test_new_controller_spawns_full_field() {
        let controller = test_controller();
        assert_eq!(controller.count(), BUBBLE_COUNT);
        assert!((controller.camera.position - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6,
            "Camera should start at distance 2 on the z axis");
        assert!((controller.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut controller = test_controller();
        controller.resize(Viewport::new(1920, 1080, 1.0));
        assert!((controller.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_sized_resize_ignored() {
        let mut controller = test_controller();
        let aspect = controller.camera.aspect;
        controller.resize(Viewport::new(0, 600, 1.0));
        assert_eq!(controller.camera.aspect, aspect,
            "A minimized window must not poison the projection");
        assert_eq!(controller.viewport.width, 800);
    }

    #[test]
    fn test_click_without_cursor_misses() {
        let mut controller = test_controller();
        assert_eq!(controller.handle_click(), ClickOutcome::Miss);
        assert_eq!(controller.count(), BUBBLE_COUNT);
    }

    #[test]
    fn test_center_click_removes_bubble_at_origin() {
        let mut controller = lone_bubble_controller(Vec3::ZERO);
        controller.set_cursor(400.0, 300.0);

        // Removing the only bubble immediately respawns a full wave
        assert_eq!(controller.handle_click(), ClickOutcome::Respawned);
        assert_eq!(controller.count(), BUBBLE_COUNT);
    }

    #[test]
    fn test_click_picks_nearest_of_stacked_bubbles() {
        let mut controller = test_controller();
        controller.scene.clear();
        let far = controller.scene.add(Vec3::ZERO);
        let near = controller.scene.add(Vec3::new(0.0, 0.0, 1.0));
        controller.set_cursor(400.0, 300.0);

        let (picked, _) = controller.pick_at(400.0, 300.0)
            .unwrap_or_else(|| panic!("Center click should hit the stack"));
        assert_eq!(picked, near, "The bubble closer to the camera wins");

        assert_eq!(controller.handle_click(), ClickOutcome::Removed { remaining: 1 });
        assert!(controller.scene.iter().any(|node| node.id == far),
            "The occluded bubble must survive");
    }

    #[test]
    fn test_miss_leaves_scene_unchanged() {
        let mut controller = lone_bubble_controller(Vec3::new(10.0, 0.0, 0.0));
        let revision = controller.scene.revision();
        controller.set_cursor(400.0, 300.0);

        assert_eq!(controller.handle_click(), ClickOutcome::Miss);
        assert_eq!(controller.count(), 1);
        assert_eq!(controller.scene.revision(), revision);
    }

    #[test]
    fn test_drag_release_is_not_a_click() {
        let mut controller = lone_bubble_controller(Vec3::ZERO);
        controller.set_cursor(400.0, 300.0);
        controller.mouse_pressed();
        controller.set_cursor(450.0, 300.0);

        assert_eq!(controller.mouse_released(), ClickOutcome::Miss);
        assert_eq!(controller.count(), 1, "An orbit drag must not pop bubbles");
        assert!(controller.controls.yaw != 0.0, "The drag should have rotated the orbit");
    }

    #[test]
    fn test_release_within_slop_clicks() {
        let mut controller = lone_bubble_controller(Vec3::ZERO);
        controller.set_cursor(400.0, 300.0);
        controller.mouse_pressed();
        controller.set_cursor(402.0, 301.0);

        assert_eq!(controller.mouse_released(), ClickOutcome::Respawned);
    }

    #[test]
    fn test_environment_failure_falls_back_to_flat_color() {
        let mut controller = test_controller();
        controller.start_environment_load(PathBuf::from("no/such/file.hdr"));

        for _ in 0..200 {
            if controller.poll_environment() {
                match controller.background {
                    Background::Fallback(color) => {
                        assert!(color[0] > 0.98, "0xFEFEFE is nearly white, got {:?}", color);
                        return;
                    }
                    _ => panic!("A failed load must fall back to the flat color"),
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!("Environment load never resolved");
    }

    #[test]
    fn test_update_tracks_orbit() {
        let mut controller = test_controller();
        controller.controls.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        controller.update(0.016);
        assert!((controller.camera.position - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5,
            "Camera should follow the orbit pose, got {:?}", controller.camera.position);
    }
}
