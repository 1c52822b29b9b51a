use bubble_field::camera::PerspectiveCamera;
use bubble_field::controller::{SceneController, BUBBLE_RADIUS};
use bubble_field::core::Viewport;
use bubble_field::math::{intersect_sphere, ray_from_screen};
use glam::Vec3;

fn field_camera() -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::new(75.0, 800.0 / 600.0, 0.1, 100.0);
    camera.position = Vec3::new(0.0, 0.0, 2.0);
    camera
}

/// Projects a world position to logical screen coordinates
fn screen_position(camera: &PerspectiveCamera, world: Vec3) -> (f64, f64) {
    let clip = camera.view_projection() * world.extend(1.0);
    let x = ((clip.x / clip.w + 1.0) / 2.0) as f64 * 800.0;
    let y = ((1.0 - clip.y / clip.w) / 2.0) as f64 * 600.0;
    (x, y)
}

#[cfg(test)]
mod ray_generation_tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = field_camera();
        let inv = camera.view_projection().inverse();

        let ray = ray_from_screen(400.0, 300.0, 800.0, 600.0, inv);

        assert!(
            (ray.dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4,
            "Center-pixel ray should point straight at the target, got {:?}",
            ray.dir
        );
        assert!(
            ray.origin.x.abs() < 1e-4 && ray.origin.y.abs() < 1e-4,
            "Center-pixel ray should start on the view axis"
        );
    }

    #[test]
    fn test_corner_ray_diverges_from_center() {
        let camera = field_camera();
        let inv = camera.view_projection().inverse();

        let center = ray_from_screen(400.0, 300.0, 800.0, 600.0, inv);
        let corner = ray_from_screen(0.0, 0.0, 800.0, 600.0, inv);

        let alignment = center.dir.dot(corner.dir);
        assert!(
            alignment < 0.95,
            "Corner ray should diverge noticeably from the center ray, dot = {}",
            alignment
        );
    }

    #[test]
    fn test_ray_quadrants_match_screen_quadrants() {
        let camera = field_camera();
        let inv = camera.view_projection().inverse();

        let upper_left = ray_from_screen(100.0, 100.0, 800.0, 600.0, inv);
        assert!(upper_left.dir.x < 0.0, "Left of center should look left");
        assert!(upper_left.dir.y > 0.0, "Above center should look up");

        let lower_right = ray_from_screen(700.0, 500.0, 800.0, 600.0, inv);
        assert!(lower_right.dir.x > 0.0, "Right of center should look right");
        assert!(lower_right.dir.y < 0.0, "Below center should look down");
    }

    #[test]
    fn test_ray_passes_through_projected_point() {
        let camera = field_camera();
        let inv = camera.view_projection().inverse();
        let world = Vec3::new(3.0, -2.0, -8.0);

        let (x, y) = screen_position(&camera, world);
        let ray = ray_from_screen(x as f32, y as f32, 800.0, 600.0, inv);

        // Distance from the world point to the ray line
        let to_point = world - ray.origin;
        let closest = ray.origin + ray.dir * to_point.dot(ray.dir);
        assert!(
            (world - closest).length() < 1e-3,
            "Unprojecting a projected point should recover a ray through it"
        );
    }
}

#[cfg(test)]
mod field_picking_tests {
    use super::*;

    #[test]
    fn test_pick_agrees_with_exhaustive_search() {
        let controller = SceneController::new(Viewport::new(800, 600, 1.0));
        let inv = controller.camera.view_projection().inverse();

        for sx in (40..800).step_by(160) {
            for sy in (30..600).step_by(120) {
                let picked = controller.pick_at(sx as f64, sy as f64);

                let ray = ray_from_screen(sx as f32, sy as f32, 800.0, 600.0, inv);
                let best = controller
                    .scene
                    .iter()
                    .filter_map(|node| {
                        intersect_sphere(&ray, node.offset, BUBBLE_RADIUS)
                            .map(|t| (node.id, t))
                    })
                    .min_by(|a, b| a.1.total_cmp(&b.1));

                match (picked, best) {
                    (None, None) => {}
                    (Some((id, t)), Some((best_id, best_t))) => {
                        assert_eq!(id, best_id, "Wrong bubble picked at ({}, {})", sx, sy);
                        assert!((t - best_t).abs() < 1e-6);
                    }
                    (got, want) => panic!(
                        "pick_at disagrees with exhaustive search at ({}, {}): {:?} vs {:?}",
                        sx, sy, got, want
                    ),
                }
            }
        }
    }

    #[test]
    fn test_pick_distance_matches_geometry() {
        let mut controller = SceneController::new(Viewport::new(800, 600, 1.0));
        controller.scene.clear();
        controller.scene.add(Vec3::ZERO);

        let (_, t) = controller
            .pick_at(400.0, 300.0)
            .unwrap_or_else(|| panic!("Center pick should hit the bubble at the origin"));

        // Ray starts on the near plane (z = 1.9) and hits the front of the
        // sphere (z = 0.5)
        assert!((t - 1.4).abs() < 1e-3, "Expected hit distance ~1.4, got {}", t);
    }

    #[test]
    fn test_pick_respects_bubble_radius() {
        let mut controller = SceneController::new(Viewport::new(800, 600, 1.0));
        controller.scene.clear();
        controller.scene.add(Vec3::ZERO);

        let (x, y) = screen_position(&controller.camera, Vec3::new(0.4, 0.0, 0.0));
        assert!(
            controller.pick_at(x, y).is_some(),
            "A point inside the silhouette should pick the bubble"
        );

        let (x, y) = screen_position(&controller.camera, Vec3::new(0.6, 0.0, 0.0));
        assert!(
            controller.pick_at(x, y).is_none(),
            "A point outside the silhouette should miss"
        );
    }

    #[test]
    fn test_pick_on_empty_scene_is_none() {
        let mut controller = SceneController::new(Viewport::new(800, 600, 1.0));
        controller.scene.clear();

        assert!(controller.pick_at(400.0, 300.0).is_none());
    }
}

#[cfg(test)]
mod occlusion_tests {
    use super::*;

    #[test]
    fn test_nearest_of_stacked_bubbles_wins() {
        let mut controller = SceneController::new(Viewport::new(800, 600, 1.0));
        controller.scene.clear();
        controller.scene.add(Vec3::ZERO);
        let near = controller.scene.add(Vec3::new(0.0, 0.0, 1.0));

        let (picked, t) = controller
            .pick_at(400.0, 300.0)
            .unwrap_or_else(|| panic!("Center pick should hit the stack"));

        assert_eq!(picked, near);
        // Front surface of the near bubble sits at z = 1.5
        assert!((t - 0.4).abs() < 1e-3, "Expected hit distance ~0.4, got {}", t);
    }
}
