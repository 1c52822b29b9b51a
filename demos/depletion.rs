use bubble_field::controller::{ClickOutcome, SceneController, BUBBLE_COUNT};
use bubble_field::core::Viewport;
use glam::Vec3;
use std::time::Instant;

/// Headless depletion run: pops every bubble through the real click path,
/// rotating the orbit camera whenever the remaining bubbles are off-screen,
/// then verifies that the final pop respawns a full wave.
fn main() {
    println!("{:=<60}", "");
    println!(
        "Bubble field depletion  [{}]",
        chrono::Local::now().format("%H:%M:%S")
    );
    println!("{:=<60}", "");

    let mut controller = SceneController::new(Viewport::new(800, 600, 1.0));
    let start = Instant::now();

    let mut clicks = 0u32;
    let mut poses = 0u32;
    let mut step = 0u32;

    while controller.count() > 1 {
        let targets: Vec<Vec3> = controller.scene.iter().map(|node| node.offset).collect();

        let mut popped_any = false;
        for offset in targets {
            if controller.count() <= 1 {
                break;
            }
            if let Some((x, y)) = screen_position(&controller, offset) {
                controller.set_cursor(x, y);
                clicks += 1;
                if controller.handle_click() != ClickOutcome::Miss {
                    popped_any = true;
                }
            }
        }

        if !popped_any {
            // Everything left is off-screen from this pose
            step += 1;
            poses += 1;
            controller.controls.yaw = step as f32 * 0.7;
            controller.controls.pitch = (step as f32 * 0.37).sin() * 1.2;
            controller.update(0.0);
        }
    }

    let depletion_time = start.elapsed();
    println!("{:=<60}", "");
    println!(
        "One bubble left after {} clicks and {} extra camera poses",
        clicks, poses
    );
    println!(
        "Depletion took {:.2}s ({:.0} pops/sec)",
        depletion_time.as_secs_f64(),
        (BUBBLE_COUNT - 1) as f64 / depletion_time.as_secs_f64()
    );

    println!("{:=<60}", "");
    println!(
        "Final pop  [{}]",
        chrono::Local::now().format("%H:%M:%S")
    );
    println!("{:=<60}", "");

    let outcome = pop_last_bubble(&mut controller);
    match outcome {
        ClickOutcome::Respawned => {
            println!("Respawn confirmed: {} bubbles back in the field", controller.count());
        }
        other => println!("Unexpected outcome for the last bubble: {:?}", other),
    }

    println!(
        "Total run: {:.2}s, scene generation {}",
        start.elapsed().as_secs_f64(),
        controller.generation()
    );
}

/// Rotates the orbit until the last bubble is on-screen, then clicks it
fn pop_last_bubble(controller: &mut SceneController) -> ClickOutcome {
    for step in 0..256 {
        let offset = match controller.scene.iter().next() {
            Some(node) => node.offset,
            None => return ClickOutcome::Miss,
        };
        if let Some((x, y)) = screen_position(controller, offset) {
            controller.set_cursor(x, y);
            return controller.handle_click();
        }
        controller.controls.yaw = step as f32 * 0.7;
        controller.controls.pitch = (step as f32 * 0.37).sin() * 1.2;
        controller.update(0.0);
    }
    ClickOutcome::Miss
}

/// Logical screen position of a world point, or None when outside the view
fn screen_position(controller: &SceneController, world: Vec3) -> Option<(f64, f64)> {
    let clip = controller.camera.view_projection() * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip / clip.w;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    let x = (ndc.x as f64 + 1.0) / 2.0 * controller.viewport.width as f64;
    let y = (1.0 - ndc.y as f64) / 2.0 * controller.viewport.height as f64;
    Some((x, y))
}
