use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use bubble_field::cli::Cli;
use bubble_field::controller::SceneController;
use bubble_field::core::{RenderLoop, Viewport};
use bubble_field::renderer::Renderer;

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

// === Type Aliases ===

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// === Application ===

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    controller: Option<SceneController>,
    render_loop: RenderLoop,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            renderer: None,
            controller: None,
            render_loop: RenderLoop::new(),
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Bubble Field")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
            let mut controller = SceneController::new(viewport);
            controller.start_environment_load(PathBuf::from(&self.cli.environment));

            let renderer = match pollster::block_on(Renderer::new(
                window.clone(),
                &controller,
                !self.cli.no_ui,
            )) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
            self.controller = Some(controller);
            self.render_loop.run();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.render_loop.stop();
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(controller), Some(window)) = (&mut self.controller, &self.window) {
                    let logical = position.to_logical::<f64>(window.scale_factor());
                    controller.set_cursor(logical.x, logical.y);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(controller) = &mut self.controller {
                    match state {
                        ElementState::Pressed => controller.mouse_pressed(),
                        ElementState::Released => {
                            controller.mouse_released();
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(controller) = &mut self.controller {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                    };
                    controller.controls.zoom(scroll);
                }
            }
            WindowEvent::Resized(size) => {
                if let (Some(controller), Some(renderer), Some(window)) =
                    (&mut self.controller, &mut self.renderer, &self.window)
                {
                    let viewport = Viewport::from_physical(size, window.scale_factor());
                    controller.resize(viewport);
                    renderer.resize(viewport);
                }
            }
            WindowEvent::RedrawRequested => {
                let delta = self.render_loop.tick();
                self.update_fps(delta);

                if let (Some(controller), Some(renderer), Some(window)) =
                    (&mut self.controller, &mut self.renderer, &self.window)
                {
                    controller.update(delta);
                    controller.poll_environment();

                    match renderer.render(controller, window, self.fps) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                            renderer.resize(controller.viewport)
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            eprintln!("Render error: out of GPU memory");
                            event_loop.exit();
                        }
                        Err(e) => eprintln!("Render error: {}", e),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.render_loop.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    println!("Bubble Field - Controls: drag to orbit, click a bubble to pop it, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
