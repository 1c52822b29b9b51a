pub mod camera;
pub mod cli;
pub mod controller;
pub mod controls;
pub mod core;
pub mod environment;
pub mod geometry;
pub mod helpers;
pub mod hud;
pub mod material;
pub mod math;
pub mod renderer;
pub mod scene;

pub use camera::PerspectiveCamera;
pub use controller::{ClickOutcome, SceneController, BUBBLE_COUNT, BUBBLE_RADIUS};
pub use controls::OrbitControls;
pub use core::{RenderLoop, Viewport};
pub use environment::{Background, EnvironmentMap};
pub use scene::{NodeId, SceneGraph, REGION_HALF_EXTENT};
