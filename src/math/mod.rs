mod color;
mod ray;

pub use color::{linear_from_hex, srgb_to_linear};
pub use ray::{intersect_sphere, ndc_from_screen, ray_from_screen, Ray};
