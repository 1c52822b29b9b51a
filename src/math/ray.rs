use glam::{Mat4, Vec3};

/// Hits closer than this are treated as self-intersection noise
const T_MIN: f32 = 1e-4;

/// Ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// Point along the ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Maps a screen position (physical pixels, origin top-left) to normalized
/// device coordinates in [-1, 1] with y pointing up
pub fn ndc_from_screen(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    let ndc_x = (x / width) * 2.0 - 1.0;
    let ndc_y = 1.0 - (y / height) * 2.0;
    (ndc_x, ndc_y)
}

/// Builds a world-space ray through the given screen position by unprojecting
/// the near- and far-plane points of that pixel
///
/// `inv_view_proj` is the inverse of projection * view. NDC depth follows the
/// wgpu convention (near = 0, far = 1).
pub fn ray_from_screen(x: f32, y: f32, width: f32, height: f32, inv_view_proj: Mat4) -> Ray {
    let (ndc_x, ndc_y) = ndc_from_screen(x, y, width, height);

    let near = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
    let far = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

    Ray::new(near, (far - near).normalize())
}

/// Ray/sphere intersection, returning the nearest positive hit parameter
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.dir.dot(ray.dir);
    let half_b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t = (-half_b - sqrt_d) / a;
    if t > T_MIN {
        return Some(t);
    }

    // Ray origin inside the sphere: take the exit point
    let t = (-half_b + sqrt_d) / a;
    if t > T_MIN {
        Some(t)
    } else {
        None
    }
}
