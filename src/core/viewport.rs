use winit::dpi::PhysicalSize;

/// Device pixel ratios above this are clamped before sizing the render target
pub const PIXEL_RATIO_CAP: f32 = 2.0;

/// View state for one output surface: logical dimensions plus the capped
/// device pixel ratio. An explicit value, produced by the resize path and
/// read by camera and renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: pixel_ratio.min(PIXEL_RATIO_CAP),
        }
    }

    /// Builds a viewport from a winit window size and scale factor
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let scale = scale_factor as f32;
        let logical = size.to_logical::<f64>(scale_factor);
        Self::new(logical.width.round() as u32, logical.height.round() as u32, scale)
    }

    /// Width / height, the camera aspect ratio
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Render-target width in device pixels
    pub fn device_width(&self) -> u32 {
        ((self.width as f32 * self.pixel_ratio).round() as u32).max(1)
    }

    /// Render-target height in device pixels
    pub fn device_height(&self) -> u32 {
        ((self.height as f32 * self.pixel_ratio).round() as u32).max(1)
    }

    /// True when either dimension is zero (minimized window)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_800_600() {
        let viewport = Viewport::new(800, 600, 1.0);
        assert!((viewport.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_ratio_capped() {
        let viewport = Viewport::new(800, 600, 3.0);
        assert_eq!(viewport.pixel_ratio, PIXEL_RATIO_CAP, "Ratio above 2 should be clamped");
    }

    #[test]
    fn test_pixel_ratio_below_cap_kept() {
        let viewport = Viewport::new(800, 600, 1.5);
        assert_eq!(viewport.pixel_ratio, 1.5);
    }

    #[test]
    fn test_device_dimensions_scale_with_ratio() {
        let viewport = Viewport::new(800, 600, 2.0);
        assert_eq!(viewport.device_width(), 1600);
        assert_eq!(viewport.device_height(), 1200);
    }

    #[test]
    fn test_from_physical_divides_by_scale() {
        let viewport = Viewport::from_physical(PhysicalSize::new(1600, 1200), 2.0);
        assert_eq!(viewport.width, 800);
        assert_eq!(viewport.height, 600);
        assert_eq!(viewport.pixel_ratio, 2.0);
    }

    #[test]
    fn test_from_physical_caps_ratio() {
        let viewport = Viewport::from_physical(PhysicalSize::new(2400, 1800), 3.0);
        assert_eq!(viewport.width, 800);
        assert_eq!(viewport.pixel_ratio, PIXEL_RATIO_CAP);
        // Render target stays at 2x even on a 3x display
        assert_eq!(viewport.device_width(), 1600);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0, 600, 1.0).is_empty());
        assert!(Viewport::new(800, 0, 1.0).is_empty());
        assert!(!Viewport::new(800, 600, 1.0).is_empty());
    }

    #[test]
    fn test_device_dimensions_never_zero() {
        let viewport = Viewport::new(0, 0, 1.0);
        assert_eq!(viewport.device_width(), 1);
        assert_eq!(viewport.device_height(), 1);
    }
}
