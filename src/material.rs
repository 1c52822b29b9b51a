/// Physically-based surface parameters, the subset the bubble look uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalMaterial {
    pub roughness: f32,
    pub metalness: f32,
    /// Fraction of light passing through the surface
    pub transmission: f32,
    pub ior: f32,
    pub iridescence: f32,
    pub iridescence_ior: f32,
    /// Thin-film thickness range in nanometers
    pub iridescence_thickness_range: [f32; 2],
    pub sheen: f32,
    pub specular_intensity: f32,
}

impl PhysicalMaterial {
    /// Soap-film look shared by every bubble
    pub fn bubble() -> Self {
        Self {
            roughness: 0.0,
            metalness: 0.0,
            transmission: 1.0,
            ior: 2.33,
            iridescence: 0.5,
            iridescence_ior: 1.6,
            iridescence_thickness_range: [200.0, 400.0],
            sheen: 1.0,
            specular_intensity: 1.0,
        }
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            roughness: self.roughness,
            metalness: self.metalness,
            transmission: self.transmission,
            ior: self.ior,
            iridescence: self.iridescence,
            iridescence_ior: self.iridescence_ior,
            iridescence_thickness_min: self.iridescence_thickness_range[0],
            iridescence_thickness_max: self.iridescence_thickness_range[1],
            sheen: self.sheen,
            specular_intensity: self.specular_intensity,
            _pad: [0.0; 2],
        }
    }
}

/// Material uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub roughness: f32,
    pub metalness: f32,
    pub transmission: f32,
    pub ior: f32,
    pub iridescence: f32,
    pub iridescence_ior: f32,
    pub iridescence_thickness_min: f32,
    pub iridescence_thickness_max: f32,
    pub sheen: f32,
    pub specular_intensity: f32,
    pub _pad: [f32; 2],
}
