use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::controller::SceneController;
use crate::core::Viewport;
use crate::environment::{
    Background, EnvironmentMap, BACKGROUND_BLURRINESS, ENVIRONMENT_INTENSITY, FALLBACK_COLOR_HEX,
};
use crate::geometry::Vertex;
use crate::helpers::{helper_vertices, HelperVertex};
use crate::hud;
use crate::math::linear_from_hex;
use crate::scene::SceneGraph;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// === Constants ===

const MSAA_SAMPLES: u32 = 4;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const ENVIRONMENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

// === GPU Data Structures ===

/// Per-instance data: the bubble's world-space offset
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct InstanceRaw {
    offset: [f32; 3],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Environment sampling parameters; `lod` is the blur level for the
/// background pass and the highest mip for the bubble pass
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct EnvParams {
    lod: f32,
    intensity: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct AmbientUniform {
    color: [f32; 3],
    intensity: f32,
}

// === Renderer ===

/// Draws the bubble field: environment background, reference lines, and
/// instanced translucent spheres, with an egui overlay on top
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    viewport: Viewport,
    msaa_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    background_params_buffer: wgpu::Buffer,
    bubble_params_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    ambient_buffer: wgpu::Buffer,
    background_layout: wgpu::BindGroupLayout,
    bubble_layout: wgpu::BindGroupLayout,
    environment_sampler: wgpu::Sampler,
    background_bind_group: wgpu::BindGroup,
    bubble_bind_group: wgpu::BindGroup,
    has_environment: bool,
    background_pipeline: wgpu::RenderPipeline,
    bubble_pipeline: wgpu::RenderPipeline,
    helper_pipeline: wgpu::RenderPipeline,
    sphere_vertex_buffer: wgpu::Buffer,
    sphere_index_buffer: wgpu::Buffer,
    sphere_index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uploaded_revision: Option<u64>,
    helper_vertex_buffer: wgpu::Buffer,
    helper_vertex_count: u32,
    hud_enabled: bool,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        controller: &SceneController,
        hud_enabled: bool,
    ) -> Result<Self> {
        let viewport = controller.viewport;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, viewport);
        surface.configure(&device, &surface_config);

        let msaa_view = Self::create_msaa_texture(&device, &surface_config);
        let depth_view = Self::create_depth_texture(&device, &surface_config);

        let fallback = linear_from_hex(FALLBACK_COLOR_HEX);
        let clear_color = wgpu::Color {
            r: fallback[0] as f64,
            g: fallback[1] as f64,
            b: fallback[2] as f64,
            a: 1.0,
        };

        // Shared camera uniform, group 0 of every pipeline
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[controller.camera.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let background_params_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Background Params"),
                contents: bytemuck::cast_slice(&[EnvParams {
                    lod: 0.0,
                    intensity: ENVIRONMENT_INTENSITY,
                    _pad: [0.0; 2],
                }]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let bubble_params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Bubble Environment Params"),
            contents: bytemuck::cast_slice(&[EnvParams {
                lod: 0.0,
                intensity: ENVIRONMENT_INTENSITY,
                _pad: [0.0; 2],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Buffer"),
            contents: bytemuck::cast_slice(&[controller.prototype.material.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let ambient_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ambient Light Buffer"),
            contents: bytemuck::cast_slice(&[AmbientUniform {
                color: controller.ambient.color,
                intensity: controller.ambient.intensity,
            }]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let background_layout = Self::create_background_layout(&device);
        let bubble_layout = Self::create_bubble_layout(&device);

        let environment_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            // Equirectangular maps wrap horizontally only
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Until the HDR arrives, bind a flat-color texel so the bubble
        // pipeline always has a valid environment
        let placeholder_view = Self::create_placeholder_environment(&device, &queue);
        let (background_bind_group, bubble_bind_group) = Self::create_environment_bind_groups(
            &device,
            &background_layout,
            &bubble_layout,
            &placeholder_view,
            &environment_sampler,
            &background_params_buffer,
            &bubble_params_buffer,
            &material_buffer,
            &ambient_buffer,
        );

        let background_pipeline = Self::create_background_pipeline(
            &device,
            &camera_layout,
            &background_layout,
            surface_config.format,
        );
        let bubble_pipeline = Self::create_bubble_pipeline(
            &device,
            &camera_layout,
            &bubble_layout,
            surface_config.format,
        );
        let helper_pipeline =
            Self::create_helper_pipeline(&device, &camera_layout, surface_config.format);

        let geometry = &controller.prototype.geometry;
        let sphere_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: geometry.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: geometry.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (controller.scene.len().max(1) * std::mem::size_of::<InstanceRaw>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let helpers = helper_vertices();
        let helper_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Helper Line Buffer"),
            contents: bytemuck::cast_slice(&helpers),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        println!(
            "Renderer initialized: {} bubble instances",
            controller.scene.len()
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            viewport,
            msaa_view,
            depth_view,
            clear_color,
            camera_buffer,
            camera_bind_group,
            background_params_buffer,
            bubble_params_buffer,
            material_buffer,
            ambient_buffer,
            background_layout,
            bubble_layout,
            environment_sampler,
            background_bind_group,
            bubble_bind_group,
            has_environment: false,
            background_pipeline,
            bubble_pipeline,
            helper_pipeline,
            sphere_vertex_buffer,
            sphere_index_buffer,
            sphere_index_count: geometry.index_count(),
            instance_buffer,
            instance_count: 0,
            uploaded_revision: None,
            helper_vertex_buffer,
            helper_vertex_count: helpers.len() as u32,
            hud_enabled,
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| "Failed to find appropriate adapter".into())
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                // Linear filtering of the Rgba32Float environment mips
                required_features: wgpu::Features::FLOAT32_FILTERABLE,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| e.into())
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        viewport: Viewport,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: viewport.device_width(),
            height: viewport.device_height(),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_msaa_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: MSAA_SAMPLES,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: MSAA_SAMPLES,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_background_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
            label: Some("background_bind_group_layout"),
        })
    }

    fn create_bubble_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                uniform_entry(2),
                uniform_entry(3),
                uniform_entry(4),
            ],
            label: Some("bubble_bind_group_layout"),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_environment_bind_groups(
        device: &wgpu::Device,
        background_layout: &wgpu::BindGroupLayout,
        bubble_layout: &wgpu::BindGroupLayout,
        environment_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        background_params: &wgpu::Buffer,
        bubble_params: &wgpu::Buffer,
        material: &wgpu::Buffer,
        ambient: &wgpu::Buffer,
    ) -> (wgpu::BindGroup, wgpu::BindGroup) {
        let background = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: background_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(environment_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: background_params.as_entire_binding(),
                },
            ],
            label: Some("background_bind_group"),
        });

        let bubbles = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: bubble_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(environment_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: material.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: bubble_params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: ambient.as_entire_binding(),
                },
            ],
            label: Some("bubble_bind_group"),
        });

        (background, bubbles)
    }

    fn create_placeholder_environment(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> wgpu::TextureView {
        let color = linear_from_hex(FALLBACK_COLOR_HEX);
        let texel: [f32; 4] = [color[0], color[1], color[2], 1.0];

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Placeholder Environment"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ENVIRONMENT_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            bytemuck::cast_slice(&texel),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(16),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_background_pipeline(
        device: &wgpu::Device,
        camera_layout: &wgpu::BindGroupLayout,
        background_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Background Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("background.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Background Pipeline Layout"),
            bind_group_layouts: &[camera_layout, background_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Background Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Drawn first, under everything; never touches depth
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: MSAA_SAMPLES,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_bubble_pipeline(
        device: &wgpu::Device,
        camera_layout: &wgpu::BindGroupLayout,
        bubble_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Bubble Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("bubbles.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Bubble Pipeline Layout"),
            bind_group_layouts: &[camera_layout, bubble_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Bubble Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout(), InstanceRaw::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: MSAA_SAMPLES,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_helper_pipeline(
        device: &wgpu::Device,
        camera_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Helper Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("helpers.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Helper Pipeline Layout"),
            bind_group_layouts: &[camera_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Helper Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[HelperVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: MSAA_SAMPLES,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Uploads the environment pyramid and rebinds both sampling pipelines
    fn set_environment(&mut self, map: &EnvironmentMap) {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Environment Texture"),
            size: wgpu::Extent3d {
                width: map.width,
                height: map.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: map.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ENVIRONMENT_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in map.mips.iter().enumerate() {
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                map.level_bytes(level),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(mip.width * 16),
                    rows_per_image: Some(mip.height),
                },
                wgpu::Extent3d {
                    width: mip.width,
                    height: mip.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (background_bind_group, bubble_bind_group) = Self::create_environment_bind_groups(
            &self.device,
            &self.background_layout,
            &self.bubble_layout,
            &view,
            &self.environment_sampler,
            &self.background_params_buffer,
            &self.bubble_params_buffer,
            &self.material_buffer,
            &self.ambient_buffer,
        );
        self.background_bind_group = background_bind_group;
        self.bubble_bind_group = bubble_bind_group;

        self.queue.write_buffer(
            &self.background_params_buffer,
            0,
            bytemuck::cast_slice(&[EnvParams {
                lod: map.blur_lod(BACKGROUND_BLURRINESS),
                intensity: ENVIRONMENT_INTENSITY,
                _pad: [0.0; 2],
            }]),
        );
        self.queue.write_buffer(
            &self.bubble_params_buffer,
            0,
            bytemuck::cast_slice(&[EnvParams {
                lod: map.mip_count() as f32 - 1.0,
                intensity: ENVIRONMENT_INTENSITY,
                _pad: [0.0; 2],
            }]),
        );
        self.has_environment = true;
    }

    /// Adopts a newly decoded environment; the fallback state keeps the
    /// flat clear color instead
    fn sync_background(&mut self, background: &Background) {
        if self.has_environment {
            return;
        }
        if let Background::Environment(map) = background {
            self.set_environment(map);
        }
    }

    /// Re-uploads instance offsets when the scene graph revision moved
    fn sync_instances(&mut self, scene: &SceneGraph) {
        if self.uploaded_revision == Some(scene.revision()) {
            return;
        }

        let instances: Vec<InstanceRaw> = scene
            .iter()
            .map(|node| InstanceRaw {
                offset: node.offset.to_array(),
            })
            .collect();

        let required =
            (instances.len() * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress;
        if required > self.instance_buffer.size() {
            self.instance_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Instance Buffer"),
                size: required,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        self.instance_count = instances.len() as u32;
        self.uploaded_revision = Some(scene.revision());
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.viewport = viewport;
        self.surface_config.width = viewport.device_width();
        self.surface_config.height = viewport.device_height();
        self.surface.configure(&self.device, &self.surface_config);
        self.msaa_view = Self::create_msaa_texture(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_texture(&self.device, &self.surface_config);
    }

    pub fn render(
        &mut self,
        controller: &SceneController,
        window: &Window,
        fps: f32,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[controller.camera.to_uniform()]),
        );
        self.sync_background(&controller.background);
        self.sync_instances(&controller.scene);

        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        // Scene pass - background, reference lines, bubbles
        {
            let (attachment_view, resolve_target) = if MSAA_SAMPLES > 1 {
                (&self.msaa_view, Some(&surface_view))
            } else {
                (&surface_view, None)
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: attachment_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            if self.has_environment {
                render_pass.set_pipeline(&self.background_pipeline);
                render_pass.set_bind_group(1, &self.background_bind_group, &[]);
                render_pass.draw(0..3, 0..1);
            }

            render_pass.set_pipeline(&self.helper_pipeline);
            render_pass.set_vertex_buffer(0, self.helper_vertex_buffer.slice(..));
            render_pass.draw(0..self.helper_vertex_count, 0..1);

            if self.instance_count > 0 {
                render_pass.set_pipeline(&self.bubble_pipeline);
                render_pass.set_bind_group(1, &self.bubble_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.sphere_vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(
                    self.sphere_index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..self.sphere_index_count, 0, 0..self.instance_count);
            }
        }

        if self.hud_enabled {
            self.render_hud(&mut encoder, &surface_view, window, controller.count(), fps);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// egui overlay pass on the resolved surface
    fn render_hud(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        window: &Window,
        count: usize,
        fps: f32,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| hud::draw(ctx, count, fps));

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: self.viewport.pixel_ratio,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // SAFETY: The render pass lifetime is actually tied to the encoder,
            // but egui-wgpu requires 'static. This is safe because we drop the
            // render pass before using the encoder again.
            let render_pass_static = unsafe {
                std::mem::transmute::<&mut wgpu::RenderPass<'_>, &mut wgpu::RenderPass<'static>>(
                    &mut render_pass,
                )
            };

            self.egui_renderer
                .render(render_pass_static, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    /// Lets egui consume window events before the scene sees them
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }
}
