//! # Rendering Module
//!
//! The wgpu rendering systems for the sandbox:
//!
//! * A sky pass drawing a fullscreen triangle that samples the skybox by
//!   per-pixel view direction.
//! * A block pass drawing one shared cube mesh, instanced once per block,
//!   textured from a per-type texture array.
//! * A UI overlay pass for the crosshair and the pause menu.
//!
//! The world is a few thousand cubes, so there is no meshing step: the
//! instance buffer is rebuilt from the world map whenever its revision
//! changes, and everything else is static after startup.

use anyhow::Context;
use wgpu::util::DeviceExt;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use super::camera_state::camera::CameraUniform;
use super::voxels::world::World;
use texture::Texture;
use ui::{UiMeshManager, UiRenderer};
use vertex::{BlockInstance, CubeVertex, CUBE_INDICES, CUBE_VERTICES};

pub mod texture;
pub mod ui;
pub mod vertex;

/// WGSL sources loaded at startup.
pub struct ShaderSources {
    pub voxel: String,
    pub sky: String,
    pub ui: String,
}

/// Decoded images loaded at startup.
pub struct AssetImages {
    /// One texture per block type, in block-type order. All must share
    /// the same dimensions.
    pub block_textures: Vec<image::RgbaImage>,
    /// The crosshair overlay image.
    pub crosshair: image::RgbaImage,
    /// The equirectangular skybox image.
    pub skybox: image::RgbaImage,
}

/// Owns every GPU resource and records the three passes each frame.
pub struct RendererManager {
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    device: Device,
    queue: Queue,

    depth_texture: Texture,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    block_pipeline: wgpu::RenderPipeline,
    block_texture_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    instance_buffer: Option<wgpu::Buffer>,
    instance_count: u32,
    synced_world_revision: Option<u64>,

    sky_pipeline: wgpu::RenderPipeline,
    sky_bind_group: wgpu::BindGroup,

    ui_renderer: UiRenderer,
    /// Named overlay elements; the engine adds and removes them.
    pub ui_mesh_manager: UiMeshManager,
}

impl RendererManager {
    /// Builds all pipelines, uploads the static cube mesh and the
    /// startup textures.
    ///
    /// # Errors
    /// When the block textures disagree on dimensions.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shaders: &ShaderSources,
        assets: &AssetImages,
    ) -> anyhow::Result<Self> {
        let depth_texture = Texture::create_depth_texture(&device, &surface_config, "depth_texture");

        // Camera uniform, shared by the sky and block pipelines.
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Block texture array, one layer per block type.
        let block_texture = Texture::create_texture_array(
            &device,
            &queue,
            &assets.block_textures,
            "block_texture_array",
        )
        .context("failed to build the block texture array")?;

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("block_texture_bind_group_layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2Array,
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
                ],
            });

        let block_texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("block_texture_bind_group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&block_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&block_texture.sampler),
                },
            ],
        });

        let block_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("block_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders.voxel.as_str().into()),
        });

        let block_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("block_pipeline_layout"),
                bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
                push_constant_ranges: &[],
            });

        let block_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("block_pipeline"),
            layout: Some(&block_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &block_shader,
                entry_point: Some("vs_main"),
                buffers: &[CubeVertex::desc(), BlockInstance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &block_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
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
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Skybox, sampled by view direction in the sky pass.
        let sky_texture =
            Texture::create_image_texture(&device, &queue, &assets.skybox, "sky_texture");

        let sky_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("sky_bind_group_layout"),
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
                ],
            });

        let sky_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky_bind_group"),
            layout: &sky_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&sky_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sky_texture.sampler),
                },
            ],
        });

        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders.sky.as_str().into()),
        });

        let sky_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pipeline_layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &sky_bind_group_layout],
            push_constant_ranges: &[],
        });

        let sky_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky_pipeline"),
            layout: Some(&sky_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &sky_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &sky_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
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
            // The sky draws behind everything: no depth write, always pass.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let crosshair_texture =
            Texture::create_image_texture(&device, &queue, &assets.crosshair, "crosshair_texture");
        let ui_renderer = UiRenderer::new(
            &device,
            surface_config.format,
            &shaders.ui,
            &crosshair_texture,
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            depth_texture,
            camera_buffer,
            camera_bind_group,
            block_pipeline,
            block_texture_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            instance_buffer: None,
            instance_count: 0,
            synced_world_revision: None,
            sky_pipeline,
            sky_bind_group,
            ui_renderer,
            ui_mesh_manager: UiMeshManager::new(),
        })
    }

    /// Current surface size in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Reconfigures the surface and depth texture for a new window size.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, &self.surface_config, "depth_texture");
    }

    /// Rewrites the camera uniform buffer.
    pub fn write_camera_uniform(&self, camera_uniform: &CameraUniform) {
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera_uniform]));
    }

    /// Rebuilds the instance buffer when the world's revision moved past
    /// the last synced one.
    pub fn sync_world(&mut self, world: &World) {
        if self.synced_world_revision == Some(world.revision()) {
            return;
        }

        let instances: Vec<BlockInstance> = world
            .iter()
            .map(|(pos, block)| BlockInstance::new(*pos, block))
            .collect();

        self.instance_buffer = if instances.is_empty() {
            None
        } else {
            Some(
                self.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("block_instance_buffer"),
                        contents: bytemuck::cast_slice(&instances),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
            )
        };
        self.instance_count = instances.len() as u32;
        self.synced_world_revision = Some(world.revision());
    }

    /// Renders one frame: sky, blocks, then the UI overlay.
    pub fn render(&mut self) {
        if self.ui_mesh_manager.take_dirty() {
            let (vertices, indices) = self.ui_mesh_manager.build_mesh();
            self.ui_renderer.update_mesh(&self.device, &vertices, &indices);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(err) => {
                log::error!("failed to acquire surface frame: {:?}", err);
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("world_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.sky_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.sky_bind_group, &[]);
            render_pass.draw(0..3, 0..1);

            if let Some(instance_buffer) = &self.instance_buffer {
                render_pass.set_pipeline(&self.block_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.block_texture_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..self.instance_count);
            }
        }

        {
            let mut ui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ui_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.ui_renderer.render(&mut ui_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}
