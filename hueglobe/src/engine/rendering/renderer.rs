//! Draws the scene into the canvas, samples it and composites it into the window.
//!
//! A frame runs in one command buffer: the canvas pass draws every mesh of the scene, the center
//! pixel of the canvas is copied into the readback buffer, and the composite pass places the
//! canvas on top of the page color in the window surface. The sample is resolved after the
//! submission, so it always shows the frame that was just drawn.

use super::error::*;
use crate::assets::Shader;
use crate::components::PerspectiveCamera;
use crate::core::{DrawItem, MeshId, NodeId, Scene, Vertex3D};
use crate::rendering::{
    CANVAS_FORMAT, Canvas, CameraUniform, DEPTH_FORMAT, DrawUniform, PixelReadback, State,
    surface_view_format,
};
use crate::utils::Sample;
use crate::windowing::Viewport;
use snafu::ResultExt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::*;
use winit::dpi::PhysicalSize;
use winit::window::Window;

struct GpuMesh {
    vertex_buffer: Buffer,
    vertex_count: u32,
}

struct DrawBinding {
    buffer: Buffer,
    bind_group: BindGroup,
}

pub struct Renderer {
    window: Arc<Window>,
    state: State,
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    viewport: Viewport,
    canvas: Canvas,
    readback: PixelReadback,
    page_color: Sample,

    camera_buffer: Buffer,
    camera_bind_group: BindGroup,
    draw_layout: BindGroupLayout,
    hue_pipeline: RenderPipeline,
    composite_pipeline: RenderPipeline,
    composite_bind_group: BindGroup,

    meshes: HashMap<MeshId, GpuMesh>,
    draws: HashMap<NodeId, DrawBinding>,
}

impl Renderer {
    /// Creates the device, configures the window surface and allocates the canvas the
    /// `viewport` asks for at the window's current size.
    pub fn new(window: Arc<Window>, viewport: Viewport, page_color: Sample) -> Result<Self> {
        let (state, surface) = State::new(window.clone()).context(StateErr)?;
        let config = state
            .surface_config(&surface, window.inner_size())
            .context(StateErr)?;
        surface.configure(&state.device, &config);

        let canvas = Canvas::new(&state.device, viewport.canvas_size(window.inner_size()));
        debug!(
            "Created {}x{} canvas",
            canvas.size().width,
            canvas.size().height
        );

        let device = &state.device;
        let camera_layout = uniform_layout(device, "Camera Bind Group Layout", ShaderStages::VERTEX);
        let draw_layout = uniform_layout(
            device,
            "Draw Bind Group Layout",
            ShaderStages::VERTEX_FRAGMENT,
        );
        let composite_layout = composite_layout(device);

        let camera_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::bytes_of(&CameraUniform::default()),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let hue_pipeline = hue_pipeline(device, &camera_layout, &draw_layout);
        let composite_pipeline =
            composite_pipeline(device, &composite_layout, surface_view_format(&config));
        let composite_bind_group = composite_bind_group(device, &composite_layout, &canvas);
        let readback = PixelReadback::new(device);

        Ok(Renderer {
            window,
            state,
            surface,
            config,
            viewport,
            canvas,
            readback,
            page_color,
            camera_buffer,
            camera_bind_group,
            draw_layout,
            hue_pipeline,
            composite_pipeline,
            composite_bind_group,
            meshes: HashMap::new(),
            draws: HashMap::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn page_color(&self) -> Sample {
        self.page_color
    }

    /// The backdrop the canvas is composited over, from the next frame on
    pub fn set_page_color(&mut self, color: Sample) {
        self.page_color = color;
    }

    /// Reconfigures the window surface. The canvas keeps its size.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        match self.state.surface_config(&self.surface, size) {
            Ok(config) => {
                self.config = config;
                self.surface.configure(&self.state.device, &self.config);
                debug!("Resized surface to {}x{}", size.width, size.height);
            }
            Err(e) => warn!("Couldn't resize the surface: {e}"),
        }
    }

    fn recreate_surface(&mut self) {
        self.surface.configure(&self.state.device, &self.config);
    }

    /// Renders one frame and samples the canvas center.
    ///
    /// Returns `Ok(None)` when the frame was skipped because the surface had to be rebuilt.
    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<Option<Sample>> {
        let mut output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.recreate_surface();
                return Ok(None);
            }
            Err(SurfaceError::Timeout) => {
                warn!("Timed out waiting for the next surface texture");
                return Ok(None);
            }
            Err(source) => return Err(RenderError::Surface { source }),
        };

        if output.suboptimal {
            drop(output);
            self.recreate_surface();
            output = self.surface.get_current_texture().context(SurfaceErr)?;
        }

        let surface_view = output.texture.create_view(&TextureViewDescriptor {
            format: Some(surface_view_format(&self.config)),
            ..TextureViewDescriptor::default()
        });

        let draw_list = scene.draw_list();
        self.prepare(scene, &draw_list, camera);

        let mut encoder = self
            .state
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.canvas_pass(&mut encoder, &draw_list);
        self.readback
            .encode_copy(&mut encoder, self.canvas.texture(), self.canvas.center())
            .context(ReadbackErr)?;
        self.composite_pass(&mut encoder, &surface_view);

        self.state.queue.submit(Some(encoder.finish()));
        output.present();

        let sample = self
            .readback
            .resolve(&self.state.device, CANVAS_FORMAT)
            .context(ReadbackErr)?;

        Ok(Some(sample))
    }

    /// Uploads the camera, new meshes and per node draw data. Drops data of nodes that are gone.
    fn prepare(&mut self, scene: &Scene, draw_list: &[DrawItem], camera: &PerspectiveCamera) {
        let device = &self.state.device;
        let queue = &self.state.queue;

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform::from_camera(camera)),
        );

        let mut alive = HashSet::with_capacity(draw_list.len());

        for item in draw_list {
            alive.insert(item.node);

            if !self.meshes.contains_key(&item.mesh) {
                if let Some(mesh) = scene.mesh(item.mesh) {
                    trace!("Uploading mesh {:?}", mesh.name);
                    let vertex_buffer = device.create_buffer_init(&BufferInitDescriptor {
                        label: Some(&format!("{} Vertex Buffer", mesh.name)),
                        contents: bytemuck::cast_slice(&mesh.vertices),
                        usage: BufferUsages::VERTEX,
                    });
                    self.meshes.insert(
                        item.mesh,
                        GpuMesh {
                            vertex_buffer,
                            vertex_count: mesh.vertex_count() as u32,
                        },
                    );
                }
            }

            let draw_layout = &self.draw_layout;
            let binding = self.draws.entry(item.node).or_insert_with(|| {
                let buffer = device.create_buffer(&BufferDescriptor {
                    label: Some("Draw Uniform Buffer"),
                    size: size_of::<DrawUniform>() as BufferAddress,
                    usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&BindGroupDescriptor {
                    label: Some("Draw Bind Group"),
                    layout: draw_layout,
                    entries: &[BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                DrawBinding { buffer, bind_group }
            });

            let uniform = DrawUniform::new(item.world, item.material);
            queue.write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&uniform));
        }

        self.draws.retain(|node, _| alive.contains(node));
    }

    fn canvas_pass(&self, encoder: &mut CommandEncoder, draw_list: &[DrawItem]) {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Canvas Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: self.canvas.view(),
                depth_slice: None,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::TRANSPARENT),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: self.canvas.depth_view(),
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..RenderPassDescriptor::default()
        });

        pass.set_pipeline(&self.hue_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for item in draw_list {
            let (Some(mesh), Some(binding)) =
                (self.meshes.get(&item.mesh), self.draws.get(&item.node))
            else {
                continue;
            };
            if mesh.vertex_count == 0 {
                continue;
            }

            pass.set_bind_group(1, &binding.bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.draw(0..mesh.vertex_count, 0..1);
        }
    }

    fn composite_pass(&self, encoder: &mut CommandEncoder, target: &TextureView) {
        let window_size = PhysicalSize::new(self.config.width, self.config.height);
        let rect = self.viewport.placement(window_size, self.canvas.size());

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Composite Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: target,
                depth_slice: None,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(self.page_color.into()),
                    store: StoreOp::Store,
                },
            })],
            ..RenderPassDescriptor::default()
        });

        if rect.is_empty() {
            return;
        }

        pass.set_viewport(rect.x, rect.y, rect.width, rect.height, 0.0, 1.0);
        pass.set_pipeline(&self.composite_pipeline);
        pass.set_bind_group(0, &self.composite_bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

fn uniform_layout(device: &Device, label: &str, visibility: ShaderStages) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn composite_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Composite Bind Group Layout"),
        entries: &[
            BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 1,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn composite_bind_group(device: &Device, layout: &BindGroupLayout, canvas: &Canvas) -> BindGroup {
    let sampler = device.create_sampler(&SamplerDescriptor {
        label: Some("Canvas Sampler"),
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Linear,
        ..SamplerDescriptor::default()
    });

    device.create_bind_group(&BindGroupDescriptor {
        label: Some("Composite Bind Group"),
        layout,
        entries: &[
            BindGroupEntry {
                binding: 0,
                resource: BindingResource::TextureView(canvas.view()),
            },
            BindGroupEntry {
                binding: 1,
                resource: BindingResource::Sampler(&sampler),
            },
        ],
    })
}

fn hue_pipeline(
    device: &Device,
    camera_layout: &BindGroupLayout,
    draw_layout: &BindGroupLayout,
) -> RenderPipeline {
    let shader = Shader::HUE_GRADIENT;
    let module = shader.module(device);
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Hue Gradient Pipeline Layout"),
        bind_group_layouts: &[camera_layout, draw_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(shader.name),
        layout: Some(&layout),
        vertex: VertexState {
            module: &module,
            entry_point: Some(shader.vertex_entry),
            compilation_options: PipelineCompilationOptions::default(),
            buffers: &[Vertex3D::continuous_descriptor()],
        },
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            // the globe material is double sided
            cull_mode: None,
            ..PrimitiveState::default()
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        fragment: Some(FragmentState {
            module: &module,
            entry_point: Some(shader.fragment_entry),
            compilation_options: PipelineCompilationOptions::default(),
            targets: &[Some(ColorTargetState {
                format: CANVAS_FORMAT,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}

fn composite_pipeline(
    device: &Device,
    composite_layout: &BindGroupLayout,
    target_format: TextureFormat,
) -> RenderPipeline {
    let shader = Shader::COMPOSITE;
    let module = shader.module(device);
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Composite Pipeline Layout"),
        bind_group_layouts: &[composite_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(shader.name),
        layout: Some(&layout),
        vertex: VertexState {
            module: &module,
            entry_point: Some(shader.vertex_entry),
            compilation_options: PipelineCompilationOptions::default(),
            buffers: &[],
        },
        primitive: PrimitiveState::default(),
        depth_stencil: None,
        multisample: MultisampleState::default(),
        fragment: Some(FragmentState {
            module: &module,
            entry_point: Some(shader.fragment_entry),
            compilation_options: PipelineCompilationOptions::default(),
            targets: &[Some(ColorTargetState {
                format: target_format,
                blend: Some(BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}
