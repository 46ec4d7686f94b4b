use winit::event::*;
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use strata_core::{
    Compositor, LayerKind, LayerStack, LineVertex, Primitive, ResizePolicy, Scene, StackConfig,
    Viewport,
};

const RNG_SEED: u64 = 42;
const TITLE_REFRESH_FRAMES: u64 = 30;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    screen: [f32; 2],
    _pad: [f32; 2],
}

// src ONE / dst ONE so overlapping layer strokes accumulate brightness
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Scene primitives flattened into per-pipeline vertex runs.
#[derive(Default)]
struct Batches {
    wipe_triangles: Vec<LineVertex>,
    additive_lines: Vec<LineVertex>,
    additive_points: Vec<LineVertex>,
}

/// Two triangles covering an axis-aligned rect.
fn quad(center: glam::Vec2, size: glam::Vec2) -> [[f32; 2]; 6] {
    let half = size * 0.5;
    let (l, r) = (center.x - half.x, center.x + half.x);
    let (t, b) = (center.y - half.y, center.y + half.y);
    [[l, t], [r, t], [r, b], [l, t], [r, b], [l, b]]
}

fn tessellate(scene: &Scene) -> Batches {
    let mut batches = Batches::default();

    for prim in &scene.background {
        if let Primitive::Rect {
            center,
            size,
            color,
        } = prim
        {
            for pos in quad(*center, *size) {
                batches.wipe_triangles.push(LineVertex {
                    pos,
                    color: color.to_array(),
                });
            }
        }
    }

    for prim in &scene.additive {
        match prim {
            Primitive::Line {
                from, to, color, ..
            } => {
                batches.additive_lines.push(LineVertex::new(*from, *color));
                batches.additive_lines.push(LineVertex::new(*to, *color));
            }
            Primitive::Polyline { points, color, .. } => {
                for pair in points.windows(2) {
                    batches.additive_lines.push(LineVertex::new(pair[0], *color));
                    batches.additive_lines.push(LineVertex::new(pair[1], *color));
                }
            }
            Primitive::Point { at, color } => {
                batches.additive_points.push(LineVertex::new(*at, *color));
            }
            _ => {}
        }
    }

    batches
}

/// Vertex buffer that regrows as a frame's batch outgrows it.
#[derive(Default)]
struct VertexSlot {
    buffer: Option<wgpu::Buffer>,
    capacity_bytes: u64,
}

impl VertexSlot {
    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        verts: &[LineVertex],
    ) -> u32 {
        if verts.is_empty() {
            return 0;
        }
        let bytes: &[u8] = bytemuck::cast_slice(verts);
        if self.buffer.is_none() || self.capacity_bytes < bytes.len() as u64 {
            let capacity = (bytes.len() as u64).next_power_of_two();
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity_bytes = capacity;
        }
        if let Some(buffer) = &self.buffer {
            queue.write_buffer(buffer, 0, bytes);
        }
        verts.len() as u32
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    wipe_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    wipe_vb: VertexSlot,
    line_vb: VertexSlot,
    point_vb: VertexSlot,
    // trails persist between frames; only the first frame hard-clears
    cleared: bool,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene-shader"),
            source: wgpu::ShaderSource::Wgsl(strata_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals-bgl"),
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
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals-bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene-pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let wipe_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
        );
        let line_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveTopology::LineList,
            ADDITIVE,
        );
        let point_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            wgpu::PrimitiveTopology::PointList,
            ADDITIVE,
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            wipe_pipeline,
            line_pipeline,
            point_pipeline,
            uniform_buffer,
            bind_group,
            wipe_vb: VertexSlot::default(),
            line_vb: VertexSlot::default(),
            point_vb: VertexSlot::default(),
            cleared: false,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.cleared = false;
    }

    fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                screen: [self.config.width as f32, self.config.height as f32],
                _pad: [0.0, 0.0],
            }),
        );

        let batches = tessellate(scene);
        let wipe_count =
            self.wipe_vb
                .upload(&self.device, &self.queue, "wipe_vb", &batches.wipe_triangles);
        let line_count =
            self.line_vb
                .upload(&self.device, &self.queue, "line_vb", &batches.additive_lines);
        let point_count =
            self.point_vb
                .upload(&self.device, &self.queue, "point_vb", &batches.additive_points);

        let load = if self.cleared {
            wgpu::LoadOp::Load
        } else {
            self.cleared = true;
            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            if let (Some(vb), true) = (&self.wipe_vb.buffer, wipe_count > 0) {
                rpass.set_pipeline(&self.wipe_pipeline);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.draw(0..wipe_count, 0..1);
            }
            if let (Some(vb), true) = (&self.line_vb.buffer, line_count > 0) {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.draw(0..line_count, 0..1);
            }
            if let (Some(vb), true) = (&self.point_vb.buffer, point_count > 0) {
                rpass.set_pipeline(&self.point_pipeline);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.draw(0..point_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn make_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    let attributes = wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
    let vertex_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &attributes,
    }];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene-pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

/// Keyboard is the stand-in for the layer-list UI: digits add specific
/// kinds, `a` adds a random kind, `r` randomizes, `x` removes the top,
/// `m` splices the top to the bottom.
fn handle_key(compositor: &mut Compositor, key: &Key) {
    let result = match key.as_ref() {
        Key::Character("1") => compositor.add_layer(LayerKind::Swarm),
        Key::Character("2") => compositor.add_layer(LayerKind::Drift),
        Key::Character("3") => compositor.add_layer(LayerKind::Orbitals),
        Key::Character("4") => compositor.add_layer(LayerKind::FlowField),
        Key::Character("5") => compositor.add_layer(LayerKind::Lattice),
        Key::Character("a") => {
            let kind = LayerKind::choose(&mut rand::thread_rng());
            compositor.add_layer(kind)
        }
        Key::Character("r") => {
            compositor.randomize();
            Ok(())
        }
        Key::Character("x") => match compositor.stack().len() {
            0 => Ok(()),
            n => compositor.remove_layer(n - 1),
        },
        Key::Character("m") => match compositor.stack().len() {
            0 | 1 => Ok(()),
            n => compositor.move_layer(n - 1, 0),
        },
        _ => return,
    };
    if let Err(e) = result {
        // capacity overflow is a notice, not a failure
        log::warn!("{e}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("strata")
        .build(&event_loop)?;

    let size = window.inner_size();
    let viewport = Viewport::new(size.width.max(1) as f32, size.height.max(1) as f32);
    let mut stack = LayerStack::new(StackConfig::default(), viewport, RNG_SEED);
    stack.set_listener(Box::new(|entries| {
        let rows: Vec<String> = entries
            .iter()
            .map(|e| format!("{}:{}", e.index, e.name))
            .collect();
        log::info!("layer list: [{}]", rows.join(", "));
    }));
    stack.randomize();

    let mut compositor = Compositor::new(stack, ResizePolicy::ResetLayers);
    let mut scene = Scene::new();
    let mut state = pollster::block_on(GpuState::new(&window))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(new_size) => {
                state.resize(new_size);
                compositor.resize(Viewport::new(
                    new_size.width.max(1) as f32,
                    new_size.height.max(1) as f32,
                ));
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Key::Named(NamedKey::Escape) = event.logical_key {
                        elwt.exit();
                    } else {
                        handle_key(&mut compositor, &event.logical_key);
                    }
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            compositor.frame(&mut scene);
            if compositor.frame_count() % TITLE_REFRESH_FRAMES == 0 {
                if let Some(Primitive::Text { text, .. }) = scene.overlay.first() {
                    let first = text.lines().next().unwrap_or("");
                    state.window.set_title(&format!("strata :: {first}"));
                }
            }
            match state.render(&scene) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
