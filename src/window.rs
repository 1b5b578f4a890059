use std::sync::Arc;
use std::time::Instant;

use glam::{Mat4, Vec3};
use motion_trail::gpu::{BlendMode, TrailRenderer};
use motion_trail::{Emitter, GpuError, Trail, TrailConfig};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Longest frame step fed to the trail, so a stalled window doesn't wipe it.
const MAX_FRAME_DT: f64 = 0.1;

pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl Camera {
    fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.5,
            distance: 4.5,
            target: Vec3::ZERO,
        }
    }

    fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}

/// Lissajous curve the demo emitter follows.
fn emitter_path(t: f32) -> Vec3 {
    Vec3::new(
        (t * 1.3).sin() * 1.4,
        (t * 2.6).sin() * 0.35,
        (t * 0.9).cos() * 1.4,
    )
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::TextureView,
    trail_renderer: TrailRenderer,
    blend_mode: BlendMode,
    pub camera: Camera,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);
        let trail_renderer =
            TrailRenderer::new(&device, config.format, Some(DEPTH_FORMAT), BlendMode::Alpha);

        tracing::info!(adapter = ?adapter.get_info().name, format = ?surface_format, "GPU ready");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            trail_renderer,
            blend_mode: BlendMode::Alpha,
            camera: Camera::new(),
        })
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Rebuild the trail pipeline with another blend mode.
    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.blend_mode = blend_mode;
        self.trail_renderer = TrailRenderer::new(
            &self.device,
            self.config.format,
            Some(DEPTH_FORMAT),
            blend_mode,
        );
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn render(&mut self, trail: &Trail) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.1, 100.0);
        let view_proj = proj * self.camera.view_matrix();
        let model = Mat4::from(trail.emitter().transform());

        self.trail_renderer
            .upload(&self.device, &self.queue, trail.mesh());
        self.trail_renderer
            .set_transforms(&self.queue, view_proj, model);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Trail Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.trail_renderer.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
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
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Keep the pause and capture toggles when switching presets.
fn preserve_state(preset: TrailConfig, current: &TrailConfig) -> TrailConfig {
    preset
        .with_enabled(current.enabled)
        .with_paused(current.paused)
}

pub struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    trail: Trail,
    path_time: f32,
    last_frame: Instant,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            gpu_state: None,
            trail: Trail::new(TrailConfig::default(), Emitter::at(emitter_path(0.0))),
            path_time: 0.0,
            last_frame: Instant::now(),
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            let config = self.trail.config();
            window.set_title(&format!(
                "motion-trail | {} {} | texture {} | {}{}",
                config.color_interpolation_mode,
                config.color_interpolation_direction,
                if config.scale_texture { "scaled" } else { "normalized" },
                if config.paused { "paused" } else { "running" },
                if config.enabled { "" } else { " (capture off)" },
            ));
        }
    }

    fn handle_key(&mut self, key: &Key) {
        let name = match key {
            Key::Named(NamedKey::Space) => " ",
            Key::Character(c) => c.as_str(),
            _ => return,
        };

        match name.to_ascii_lowercase().as_str() {
            " " => {
                let paused = self.trail.config().paused;
                self.trail.set_paused(!paused);
            }
            "e" => {
                let enabled = self.trail.config().enabled;
                self.trail.set_enabled(!enabled);
            }
            "c" => self.trail.clear_points(),
            "m" => {
                let config = self.trail.config_mut();
                config.color_interpolation_mode = config.color_interpolation_mode.next();
            }
            "d" => {
                let config = self.trail.config_mut();
                config.color_interpolation_direction =
                    config.color_interpolation_direction.reversed();
            }
            "b" => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    let blend_mode = gpu_state.blend_mode().toggled();
                    gpu_state.set_blend_mode(blend_mode);
                    tracing::info!(?blend_mode, "blend mode changed");
                }
            }
            "t" => {
                let config = self.trail.config_mut();
                config.scale_texture = !config.scale_texture;
            }
            "1" => self.trail.set_config(preserve_state(TrailConfig::sword_swing(), self.trail.config())),
            "2" => self.trail.set_config(preserve_state(TrailConfig::projectile(), self.trail.config())),
            "3" => self.trail.set_config(preserve_state(TrailConfig::wake(), self.trail.config())),
            _ => return,
        }
        tracing::info!(config = ?self.trail.config(), "trail settings changed");
        self.update_title();
    }

    fn step(&mut self) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f64()
            .min(MAX_FRAME_DT);
        self.last_frame = now;

        self.path_time += dt as f32;
        self.trail.tick(dt, emitter_path(self.path_time));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("motion-trail")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(e) => {
                tracing::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.last_frame = Instant::now();
        self.update_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(&logical_key);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;

                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.yaw -= dx as f32 * 0.005;
                            gpu_state.camera.pitch += dy as f32 * 0.005;
                            gpu_state.camera.pitch = gpu_state.camera.pitch.clamp(-1.5, 1.5);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.distance -= scroll * 0.3;
                    gpu_state.camera.distance = gpu_state.camera.distance.clamp(0.5, 20.0);
                }
            }
            WindowEvent::RedrawRequested => {
                self.step();
                if let Some(gpu_state) = &mut self.gpu_state {
                    match gpu_state.render(&self.trail) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu_state.resize(winit::dpi::PhysicalSize {
                            width: gpu_state.config.width,
                            height: gpu_state.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => tracing::warn!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
