use std::iter;
use std::time::{Duration, Instant};

use eframe::egui::{self, ClippedPrimitive, TextureId};
use log::{error, info, warn};
use nalgebra::Vector2;
use wgpu::{
    Backends, Color, CommandBuffer, CommandEncoder, CommandEncoderDescriptor, CompositeAlphaMode,
    Device, DeviceDescriptor, Dx12Compiler, Features, Instance, InstanceDescriptor, Limits, LoadOp,
    Operations, PowerPreference, PresentMode, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, RequestAdapterOptions, Surface, SurfaceConfiguration, SurfaceError,
    TextureFormat, TextureUsages, TextureViewDescriptor,
};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::glint::canvas::{Canvas, DisplayError, FrameBuffer};
use crate::glint::color;
use crate::glint::texture::Image;
use crate::glint::Settings;

#[derive(Debug, Clone, Copy, Default)]
struct FrameStats {
    frames: u64,
    last_trace: Duration,
    max_depth: u32,
}

/// 창, GPU 표면, egui를 묶은 화면 출력 장치. 광선 추적 결과는 frame에 쌓였다가 present 때 화면으로 나감
pub struct Application {
    surface: Surface,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    // 무조건 winit의 Window를 쓸 것!
    pub window: Window,
    egui_state: egui_winit::State,
    egui_context: egui::Context,
    egui_renderer: egui_wgpu::Renderer,
    egui_screen: egui_wgpu::renderer::ScreenDescriptor,

    frame: FrameBuffer,
    image: Image,
    frame_texture: TextureId,
    frame_started: Option<Instant>,
    stats: FrameStats,
}

impl Application {
    pub async fn new(
        window: Window,
        event_loop: &EventLoop<()>,
        settings: &Settings,
    ) -> Result<Self, DisplayError> {
        let size = window.inner_size();

        // 백엔드는 아무거나 상관 없음: Vulkan, Metal, DirectX 등등
        let instance = Instance::new(InstanceDescriptor {
            backends: Backends::all(),
            dx12_shader_compiler: Dx12Compiler::default(),
        });

        // surface가 살아있는 동안 window도 살아있어야 함. 둘 다 Application이 들고 있으니 괜찮음
        let surface = unsafe { instance.create_surface(&window) }?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(DisplayError::NoAdapter)?;
        info!("graphics adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    features: Features::empty(),
                    limits: Limits::default(),
                    label: Some("Glint GPU"),
                },
                None,
            )
            .await?;

        let capabilities = surface.get_capabilities(&adapter);

        let surface_format = pick_surface_format(&capabilities.formats)?;
        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode: CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let egui_state = egui_winit::State::new(event_loop);
        let egui_context = egui::Context::default();

        let mut egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_format,
            None, // 깊이 안씀
            1,
        );
        let egui_screen = egui_wgpu::renderer::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        let frame = FrameBuffer::new(settings.width, settings.height);
        let image = Image::new(&device, settings.width, settings.height, "Glint Output");
        let frame_texture = egui_renderer.register_native_texture(&device, &image.view, image.filter);
        info!("frame size: {}x{}", settings.width, settings.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            egui_state,
            egui_context,
            egui_renderer,
            egui_screen,
            frame,
            image,
            frame_texture,
            frame_started: None,
            stats: FrameStats {
                max_depth: settings.max_depth,
                ..Default::default()
            },
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.egui_screen.pixels_per_point = self.window.scale_factor() as f32;
        self.egui_screen.size_in_pixels = [self.config.width, self.config.height];
    }

    // true: 여기서 입력 처리를 끝냄
    // false: 이벤트 루프에서 처리 해야 함
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::KeyboardInput {
            input:
                KeyboardInput {
                    state: ElementState::Pressed,
                    virtual_keycode: Some(VirtualKeyCode::P),
                    ..
                },
            ..
        } = event
        {
            self.save_snapshot();
            return true;
        }

        self.egui_state.on_event(&self.egui_context, event).consumed
    }

    /// 마지막으로 그린 프레임을 PNG로 저장
    fn save_snapshot(&self) {
        let path = format!("glint-{:04}.png", self.frame.frames_presented());
        match self.frame.save(&path) {
            Ok(()) => info!("saved snapshot to {}", path),
            Err(e) => error!("{}", e),
        }
    }

    fn render(&mut self) -> Result<(), SurfaceError> {
        let output = self.surface.get_current_texture()?;

        let view = output.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Encoder"),
        });

        // render_pass가 encoder를 빌려가기 때문에 블록으로 감쌈
        let user_buffers = {
            let (primitives, user_buffers) = self.update_egui(&mut encoder);
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            self.egui_renderer.render(&mut render_pass, &primitives, &self.egui_screen);
            user_buffers
        };

        self.queue.submit(user_buffers.into_iter().chain(iter::once(encoder.finish())));
        output.present();

        Ok(())
    }

    fn update_egui(&mut self, encoder: &mut CommandEncoder) -> (Vec<ClippedPrimitive>, Vec<CommandBuffer>) {
        let stats = self.stats;
        let texture = self.frame_texture;
        let frame_size = {
            let size = self.image.size();
            egui::vec2(size.width as f32, size.height as f32)
        };

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let egui_output = self.egui_context.run(egui_input, |ctx| {
            egui::SidePanel::right("Stats")
                .resizable(false)
                .default_width(140.0)
                .show(ctx, |ui| {
                    ui.label(format!("frame: {}", stats.frames));
                    ui.label(format!("trace: {:.1} ms", stats.last_trace.as_secs_f64() * 1000.0));
                    ui.label(format!("max depth: {}", stats.max_depth));
                    ui.separator();
                    ui.label("P: save snapshot");
                    ui.label("Esc: quit");
                });

            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(egui::Color32::BLACK))
                .show(ctx, |ui| {
                    // 비율을 유지한 채 남은 공간에 꽉 차게
                    let available = ui.available_size();
                    let scale = (available.x / frame_size.x).min(available.y / frame_size.y);
                    ui.centered_and_justified(|ui| ui.image(texture, frame_size * scale));
                });
        });

        self.egui_state
            .handle_platform_output(&self.window, &self.egui_context, egui_output.platform_output);
        let primitives = self.egui_context.tessellate(egui_output.shapes);
        for (id, delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, delta);
        }
        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        let user_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &primitives,
            &self.egui_screen,
        );

        (primitives, user_buffers)
    }
}

// sRGB가 아니면 밝기가 의도와 달라질 수 있음. 그래도 없으면 처음 것
fn pick_surface_format(formats: &[TextureFormat]) -> Result<TextureFormat, DisplayError> {
    formats
        .iter()
        .find(|format| format.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or(DisplayError::NoSurfaceFormat)
}

impl Canvas for Application {
    fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    fn clear(&mut self) {
        self.frame_started = Some(Instant::now());
        self.frame.clear();
    }

    fn put_pixel(&mut self, pixel: Vector2<i32>, color: color::Color) {
        self.frame.put_pixel(pixel, color);
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        if let Some(started) = self.frame_started.take() {
            self.stats.last_trace = started.elapsed();
        }
        self.frame.present()?;
        self.stats.frames = self.frame.frames_presented();
        self.image.load_image(&self.queue, self.frame.as_bytes());

        match self.render() {
            Ok(()) => Ok(()),
            // 표면을 잃어버렸으면 다시 설정하고 다음 프레임에 그림
            Err(e @ (SurfaceError::Lost | SurfaceError::Outdated)) => {
                warn!("{}, reconfiguring surface", e);
                self.resize(self.size);
                Ok(())
            }
            Err(SurfaceError::Timeout) => {
                warn!("timed out waiting for the next surface frame");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
