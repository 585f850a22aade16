use log::{debug, error, info};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::app::Application;
use crate::demo::Demo;
use crate::glint::canvas::DisplayError;

pub mod app;
pub mod demo;
pub mod glint;

pub use crate::glint::{Glint, Settings};

/// 창을 띄우고 닫힐 때까지 기본 장면을 움직이며 그림.
/// 창이나 GPU를 준비하지 못하면 바로 에러를 돌려줌
pub fn run(settings: Settings) -> Result<(), DisplayError> {
    // RUST_LOG 환경 변수로 로그 수준 조절
    env_logger::init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(&settings.title)
        .with_inner_size(PhysicalSize::new(settings.width, settings.height))
        .build(&event_loop)?;

    let mut app = pollster::block_on(Application::new(window, &event_loop, &settings))?;
    let glint = Glint::new(&settings);
    let mut demo = Demo::new();
    info!("rendering with max depth {}", glint.max_depth());

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == app.window.id() => {
            if app.input(event) {
                return;
            }

            match event {
                // 만약 앱을 운영체제에서 닫으려고 하거나 ESC가 눌렸다면
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => app.resize(*size),
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => app.resize(**new_inner_size),
                _ => {}
            }
        }
        Event::RedrawRequested(window_id) if window_id == app.window.id() => {
            let started = std::time::Instant::now();

            if let Err(e) = glint.render(&demo.scene, &demo.camera, &mut app) {
                error!("{}", e);
                *control_flow = ControlFlow::ExitWithCode(1);
                return;
            }
            debug!("frame took {:?}", started.elapsed());

            // 다음 프레임을 위해 장면을 움직임. 프레임 도중에는 절대 바꾸지 않음
            if let Err(e) = demo.advance() {
                error!("{}", e);
                *control_flow = ControlFlow::ExitWithCode(1);
            }
        }
        Event::MainEventsCleared => app.window.request_redraw(),
        _ => {}
    })
}
