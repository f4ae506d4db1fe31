mod camera;
mod constants;
mod gfx;
mod vertex;
mod window;

use std::process;

use anyhow::Result;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::camera::{CameraState, CameraView};
use crate::constants::{FRAGMENT_SHADER_PATH, VERTEX_SHADER_PATH};
use crate::gfx::{read_file, GlState};
use crate::window::WindowState;

/// Owns everything the renderer touches: the window and GL context, the GPU
/// objects, and the camera state the key handlers mutate.
struct Program {
    window_state: Option<WindowState>,
    gl_state: Option<GlState>,
    camera: CameraState,
    fatal: bool,
}

impl Program {
    fn new() -> Program {
        Program {
            window_state: None,
            gl_state: None,
            camera: CameraState::new(),
            fatal: false,
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(self)?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Digit1 => {
                self.camera.select(CameraView::Front);
                debug!("camera: front view");
            }
            KeyCode::Digit2 => {
                self.camera.select(CameraView::Top);
                debug!("camera: top view");
            }
            KeyCode::Digit3 => {
                self.camera.select(CameraView::Side);
                debug!("camera: side view");
            }
            _ => (),
        }
    }

    fn draw_frame(&mut self) {
        let (Some(window_state), Some(gl_state)) = (&self.window_state, &self.gl_state) else {
            return;
        };

        unsafe { gl_state.draw(&window_state.gl, &self.camera) };

        if let Err(err) = window_state.swap_buffers() {
            error!("{err}");
        }
    }

    fn cleanup(self) {
        if let (Some(window_state), Some(gl_state)) = (self.window_state, self.gl_state) {
            unsafe { gl_state.cleanup(&window_state.gl) };
        }
    }
}

impl ApplicationHandler for Program {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_state.is_some() {
            return;
        }

        let window_state = match WindowState::new(event_loop) {
            Ok(state) => state,
            Err(err) => {
                error!("{err}");
                self.fatal = true;
                event_loop.exit();
                return;
            }
        };

        let vertex_src = read_file(VERTEX_SHADER_PATH);
        let fragment_src = read_file(FRAGMENT_SHADER_PATH);
        let gl_state = match GlState::new(&window_state.gl, &vertex_src, &fragment_src) {
            Ok(state) => state,
            Err(err) => {
                error!("{err}");
                self.fatal = true;
                event_loop.exit();
                return;
            }
        };

        self.window_state = Some(window_state);
        self.gl_state = Some(gl_state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(window_state) = &self.window_state {
                    window_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.handle_key(key, event_loop),
            WindowEvent::RedrawRequested => self.draw_frame(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window_state) = &self.window_state {
            window_state.window.request_redraw();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut program = Program::new();
    if let Err(err) = program.main_loop() {
        error!("event loop error: {err}");
        process::exit(-1);
    }
    if program.fatal {
        process::exit(-1);
    }
    program.cleanup();
}
