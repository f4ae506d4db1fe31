use std::num::NonZeroU32;

use anyhow::{anyhow, Result};
use glow::HasContext as _;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::constants::{APP_NAME, WINDOW_HEIGHT, WINDOW_WIDTH};

pub struct WindowState {
    pub window: Window,
    pub surface: Surface<WindowSurface>,
    pub context: PossiblyCurrentContext,
    pub gl: glow::Context,
}

impl WindowState {
    /// Create the window, an OpenGL 3.3 core-profile context and its surface,
    /// make the context current and load every GL entry point.
    ///
    /// Any failure here is fatal to the caller; winit/glutin release their
    /// resources on drop.
    pub fn new(event_loop: &ActiveEventLoop) -> Result<WindowState> {
        let window_attributes = Window::default_attributes()
            .with_title(APP_NAME)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let template = ConfigTemplateBuilder::new();
        let display_builder =
            DisplayBuilder::new().with_window_attributes(Some(window_attributes));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                // Any matching config will do; prefer the least multisampled.
                configs
                    .reduce(|best, config| {
                        if config.num_samples() < best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("no suitable GL config found")
            })
            .map_err(|err| anyhow!("failed to create window: {err}"))?;
        let window = window.ok_or_else(|| anyhow!("failed to create window"))?;

        let raw_window_handle = window
            .window_handle()
            .map_err(|err| anyhow!("failed to get window handle: {err}"))?
            .as_raw();
        let gl_display = gl_config.display();

        // Core profile; glutin adds the forward-compat flag on Apple itself.
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let not_current_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes) }
                .map_err(|err| anyhow!("failed to create OpenGL 3.3 core context: {err}"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|err| anyhow!("failed to build surface attributes: {err}"))?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|err| anyhow!("failed to create window surface: {err}"))?;

        let context = not_current_context
            .make_current(&surface)
            .map_err(|err| anyhow!("failed to make GL context current: {err}"))?;

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| {
                gl_display.get_proc_address(name).cast()
            })
        };

        Ok(WindowState {
            window,
            surface,
            context,
            gl,
        })
    }

    /// Re-apply the viewport to the new framebuffer size. The projection
    /// matrix is not touched; only the viewport follows the window.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, w, h);
            unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
        }
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|err| anyhow!("failed to swap buffers: {err}"))
    }
}
