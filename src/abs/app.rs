//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;
use thiserror::Error;

/// Errors that can occur while bringing up the window and its GL context.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize SDL: {0}")]
    Init(String),
    #[error("failed to initialize the SDL video subsystem: {0}")]
    Video(String),
    #[error("failed to create the window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create the OpenGL context: {0}")]
    Context(String),
    #[error("failed to set the swap interval: {0}")]
    SwapInterval(String),
    #[error("failed to obtain the SDL event pump: {0}")]
    EventPump(String),
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a new [`App`] instance with the specified title, width, and height.
    ///
    /// The context is an OpenGL 3.3 core context made current on the new window.
    pub fn new(title: &str, width: u32, height: u32, vsync: bool) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Init)?;
        let video_subsystem = sdl.video().map_err(AppError::Video)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()?;
        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;
        video_subsystem
            .gl_set_swap_interval(if vsync {
                sdl2::video::SwapInterval::VSync
            } else {
                sdl2::video::SwapInterval::Immediate
            })
            .map_err(AppError::SwapInterval)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(AppError::EventPump)?;
        let gl = Arc::new(gl);

        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        log::info!("OpenGL loaded, version: {version}");

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// Resizes the GL viewport to the new drawable size.
    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
        log::debug!("viewport resized to {width}x{height}");
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}
