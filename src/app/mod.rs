//! Application state, startup, and the window's render loop.

mod event_loop;

use std::sync::Arc;

use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::Window;

use crate::color::{GridColors, Rgba};
use crate::config::Config;
use crate::font::{self, FontError, FontFile, FontSource, GridFontSession};
use crate::gpu::{GpuError, GpuState, GridRenderer, PipelineError, plan_frame};
use crate::grid::Grid;
use crate::input::{EditOutcome, InputCommand};
use crate::resize::{ResizeCoordinator, ResizeOutcome};

/// Anything that stops the application from starting or running.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Font(#[from] FontError),
}

/// The character grid plus the colors it is drawn with.
#[derive(Debug, Clone)]
pub struct GridState {
    grid: Grid,
    colors: GridColors,
}

impl GridState {
    pub fn new(grid: Grid, colors: GridColors) -> Self {
        Self { grid, colors }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn colors(&self) -> GridColors {
        self.colors
    }

    /// Change the glyph color. Marks the grid dirty.
    pub fn set_text_color(&mut self, color: Rgba) {
        self.colors.text = color;
        self.grid.mark_dirty();
    }

    /// Change the clear color. Marks the grid dirty.
    pub fn set_background_color(&mut self, color: Rgba) {
        self.colors.background = color;
        self.grid.mark_dirty();
    }

    pub fn apply(&mut self, command: InputCommand) -> EditOutcome {
        command.apply(&mut self.grid)
    }
}

/// Everything that exists only while the window is open.
struct Runtime {
    window: Arc<Window>,
    gpu: GpuState,
    renderer: GridRenderer,
    session: GridFontSession,
    coordinator: ResizeCoordinator,
    state: GridState,
}

impl Runtime {
    /// Reconfigure the surface and let the coordinator rebuild the font if needed.
    fn resize(&mut self, font: &FontFile, warmup: Option<&str>, width: u32, height: u32) {
        self.gpu.resize(width, height);

        let Self {
            gpu,
            renderer,
            session,
            coordinator,
            state,
            ..
        } = self;
        let outcome = coordinator.handle_resize(width, height, session, state.grid_mut(), |px| {
            font::build_session(font, px, renderer.texture_store(gpu), warmup)
        });
        log::debug!("resize {width}x{height}: {outcome:?}");

        if !matches!(outcome, ResizeOutcome::Ignored) {
            self.window.request_redraw();
        }
    }

    /// Apply a keyboard command, scheduling a redraw if it changed the grid.
    fn input(&mut self, command: InputCommand) -> EditOutcome {
        let outcome = self.state.apply(command);
        if self.state.grid().is_dirty() {
            self.window.request_redraw();
        }
        outcome
    }

    fn redraw(&mut self) {
        self.state.grid_mut().take_dirty();
        let plan = plan_frame(
            self.state.grid(),
            &mut self.session,
            self.coordinator.geometry(),
            self.state.colors(),
        );
        self.renderer
            .render(&self.gpu, &plan, self.session.cache().store());
    }

    fn destroy(&mut self) {
        self.session.destroy();
        self.renderer.destroy();
    }
}

/// The windowed grid application.
pub struct App {
    config: Config,
    font: FontFile,
    runtime: Option<Runtime>,
    /// Startup failure raised inside the event loop, returned from `run`.
    error: Option<AppError>,
}

impl App {
    /// Locate the font up front so a missing font fails before any window opens.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let font = FontSource::new(&config.font).locate()?;
        Ok(Self {
            config,
            font,
            runtime: None,
            error: None,
        })
    }

    /// Open the window and run until it is closed.
    pub fn run(config: Config) -> Result<(), AppError> {
        let mut app = Self::new(config)?;
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut app)?;
        app.error.take().map_or(Ok(()), Err)
    }

    /// Create the window, GPU state, renderer and the first font session.
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Runtime, AppError> {
        let cfg = &self.config;
        let attrs = Window::default_attributes()
            .with_title(cfg.window.title.as_str())
            .with_inner_size(LogicalSize::new(cfg.window.width, cfg.window.height))
            .with_resizable(cfg.window.resizable);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();

        let gpu = GpuState::new(Arc::clone(&window))?;
        let renderer = GridRenderer::new(&gpu)?;

        let (rows, cols) = cfg.grid.shape(size.width, size.height);
        let coordinator = ResizeCoordinator::new(rows, cols, size.width, size.height);
        let session = font::build_session(
            &self.font,
            coordinator.geometry().font_pixel_size(),
            renderer.texture_store(&gpu),
            cfg.font.warmup.as_deref(),
        )?;

        let mut grid = Grid::new(rows, cols);
        grid.set_text(&cfg.grid.initial_text);
        log::info!(
            "grid {rows}x{cols} in {}x{} window",
            size.width,
            size.height
        );

        window.request_redraw();
        Ok(Runtime {
            window,
            gpu,
            renderer,
            session,
            coordinator,
            state: GridState::new(grid, cfg.colors.resolve()),
        })
    }
}

#[cfg(test)]
mod tests;
