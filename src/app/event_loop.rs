//! winit event loop: `ApplicationHandler` impl.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::input::{self, EditOutcome};

use super::App;

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(runtime) => self.runtime = Some(runtime),
            Err(e) => {
                log::error!("startup failed: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(rt) = self.runtime.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let warmup = self.config.font.warmup.as_deref();
                rt.resize(&self.font, warmup, size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                rt.redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let Some(cmd) = input::command_for_key(&event.logical_key, event.text.as_deref())
                else {
                    return;
                };
                if rt.input(cmd) == EditOutcome::Close {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut rt) = self.runtime.take() {
            rt.destroy();
            log::info!("shutdown: font session and renderer released");
        }
    }
}
