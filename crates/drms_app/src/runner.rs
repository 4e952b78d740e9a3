use std::sync::Arc;

use drms_core::{Demo, Extent, Outcome};
use drms_renderer::{GpuDemo, WgpuTargetBackend};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::builder::AppConfig;
use crate::graphics::GraphicsState;
use crate::input;

struct Runner {
    config: AppConfig,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    demo: Option<GpuDemo>,
    /// First fatal error; ends the event loop and becomes the exit status.
    failure: Option<anyhow::Error>,
}

impl Runner {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            graphics: None,
            demo: None,
            failure: None,
        }
    }

    /// Stops the loop.  The error is reported by `main` once the loop returns.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        match &self.failure {
            None => self.failure = Some(err),
            Some(_) => log::warn!("further error while shutting down: {err:#}"),
        }
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let extent = Extent::new(size.width, size.height).at_least_one();
        let gfx = pollster::block_on(GraphicsState::new(
            Arc::clone(&window),
            extent,
            self.config.vsync,
        ))?;

        let demo = Demo::new(extent, WgpuTargetBackend::new(&gfx.context))?;
        window.set_title(&demo.title(&self.config.title));
        input::log_bindings();

        self.window = Some(window);
        self.graphics = Some(gfx);
        self.demo = Some(demo);
        Ok(())
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(action) = input::action_for_key(code) else {
            return;
        };
        let (Some(demo), Some(window)) = (&mut self.demo, &self.window) else {
            return;
        };

        match demo.apply(action) {
            Ok(Outcome::Exit) => event_loop.exit(),
            Ok(Outcome::Reconfigured) => window.set_title(&demo.title(&self.config.title)),
            Err(err) => self.fail(event_loop, err.into()),
        }
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err.context("initialisation failed"));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let extent = Extent::new(size.width, size.height);
                if let Some(gfx) = &mut self.graphics {
                    gfx.resize(extent);
                }
                if let Some(demo) = &mut self.demo {
                    if let Err(err) = demo.resize(extent) {
                        self.fail(event_loop, err.into());
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event_loop, &event),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gfx), Some(demo), Some(window)) = (&mut self.graphics, &self.demo, &self.window)
        else {
            return;
        };
        if let Err(err) = gfx.render(demo) {
            self.fail(event_loop, err);
            return;
        }
        window.request_redraw();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(demo) = &mut self.demo {
            demo.shutdown();
        }
    }
}

pub(crate) fn run_internal(config: AppConfig) -> anyhow::Result<()> {
    let mut runner = Runner::new(config);
    let event_loop = EventLoop::new()?;
    // Poll = redraw continuously, like a swap-interval-bound render loop.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner)?;

    match runner.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
