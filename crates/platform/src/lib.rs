use std::sync::{Arc, mpsc::Sender};
use std::{thread, time::Duration};

use app_api::{RepaintHandle, SurfaceError};
pub use app_api::UiApp;
use bus::{Bus, SurfaceEvent};
use core_types::WindowRequest;
use gfx::{Renderer, RendererError};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Fullscreen, Window, WindowId},
};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Toolkit plumbing an embedded engine needs from the host loop.
#[derive(Debug, Clone, Copy)]
pub struct EngineHooks {
    /// Runs once, before the window exists.
    pub init: fn() -> Result<(), SurfaceError>,
    /// Runs every time the loop is about to sleep.
    pub pump: fn(),
}

impl Default for EngineHooks {
    fn default() -> Self {
        Self {
            init: || Ok(()),
            pump: || {},
        }
    }
}

/// Handed to the app factory once the native window exists.
pub struct AppContext<'a> {
    pub window: &'a Window,
    pub evt_tx: Sender<SurfaceEvent>,
    pub repaint: RepaintHandle,
}

enum UserEvent {
    Tick,
    Wake,
}

/// Opens the window and runs `build_app`'s result until the window closes.
pub fn run<F>(
    options: WindowOptions,
    hooks: EngineHooks,
    build_app: F,
) -> Result<(), PlatformError>
where
    F: FnOnce(AppContext<'_>) -> Result<Box<dyn UiApp>, SurfaceError>,
{
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PlatformApp {
        options,
        hooks,
        build_app: Some(build_app),
        proxy: event_loop.create_proxy(),
        ticker_started: false,
        bus: Bus::new(),
        window: None,
        renderer: None,
        app: None,
        observed_fullscreen: false,
        failure: None,
    };
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct PlatformApp<F> {
    options: WindowOptions,
    hooks: EngineHooks,
    build_app: Option<F>,
    proxy: EventLoopProxy<UserEvent>,
    ticker_started: bool,
    bus: Bus,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    app: Option<Box<dyn UiApp>>,
    // what the window last reported, not what the app asked for
    observed_fullscreen: bool,
    failure: Option<PlatformError>,
}

impl<F> PlatformApp<F>
where
    F: FnOnce(AppContext<'_>) -> Result<Box<dyn UiApp>, SurfaceError>,
{
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        (self.hooks.init)()?;

        let attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(self.options.width, self.options.height));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let renderer = Renderer::new(Arc::clone(&window))?;

        let proxy = self.proxy.clone();
        let repaint: RepaintHandle = Arc::new(move || {
            let _ = proxy.send_event(UserEvent::Wake);
        });

        if let Some(build_app) = self.build_app.take() {
            let app = build_app(AppContext {
                window: &window,
                evt_tx: self.bus.evt_tx.clone(),
                repaint,
            })?;
            self.app = Some(app);
        }

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;

        // Keeps the engine's toolkit events flowing while winit is idle.
        let proxy = self.proxy.clone();
        thread::spawn(move || {
            let frame = Duration::from_millis(16); // ~60Hz
            loop {
                if proxy.send_event(UserEvent::Tick).is_err() {
                    break;
                }
                thread::sleep(frame);
            }
        });
    }

    fn redraw(&mut self) {
        let (Some(window), Some(renderer), Some(app)) =
            (self.window.as_ref(), self.renderer.as_mut(), self.app.as_mut())
        else {
            return;
        };

        let fullscreen = window.fullscreen().is_some();
        if fullscreen != self.observed_fullscreen {
            self.observed_fullscreen = fullscreen;
            app.on_fullscreen_changed(fullscreen);
        }

        for evt in self.bus.drain() {
            app.on_surface_event(evt);
        }

        let again = renderer.render(window, |ctx| app.ui(ctx));

        for request in app.take_window_requests() {
            apply_window_request(window, request);
        }
        if again {
            window.request_redraw();
        }
    }
}

fn apply_window_request(window: &Window, request: WindowRequest) {
    match request {
        WindowRequest::Fullscreen(true) => {
            log::debug!("entering fullscreen");
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        WindowRequest::Fullscreen(false) => {
            log::debug!("leaving fullscreen");
            window.set_fullscreen(None);
        }
        WindowRequest::Title(title) => window.set_title(&title),
    }
}

impl<F> ApplicationHandler<UserEvent> for PlatformApp<F>
where
    F: FnOnce(AppContext<'_>) -> Result<Box<dyn UiApp>, SurfaceError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            log::error!("startup failed: {err}");
            self.failure = Some(err);
            event_loop.exit();
            return;
        }
        self.start_ticker();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {}
            UserEvent::Wake => {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        (self.hooks.pump)();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) {
            if renderer.on_window_event(window, &event) {
                window.request_redraw();
            }
        }
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(new_size);
                }
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}
