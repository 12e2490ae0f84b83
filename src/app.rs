use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{
    Settings, ACTIVE_TITLE, INACTIVE_TITLE, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH,
};
use crate::gpu::{CanvasPipeline, GpuContext};
use crate::render::PixelCanvas;
use crate::scheduler::{FrameHandle, FrameScheduler, TickSource};
use crate::simulation::SimulationContext;

/// Frame requests backed by `Window::request_redraw`.
///
/// winit cannot withdraw a redraw request, so cancelling only forgets the
/// handle; a redraw that arrives afterwards carries no frame.
struct WindowTicks {
    window: Arc<Window>,
    next_id: u64,
    outstanding: Option<FrameHandle>,
}

impl WindowTicks {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            outstanding: None,
        }
    }

    /// Take the frame a redraw event answers, if any
    fn deliver(&mut self) -> Option<FrameHandle> {
        self.outstanding.take()
    }
}

impl TickSource for WindowTicks {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
    }
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    ticks: Option<WindowTicks>,
    gpu: Option<GpuContext>,
    canvas_pipeline: Option<CanvasPipeline>,
    canvas: PixelCanvas,
    simulation: SimulationContext,
    scheduler: FrameScheduler,
    occluded: bool,
    minimized: bool,
    fps_counter: FpsCounter,
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            window: None,
            ticks: None,
            gpu: None,
            canvas_pipeline: None,
            canvas: PixelCanvas::new(0, 0),
            simulation: SimulationContext::new(settings),
            scheduler: FrameScheduler::new(),
            occluded: false,
            minimized: false,
            fps_counter: FpsCounter::new(),
            failure: None,
        }
    }

    /// Error that stopped the event loop during startup, if any
    pub fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        log::info!("Initializing Game of Life...");

        let window_attrs = Window::default_attributes()
            .with_title(ACTIVE_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                INITIAL_WINDOW_WIDTH,
                INITIAL_WINDOW_HEIGHT,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let canvas_pipeline = CanvasPipeline::new(&gpu.device, gpu.format());

        let mut ticks = WindowTicks::new(window.clone());
        self.scheduler.start(&mut ticks);

        let size = window.inner_size();
        self.window = Some(window);
        self.ticks = Some(ticks);
        self.gpu = Some(gpu);
        self.canvas_pipeline = Some(canvas_pipeline);

        // Pauses the scheduler again if the window starts minimized
        self.apply_viewport(size);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  R: Reseed grid");
        log::info!("  Escape: Quit");
        Ok(())
    }

    fn apply_viewport(&mut self, size: PhysicalSize<u32>) {
        self.minimized = size.width == 0 || size.height == 0;
        if !self.minimized {
            self.simulation.resize(size.width, size.height);
            let (width, height) = self.simulation.canvas_size();
            self.canvas.resize(width, height);
            let (columns, rows) = self.simulation.dimensions();
            log::debug!("Viewport holds {}x{} cells", columns, rows);
        }
        self.update_visibility();
    }

    fn update_visibility(&mut self) {
        let visible = !self.occluded && !self.minimized;
        if !self.simulation.set_visible(visible) {
            return;
        }

        if let Some(ticks) = self.ticks.as_mut() {
            self.scheduler.set_visible(visible, ticks);
        }
        if let Some(window) = &self.window {
            window.set_title(if visible { ACTIVE_TITLE } else { INACTIVE_TITLE });
        }
    }

    fn on_redraw(&mut self) {
        let Some(ticks) = self.ticks.as_mut() else {
            return;
        };
        if let Some(handle) = ticks.deliver() {
            if self.scheduler.on_frame(handle, ticks) {
                self.simulation.tick();
            }
        }

        if self.simulation.is_visible() {
            self.render();
        }
    }

    fn render(&mut self) {
        let (Some(gpu), Some(pipeline)) = (self.gpu.as_ref(), self.canvas_pipeline.as_mut()) else {
            log::debug!("No drawing surface, skipping draw");
            return;
        };

        self.simulation.draw(&mut self.canvas);
        pipeline.upload(&gpu.device, &gpu.queue, &self.canvas);

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        pipeline.draw(&mut encoder, &view);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            let population = self.simulation.grid().map_or(0, |grid| grid.population());
            log::debug!(
                "{:.0} FPS, generation {}, {} alive",
                fps,
                self.simulation.generation(),
                population
            );
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        if key_code == KeyCode::KeyR {
            self.simulation.reset();
            log::info!("Grid reseeded");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {:#}", e);
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                if let Some(ticks) = self.ticks.as_mut() {
                    self.scheduler.stop(ticks);
                }
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
                self.apply_viewport(new_size);
            }
            WindowEvent::Occluded(occluded) => {
                log::debug!("Window occluded: {}", occluded);
                self.occluded = occluded;
                self.update_visibility();
            }
            WindowEvent::RedrawRequested => {
                self.on_redraw();
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
