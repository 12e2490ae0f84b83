mod app;
mod config;
mod gpu;
mod render;
mod scheduler;
mod simulation;

use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::config::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();
    log::info!(
        "Cell size {}px, resize policy {}",
        settings.cell_size,
        settings.resize_policy
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.take_failure() {
        Some(e) => Err(e.context("renderer failed to start")),
        None => Ok(()),
    }
}
