//! Vela Client
//!
//! Rendering layer and demo harness: wgpu renderer, scene types, orbit
//! camera, debug panel, and the winit application loop demos plug into.

pub mod app;
pub mod camera;
pub mod panel;
pub mod renderer;
pub mod scene;
pub mod text;

pub use app::{App, Demo, FrameState};
pub use camera::OrbitCamera;
pub use renderer::Renderer;
pub use scene::Scene;

/// Run a demo: set up logging, open the window, drive the loop.
pub fn run<D: Demo>(demo: D) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    use winit::event_loop::EventLoop;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("vela_core=debug".parse()?)
                .add_directive("vela_client=debug".parse()?)
                .add_directive("wgpu_core=warn".parse()?)
                .add_directive("wgpu_hal=warn".parse()?),
        )
        .init();

    tracing::info!("Starting {}", demo.title());

    let event_loop = EventLoop::new()?;
    let mut app = App::new(demo);

    event_loop.run_app(&mut app)?;

    Ok(())
}
