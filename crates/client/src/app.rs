//! Application state and event loop handler.
//!
//! Each demo binary plugs a [`Demo`] into [`App`]; the app owns the window,
//! the renderer and the camera, and drives the cooperative render loop:
//! every redraw reads the elapsed time, runs the demo's update, renders
//! once, then asks for the next frame.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::OrbitCamera;
use crate::renderer::{point_cloud::GpuPointCloud, Renderer};
use crate::scene::Scene;

/// Per-frame input and timing state handed to demos.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Seconds since the demo started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Cursor in normalized window coordinates, (-0.5..0.5), y down.
    pub cursor: Vec2,
    /// Accumulated scroll wheel lines (only when orbit controls are off).
    pub scroll: f32,
}

/// One self-contained scene demo.
pub trait Demo {
    fn title(&self) -> &str {
        "Vela"
    }

    /// Build the scene. Runs once, after the renderer exists.
    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera)
        -> anyhow::Result<Scene>;

    /// Per-frame update: animate transforms, move the camera.
    fn update(
        &mut self,
        frame: &FrameState,
        scene: &mut Scene,
        camera: &mut OrbitCamera,
        renderer: &mut Renderer,
    );

    /// Key events, forwarded as they arrive. `pressed` is false on release.
    fn on_key(&mut self, _key: KeyCode, _pressed: bool, _renderer: &mut Renderer) {}

    /// Point clouds to draw this frame.
    fn point_clouds(&self) -> Vec<&GpuPointCloud> {
        Vec::new()
    }

    /// Extra text for the window title, refreshed after key events.
    fn status(&self) -> Option<String> {
        None
    }

    /// Whether the app wires mouse drag / wheel to the orbit camera.
    fn orbit_controls(&self) -> bool {
        true
    }
}

/// Main application state.
pub struct App<D: Demo> {
    demo: D,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Option<Scene>,
    camera: OrbitCamera,
    start: Option<Instant>,
    last_frame_time: Option<Instant>,
    cursor: Vec2,
    cursor_px: Option<(f64, f64)>,
    scroll: f32,
    dragging: bool,
}

impl<D: Demo> App<D> {
    const DRAG_SENSITIVITY: f32 = 0.005;

    pub fn new(demo: D) -> Self {
        Self {
            demo,
            window: None,
            renderer: None,
            scene: None,
            camera: OrbitCamera::new(),
            start: None,
            last_frame_time: None,
            cursor: Vec2::ZERO,
            cursor_px: None,
            scroll: 0.0,
            dragging: false,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title(self.demo.title())
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("failed to create window"),
        );

        let mut renderer = pollster::block_on(Renderer::new(window.clone()))
            .expect("failed to create renderer");

        self.camera.set_aspect(renderer.aspect());

        match self.demo.init(&mut renderer, &mut self.camera) {
            Ok(scene) => self.scene = Some(scene),
            Err(e) => {
                tracing::error!("Demo init failed: {e:#}");
                event_loop.exit();
                return;
            }
        }

        self.refresh_title(&window);
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.start = Some(Instant::now());
        self.last_frame_time = None;

        tracing::info!("Window, renderer, and scene initialized");
    }

    fn refresh_title(&self, window: &Window) {
        match self.demo.status() {
            Some(status) => window.set_title(&format!("{} - {}", self.demo.title(), status)),
            None => window.set_title(self.demo.title()),
        }
    }

    /// Render a single frame.
    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let elapsed = self
            .start
            .map(|s| now.duration_since(s).as_secs_f32())
            .unwrap_or(0.0);
        let delta = self
            .last_frame_time
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(1.0 / 60.0);
        self.last_frame_time = Some(now);

        let (Some(renderer), Some(scene)) = (self.renderer.as_mut(), self.scene.as_mut()) else {
            return Ok(());
        };

        let frame = FrameState {
            elapsed,
            delta,
            cursor: self.cursor,
            scroll: self.scroll,
        };

        self.demo.update(&frame, scene, &mut self.camera, renderer);
        self.camera.update();

        let clouds = self.demo.point_clouds();
        renderer.render(scene, &clouds, &self.camera, elapsed)
    }
}

impl<D: Demo> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.init_window(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                    self.camera.set_aspect(renderer.aspect());
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.cursor = Vec2::new(
                        (position.x / size.width.max(1) as f64 - 0.5) as f32,
                        (position.y / size.height.max(1) as f64 - 0.5) as f32,
                    );
                }

                if self.dragging && self.demo.orbit_controls() {
                    if let Some((last_x, last_y)) = self.cursor_px {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.camera.orbit(
                            -dx * Self::DRAG_SENSITIVITY,
                            dy * Self::DRAG_SENSITIVITY,
                        );
                    }
                }
                self.cursor_px = Some((position.x, position.y));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.dragging = state == ElementState::Pressed;
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                if self.demo.orbit_controls() {
                    self.camera.zoom_by(0.95_f32.powf(lines));
                } else {
                    self.scroll += lines;
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if code == KeyCode::Escape && pressed {
                        event_loop.exit();
                        return;
                    }
                    if let Some(renderer) = &mut self.renderer {
                        self.demo.on_key(code, pressed, renderer);
                    }
                    if let Some(window) = &self.window {
                        self.refresh_title(window);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                match self.render_frame() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window)
                        {
                            renderer.resize(window.inner_size());
                        }
                    }
                    Err(e) => {
                        tracing::error!("Render error: {e:?}, exiting");
                        event_loop.exit();
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
