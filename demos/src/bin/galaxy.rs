//! Procedural galaxy generator.
//!
//! A spiral-armed point cloud rebuilt from tunable parameters. The debug
//! panel runs on the keyboard: up/down pick a control, left/right step it
//! (hold shift for coarse steps), and sliders regenerate on key release the
//! way a slider commits on mouse-up. R forces a regeneration.

use glam::Vec3;
use rand::Rng;
use winit::keyboard::KeyCode;

use vela_client::app::{Demo, FrameState};
use vela_client::panel::{DebugPanel, Edit};
use vela_client::renderer::point_cloud::GpuPointCloud;
use vela_client::{OrbitCamera, Renderer, Scene};
use vela_core::{GalaxyController, GalaxyParams};

struct GalaxyDemo {
    controller: GalaxyController<Renderer>,
    panel: DebugPanel,
    shift_held: bool,
}

impl GalaxyDemo {
    fn new() -> Self {
        // Entropy seed: every launch gets a fresh sky. Tests pin seeds.
        let seed = rand::thread_rng().gen();
        Self {
            controller: GalaxyController::new(GalaxyParams::default(), seed),
            panel: DebugPanel::new(),
            shift_held: false,
        }
    }

    fn regenerate(&mut self, renderer: &mut Renderer) {
        if let Err(e) = self.controller.regenerate(renderer) {
            // The previous cloud stays attached; the loop keeps running.
            tracing::warn!("Regeneration rejected: {e}");
        }
    }
}

impl Demo for GalaxyDemo {
    fn title(&self) -> &str {
        "Vela - Galaxy"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        camera.set_target(Vec3::ZERO);
        camera.set_position_around_target(Vec3::new(3.0, 3.0, 3.0));
        camera.set_smoothing(0.08);

        self.regenerate(renderer);

        // The scene itself is empty: the galaxy is all points.
        Ok(Scene::new())
    }

    fn update(
        &mut self,
        _frame: &FrameState,
        _scene: &mut Scene,
        _camera: &mut OrbitCamera,
        _renderer: &mut Renderer,
    ) {
    }

    fn on_key(&mut self, key: KeyCode, pressed: bool, renderer: &mut Renderer) {
        match key {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.shift_held = pressed,

            KeyCode::ArrowUp if pressed => self.panel.select_prev(),
            KeyCode::ArrowDown if pressed => self.panel.select_next(),

            KeyCode::ArrowLeft | KeyCode::ArrowRight => {
                if pressed {
                    let magnitude = if self.shift_held { 10 } else { 1 };
                    let steps = if key == KeyCode::ArrowLeft {
                        -magnitude
                    } else {
                        magnitude
                    };
                    let edit = self.panel.adjust(self.controller.params_mut(), steps);
                    if edit == Edit::Immediate {
                        self.regenerate(renderer);
                    }
                } else if self.panel.take_pending() {
                    // Slider semantics: commit when the key is released.
                    self.regenerate(renderer);
                }
            }

            KeyCode::KeyR if pressed => self.regenerate(renderer),

            _ => {}
        }
    }

    fn point_clouds(&self) -> Vec<&GpuPointCloud> {
        self.controller.handle().into_iter().collect()
    }

    fn status(&self) -> Option<String> {
        Some(self.panel.status(self.controller.params()))
    }
}

fn main() -> anyhow::Result<()> {
    vela_client::run(GalaxyDemo::new())
}
