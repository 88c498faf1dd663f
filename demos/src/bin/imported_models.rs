//! Model import: load a glTF/GLB file into the scene.
//!
//! Usage: `imported_models <path/to/model.glb>`. Meshes come in with their
//! node transforms and base colors; KHR_lights_punctual point and
//! directional lights are wired into the scene's light slots.

use anyhow::Context;
use glam::Vec3;

use vela_client::app::{Demo, FrameState};
use vela_client::renderer::gltf_loader::{load_gltf, LoadedLightKind};
use vela_client::scene::{DirectionalLight, Material, MeshNode, PointLight};
use vela_client::{OrbitCamera, Renderer, Scene};

struct ImportedModels {
    path: String,
}

impl Demo for ImportedModels {
    fn title(&self) -> &str {
        "Vela - Imported Models"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        let mut scene = Scene::new();

        let model = load_gltf(&self.path)
            .with_context(|| format!("loading model {}", self.path))?;

        for loaded in &model.meshes {
            scene.add(
                MeshNode::new(
                    loaded.name.clone(),
                    renderer.upload_mesh(&loaded.mesh),
                    Material::phong(loaded.base_color),
                )
                .with_transform(loaded.transform),
            );
        }

        for light in &model.lights {
            match light.kind {
                LoadedLightKind::Point if scene.lights.point.is_none() => {
                    scene.lights.point = Some(PointLight {
                        position: light.position,
                        color: light.color,
                        intensity: light.intensity.min(2.0),
                    });
                }
                LoadedLightKind::Directional if scene.lights.directional.is_none() => {
                    scene.lights.directional = Some(DirectionalLight {
                        direction: (-light.position).normalize_or_zero(),
                        color: light.color,
                        intensity: light.intensity.min(2.0),
                    });
                }
                _ => {
                    tracing::debug!("Skipping extra light {}", light.name);
                }
            }
        }

        // A lone unlit model would render black; keep some fill light.
        scene.lights.ambient.intensity = 0.3;

        camera.set_target(Vec3::new(0.0, 0.9, 0.0));
        camera.set_position_around_target(Vec3::new(4.0, 2.0, 4.0));
        camera.set_smoothing(0.08);
        Ok(scene)
    }

    fn update(
        &mut self,
        _frame: &FrameState,
        _scene: &mut Scene,
        _camera: &mut OrbitCamera,
        _renderer: &mut Renderer,
    ) {
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: imported_models <path/to/model.glb>")?;

    vela_client::run(ImportedModels { path })
}
