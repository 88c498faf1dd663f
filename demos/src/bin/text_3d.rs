//! 3D text: extruded block letters in a cloud of scattered toruses.
//!
//! The title sits centered at the origin; a hundred toruses share one
//! uploaded geometry, each with its own random position, rotation and
//! scale. Everything uses the normal-visualization material.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

use vela_client::app::{Demo, FrameState};
use vela_client::renderer::mesh::MeshBuilder;
use vela_client::scene::{Material, MeshNode, Transform};
use vela_client::text::{build_text, TextOptions};
use vela_client::{OrbitCamera, Renderer, Scene};

const SCATTER_COUNT: usize = 100;

struct Text3d;

impl Demo for Text3d {
    fn title(&self) -> &str {
        "Vela - 3D Text"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        let mut scene = Scene::new();

        let text = build_text(
            "VELA",
            &TextOptions {
                size: 0.5,
                depth: 0.2,
                letter_spacing: 0.0,
                centered: true,
            },
        );
        scene.add(MeshNode::new(
            "title",
            renderer.upload_mesh(&text),
            Material::normal(),
        ));

        // One torus geometry, a hundred placements.
        let torus = MeshBuilder::new().add_torus(0.3, 0.2, 16, 32).build();
        let torus_gpu = renderer.upload_mesh(&torus);

        let mut rng = rand::thread_rng();
        for i in 0..SCATTER_COUNT {
            let scale = rng.gen::<f32>();
            scene.add(
                MeshNode::new(
                    format!("torus_{i}"),
                    renderer.instantiate_mesh(&torus_gpu),
                    Material::normal(),
                )
                .with_transform(Transform {
                    position: Vec3::new(
                        (rng.gen::<f32>() - 0.5) * 10.0,
                        (rng.gen::<f32>() - 0.5) * 10.0,
                        (rng.gen::<f32>() - 0.5) * 10.0,
                    ),
                    rotation: Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0),
                    scale: Vec3::splat(scale),
                }),
            );
        }

        camera.set_target(Vec3::ZERO);
        camera.set_position_around_target(Vec3::new(1.0, 1.0, 2.0));
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
    vela_client::run(Text3d)
}
