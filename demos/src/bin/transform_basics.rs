//! Transform basics: position, scale, rotation, and grouped objects.
//!
//! A stretched, tilted box, a two-cube group moved as one, and an axes
//! helper. The scene is static; the camera just sits on +Z.

use glam::{Vec3, Vec4};
use std::f32::consts::FRAC_PI_4;

use vela_client::app::{Demo, FrameState};
use vela_client::renderer::mesh::MeshBuilder;
use vela_client::scene::{Material, MeshNode, Transform};
use vela_client::{OrbitCamera, Renderer, Scene};

const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

struct TransformBasics;

impl Demo for TransformBasics {
    fn title(&self) -> &str {
        "Vela - Transform Basics"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        let mut scene = Scene::new();

        let cube = MeshBuilder::new().add_box(1.0, 1.0, 1.0).build();
        let cube_gpu = renderer.upload_mesh(&cube);

        // A single box, moved, stretched, then tilted.
        scene.add(
            MeshNode::new("mesh", renderer.instantiate_mesh(&cube_gpu), Material::unlit(RED))
                .with_transform(Transform {
                    position: Vec3::new(1.0, -1.5, -0.5),
                    rotation: Vec3::new(FRAC_PI_4, FRAC_PI_4, 0.0),
                    scale: Vec3::new(2.0, 0.5, 1.0),
                }),
        );

        // Two cubes sharing a group transform: moving the group moves both.
        let group = scene.add_group(Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));

        scene.add(
            MeshNode::new(
                "cube1",
                renderer.instantiate_mesh(&cube_gpu),
                Material::unlit(RED),
            )
            .with_group(group),
        );
        scene.add(
            MeshNode::new(
                "cube2",
                renderer.instantiate_mesh(&cube_gpu),
                Material::unlit(GREEN),
            )
            .with_transform(Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))
            .with_group(group),
        );

        // Axes helper: one thin box per axis.
        for (name, color, center, size) in [
            ("axis_x", RED, Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 0.02, 0.02)),
            ("axis_y", GREEN, Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.02, 1.0, 0.02)),
            ("axis_z", BLUE, Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.02, 0.02, 1.0)),
        ] {
            let axis = MeshBuilder::new()
                .add_box_at(center, size.x, size.y, size.z)
                .build();
            scene.add(MeshNode::new(
                name,
                renderer.upload_mesh(&axis),
                Material::unlit(color),
            ));
        }

        camera.set_position_around_target(Vec3::new(0.0, 0.0, 3.0));
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

    fn orbit_controls(&self) -> bool {
        false
    }
}

fn main() -> anyhow::Result<()> {
    vela_client::run(TransformBasics)
}
