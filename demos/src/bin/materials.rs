//! Materials: a lit sphere, plane and torus under a point light.
//!
//! The sphere and torus share a phong material; the plane carries a
//! generated checkerboard texture. Everything slowly tumbles, and the
//! mouse orbits the camera with damping.

use glam::{Vec3, Vec4};

use vela_client::app::{Demo, FrameState};
use vela_client::renderer::mesh::MeshBuilder;
use vela_client::renderer::texture::Texture;
use vela_client::scene::{Material, MeshNode, PointLight, Transform};
use vela_client::{OrbitCamera, Renderer, Scene};

struct Materials {
    spinning: Vec<usize>,
}

impl Materials {
    fn new() -> Self {
        Self {
            spinning: Vec::new(),
        }
    }
}

impl Demo for Materials {
    fn title(&self) -> &str {
        "Vela - Materials"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        let mut scene = Scene::new();

        let shared = Material::phong(Vec4::new(0.8, 0.8, 0.85, 1.0));

        let sphere = MeshBuilder::new().add_sphere(0.5, 16, 16).build();
        let idx = scene.add(
            MeshNode::new("sphere", renderer.upload_mesh(&sphere), shared)
                .with_transform(Transform::from_position(Vec3::new(-1.5, 0.0, 0.0))),
        );
        self.spinning.push(idx);

        let checker = Texture::checkerboard(
            renderer.device(),
            renderer.queue(),
            8,
            16,
            [235, 235, 235, 255],
            [40, 40, 60, 255],
        );
        let plane = MeshBuilder::new().add_plane(1.0, 1.0).build();
        let idx = scene.add(MeshNode::new(
            "plane",
            renderer.upload_mesh_with_texture(&plane, Some(&checker)),
            Material::textured(),
        ));
        self.spinning.push(idx);

        let torus = MeshBuilder::new().add_torus(0.3, 0.2, 16, 32).build();
        let idx = scene.add(
            MeshNode::new("torus", renderer.upload_mesh(&torus), shared)
                .with_transform(Transform::from_position(Vec3::new(1.5, 0.0, 0.0))),
        );
        self.spinning.push(idx);

        scene.lights.ambient.intensity = 0.3;
        scene.lights.point = Some(PointLight {
            position: Vec3::new(2.0, 3.0, 4.0),
            color: Vec3::ONE,
            intensity: 0.8,
        });

        camera.set_target(Vec3::ZERO);
        camera.set_position_around_target(Vec3::new(1.0, 1.0, 4.0));
        camera.set_smoothing(0.08);
        Ok(scene)
    }

    fn update(
        &mut self,
        frame: &FrameState,
        scene: &mut Scene,
        _camera: &mut OrbitCamera,
        _renderer: &mut Renderer,
    ) {
        for &idx in &self.spinning {
            let node = scene.node_mut(idx);
            node.transform.rotation.y = 0.1 * frame.elapsed;
            node.transform.rotation.x = 0.15 * frame.elapsed;
        }
    }
}

fn main() -> anyhow::Result<()> {
    vela_client::run(Materials::new())
}
