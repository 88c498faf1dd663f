//! Camera controls: orbit a cube with the mouse cursor.
//!
//! The cursor's horizontal position sweeps the camera a full turn around
//! the cube; the vertical position raises and lowers the view. The camera
//! always looks at the cube.

use glam::{Vec3, Vec4};
use std::f32::consts::TAU;

use vela_client::app::{Demo, FrameState};
use vela_client::renderer::mesh::MeshBuilder;
use vela_client::scene::{Material, MeshNode};
use vela_client::{OrbitCamera, Renderer, Scene};

struct CameraControls;

impl Demo for CameraControls {
    fn title(&self) -> &str {
        "Vela - Camera Controls"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        let mut scene = Scene::new();

        let cube = MeshBuilder::new().add_box(1.0, 1.0, 1.0).build();
        scene.add(MeshNode::new(
            "cube",
            renderer.upload_mesh(&cube),
            Material::unlit(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        ));

        camera.set_target(Vec3::ZERO);
        camera.set_distance(3.0);
        Ok(scene)
    }

    fn update(
        &mut self,
        frame: &FrameState,
        _scene: &mut Scene,
        camera: &mut OrbitCamera,
        _renderer: &mut Renderer,
    ) {
        // Full revolution across the window width; cursor up looks down on
        // the cube (cursor y grows downward).
        let yaw = frame.cursor.x * TAU;
        let pitch = -frame.cursor.y * 2.0;
        camera.set_angles(yaw, pitch);
    }

    fn orbit_controls(&self) -> bool {
        false
    }
}

fn main() -> anyhow::Result<()> {
    vela_client::run(CameraControls)
}
