//! Scroll-driven sections with cursor parallax.
//!
//! Three toon-shaded shapes stacked in vertical sections, a sparse star
//! field behind them. The mouse wheel scrolls the camera from section to
//! section; the cursor nudges the view sideways with damped easing.

use glam::{Vec2, Vec3, Vec4};

use vela_client::app::{Demo, FrameState};
use vela_client::renderer::mesh::MeshBuilder;
use vela_client::renderer::point_cloud::GpuPointCloud;
use vela_client::scene::{DirectionalLight, Material, MeshNode, Transform};
use vela_client::{OrbitCamera, Renderer, Scene};
use vela_core::{PointCloudBackend, PointCloudData, SeededRandom};

/// Vertical distance between section shapes.
const OBJECT_DISTANCE: f32 = 4.0;
const SECTION_COUNT: usize = 3;
/// Per-frame easing factor for the cursor parallax.
const PARALLAX_EASING: f32 = 0.08;

struct ScrollParallax {
    section_nodes: Vec<usize>,
    stars: Option<GpuPointCloud>,
    parallax: Vec2,
}

impl ScrollParallax {
    fn new() -> Self {
        Self {
            section_nodes: Vec::new(),
            stars: None,
            parallax: Vec2::ZERO,
        }
    }
}

impl Demo for ScrollParallax {
    fn title(&self) -> &str {
        "Vela - Scroll Parallax"
    }

    fn init(&mut self, renderer: &mut Renderer, camera: &mut OrbitCamera) -> anyhow::Result<Scene> {
        let mut scene = Scene::new();

        let material = Material::toon(Vec4::new(1.0, 0.93, 0.94, 1.0));

        let torus = MeshBuilder::new().add_torus(1.0, 0.4, 16, 60).build();
        let cone = MeshBuilder::new().add_cone(1.0, 2.0, 32).build();
        let knot = MeshBuilder::new().add_torus_knot(0.8, 0.35, 100, 16, 2, 3).build();

        for (i, (name, mesh, x)) in [
            ("torus", torus, 2.0),
            ("cone", cone, -2.0),
            ("torus_knot", knot, 2.0),
        ]
        .into_iter()
        .enumerate()
        {
            let idx = scene.add(
                MeshNode::new(name, renderer.upload_mesh(&mesh), material).with_transform(
                    Transform::from_position(Vec3::new(x, -OBJECT_DISTANCE * i as f32, 0.0)),
                ),
            );
            self.section_nodes.push(idx);
        }

        // Star field spanning all sections. A fixed seed keeps the sky
        // stable across runs.
        let mut rng = SeededRandom::new(0x5742);
        let mut positions = Vec::new();
        let mut colors = Vec::new();
        for _ in 0..200 {
            positions.push((rng.next() - 0.5) * 10.0);
            positions
                .push(OBJECT_DISTANCE * 0.5 - rng.next() * OBJECT_DISTANCE * SECTION_COUNT as f32);
            positions.push((rng.next() - 0.5) * 10.0);
            colors.extend_from_slice(&[1.0, 0.93, 0.94]);
        }
        let data = PointCloudData { positions, colors };
        self.stars = Some(renderer.upload(&data, 0.03));

        scene.lights.ambient.intensity = 0.35;
        scene.lights.directional = Some(DirectionalLight {
            direction: Vec3::new(-1.0, -1.0, 0.0).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
        });

        camera.set_target(Vec3::ZERO);
        camera.set_fov_degrees(35.0);
        camera.set_distance(6.0);
        Ok(scene)
    }

    fn update(
        &mut self,
        frame: &FrameState,
        scene: &mut Scene,
        camera: &mut OrbitCamera,
        _renderer: &mut Renderer,
    ) {
        for &idx in &self.section_nodes {
            let node = scene.node_mut(idx);
            node.transform.rotation.x = frame.elapsed * 0.1;
            node.transform.rotation.y = frame.elapsed * 0.12;
        }

        // Wheel position in sections, clamped to the content.
        let sections = (-frame.scroll * 0.25).clamp(0.0, (SECTION_COUNT - 1) as f32);

        // The cursor target moves instantly; the view eases after it.
        let goal = Vec2::new(frame.cursor.x, -frame.cursor.y);
        self.parallax += (goal - self.parallax) * PARALLAX_EASING;

        camera.set_offset(Vec3::new(
            self.parallax.x,
            -sections * OBJECT_DISTANCE + self.parallax.y,
            0.0,
        ));
    }

    fn point_clouds(&self) -> Vec<&GpuPointCloud> {
        self.stars.iter().collect()
    }

    fn orbit_controls(&self) -> bool {
        false
    }
}

fn main() -> anyhow::Result<()> {
    vela_client::run(ScrollParallax::new())
}
