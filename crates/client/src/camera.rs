//! Orbit camera with cached matrices and damped controls.
//!
//! The camera circles a target point at a distance, driven by yaw/pitch.
//! Control input moves goal values; `update` eases the live values toward
//! them each frame, giving the drag-and-release glide of typical orbit
//! controls. A rigid `offset` shifts both eye and target, which is what the
//! scroll demo uses for its parallax.

use glam::{Mat4, Vec3};

/// Pitch stays just short of the poles to keep the view basis well defined.
const PITCH_LIMIT: f32 = 1.55;

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 100.0;

/// Orbit camera.
pub struct OrbitCamera {
    target: Vec3,
    offset: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    /// Per-frame easing factor in (0, 1]; 1 snaps instantly.
    smoothing: f32,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,

    // Cached matrices
    view_matrix: Mat4,
    projection_matrix: Mat4,
    position: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Create a camera with the demo defaults: 75 deg fov, 0.1..100 clip.
    pub fn new() -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            offset: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            goal_yaw: 0.0,
            goal_pitch: 0.0,
            goal_distance: 5.0,
            smoothing: 1.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            position: Vec3::ZERO,
        };
        camera.update_matrices();
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Set the point the camera looks at.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_matrices();
    }

    /// Rigid translation applied to both the eye and the target.
    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
        self.update_matrices();
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Set camera distance immediately (also resets the goal).
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.goal_distance = self.distance;
        self.update_matrices();
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set yaw/pitch immediately (also resets the goals).
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.goal_yaw = self.yaw;
        self.goal_pitch = self.pitch;
        self.update_matrices();
    }

    /// Place the camera by an eye position relative to the target.
    pub fn set_position_around_target(&mut self, eye: Vec3) {
        let rel = eye - self.target;
        let distance = rel.length().max(MIN_DISTANCE);
        let pitch = (rel.y / distance).asin();
        let yaw = rel.x.atan2(rel.z);
        self.distance = distance;
        self.goal_distance = distance;
        self.set_angles(yaw, pitch);
    }

    /// Nudge the orbit goals; `update` eases toward them.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.goal_yaw += delta_yaw;
        self.goal_pitch = (self.goal_pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scale the goal distance (wheel zoom).
    pub fn zoom_by(&mut self, factor: f32) {
        self.goal_distance = (self.goal_distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Easing factor applied per frame in `update`; 1.0 disables damping.
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.01, 1.0);
    }

    /// Ease live values toward the goals and refresh matrices.
    pub fn update(&mut self) {
        let k = self.smoothing;
        self.yaw += (self.goal_yaw - self.yaw) * k;
        self.pitch += (self.goal_pitch - self.pitch) * k;
        self.distance += (self.goal_distance - self.distance) * k;
        self.update_matrices();
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov = degrees.to_radians();
        self.update_matrices();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_matrices();
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update_matrices();
    }

    fn update_matrices(&mut self) {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        let target = self.target + self.offset;
        self.position = target + dir * self.distance;

        self.view_matrix = Mat4::look_at_rh(self.position, target, Vec3::Y);
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = OrbitCamera::new();
        assert!((camera.distance() - 5.0).abs() < 0.001);
        assert!((camera.fov() - 75.0_f32.to_radians()).abs() < 0.001);
        assert_eq!(camera.target(), Vec3::ZERO);
        // Yaw 0, pitch 0 puts the camera on +Z looking at the origin.
        assert!((camera.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_set_position_around_target() {
        let mut camera = OrbitCamera::new();
        camera.set_position_around_target(Vec3::new(3.0, 3.0, 3.0));
        assert!((camera.distance() - 27.0_f32.sqrt()).abs() < 1e-4);
        assert!((camera.position() - Vec3::new(3.0, 3.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut camera = OrbitCamera::new();
        camera.set_angles(0.0, 10.0);
        assert!(camera.pitch() <= PITCH_LIMIT);

        camera.orbit(0.0, -100.0);
        camera.set_smoothing(1.0);
        camera.update();
        assert!(camera.pitch() >= -PITCH_LIMIT - 1e-6);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = OrbitCamera::new();
        camera.zoom_by(1000.0);
        camera.update();
        assert!(camera.distance() <= MAX_DISTANCE + 1e-3);

        camera.zoom_by(1e-6);
        camera.update();
        assert!(camera.distance() >= MIN_DISTANCE - 1e-3);
    }

    #[test]
    fn test_damping_converges() {
        let mut camera = OrbitCamera::new();
        camera.set_smoothing(0.1);
        camera.orbit(1.0, 0.5);

        for _ in 0..200 {
            camera.update();
        }
        assert!((camera.yaw() - 1.0).abs() < 1e-3);
        assert!((camera.pitch() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_damping_moves_gradually() {
        let mut camera = OrbitCamera::new();
        camera.set_smoothing(0.1);
        camera.orbit(1.0, 0.0);
        camera.update();
        // One step covers roughly the smoothing fraction of the way.
        assert!(camera.yaw() > 0.05 && camera.yaw() < 0.2);
    }

    #[test]
    fn test_target_look_at() {
        let mut camera = OrbitCamera::new();
        camera.set_target(Vec3::new(1.0, 0.0, 0.0));
        // The view matrix maps the target to a point straight ahead.
        let v = camera.view_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(v.x.abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
        assert!(v.z < 0.0);
    }

    #[test]
    fn test_offset_translates_rigidly() {
        let mut camera = OrbitCamera::new();
        let before = camera.position();
        camera.set_offset(Vec3::new(0.0, -2.0, 0.0));
        let after = camera.position();
        assert!((after - before - Vec3::new(0.0, -2.0, 0.0)).length() < 1e-5);
    }
}
