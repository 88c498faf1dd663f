//! Point-cloud ownership: the backend seam and the galaxy controller.
//!
//! The controller makes ownership of the GPU-backed resource unambiguous:
//! it holds the current parameters and at most one live handle, and
//! regeneration always releases the previous handle first.

use thiserror::Error;

use crate::galaxy::{self, PointCloudData};
use crate::params::{GalaxyParams, ParamError};
use crate::random::SeededRandom;

/// The rendering-side seam. The client implements this over wgpu; tests use
/// a counting mock.
pub trait PointCloudBackend {
    /// An allocated, drawable point cloud.
    type Handle;

    /// Allocate buffers for `data` and bind them as a drawable point cloud.
    fn upload(&mut self, data: &PointCloudData, point_size: f32) -> Self::Handle;

    /// Release the resources behind `handle`.
    fn dispose(&mut self, handle: Self::Handle);
}

/// Regeneration failure. Always local to the call: the previously attached
/// point cloud is untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GalaxyError {
    #[error(transparent)]
    InvalidParams(#[from] ParamError),
}

/// Owns the current parameter set, the random source, and the one live
/// point-cloud handle.
pub struct GalaxyController<B: PointCloudBackend> {
    params: GalaxyParams,
    rng: SeededRandom,
    handle: Option<B::Handle>,
}

impl<B: PointCloudBackend> GalaxyController<B> {
    pub fn new(params: GalaxyParams, seed: u32) -> Self {
        Self {
            params,
            rng: SeededRandom::new(seed),
            handle: None,
        }
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    /// Mutable access for the UI layer. Edits take effect on the next
    /// [`regenerate`](Self::regenerate) call.
    pub fn params_mut(&mut self) -> &mut GalaxyParams {
        &mut self.params
    }

    pub fn handle(&self) -> Option<&B::Handle> {
        self.handle.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Rebuild the point cloud from the current parameters.
    ///
    /// On success the previous handle (if any) has been disposed and exactly
    /// one new handle is live. On error nothing changed: the previous cloud
    /// stays attached and the RNG state is not advanced.
    pub fn regenerate(&mut self, backend: &mut B) -> Result<(), GalaxyError> {
        self.params.validate()?;

        let data = galaxy::generate(&self.params, &mut self.rng);
        if let Some(old) = self.handle.take() {
            backend.dispose(old);
        }
        self.handle = Some(backend.upload(&data, self.params.size));

        tracing::debug!(
            count = self.params.count,
            branches = self.params.branches,
            "regenerated galaxy point cloud"
        );
        Ok(())
    }

    /// Release the current point cloud, if any.
    pub fn detach(&mut self, backend: &mut B) {
        if let Some(old) = self.handle.take() {
            backend.dispose(old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts allocations so tests can assert on live handles.
    #[derive(Default)]
    struct MockBackend {
        next_id: u32,
        live: Vec<u32>,
        uploads: u32,
        disposals: u32,
    }

    impl PointCloudBackend for MockBackend {
        type Handle = u32;

        fn upload(&mut self, data: &PointCloudData, _point_size: f32) -> u32 {
            assert_eq!(data.positions.len(), data.colors.len());
            self.next_id += 1;
            self.uploads += 1;
            self.live.push(self.next_id);
            self.next_id
        }

        fn dispose(&mut self, handle: u32) {
            let idx = self
                .live
                .iter()
                .position(|&h| h == handle)
                .expect("double dispose");
            self.live.remove(idx);
            self.disposals += 1;
        }
    }

    fn controller() -> GalaxyController<MockBackend> {
        let params = GalaxyParams {
            count: 100,
            ..Default::default()
        };
        GalaxyController::new(params, 42)
    }

    #[test]
    fn repeated_regeneration_keeps_one_live_handle() {
        let mut backend = MockBackend::default();
        let mut ctl = controller();

        for _ in 0..10 {
            ctl.regenerate(&mut backend).unwrap();
            assert_eq!(backend.live.len(), 1);
        }
        assert_eq!(backend.uploads, 10);
        assert_eq!(backend.disposals, 9);
        assert!(ctl.is_attached());
    }

    #[test]
    fn old_handle_disposed_before_new_upload() {
        let mut backend = MockBackend::default();
        let mut ctl = controller();

        ctl.regenerate(&mut backend).unwrap();
        let first = *ctl.handle().unwrap();
        ctl.regenerate(&mut backend).unwrap();
        let second = *ctl.handle().unwrap();

        assert_ne!(first, second);
        assert_eq!(backend.live, vec![second]);
    }

    #[test]
    fn failed_regeneration_leaves_previous_cloud() {
        let mut backend = MockBackend::default();
        let mut ctl = controller();
        ctl.regenerate(&mut backend).unwrap();
        let live_before = backend.live.clone();

        ctl.params_mut().branches = 0;
        let err = ctl.regenerate(&mut backend).unwrap_err();
        assert_eq!(err, GalaxyError::InvalidParams(ParamError::ZeroBranches));

        assert_eq!(backend.live, live_before);
        assert!(ctl.is_attached());

        // Fixing the parameter recovers on the next call.
        ctl.params_mut().branches = 4;
        ctl.regenerate(&mut backend).unwrap();
        assert_eq!(backend.live.len(), 1);
    }

    #[test]
    fn failed_first_regeneration_attaches_nothing() {
        let mut backend = MockBackend::default();
        let params = GalaxyParams {
            count: 0,
            ..Default::default()
        };
        let mut ctl: GalaxyController<MockBackend> = GalaxyController::new(params, 1);

        assert!(ctl.regenerate(&mut backend).is_err());
        assert!(!ctl.is_attached());
        assert_eq!(backend.uploads, 0);
    }

    #[test]
    fn detach_releases_the_handle() {
        let mut backend = MockBackend::default();
        let mut ctl = controller();
        ctl.regenerate(&mut backend).unwrap();

        ctl.detach(&mut backend);
        assert!(!ctl.is_attached());
        assert!(backend.live.is_empty());

        // Detaching twice is a no-op.
        ctl.detach(&mut backend);
        assert_eq!(backend.disposals, 1);
    }
}
