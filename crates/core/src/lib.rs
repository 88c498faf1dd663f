//! Vela Core - Procedural Point-Cloud Generation
//!
//! This crate contains the scene-free logic behind the demos: the galaxy
//! parameter set, the point-cloud generator, and the controller that owns
//! the one live GPU resource handle.
//!
//! # Determinism Rules
//!
//! 1. No `rand::thread_rng()` here - use `SeededRandom` only
//! 2. Generation draws from the RNG in a fixed, documented order
//! 3. No GPU or windowing types - the client implements `PointCloudBackend`

pub mod cloud;
pub mod color;
pub mod galaxy;
pub mod params;
pub mod random;

pub use cloud::{GalaxyController, GalaxyError, PointCloudBackend};
pub use color::Color;
pub use galaxy::PointCloudData;
pub use params::{GalaxyParams, ParamError, MAX_POINT_COUNT};
pub use random::SeededRandom;
