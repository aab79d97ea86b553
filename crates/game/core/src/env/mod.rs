//! Traits describing the engine services the core consumes.
//!
//! Physics, navigation and animation are black boxes reached only through
//! these narrow interfaces, plus the deterministic random streams every
//! consumer of randomness draws from.
mod animation;
mod error;
mod navigation;
mod physics;
mod rng;

pub use animation::{AnimCommand, AnimParam, AnimValue, AnimationSink};
pub use error::OracleError;
pub use navigation::{NavCommand, NavStatus, NavigationOracle, NavigationQuery};
pub use physics::{Collider, Impulse, ImpulseSink, LayerMask, PhysicsOracle, Ray, RayHit};
pub use rng::{PcgRng, RngOracle, compute_seed};
