//! Enemy population direction: banded schedule, caps, kill waves and spawn
//! placement around the target.
mod director;
mod error;
mod placement;
mod schedule;

pub use director::{SpawnCommand, SpawnContext, SpawnDirector};
pub use error::SpawnError;
pub use placement::{SpawnArea, annulus_point, choose_spawn_point, unconstrained_point};
pub use schedule::{SpawnBand, SpawnSchedule};
