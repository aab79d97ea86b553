//! Runtime for the arena simulation.
//!
//! Drives the deterministic core one frame at a time against a world that
//! answers physics, navigation and animation requests, and reports what
//! happened through one-way notifications.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the frame loop and its builder
//! - [`world`] defines the service bundle and a headless implementation
//! - [`volumes`] turns distances into range-volume callbacks
//! - [`notification`], [`bus`] and [`journal`] carry results to observers
pub mod bus;
pub mod error;
pub mod input;
pub mod journal;
pub mod notification;
pub mod simulation;
pub mod volumes;
pub mod world;

pub use bus::NotificationBus;
pub use error::{Result, RuntimeError};
pub use input::PlayerInput;
pub use journal::{Journal, JournalEntry};
pub use notification::{Clip, Notification, Topic};
pub use simulation::{Simulation, SimulationBuilder};
pub use volumes::{Occupancy, VolumeTracker};
pub use world::{ArenaWorld, HeadlessWorld, WorldConfig};
