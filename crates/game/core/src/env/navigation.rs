//! Navigation service.
//!
//! Pathfinding and locomotion are a black box. Queries read snapshots;
//! commands are queued by behavior code as [`NavCommand`]s and applied by the
//! runtime through [`NavigationOracle`].

use glam::Vec3;

use crate::entity::{EntityId, Pose};

/// Per-agent navigation snapshot taken at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavStatus {
    pub path_pending: bool,
    /// Whether the agent stands on the navigation surface.
    pub on_surface: bool,
    pub desired_velocity: Vec3,
}

impl Default for NavStatus {
    fn default() -> Self {
        Self {
            path_pending: false,
            on_surface: true,
            desired_velocity: Vec3::ZERO,
        }
    }
}

/// Movement request produced by behavior code.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavCommand {
    Resume,
    Stop,
    SetDestination(Vec3),
}

/// Read-only navigation queries.
pub trait NavigationQuery {
    /// Current pose of an agent, `None` if the service does not know it.
    fn pose(&self, agent: EntityId) -> Option<Pose>;

    fn is_path_pending(&self, agent: EntityId) -> bool;

    fn is_on_surface(&self, agent: EntityId) -> bool;

    fn desired_velocity(&self, agent: EntityId) -> Vec3;

    /// Nearest surface point within `max_distance` of `point`.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Bundle of the per-agent flags. `None` if the agent is unknown.
    fn status(&self, agent: EntityId) -> Option<NavStatus> {
        self.pose(agent)?;
        Some(NavStatus {
            path_pending: self.is_path_pending(agent),
            on_surface: self.is_on_surface(agent),
            desired_velocity: self.desired_velocity(agent),
        })
    }
}

/// Navigation commands.
pub trait NavigationOracle: NavigationQuery {
    fn request_destination(&mut self, agent: EntityId, point: Vec3);

    fn resume(&mut self, agent: EntityId);

    fn stop(&mut self, agent: EntityId);

    /// Register an agent at a pose. Returns false if the pose is unusable.
    fn place(&mut self, agent: EntityId, pose: Pose) -> bool;

    /// Forget an agent.
    fn remove(&mut self, agent: EntityId);

    fn apply(&mut self, agent: EntityId, command: NavCommand) {
        match command {
            NavCommand::Resume => self.resume(agent),
            NavCommand::Stop => self.stop(agent),
            NavCommand::SetDestination(point) => self.request_destination(agent, point),
        }
    }
}
