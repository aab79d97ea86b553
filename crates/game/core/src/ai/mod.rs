//! Enemy brains: the context graphs run against, the closed set of actions
//! and decisions, and the per-kind graphs built from them.
mod context;

pub mod actions;
pub mod decisions;
pub mod graphs;

pub use context::{AgentContext, BrainTuning, Outbox, TargetSnapshot};
pub use graphs::{AgentGraph, BrainRegistry, graph_for};
