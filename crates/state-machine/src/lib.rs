//! Lightweight data-driven state machine for real-time agents.
//!
//! A [`StateGraph`] is an immutable set of [`State`]s shared by every agent
//! that runs it. Each state owns an ordered list of [`Action`]s and an ordered
//! list of [`Transition`]s. Per-agent data lives in the context type `C` and in
//! a [`StateMachine`] cursor that only records the current state.
//!
//! - **Frame driven**: one [`StateMachine::tick`] per agent per frame
//! - **Actions first**: all actions run unconditionally before transitions
//! - **Configurable arbitration**: see [`TransitionPolicy`]
//! - **Validated up front**: [`GraphBuilder::build`] rejects dangling targets
//!
//! # Architecture
//!
//! - [`Action`] / [`Decision`]: strategy traits implemented by game code
//! - [`Transition`]: decision plus true/false [`Target`]
//! - [`State`]: actions plus transitions
//! - [`StateGraph`]: validated collection of states plus policy
//! - [`StateMachine`]: per-agent cursor into a graph

pub mod action;
pub mod builder;
pub mod graph;
pub mod machine;
pub mod state;

pub use action::{Action, Decision, Not};
pub use builder::{GraphBuilder, StateBuilder, TargetRef};
pub use graph::{GraphError, StateGraph, TransitionPolicy};
pub use machine::{StateMachine, Step};
pub use state::{State, StateId, Target, Transition};
