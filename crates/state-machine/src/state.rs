//! States and transitions.

use core::fmt;

use crate::{Action, Decision};

/// Index of a state inside its [`StateGraph`](crate::StateGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u16);

impl StateId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome branch of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Sentinel: stay in the current state. Applying it is a no-op.
    Remain,
    /// Switch to the given state.
    State(StateId),
}

impl Target {
    #[inline]
    pub const fn is_remain(self) -> bool {
        matches!(self, Target::Remain)
    }

    #[inline]
    pub const fn state(self) -> Option<StateId> {
        match self {
            Target::Remain => None,
            Target::State(id) => Some(id),
        }
    }
}

/// A `(decision, true target, false target)` triple.
pub struct Transition<C> {
    decision: Box<dyn Decision<C>>,
    on_true: Target,
    on_false: Target,
}

impl<C> Transition<C> {
    pub fn new(decision: Box<dyn Decision<C>>, on_true: Target, on_false: Target) -> Self {
        Self {
            decision,
            on_true,
            on_false,
        }
    }

    /// Evaluate the decision and pick the matching branch.
    pub fn evaluate(&self, ctx: &mut C) -> Target {
        if self.decision.decide(ctx) {
            self.on_true
        } else {
            self.on_false
        }
    }

    pub fn decision_name(&self) -> &'static str {
        self.decision.name()
    }

    pub fn targets(&self) -> [Target; 2] {
        [self.on_true, self.on_false]
    }
}

/// Immutable state definition: ordered actions plus ordered transitions.
///
/// A state is shared by every agent running its graph and is never mutated
/// after the graph is built.
pub struct State<C> {
    name: String,
    actions: Vec<Box<dyn Action<C>>>,
    transitions: Vec<Transition<C>>,
}

impl<C> State<C> {
    pub fn new(
        name: impl Into<String>,
        actions: Vec<Box<dyn Action<C>>>,
        transitions: Vec<Transition<C>>,
    ) -> Self {
        Self {
            name: name.into(),
            actions,
            transitions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run every action in declaration order.
    pub fn run_actions(&self, ctx: &mut C) {
        for action in &self.actions {
            action.act(ctx);
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = &dyn Action<C>> {
        self.actions.iter().map(|a| a.as_ref())
    }

    pub fn transitions(&self) -> &[Transition<C>] {
        &self.transitions
    }
}

impl<C> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
