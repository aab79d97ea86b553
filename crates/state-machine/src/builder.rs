//! Builder utilities for ergonomic graph construction.
//!
//! States are declared by name and may reference each other before they are
//! declared. Names are resolved to [`StateId`]s once, in [`GraphBuilder::build`].

use crate::{
    Action, Decision, GraphError, State, StateGraph, StateId, Target, Transition,
    TransitionPolicy,
};

/// A transition target referenced by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRef {
    Remain,
    Named(String),
}

impl From<&str> for TargetRef {
    fn from(name: &str) -> Self {
        TargetRef::Named(name.to_string())
    }
}

impl From<String> for TargetRef {
    fn from(name: String) -> Self {
        TargetRef::Named(name)
    }
}

struct PendingTransition<C> {
    decision: Box<dyn Decision<C>>,
    on_true: TargetRef,
    on_false: TargetRef,
}

/// Accumulates the actions and transitions of one state.
pub struct StateBuilder<C> {
    name: String,
    actions: Vec<Box<dyn Action<C>>>,
    transitions: Vec<PendingTransition<C>>,
}

impl<C: 'static> StateBuilder<C> {
    fn new(name: String) -> Self {
        Self {
            name,
            actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Append an action; actions run in the order they are added.
    pub fn action(&mut self, action: impl Action<C> + 'static) -> &mut Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Append an already boxed action.
    pub fn boxed_action(&mut self, action: Box<dyn Action<C>>) -> &mut Self {
        self.actions.push(action);
        self
    }

    /// Append a transition; transitions are evaluated in the order they are added.
    pub fn transition(
        &mut self,
        decision: impl Decision<C> + 'static,
        on_true: impl Into<TargetRef>,
        on_false: impl Into<TargetRef>,
    ) -> &mut Self {
        self.boxed_transition(Box::new(decision), on_true, on_false)
    }

    pub fn boxed_transition(
        &mut self,
        decision: Box<dyn Decision<C>>,
        on_true: impl Into<TargetRef>,
        on_false: impl Into<TargetRef>,
    ) -> &mut Self {
        self.transitions.push(PendingTransition {
            decision,
            on_true: on_true.into(),
            on_false: on_false.into(),
        });
        self
    }
}

/// Collects named states and resolves them into a [`StateGraph`].
pub struct GraphBuilder<C> {
    policy: TransitionPolicy,
    states: Vec<StateBuilder<C>>,
}

impl<C: 'static> GraphBuilder<C> {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            policy,
            states: Vec::new(),
        }
    }

    /// Declare a new state, or continue an existing one with the same name.
    pub fn state(&mut self, name: &str) -> &mut StateBuilder<C> {
        let index = match self.states.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.states.push(StateBuilder::new(name.to_string()));
                self.states.len() - 1
            }
        };
        &mut self.states[index]
    }

    /// Resolve names and validate the graph.
    pub fn build(self, initial: &str) -> Result<StateGraph<C>, GraphError> {
        if self.states.is_empty() {
            return Err(GraphError::Empty);
        }

        let names: Vec<String> = self.states.iter().map(|s| s.name.clone()).collect();
        let resolve = |target: &TargetRef| -> Result<Target, GraphError> {
            match target {
                TargetRef::Remain => Ok(Target::Remain),
                TargetRef::Named(name) => names
                    .iter()
                    .position(|n| n == name)
                    .map(|i| Target::State(StateId(i as u16)))
                    .ok_or_else(|| GraphError::UnknownState(name.clone())),
            }
        };

        let initial = names
            .iter()
            .position(|n| n == initial)
            .map(|i| StateId(i as u16))
            .ok_or_else(|| GraphError::UnknownState(initial.to_string()))?;

        let mut states = Vec::with_capacity(self.states.len());
        for builder in self.states {
            let mut transitions = Vec::with_capacity(builder.transitions.len());
            for pending in builder.transitions {
                transitions.push(Transition::new(
                    pending.decision,
                    resolve(&pending.on_true)?,
                    resolve(&pending.on_false)?,
                ));
            }
            states.push(State::new(builder.name, builder.actions, transitions));
        }

        StateGraph::new(states, initial, self.policy)
    }
}
