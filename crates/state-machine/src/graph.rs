//! Validated state graphs and transition arbitration.

use crate::{State, StateId, Target};

/// How the outcomes of several transitions in one tick are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionPolicy {
    /// Evaluate every transition in order; the last non-remain outcome wins.
    ///
    /// Every decision runs each tick, so display side effects of later
    /// decisions are always applied.
    #[default]
    LastWins,

    /// Evaluate transitions in order and stop at the first non-remain outcome.
    FirstMatch,
}

impl TransitionPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastWins => "last-wins",
            Self::FirstMatch => "first-match",
        }
    }
}

impl core::str::FromStr for TransitionPolicy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last_wins" | "lastwins" => Ok(Self::LastWins),
            "first-match" | "first_match" | "firstmatch" => Ok(Self::FirstMatch),
            other => Err(GraphError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Errors raised while assembling a graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("state graph has no states")]
    Empty,

    #[error("state graph exceeds {max} states")]
    TooManyStates { max: usize },

    #[error("duplicate state name `{0}`")]
    DuplicateState(String),

    #[error("unknown state name `{0}`")]
    UnknownState(String),

    #[error("state `{state}` transitions to missing state {target}")]
    DanglingTarget { state: String, target: StateId },

    #[error("initial state {0} does not exist")]
    MissingInitial(StateId),

    #[error("unknown transition policy `{0}`")]
    UnknownPolicy(String),
}

/// Immutable, validated collection of states.
///
/// One graph is built at startup per agent template and shared by every agent
/// of that template.
pub struct StateGraph<C> {
    states: Vec<State<C>>,
    initial: StateId,
    policy: TransitionPolicy,
}

impl<C> StateGraph<C> {
    pub const MAX_STATES: usize = u16::MAX as usize;

    /// Build a graph, checking that every target and the initial state exist.
    pub fn new(
        states: Vec<State<C>>,
        initial: StateId,
        policy: TransitionPolicy,
    ) -> Result<Self, GraphError> {
        if states.is_empty() {
            return Err(GraphError::Empty);
        }
        if states.len() > Self::MAX_STATES {
            return Err(GraphError::TooManyStates {
                max: Self::MAX_STATES,
            });
        }
        if initial.index() >= states.len() {
            return Err(GraphError::MissingInitial(initial));
        }

        for state in &states {
            for transition in state.transitions() {
                for target in transition.targets().into_iter().filter_map(Target::state) {
                    if target.index() >= states.len() {
                        return Err(GraphError::DanglingTarget {
                            state: state.name().to_string(),
                            target,
                        });
                    }
                }
            }
        }

        Ok(Self {
            states,
            initial,
            policy,
        })
    }

    #[inline]
    pub fn initial(&self) -> StateId {
        self.initial
    }

    #[inline]
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Returns a copy of this graph's arbitration with a different policy.
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Look up a state. Ids handed out by this graph are always valid.
    pub fn state(&self, id: StateId) -> Option<&State<C>> {
        self.states.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s.name() == name)
            .map(|i| StateId(i as u16))
    }

    pub fn name_of(&self, id: StateId) -> &str {
        self.state(id).map(State::name).unwrap_or("<unknown>")
    }

    /// Evaluate the transitions of `current` and return the chosen target.
    ///
    /// Returns [`Target::Remain`] when no transition produced a switch.
    pub fn arbitrate(&self, current: StateId, ctx: &mut C) -> Target {
        let Some(state) = self.state(current) else {
            return Target::Remain;
        };

        let mut chosen = Target::Remain;
        for transition in state.transitions() {
            let outcome = transition.evaluate(ctx);
            if outcome.is_remain() {
                continue;
            }
            chosen = outcome;
            if self.policy == TransitionPolicy::FirstMatch {
                break;
            }
        }
        chosen
    }
}

impl<C> core::fmt::Debug for StateGraph<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateGraph")
            .field("states", &self.states)
            .field("initial", &self.initial)
            .field("policy", &self.policy)
            .finish()
    }
}
