//! Per-agent cursor into a shared [`StateGraph`].

use crate::{StateGraph, StateId, Target};

/// Result of one [`StateMachine::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub previous: StateId,
    pub current: StateId,
}

impl Step {
    #[inline]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// The only per-agent state-machine data: which state is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateMachine {
    current: StateId,
}

impl StateMachine {
    /// Start at the graph's initial state.
    pub fn new<C>(graph: &StateGraph<C>) -> Self {
        Self {
            current: graph.initial(),
        }
    }

    /// Start at an explicit state, e.g. when restoring an agent.
    pub fn starting_at(current: StateId) -> Self {
        Self { current }
    }

    #[inline]
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Run one frame: every action of the current state, then transitions.
    pub fn tick<C>(&mut self, graph: &StateGraph<C>, ctx: &mut C) -> Step {
        let previous = self.current;
        if let Some(state) = graph.state(previous) {
            state.run_actions(ctx);
        }

        if let Target::State(next) = graph.arbitrate(previous, ctx) {
            self.current = next;
        }

        Step {
            previous,
            current: self.current,
        }
    }

    /// Force the current state. Used by external events such as a reset.
    pub fn reset<C>(&mut self, graph: &StateGraph<C>) {
        self.current = graph.initial();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TargetRef;
    use crate::{Action, Decision, GraphBuilder, TransitionPolicy};

    #[derive(Default)]
    struct TestContext {
        in_range: bool,
        sees: bool,
        log: Vec<&'static str>,
    }

    struct Record(&'static str);
    impl Action<TestContext> for Record {
        fn act(&self, ctx: &mut TestContext) {
            ctx.log.push(self.0);
        }
    }

    struct InRange;
    impl Decision<TestContext> for InRange {
        fn decide(&self, ctx: &mut TestContext) -> bool {
            ctx.in_range
        }
    }

    struct Sees;
    impl Decision<TestContext> for Sees {
        fn decide(&self, ctx: &mut TestContext) -> bool {
            ctx.sees
        }
    }

    fn hunt_graph(policy: TransitionPolicy) -> StateGraph<TestContext> {
        let mut builder = GraphBuilder::new(policy);
        builder
            .state("hunt")
            .action(Record("hunt"))
            .transition(InRange, "melee", TargetRef::Remain)
            .transition(Sees, "ranged", TargetRef::Remain);
        builder
            .state("melee")
            .action(Record("melee"))
            .transition(InRange, TargetRef::Remain, "hunt");
        builder.state("ranged").action(Record("ranged"));
        builder.build("hunt").expect("valid graph")
    }

    #[test]
    fn actions_run_before_transitions() {
        let graph = hunt_graph(TransitionPolicy::LastWins);
        let mut machine = StateMachine::new(&graph);
        let mut ctx = TestContext {
            in_range: true,
            ..Default::default()
        };

        let step = machine.tick(&graph, &mut ctx);
        assert!(step.changed());
        assert_eq!(graph.name_of(step.current), "melee");
        assert_eq!(ctx.log, vec!["hunt"]);

        machine.tick(&graph, &mut ctx);
        assert_eq!(ctx.log, vec!["hunt", "melee"]);
    }

    #[test]
    fn last_wins_and_first_match_disagree_on_two_hits() {
        let mut ctx = TestContext {
            in_range: true,
            sees: true,
            ..Default::default()
        };

        let last = hunt_graph(TransitionPolicy::LastWins);
        let mut m = StateMachine::new(&last);
        assert_eq!(last.name_of(m.tick(&last, &mut ctx).current), "ranged");

        let first = hunt_graph(TransitionPolicy::FirstMatch);
        let mut m = StateMachine::new(&first);
        assert_eq!(first.name_of(m.tick(&first, &mut ctx).current), "melee");
    }

    #[test]
    fn remain_keeps_current_state() {
        let graph = hunt_graph(TransitionPolicy::LastWins);
        let mut machine = StateMachine::new(&graph);
        let mut ctx = TestContext::default();

        for _ in 0..3 {
            let step = machine.tick(&graph, &mut ctx);
            assert!(!step.changed());
        }
        assert_eq!(graph.name_of(machine.current()), "hunt");
        assert_eq!(ctx.log.len(), 3);
    }

    #[test]
    fn reset_returns_to_initial() {
        let graph = hunt_graph(TransitionPolicy::LastWins);
        let mut machine = StateMachine::new(&graph);
        let mut ctx = TestContext {
            in_range: true,
            ..Default::default()
        };
        machine.tick(&graph, &mut ctx);
        assert_ne!(machine.current(), graph.initial());

        machine.reset(&graph);
        assert_eq!(machine.current(), graph.initial());
    }
}
