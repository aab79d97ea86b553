//! Strategy traits executed by states.
//!
//! [`Action`] is a unit of per-tick behavior with side effects only.
//! [`Decision`] is a predicate consulted by transitions. Both are generic over
//! a context type `C` so the same framework can drive any agent model.

/// Per-tick behavior run by a state.
pub trait Action<C>: Send + Sync {
    /// Apply this action's side effects to the context.
    fn act(&self, ctx: &mut C);

    /// Label used in logs and diagnostics.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Predicate evaluated by a transition.
///
/// Decisions should be pure reads of the context. A display-only side effect
/// (for example mirroring the result into an animation flag) is tolerated.
pub trait Decision<C>: Send + Sync {
    /// Evaluate the predicate.
    fn decide(&self, ctx: &mut C) -> bool;

    /// Label used in logs and diagnostics.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Blanket implementation for boxed actions.
///
/// This allows `Box<dyn Action<C>>` to be stored and forwarded uniformly.
impl<C> Action<C> for Box<dyn Action<C>> {
    #[inline]
    fn act(&self, ctx: &mut C) {
        (**self).act(ctx)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Blanket implementation for boxed decisions.
impl<C> Decision<C> for Box<dyn Decision<C>> {
    #[inline]
    fn decide(&self, ctx: &mut C) -> bool {
        (**self).decide(ctx)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Negates a decision.
///
/// The wrapped decision is still evaluated, so its side effects run.
pub struct Not<C> {
    inner: Box<dyn Decision<C>>,
}

impl<C> Not<C> {
    pub fn new(inner: Box<dyn Decision<C>>) -> Self {
        Self { inner }
    }
}

impl<C> Decision<C> for Not<C> {
    fn decide(&self, ctx: &mut C) -> bool {
        !self.inner.decide(ctx)
    }

    fn name(&self) -> &'static str {
        "Not"
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = core::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        flag: bool,
        reads: u32,
    }

    struct ReadFlag;
    impl Decision<TestContext> for ReadFlag {
        fn decide(&self, ctx: &mut TestContext) -> bool {
            ctx.reads += 1;
            ctx.flag
        }
    }

    #[test]
    fn not_inverts_and_still_evaluates_inner() {
        let not = Not::new(Box::new(ReadFlag));
        let mut ctx = TestContext {
            flag: true,
            reads: 0,
        };

        assert!(!not.decide(&mut ctx));
        assert_eq!(ctx.reads, 1);
    }

    #[test]
    fn default_name_is_the_bare_type_name() {
        let boxed: Box<dyn Decision<TestContext>> = Box::new(ReadFlag);
        assert_eq!(boxed.name(), "ReadFlag");
    }
}
