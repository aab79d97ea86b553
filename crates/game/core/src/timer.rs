//! Frame-driven timers.
//!
//! Delayed work and multi-frame transitions are explicit state advanced by the
//! simulation tick:
//!
//! - [`DeferredQueue`]: tasks due after a delay, cancellable by handle or by
//!   owner so nothing fires for a torn-down agent
//! - [`TimedFade`]: a fixed-duration transition exposing its progress

use crate::entity::EntityId;

/// Handle returned by [`DeferredQueue::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    handle: TimerHandle,
    owner: Option<EntityId>,
    due: f64,
    task: T,
}

/// A task whose delay has elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Due<T> {
    pub handle: TimerHandle,
    pub owner: Option<EntityId>,
    pub task: T,
}

/// Queue of delayed tasks keyed by simulation time.
///
/// Tasks come out in due order; ties come out in scheduling order.
#[derive(Clone, Debug)]
pub struct DeferredQueue<T> {
    now: f64,
    next_handle: u64,
    pending: Vec<Pending<T>>,
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Seconds advanced so far.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `task` to fire `delay` seconds from now.
    pub fn schedule(&mut self, owner: Option<EntityId>, delay: f32, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            owner,
            due: self.now + f64::from(delay.max(0.0)),
            task,
        });
        handle
    }

    /// Cancel one task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every task owned by `owner`. Returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: EntityId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.owner != Some(owner));
        before - self.pending.len()
    }

    /// Number of pending tasks owned by `owner`.
    pub fn pending_for(&self, owner: EntityId) -> usize {
        self.pending
            .iter()
            .filter(|p| p.owner == Some(owner))
            .count()
    }

    /// Drop everything. Time keeps running.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance time and return every task that became due.
    pub fn advance(&mut self, dt: f32) -> Vec<Due<T>> {
        self.now += f64::from(dt.max(0.0));
        let now = self.now;

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.handle.cmp(&b.handle)));
        due.into_iter()
            .map(|p| Due {
                handle: p.handle,
                owner: p.owner,
                task: p.task,
            })
            .collect()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-duration transition with explicit progress.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedFade {
    duration: f32,
    elapsed: f32,
}

impl TimedFade {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`. Returns true once the fade has completed.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.is_complete()
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_due_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(None, 0.3, "late");
        queue.schedule(None, 0.1, "early");
        queue.schedule(None, 0.1, "early-second");

        assert!(queue.advance(0.05).is_empty());
        let fired: Vec<_> = queue.advance(0.3).into_iter().map(|d| d.task).collect();
        assert_eq!(fired, vec!["early", "early-second", "late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut queue = DeferredQueue::new();
        let handle = queue.schedule(None, 0.15, 1);
        queue.schedule(None, 0.15, 2);

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        let fired: Vec<_> = queue.advance(1.0).into_iter().map(|d| d.task).collect();
        assert_eq!(fired, vec![2]);
    }

    #[test]
    fn owner_teardown_cancels_all_owned_tasks() {
        let mut queue = DeferredQueue::new();
        let dead = EntityId(7);
        queue.schedule(Some(dead), 0.15, "drop");
        queue.schedule(Some(dead), 5.0, "dispose");
        queue.schedule(Some(EntityId(8)), 0.15, "other");

        assert_eq!(queue.pending_for(dead), 2);
        assert_eq!(queue.cancel_owner(dead), 2);
        let fired: Vec<_> = queue.advance(10.0).into_iter().map(|d| d.task).collect();
        assert_eq!(fired, vec!["other"]);
    }

    #[test]
    fn fade_reports_progress_fraction() {
        let mut fade = TimedFade::new(2.0);
        assert_eq!(fade.progress(), 0.0);
        assert!(!fade.advance(0.5));
        assert!((fade.progress() - 0.25).abs() < 1e-6);
        assert!(fade.advance(5.0));
        assert_eq!(fade.progress(), 1.0);
    }

    #[test]
    fn zero_length_fade_is_immediately_complete() {
        let fade = TimedFade::new(0.0);
        assert!(fade.is_complete());
        assert_eq!(fade.progress(), 1.0);
    }
}
