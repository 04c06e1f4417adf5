//! Ordering policies over tasks.
//!
//! Both policies order by due time first; a task that is not yet due can
//! never outrank one that is. They differ only in how ties on the due time
//! are broken: static priority, or priority boosted by waiting time.

use std::cell::Cell;
use std::cmp::Ordering;

use crate::core::heap::Compare;
use crate::core::task::Task;

/// Hook for ordering policies that factor the current instant into
/// comparisons.
///
/// Schedulers pin the instant exactly once before each heap operation, so
/// every comparison within one sift sequence observes the same `now`. The
/// default implementation ignores the instant.
pub trait TimeAnchored {
    /// Pin the instant subsequent comparisons will observe.
    fn set_now(&self, _now_ms: u128) {}
}

/// Due time ascending; ties broken by static priority, higher first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DueTimeOrder;

impl TimeAnchored for DueTimeOrder {}

impl<P> Compare<Task<P>> for DueTimeOrder {
    fn compare(&self, a: &Task<P>, b: &Task<P>) -> Ordering {
        a.due_at_ms
            .cmp(&b.due_at_ms)
            .then_with(|| b.priority.total_cmp(&a.priority))
    }
}

/// Due time ascending; ties broken by effective score, higher first.
///
/// The effective score is `priority + (now - created_at) * aging_factor`, so
/// a low-priority task with a nonzero factor steadily gains rank the longer
/// it waits and eventually overtakes static high-priority tasks with the
/// same due time. Tasks without a factor keep their static priority.
#[derive(Debug, Clone, Default)]
pub struct AgingOrder {
    now_ms: Cell<u128>,
}

impl AgingOrder {
    /// Create a policy anchored at instant zero; schedulers re-anchor it
    /// before every heap operation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
        }
    }

    /// Create a policy pre-anchored at `now_ms`, for ordering snapshots
    /// outside a scheduler.
    #[must_use]
    pub const fn anchored_at(now_ms: u128) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }
}

impl TimeAnchored for AgingOrder {
    fn set_now(&self, now_ms: u128) {
        self.now_ms.set(now_ms);
    }
}

impl<P> Compare<Task<P>> for AgingOrder {
    fn compare(&self, a: &Task<P>, b: &Task<P>) -> Ordering {
        a.due_at_ms.cmp(&b.due_at_ms).then_with(|| {
            let now = self.now_ms.get();
            b.effective_score(now).total_cmp(&a.effective_score(now))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, due_at_ms: u128, priority: f64) -> Task<()> {
        Task::new(id, due_at_ms, priority, "test", ()).with_created_at(0)
    }

    #[test]
    fn test_due_time_dominates() {
        let early = task("early", 500, 1.0);
        let late = task("late", 1_000, 99.0);
        assert_eq!(DueTimeOrder.compare(&early, &late), Ordering::Less);
        assert_eq!(DueTimeOrder.compare(&late, &early), Ordering::Greater);
    }

    #[test]
    fn test_priority_breaks_due_time_ties() {
        let low = task("low", 500, 1.0);
        let high = task("high", 500, 9.0);
        assert_eq!(DueTimeOrder.compare(&high, &low), Ordering::Less);
        assert_eq!(DueTimeOrder.compare(&low, &high), Ordering::Greater);
        assert_eq!(DueTimeOrder.compare(&low, &low), Ordering::Equal);
    }

    #[test]
    fn test_aging_never_outranks_earlier_due_time() {
        let aged = task("aged", 1_000, 1.0).with_aging_factor(100.0);
        let fresh = task("fresh", 500, 0.0);
        let order = AgingOrder::anchored_at(1_000_000);
        assert_eq!(order.compare(&fresh, &aged), Ordering::Less);
    }

    #[test]
    fn test_starvation_resolves_over_time() {
        // A: low priority, ages. B: high priority, never ages.
        let a = task("a", 500, 1.0).with_aging_factor(0.001);
        let b = task("b", 500, 10.0);

        // Shortly after creation B still wins the tie.
        let early = AgingOrder::anchored_at(1_000);
        assert_eq!(early.compare(&b, &a), Ordering::Less);

        // 1 + 20_000_000 * 0.001 = 20_001 > 10: A has overtaken B.
        let late = AgingOrder::anchored_at(20_000_000);
        assert_eq!(late.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_set_now_moves_the_anchor() {
        let a = task("a", 500, 1.0).with_aging_factor(0.001);
        let b = task("b", 500, 10.0);
        let order = AgingOrder::new();
        assert_eq!(order.compare(&b, &a), Ordering::Less);
        order.set_now(20_000_000);
        assert_eq!(order.compare(&a, &b), Ordering::Less);
    }
}
