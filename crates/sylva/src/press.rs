//! Short-press vs long-press disambiguation on nodes.
//!
//! Every pointer gets its own press record, so concurrent touches never share a "handled" flag.
//! Time is supplied by the caller in milliseconds; a long press becomes due `threshold_ms` after
//! pointer-down and is delivered either by [`PressTracker::tick`] or, if no tick ran in between,
//! by the pointer-up that follows.
//!
//! ```
//! use sylva::press::{PressEnd, PressTracker};
//! use sylva::NodeId;
//!
//! let mut presses = PressTracker::new(420);
//! presses.pointer_down(1, NodeId::new(7), 1_000);
//! assert_eq!(presses.pointer_up(1, 1_100), PressEnd::Short(NodeId::new(7)));
//!
//! presses.pointer_down(1, NodeId::new(7), 2_000);
//! assert_eq!(presses.tick(2_420), vec![NodeId::new(7)]);
//! assert_eq!(presses.pointer_up(1, 2_500), PressEnd::Handled(NodeId::new(7)));
//! ```

use std::collections::BTreeMap;
use sylva_core::NodeId;

/// Pointer or touch identifier.
pub type PointerId = u64;

pub const DEFAULT_LONG_PRESS_MS: u64 = 420;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    /// Long-press timer armed.
    Pending,
    /// Long press already delivered; the pointer-up must not toggle.
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    node: NodeId,
    down_ms: u64,
    state: PressState,
}

/// How a press ended on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEnd {
    /// Released before the threshold.
    Short(NodeId),
    /// The threshold elapsed but no tick delivered it; the long press is due now.
    Long(NodeId),
    /// The long press was already delivered by a tick.
    Handled(NodeId),
    /// No press was active for this pointer.
    None,
}

#[derive(Debug, Clone)]
pub struct PressTracker {
    presses: BTreeMap<PointerId, Press>,
    threshold_ms: u64,
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_PRESS_MS)
    }
}

impl PressTracker {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            presses: BTreeMap::new(),
            threshold_ms,
        }
    }

    /// Applies to presses already armed as well as new ones.
    pub fn set_threshold_ms(&mut self, threshold_ms: u64) {
        self.threshold_ms = threshold_ms;
    }

    /// Arms a long-press timer. A previous press on the same pointer is discarded.
    pub fn pointer_down(&mut self, pointer: PointerId, node: NodeId, now_ms: u64) {
        self.presses.insert(
            pointer,
            Press {
                node,
                down_ms: now_ms,
                state: PressState::Pending,
            },
        );
    }

    pub fn pointer_up(&mut self, pointer: PointerId, now_ms: u64) -> PressEnd {
        let Some(press) = self.presses.remove(&pointer) else {
            return PressEnd::None;
        };
        match press.state {
            PressState::Fired => PressEnd::Handled(press.node),
            PressState::Pending if self.is_due(&press, now_ms) => PressEnd::Long(press.node),
            PressState::Pending => PressEnd::Short(press.node),
        }
    }

    /// Cancels a pending timer. Returns whether one was armed.
    pub fn pointer_leave(&mut self, pointer: PointerId) -> bool {
        self.cancel(pointer)
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) -> bool {
        self.cancel(pointer)
    }

    fn cancel(&mut self, pointer: PointerId) -> bool {
        self.presses
            .remove(&pointer)
            .is_some_and(|p| p.state == PressState::Pending)
    }

    fn is_due(&self, press: &Press, now_ms: u64) -> bool {
        now_ms.saturating_sub(press.down_ms) >= self.threshold_ms
    }

    /// Fires every pending press whose threshold has elapsed, in pointer order.
    pub fn tick(&mut self, now_ms: u64) -> Vec<NodeId> {
        let threshold = self.threshold_ms;
        let mut fired = Vec::new();
        for press in self.presses.values_mut() {
            if press.state == PressState::Pending
                && now_ms.saturating_sub(press.down_ms) >= threshold
            {
                press.state = PressState::Fired;
                fired.push(press.node);
            }
        }
        fired
    }

    /// Earliest time at which [`PressTracker::tick`] would fire something.
    pub fn next_deadline(&self) -> Option<u64> {
        self.presses
            .values()
            .filter(|p| p.state == PressState::Pending)
            .map(|p| p.down_ms.saturating_add(self.threshold_ms))
            .min()
    }

    pub fn is_pending(&self, pointer: PointerId) -> bool {
        self.presses
            .get(&pointer)
            .is_some_and(|p| p.state == PressState::Pending)
    }

    pub fn active_count(&self) -> usize {
        self.presses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: NodeId = NodeId::new(3);
    const M: NodeId = NodeId::new(9);

    #[test]
    fn release_before_threshold_is_short() {
        let mut p = PressTracker::new(420);
        p.pointer_down(1, N, 100);
        assert!(p.tick(519).is_empty());
        assert_eq!(p.pointer_up(1, 519), PressEnd::Short(N));
        assert_eq!(p.active_count(), 0);
    }

    #[test]
    fn tick_fires_once_and_suppresses_the_toggle() {
        let mut p = PressTracker::new(420);
        p.pointer_down(1, N, 100);
        assert_eq!(p.tick(520), vec![N]);
        assert!(p.tick(900).is_empty(), "a press fires at most once");
        assert_eq!(p.pointer_up(1, 950), PressEnd::Handled(N));
    }

    #[test]
    fn late_release_without_tick_is_long() {
        let mut p = PressTracker::new(420);
        p.pointer_down(1, N, 0);
        assert_eq!(p.pointer_up(1, 420), PressEnd::Long(N));
    }

    #[test]
    fn leave_and_cancel_disarm_the_timer() {
        let mut p = PressTracker::new(420);
        p.pointer_down(1, N, 0);
        p.pointer_down(2, M, 0);
        assert!(p.pointer_leave(1));
        assert!(p.pointer_cancel(2));
        assert!(p.tick(10_000).is_empty());
        assert_eq!(p.pointer_up(1, 10_000), PressEnd::None);
        assert!(!p.pointer_cancel(2));
    }

    #[test]
    fn pointers_are_tracked_independently() {
        let mut p = PressTracker::new(420);
        p.pointer_down(1, N, 0);
        p.pointer_down(2, M, 300);
        assert_eq!(p.next_deadline(), Some(420));
        assert_eq!(p.tick(420), vec![N]);
        assert!(p.is_pending(2));
        assert_eq!(p.next_deadline(), Some(720));
        assert_eq!(p.pointer_up(2, 500), PressEnd::Short(M));
        assert_eq!(p.pointer_up(1, 500), PressEnd::Handled(N));
    }

    #[test]
    fn clock_going_backwards_is_not_due() {
        let mut p = PressTracker::new(420);
        p.pointer_down(1, N, 1_000);
        assert!(p.tick(10).is_empty());
        assert_eq!(p.pointer_up(1, 10), PressEnd::Short(N));
    }
}
