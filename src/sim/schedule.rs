//! Cancelable tick scheduling
//!
//! One recurring frame loop (the scroll driver) plus one-shot timers counted in
//! simulation ticks. Nothing here reads wall time; the host decides when a tick
//! happens.

use serde::{Deserialize, Serialize};

/// Handle returned when a task is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

/// What a one-shot timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Settle delay after a round resolved
    SettleRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Timer {
    handle: TaskHandle,
    remaining_ticks: u32,
    action: TimerAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    next_id: u64,
    frame_loop: Option<TaskHandle>,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }

    /// Start the recurring frame loop, replacing any running one
    pub fn start_frame_loop(&mut self) -> TaskHandle {
        let handle = self.allocate();
        self.frame_loop = Some(handle);
        handle
    }

    pub fn frame_loop_active(&self) -> bool {
        self.frame_loop.is_some()
    }

    /// Run `action` after `ticks` further calls to [`Scheduler::advance`]
    pub fn schedule(&mut self, ticks: u32, action: TimerAction) -> TaskHandle {
        let handle = self.allocate();
        self.timers.push(Timer {
            handle,
            remaining_ticks: ticks.max(1),
            action,
        });
        handle
    }

    /// Cancel a task. Returns false if it already fired or was canceled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if self.frame_loop == Some(handle) {
            self.frame_loop = None;
            return true;
        }
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Count down one tick and return the actions whose timers fired, in schedule order
    pub fn advance(&mut self) -> Vec<TimerAction> {
        let mut fired = Vec::new();
        self.timers.retain_mut(|timer| {
            timer.remaining_ticks -= 1;
            if timer.remaining_ticks == 0 {
                fired.push(timer.action);
                false
            } else {
                true
            }
        });
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once_after_delay() {
        let mut sched = Scheduler::new();
        sched.schedule(3, TimerAction::SettleRound);
        assert!(sched.advance().is_empty());
        assert!(sched.advance().is_empty());
        assert_eq!(sched.advance(), vec![TimerAction::SettleRound]);
        assert!(sched.advance().is_empty());
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_zero_delay_waits_one_tick() {
        let mut sched = Scheduler::new();
        sched.schedule(0, TimerAction::SettleRound);
        assert_eq!(sched.advance(), vec![TimerAction::SettleRound]);
    }

    #[test]
    fn test_cancel_timer() {
        let mut sched = Scheduler::new();
        let handle = sched.schedule(2, TimerAction::SettleRound);
        assert!(sched.cancel(handle));
        assert!(!sched.cancel(handle));
        assert!(sched.advance().is_empty());
        assert!(sched.advance().is_empty());
    }

    #[test]
    fn test_frame_loop_cancel() {
        let mut sched = Scheduler::new();
        let first = sched.start_frame_loop();
        let second = sched.start_frame_loop();
        assert_ne!(first, second);
        assert!(!sched.cancel(first));
        assert!(sched.frame_loop_active());
        assert!(sched.cancel(second));
        assert!(!sched.frame_loop_active());
    }
}
