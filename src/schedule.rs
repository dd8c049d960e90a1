use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::Millis;
use crate::reveal::RevealTarget;

/// A deferred "mark this target visible" instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealTask {
    pub target: RevealTarget,
}

/// Fire-and-forget delayed execution. There is deliberately no cancellation
/// handle: a task handed to the scheduler will run when its delay elapses,
/// matching the component's "scheduled timers are never retracted" contract.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Millis, task: RevealTask);
}

struct Entry {
    due: Millis,
    seq: u64,
    task: RevealTask,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the earliest entry; `seq` keeps
        // same-instant tasks in insertion order.
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

/// Deterministic single-threaded timer queue: the event-loop stand-in that
/// delivers delayed reveals. Time only moves forward via [`advance_to`].
///
/// [`advance_to`]: TimerQueue::advance_to
#[derive(Default)]
pub struct TimerQueue {
    now: Millis,
    seq: u64,
    heap: BinaryHeap<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    /// Moves the clock to `t` and returns every task that came due, ordered
    /// by due time then by scheduling order. Moving backwards is a no-op.
    pub fn advance_to(&mut self, t: Millis) -> Vec<RevealTask> {
        if t > self.now {
            self.now = t;
        }
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|head| head.due <= self.now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.task);
            }
        }
        due
    }

    pub fn advance(&mut self, delta: Millis) -> Vec<RevealTask> {
        self.advance_to(self.now.saturating_add(delta))
    }
}

impl Scheduler for TimerQueue {
    fn schedule_after(&mut self, delay: Millis, task: RevealTask) {
        let entry = Entry {
            due: self.now.saturating_add(delay),
            seq: self.seq,
            task,
        };
        self.seq += 1;
        self.heap.push(entry);
    }
}
