// src/state/scheduler.rs
use std::time::Instant;

/// Single-threaded queue of deferred tasks.
///
/// Tasks become runnable once their due time has passed. Nothing is ever
/// cancelled; callers decide at run time whether a task still applies.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    pending: Vec<Scheduled<T>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Scheduled<T> {
    due: Instant,
    seq: u64,
    task: T,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: T) {
        self.pending.push(Scheduled {
            due,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Remove and return every task due at `now`, earliest first.
    /// Tasks sharing a due time come out in the order they were scheduled.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut ready, waiting): (Vec<_>, Vec<_>) = self.pending
            .drain(..)
            .partition(|s| s.due <= now);
        self.pending = waiting;

        ready.sort_by_key(|s| (s.due, s.seq));
        ready.into_iter().map(|s| s.task).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.due).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
