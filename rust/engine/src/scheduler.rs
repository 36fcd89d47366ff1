//! Deferred work for the engine.
//!
//! The engine never blocks. When a pair completes it hands a
//! [`ScheduledTask`] to a [`Scheduler`] and the host delivers it back once
//! the delay has passed, either through [`crate::engine::Engine::advance`]
//! (virtual time) or [`crate::engine::Engine::run_task`] (host-owned timers).
//! Every task carries the [`Generation`] it was scheduled under; a task from
//! an older generation is dropped when it runs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::session::PendingPair;

/// Virtual time unit used by the engine and its schedulers.
pub type Millis = u64;

/// Tag for one board lifetime, bumped on every new game and reset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub const FIRST: Generation = Generation(1);

    pub fn next(self) -> Generation {
        Generation(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Compare a completed pair captured at scheduling time
    Resolve(PendingPair),
    /// Hide a transient message unless a newer one replaced it
    ClearMessage { message_id: u64 },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub generation: Generation,
    pub kind: TaskKind,
}

/// Timer abstraction injected into the engine.
pub trait Scheduler {
    /// Current time on this scheduler's clock.
    fn now(&self) -> Millis;

    /// Queues `task` to become due `delay` after [`Scheduler::now`].
    fn schedule(&mut self, delay: Millis, task: ScheduledTask);

    /// Drops every queued task of `generation`, returning how many were removed.
    fn cancel(&mut self, generation: Generation) -> usize;

    /// Removes the earliest task due at or before `until` and moves the clock
    /// to its due time. Ties run in scheduling order.
    fn pop_due(&mut self, until: Millis) -> Option<ScheduledTask>;

    /// Moves the clock forward to `until` once nothing else is due.
    fn settle(&mut self, until: Millis);

    /// Number of queued tasks.
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Entry {
    due: Millis,
    seq: u64,
    task: ScheduledTask,
}

/// Deterministic scheduler running on a virtual clock that only moves when
/// the host advances it.
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    now: Millis,
    seq: u64,
    queue: Vec<Entry>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Due time of the next queued task, if any.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.iter().map(|e| e.due).min()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.queue.iter().map(|e| &e.task)
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Millis {
        self.now
    }

    fn schedule(&mut self, delay: Millis, task: ScheduledTask) {
        self.seq += 1;
        self.queue.push(Entry {
            due: self.now.saturating_add(delay),
            seq: self.seq,
            task,
        });
    }

    fn cancel(&mut self, generation: Generation) -> usize {
        let before = self.queue.len();
        self.queue.retain(|e| e.task.generation != generation);
        before - self.queue.len()
    }

    fn pop_due(&mut self, until: Millis) -> Option<ScheduledTask> {
        let (idx, _) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))?;
        let entry = self.queue.swap_remove(idx);
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
