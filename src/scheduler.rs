//! Timers driving auto-cycle and the deferred audio default.
//!
//! The controller only sees the [`Scheduler`] trait. [`TokioScheduler`] spawns
//! one task per timer and reports firings over an mpsc channel so they are
//! handled on the main event loop like any other event.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    CycleTick,
    ResolveDefaultAudio,
}

/// A timer firing, delivered back to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub id: TimerId,
    pub task: TimerTask,
}

pub trait Scheduler {
    /// Fire `task` every `every`, first after one full period.
    fn schedule_repeating(&mut self, every: Duration, task: TimerTask) -> TimerId;

    /// Fire `task` once after `after`.
    fn schedule_once(&mut self, after: Duration, task: TimerTask) -> TimerId;

    /// Stop a timer. Unknown or finished ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Scheduler backed by tokio tasks.
///
/// Must be used from inside a tokio runtime.
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    tx: mpsc::UnboundedSender<TimerFired>,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::UnboundedSender<TimerFired>) -> Self {
        Self {
            next_id: 0,
            tasks: HashMap::new(),
            tx,
        }
    }

    /// Timers that are scheduled and have not finished.
    pub fn live_timers(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        // Finished one-shot timers are never cancelled explicitly
        self.tasks.retain(|_, task| !task.is_finished());
        TimerId(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, every: Duration, task: TimerTask) -> TimerId {
        let id = self.allocate();
        let start = match tokio::time::Instant::now().checked_add(every) {
            Some(start) if !every.is_zero() => start,
            _ => {
                log::error!("Period {:?} out of range, {:?} will never fire", every, task);
                return id;
            }
        };
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, every);
            loop {
                interval.tick().await;
                if tx.send(TimerFired { id, task }).is_err() {
                    break;
                }
            }
        });
        log::debug!("Scheduled repeating {:?} every {:?} as {:?}", task, every, id);
        self.tasks.insert(id, handle);
        id
    }

    fn schedule_once(&mut self, after: Duration, task: TimerTask) -> TimerId {
        let id = self.allocate();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(TimerFired { id, task });
        });
        log::debug!("Scheduled {:?} in {:?} as {:?}", task, after, id);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            log::debug!("Cancelled timer {:?}", id);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
