//! Deferred tasks - one-shot actions due at an absolute host time
//!
//! The only producer today is the level-up pulse, whose highlight has to be switched off
//! 500ms after it is switched on. Tasks live inside the engine, so resetting the engine
//! cancels them; nothing fires against a game that no longer exists.
//!
//! Storage is a fixed-capacity stack array; scheduling never allocates.

use arrayvec::ArrayVec;

/// Maximum number of pending tasks.
pub const MAX_PENDING: usize = 8;

/// Work the host asks the engine to perform later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    ClearLevelHighlight,
}

/// Handle returned by [`DeferredTasks::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TaskId,
    due_ms: f64,
    task: DeferredTask,
}

/// Pending one-shot tasks ordered by nothing in particular; `take_due` sorts out what fired.
#[derive(Debug, Clone, Default)]
pub struct DeferredTasks {
    pending: ArrayVec<Pending, MAX_PENDING>,
    next_id: u32,
}

impl DeferredTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` at host time `due_ms`. Returns `None` when the queue is full.
    pub fn schedule(&mut self, due_ms: f64, task: DeferredTask) -> Option<TaskId> {
        let id = TaskId(self.next_id);
        self.pending
            .try_push(Pending { id, due_ms, task })
            .ok()?;
        self.next_id = self.next_id.wrapping_add(1);
        Some(id)
    }

    /// Cancel one task. Returns false if it already fired or was never scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every task due at or before `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: f64) -> ArrayVec<DeferredTask, MAX_PENDING> {
        let mut due: ArrayVec<Pending, MAX_PENDING> = ArrayVec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|p| p.task).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_once_when_due() {
        let mut tasks = DeferredTasks::new();
        tasks.schedule(500.0, DeferredTask::ClearLevelHighlight);

        assert!(tasks.take_due(499.0).is_empty());
        let fired = tasks.take_due(500.0);
        assert_eq!(fired.as_slice(), &[DeferredTask::ClearLevelHighlight]);
        assert!(tasks.take_due(10_000.0).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut tasks = DeferredTasks::new();
        let id = tasks.schedule(10.0, DeferredTask::ClearLevelHighlight).unwrap();
        assert!(tasks.cancel(id));
        assert!(!tasks.cancel(id));
        assert!(tasks.take_due(100.0).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut tasks = DeferredTasks::new();
        tasks.schedule(10.0, DeferredTask::ClearLevelHighlight);
        tasks.schedule(20.0, DeferredTask::ClearLevelHighlight);
        assert_eq!(tasks.len(), 2);
        tasks.cancel_all();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_full_queue_refuses() {
        let mut tasks = DeferredTasks::new();
        for i in 0..MAX_PENDING {
            assert!(tasks.schedule(i as f64, DeferredTask::ClearLevelHighlight).is_some());
        }
        assert!(tasks.schedule(0.0, DeferredTask::ClearLevelHighlight).is_none());
    }
}
