//! Cooperative, single-threaded timer queue.
//!
//! Continuations are stored with a due time on a virtual millisecond clock and
//! handed back to the owner when the clock is advanced past that time. Nothing
//! here sleeps or spawns; the caller decides how real time maps onto
//! [`Scheduler::advance_to`].

/// Handle returned by [`Scheduler::schedule`], used to cancel a pending task.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TaskId,
    due: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queues `task` to fire `delay_ms` after the current clock value.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.pending.push(Pending {
            id,
            due: self.now.saturating_add(delay_ms),
            task,
        });
        id
    }

    /// Removes a task before it fires. Returns `false` if it already fired or
    /// was cancelled.
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

    /// Milliseconds until the earliest pending task is due.
    pub fn next_delay(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Takes the earliest task due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskId, T)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(idx, _)| idx)?;
        let Pending { id, due, task } = self.pending.remove(idx);
        self.now = self.now.max(due);
        Some((id, task))
    }

    pub fn advance_to(&mut self, t: u64) {
        self.now = self.now.max(t);
    }
}
