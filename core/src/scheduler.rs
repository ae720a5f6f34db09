//! Host timer capability
//!
//! Widgets never touch the host's timer facility directly. They register
//! callbacks with an injected [`Scheduler`], so the browser binding and the
//! manual test clock (`testing::ManualScheduler`) are interchangeable.
//!
//! All callbacks run on the host's single UI thread. A scheduler must not hold
//! any internal borrow while a task runs: tasks routinely call back into the
//! scheduler to cancel themselves or to arm the next one-shot.

/// Opaque handle identifying a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Timer facility of the embedding host.
pub trait Scheduler {
    /// Current wall-clock time in milliseconds
    fn now_ms(&self) -> u64;

    /// Run `task` once after `delay_ms`.
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Run `task` every `interval_ms` until cancelled.
    fn every(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle;

    /// Cancel a pending task.
    ///
    /// Unknown handles and handles of tasks that already finished are ignored,
    /// so cancelling is always safe to repeat.
    fn cancel(&self, handle: TaskHandle);
}
