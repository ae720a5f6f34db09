//! Browser timers
//!
//! `Scheduler` backed by `gloo-timers`. Dropping a gloo timer clears it, so a
//! task stays armed exactly as long as its entry lives in the task map.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use tickdown_core::{Scheduler, TaskHandle};

#[allow(dead_code)] // held only for their Drop
enum Task {
    Once(Timeout),
    Every(Interval),
}

/// Scheduler over `setTimeout` / `setInterval` and `Date.now()`.
#[derive(Default)]
pub struct BrowserScheduler {
    tasks: Rc<RefCell<HashMap<u64, Task>>>,
    next_id: Cell<u64>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = self.next_id();
        let tasks = Rc::downgrade(&self.tasks);
        let timeout = Timeout::new(delay_ms, move || {
            // Forget the fired timeout before running: the task may arm the next one.
            if let Some(tasks) = tasks.upgrade() {
                let fired = tasks.borrow_mut().remove(&id);
                drop(fired);
            }
            task();
        });
        self.tasks.borrow_mut().insert(id, Task::Once(timeout));
        TaskHandle::from_raw(id)
    }

    fn every(&self, interval_ms: u32, mut task: Box<dyn FnMut()>) -> TaskHandle {
        let id = self.next_id();
        let interval = Interval::new(interval_ms, move || task());
        self.tasks.borrow_mut().insert(id, Task::Every(interval));
        TaskHandle::from_raw(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        let removed = self.tasks.borrow_mut().remove(&handle.raw());
        drop(removed);
    }
}
