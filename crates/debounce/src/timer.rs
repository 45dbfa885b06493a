//! Timer services that run deferred tasks
//!
//! A debouncer only needs two things from its host: "run this after a
//! delay" and "forget that scheduled run". `TokioTimer` maps those onto
//! spawned tasks; `ManualTimer` drives them from a virtual clock so
//! timing behavior can be stepped deterministically.

use crate::error::{DebounceError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Deferred unit of work handed to a timer service
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedule/cancel pair provided by the host environment
pub trait TimerService: Send + Sync + 'static {
    /// Opaque handle to a scheduled, not-yet-fired task
    type Handle: Send + 'static;

    /// Run `task` once `delay` has elapsed
    ///
    /// Must never run the task synchronously inside this call, even for a
    /// zero delay.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Cancel a scheduled task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Timer service backed by a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is currently running on
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| DebounceError::NoRuntime)
    }
}

impl TimerService for TokioTimer {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, task: Task) -> JoinHandle<()> {
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }

    fn cancel(&self, handle: JoinHandle<()>) {
        handle.abort();
    }
}

/// Handle to a task scheduled on a [`ManualTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManualHandle {
    deadline: Duration,
    id: u64,
}

impl ManualHandle {
    /// Virtual time at which the task fires
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    // (deadline, id) keeps equal deadlines in scheduling order
    queue: BTreeMap<(Duration, u64), Task>,
}

/// Virtual-clock timer service
///
/// Time only moves when [`advance`](ManualTimer::advance) is called. Clones
/// share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualTimer {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from creation
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of scheduled tasks that have not fired
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Move the clock forward, firing every task whose deadline is reached
    ///
    /// Tasks fire in deadline order with the clock set to their deadline.
    /// Tasks scheduled by a firing task are honored if they fall inside the
    /// window. Returns the number of tasks fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        // Tasks run unlocked
        while let Some(task) = self.pop_due(target) {
            task();
            fired += 1;
        }

        let mut state = self.state.lock();
        if state.now < target {
            state.now = target;
        }
        trace!("Manual timer advanced to {:?} ({} fired)", target, fired);
        fired
    }

    /// Fire tasks already due at the current time (zero-delay tasks)
    pub fn run_due(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut state = self.state.lock();
        let (&(deadline, _), _) = state.queue.first_key_value()?;
        if deadline > target {
            return None;
        }
        let ((deadline, _), task) = state.queue.pop_first()?;
        state.now = deadline;
        Some(task)
    }
}

impl TimerService for ManualTimer {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, task: Task) -> ManualHandle {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        let deadline = state.now + delay;
        state.queue.insert((deadline, id), task);
        ManualHandle { deadline, id }
    }

    fn cancel(&self, handle: ManualHandle) {
        self.state.lock().queue.remove(&(handle.deadline, handle.id));
    }
}
