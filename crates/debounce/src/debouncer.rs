//! Debounced wrapper around a callback
//!
//! Every call to [`Debounced::call`] cancels the previously scheduled run
//! and schedules a fresh one carrying the new arguments, so a burst of
//! calls collapses into a single run with the last arguments, `delay`
//! after the last call.

use crate::delay::Delay;
use crate::error::Result;
use crate::timer::{TimerService, TokioTimer};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace};

/// Observable state of a debounced wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// Nothing scheduled
    Idle,
    /// One run scheduled, carrying the latest arguments
    Pending,
}

/// The single pending-invocation slot owned by a wrapper
///
/// `generation` is bumped on every arm/disarm. A timer task only fires if
/// the generation it was armed with is still current, which makes a task
/// that lost a race against `call`/`cancel` a no-op.
struct Slot<H, A> {
    pending: Option<H>,
    args: Option<A>,
    generation: u64,
}

impl<H, A> Slot<H, A> {
    fn new() -> Self {
        Self {
            pending: None,
            args: None,
            generation: 0,
        }
    }

    /// Store new arguments and return the generation the next task must carry
    fn arm(&mut self, args: A) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.args = Some(args);
        self.generation
    }

    /// Drop the pending run, returning its timer handle and arguments
    fn disarm(&mut self) -> Option<(H, Option<A>)> {
        let handle = self.pending.take()?;
        self.generation = self.generation.wrapping_add(1);
        Some((handle, self.args.take()))
    }

    /// Claim the arguments for a firing task, returning to Idle
    fn take_if_current(&mut self, generation: u64) -> Option<A> {
        if generation != self.generation || self.pending.is_none() {
            return None;
        }
        self.pending = None;
        self.args.take()
    }
}

struct Shared<A, T: TimerService> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    delay: Delay,
    timer: T,
    slot: Mutex<Slot<T::Handle, A>>,
}

impl<A: Send + 'static, T: TimerService> Shared<A, T> {
    fn fire(&self, generation: u64) {
        // Callback runs unlocked
        let args = self.slot.lock().take_if_current(generation);
        if let Some(args) = args {
            debug!("Debounced callback firing after {}", self.delay);
            (self.callback)(args);
        } else {
            trace!("Stale debounce timer ignored (generation {})", generation);
        }
    }
}

/// A callback wrapped so that rapid calls coalesce into one delayed run
///
/// Holds at most one pending run. Dropping the wrapper cancels it, so the
/// callback never fires after its owner is gone.
pub struct Debounced<A, T: TimerService = TokioTimer> {
    shared: Arc<Shared<A, T>>,
}

/// Debounce `callback` by `delay_ms` on the current tokio runtime
///
/// Negative delays are rejected with `DebounceError::InvalidArgument`.
/// Multiple arguments can be passed as a tuple.
pub fn debounce<A, F>(callback: F, delay_ms: i64) -> Result<Debounced<A, TokioTimer>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::try_new(callback, delay_ms, TokioTimer::current()?)
}

impl<A, T> Debounced<A, T>
where
    A: Send + 'static,
    T: TimerService,
{
    /// Wrap `callback` with an already-validated delay
    pub fn new<F>(callback: F, delay: impl Into<Delay>, timer: T) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                callback: Box::new(callback),
                delay: delay.into(),
                timer,
                slot: Mutex::new(Slot::new()),
            }),
        }
    }

    /// Wrap `callback`, validating a signed millisecond delay
    pub fn try_new<F>(callback: F, delay_ms: i64, timer: T) -> Result<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Ok(Self::new(callback, Delay::from_millis(delay_ms)?, timer))
    }

    /// Record a call, superseding any pending run
    pub fn call(&self, args: A) {
        let shared = &self.shared;
        let mut slot = shared.slot.lock();

        if let Some((handle, _)) = slot.disarm() {
            shared.timer.cancel(handle);
            trace!("Superseded pending debounced call");
        }

        let generation = slot.arm(args);
        let weak: Weak<Shared<A, T>> = Arc::downgrade(shared);
        let handle = shared.timer.schedule(
            shared.delay.as_duration(),
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.fire(generation);
                }
            }),
        );
        slot.pending = Some(handle);
        trace!("Scheduled debounced call in {}", shared.delay);
    }

    /// Cancel the pending run, if any
    ///
    /// Returns true if something was pending.
    pub fn cancel(&self) -> bool {
        let disarmed = self.shared.slot.lock().disarm();
        match disarmed {
            Some((handle, _)) => {
                self.shared.timer.cancel(handle);
                debug!("Cancelled pending debounced call");
                true
            }
            None => false,
        }
    }

    /// Run the pending call now instead of waiting for the delay
    ///
    /// Returns true if a pending call was run.
    pub fn flush(&self) -> bool {
        let disarmed = self.shared.slot.lock().disarm();
        let Some((handle, args)) = disarmed else {
            return false;
        };
        self.shared.timer.cancel(handle);

        match args {
            Some(args) => {
                debug!("Flushing pending debounced call");
                (self.shared.callback)(args);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> DebounceState {
        if self.shared.slot.lock().pending.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == DebounceState::Pending
    }

    pub fn delay(&self) -> Duration {
        self.shared.delay.as_duration()
    }
}

impl<A, T: TimerService> Drop for Debounced<A, T> {
    fn drop(&mut self) {
        if let Some((handle, _)) = self.shared.slot.lock().disarm() {
            self.shared.timer.cancel(handle);
        }
    }
}

impl<A, T: TimerService> std::fmt::Debug for Debounced<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.shared.delay)
            .field("pending", &self.shared.slot.lock().pending.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;
    use crate::DebounceError;
    use std::panic::{self, AssertUnwindSafe};

    type Log = Arc<Mutex<Vec<(&'static str, Duration)>>>;

    fn recording(timer: &ManualTimer, delay_ms: i64) -> (Debounced<&'static str, ManualTimer>, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let clock = timer.clone();
        let debounced = Debounced::try_new(
            move |value| sink.lock().push((value, clock.now())),
            delay_ms,
            timer.clone(),
        )
        .unwrap();
        (debounced, log)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_fires_once_with_last_args() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 500);

        debounced.call("a");
        timer.advance(ms(100));
        debounced.call("b");
        timer.advance(ms(100));
        debounced.call("c");

        assert_eq!(timer.pending(), 1);
        timer.advance(ms(499));
        assert!(log.lock().is_empty());
        assert_eq!(debounced.state(), DebounceState::Pending);

        timer.advance(ms(1));
        assert_eq!(*log.lock(), vec![("c", ms(700))]);
        assert_eq!(debounced.state(), DebounceState::Idle);

        timer.advance(ms(5_000));
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_single_call_fires_after_delay() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 500);

        debounced.call("a");
        timer.advance(ms(1_000));

        assert_eq!(*log.lock(), vec![("a", ms(500))]);
    }

    #[test]
    fn test_calls_spaced_beyond_delay_fire_separately() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 500);

        debounced.call("first");
        timer.advance(ms(600));
        debounced.call("second");
        timer.advance(ms(600));

        assert_eq!(*log.lock(), vec![("first", ms(500)), ("second", ms(1_100))]);
    }

    #[test]
    fn test_zero_delay_is_still_deferred() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 0);

        debounced.call("x");
        assert!(log.lock().is_empty());
        assert!(debounced.is_pending());

        timer.run_due();
        assert_eq!(*log.lock(), vec![("x", Duration::ZERO)]);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 500);

        assert!(!debounced.cancel());
        debounced.call("a");
        timer.advance(ms(200));
        assert!(debounced.cancel());
        assert_eq!(debounced.state(), DebounceState::Idle);
        assert_eq!(timer.pending(), 0);

        timer.advance(ms(1_000));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending_call() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 500);

        debounced.call("a");
        drop(debounced);

        assert_eq!(timer.pending(), 0);
        timer.advance(ms(1_000));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_flush_runs_immediately() {
        let timer = ManualTimer::new();
        let (debounced, log) = recording(&timer, 500);

        assert!(!debounced.flush());
        debounced.call("a");
        debounced.call("b");
        assert!(debounced.flush());
        assert_eq!(*log.lock(), vec![("b", Duration::ZERO)]);

        timer.advance(ms(1_000));
        assert_eq!(log.lock().len(), 1);
    }

    #[test]
    fn test_negative_delay_rejected() {
        let timer = ManualTimer::new();
        let result = Debounced::try_new(|_: ()| {}, -5, timer);
        assert_eq!(
            result.unwrap_err(),
            DebounceError::InvalidArgument { delay_ms: -5 }
        );
    }

    #[test]
    fn test_callback_may_reenter_wrapper() {
        let timer = ManualTimer::new();
        let log: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let slot: Arc<Mutex<Option<Arc<Debounced<u32, ManualTimer>>>>> = Arc::new(Mutex::new(None));

        let sink = Arc::clone(&log);
        let this = Arc::clone(&slot);
        let debounced = Arc::new(Debounced::new(
            move |n: u32| {
                sink.lock().push(n);
                if n < 3 {
                    if let Some(d) = this.lock().as_ref() {
                        d.call(n + 1);
                    }
                }
            },
            ms(10),
            timer.clone(),
        ));
        *slot.lock() = Some(Arc::clone(&debounced));

        debounced.call(1);
        timer.advance(ms(100));
        assert_eq!(*log.lock(), vec![1, 2, 3]);

        // Break the reference cycle
        slot.lock().take();
    }

    #[test]
    fn test_panicking_callback_leaves_wrapper_idle() {
        let timer = ManualTimer::new();
        let debounced = Debounced::new(
            |value: &'static str| {
                if value == "boom" {
                    panic!("callback failed");
                }
            },
            ms(10),
            timer.clone(),
        );

        debounced.call("boom");
        let result = panic::catch_unwind(AssertUnwindSafe(|| timer.advance(ms(10))));
        assert!(result.is_err());
        assert_eq!(debounced.state(), DebounceState::Idle);

        debounced.call("fine");
        timer.advance(ms(10));
        assert_eq!(debounced.state(), DebounceState::Idle);
    }

    #[test]
    fn test_tuple_arguments() {
        let timer = ManualTimer::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let debounced = Debounced::new(
            move |(query, page): (String, u32)| *sink.lock() = Some((query, page)),
            ms(50),
            timer.clone(),
        );

        debounced.call(("rust".to_string(), 1));
        debounced.call(("rust async".to_string(), 2));
        timer.advance(ms(50));

        assert_eq!(*seen.lock(), Some(("rust async".to_string(), 2)));
    }
}
