//! Debounced search box
//!
//! Keystrokes feed a debouncer; when the user pauses, the latest query is
//! handed to the owner's [`SearchHandler`] and the box shows a loading
//! indicator until the handler signals completion through [`SearchDone`].

use crate::error::Result;
use debounce::{Debounced, Delay, TimerService, TokioTimer};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Quiet period before a search is issued
pub const DEFAULT_SEARCH_DELAY_MS: i64 = 500;

/// Receives debounced queries
///
/// The handler owns `done` until the search finishes; dropping it (or
/// calling [`SearchDone::finish`]) clears the loading indicator.
pub trait SearchHandler: Send + Sync + 'static {
    fn search(&self, query: String, done: SearchDone);
}

impl<F> SearchHandler for F
where
    F: Fn(String, SearchDone) + Send + Sync + 'static,
{
    fn search(&self, query: String, done: SearchDone) {
        self(query, done)
    }
}

#[derive(Default)]
struct SearchState {
    loading: AtomicBool,
    issued: AtomicU64,
    last_query: Mutex<Option<String>>,
}

/// Completion token for one issued search
///
/// Only the completion of the most recently issued search clears the
/// loading indicator.
#[must_use = "dropping SearchDone immediately marks the search as finished"]
pub struct SearchDone {
    state: Arc<SearchState>,
    seq: u64,
}

impl SearchDone {
    /// Mark the search as finished
    pub fn finish(self) {}

    /// Sequence number of the search this token completes
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl Drop for SearchDone {
    fn drop(&mut self) {
        if self.state.issued.load(Ordering::SeqCst) == self.seq {
            self.state.loading.store(false, Ordering::SeqCst);
        }
    }
}

/// Search input with debounced dispatch and a loading flag
pub struct SearchBar<T: TimerService = TokioTimer> {
    debounced: Debounced<String, T>,
    state: Arc<SearchState>,
}

impl SearchBar<TokioTimer> {
    /// Search box on the current tokio runtime with the default delay
    pub fn with_default_delay(handler: impl SearchHandler) -> Result<Self> {
        Self::try_new(handler, DEFAULT_SEARCH_DELAY_MS, TokioTimer::current()?)
    }
}

impl<T: TimerService> SearchBar<T> {
    pub fn new(handler: impl SearchHandler, delay: impl Into<Delay>, timer: T) -> Self {
        let state = Arc::new(SearchState::default());
        let shared = Arc::clone(&state);

        let debounced = Debounced::new(
            move |query: String| {
                let seq = shared.issued.fetch_add(1, Ordering::SeqCst) + 1;
                shared.loading.store(true, Ordering::SeqCst);
                *shared.last_query.lock() = Some(query.clone());
                info!("Issuing search #{}: {:?}", seq, query);

                let done = SearchDone {
                    state: Arc::clone(&shared),
                    seq,
                };
                handler.search(query, done);
            },
            delay,
            timer,
        );

        Self { debounced, state }
    }

    /// Build with a signed millisecond delay; negative delays are rejected
    pub fn try_new(handler: impl SearchHandler, delay_ms: i64, timer: T) -> Result<Self> {
        Ok(Self::new(handler, Delay::from_millis(delay_ms)?, timer))
    }

    /// Input box changed
    pub fn input(&self, value: impl Into<String>) {
        let value = value.into();
        debug!("Search input changed ({} chars)", value.chars().count());
        self.debounced.call(value);
    }

    /// Drop the pending query without searching
    pub fn cancel(&self) -> bool {
        self.debounced.cancel()
    }

    /// Search the pending query immediately
    pub fn flush(&self) -> bool {
        self.debounced.flush()
    }

    /// A query is waiting for the user to pause
    pub fn is_pending(&self) -> bool {
        self.debounced.is_pending()
    }

    /// A search has been issued and not yet finished
    pub fn is_loading(&self) -> bool {
        self.state.loading.load(Ordering::SeqCst)
    }

    pub fn searches_issued(&self) -> u64 {
        self.state.issued.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.state.last_query.lock().clone()
    }
}
