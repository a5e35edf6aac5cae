//! Debounce Module
//!
//! Coalesces bursts of calls into a single delayed invocation that receives
//! the arguments of the last call in the burst.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

// == Debounce ==
/// Wraps `callback` so that it runs only after `delay` has passed without
/// another call.
///
/// # Example
/// ```ignore
/// let search = debounce(|query: String| fetch_suggestions(query), Duration::from_millis(300));
/// search.call("e".into());
/// search.call("et".into());
/// search.call("eth".into()); // only this one reaches fetch_suggestions
/// ```
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        shared: Arc::new(Shared {
            callback: Box::new(callback),
            delay,
            pending: Mutex::new(None),
        }),
    }
}

// == Debounced ==
/// A debounced callable produced by [`debounce`].
///
/// Clones share one pending slot, so they behave as the same wrapper.
/// Separately constructed wrappers never affect each other.
pub struct Debounced<A> {
    shared: Arc<Shared<A>>,
}

struct Shared<A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debounced<A> {
    // == Call ==
    /// Schedules the callback with `args`, superseding any pending call.
    ///
    /// Returns immediately; the callback never runs on the caller's stack.
    /// Must be called from within a Tokio runtime.
    pub fn call(&self, args: A) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let shared = Arc::clone(&self.shared);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(shared.delay).await;
            (shared.callback)(args);
        }));
    }

    // == Cancel ==
    /// Drops the pending call, if any, without running it.
    pub fn cancel(&self) {
        if let Some(previous) = self.lock_pending().take() {
            previous.abort();
        }
    }

    // == Is Pending ==
    /// Returns true while a scheduled call has not yet run.
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The quiet period a call waits for.
    pub fn delay(&self) -> Duration {
        self.shared.delay
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.shared.delay)
            .finish_non_exhaustive()
    }
}
