//! Push-based elapsed-time observer.
//!
//! [`ElapsedTime`] derives "whole seconds since the session started" from a
//! [`SessionStore`] and pushes it to subscribers once per tick. The ticker is
//! a tokio task that exists only while there is at least one subscriber and
//! the session is active:
//!
//! - first subscriber attaches to the store; last one detaches
//! - every session change aborts the running ticker and, if the session is
//!   still active, spawns a fresh one
//! - when the session is inactive the value drops to 0 and no ticker runs
//!
//! Listeners are only notified when the value changes, except for the
//! immediate emission each new subscriber receives. Each arm/disarm bumps a
//! generation; a tick only publishes if its generation is still current.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace};

use super::state::SessionState;
use super::store::{SessionStore, Subscription};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback receiving elapsed whole seconds.
pub type ElapsedListener = Arc<dyn Fn(u64) + Send + Sync>;

struct ElapsedInner {
    value: u64,
    listeners: Vec<(u64, ElapsedListener)>,
    next_listener_id: u64,
    generation: u64,
    ticker: Option<JoinHandle<()>>,
    upstream: Option<Subscription>,
}

struct ElapsedShared {
    store: SessionStore,
    runtime: Handle,
    tick_interval: Duration,
    inner: Mutex<ElapsedInner>,
}

/// Derived, per-tick elapsed seconds of the current session.
#[derive(Clone)]
pub struct ElapsedTime {
    shared: Arc<ElapsedShared>,
}

impl ElapsedTime {
    /// Observe `store`, spawning tickers on `runtime` with the default
    /// one-second interval.
    pub fn new(store: SessionStore, runtime: Handle) -> Self {
        Self::with_tick_interval(store, runtime, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_tick_interval(store: SessionStore, runtime: Handle, tick_interval: Duration) -> Self {
        Self {
            shared: Arc::new(ElapsedShared {
                store,
                runtime,
                tick_interval,
                inner: Mutex::new(ElapsedInner {
                    value: 0,
                    listeners: Vec::new(),
                    next_listener_id: 0,
                    generation: 0,
                    ticker: None,
                    upstream: None,
                }),
            }),
        }
    }

    /// Last published value.
    pub fn get(&self) -> u64 {
        self.shared.lock().value
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().listeners.len()
    }

    /// Whether a ticker task is currently armed.
    pub fn is_ticking(&self) -> bool {
        self.shared
            .lock()
            .ticker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Register a listener. It receives the current value immediately.
    pub fn subscribe<F>(&self, listener: F) -> ElapsedSubscription
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        let listener: ElapsedListener = Arc::new(listener);
        let (id, value, first) = {
            let mut inner = self.shared.lock();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.value, inner.listeners.len() == 1)
        };
        listener(value);

        if first {
            let weak = Arc::downgrade(&self.shared);
            let upstream = self.shared.store.subscribe(move |state| {
                if let Some(shared) = weak.upgrade() {
                    ElapsedShared::on_session_change(&shared, state);
                }
            });
            let mut inner = self.shared.lock();
            if inner.listeners.is_empty() {
                drop(inner);
                drop(upstream);
                self.shared.disarm();
            } else {
                inner.upstream = Some(upstream);
            }
        }

        ElapsedSubscription {
            shared: self.shared.clone(),
            id,
        }
    }
}

impl ElapsedShared {
    fn lock(&self) -> MutexGuard<'_, ElapsedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_session_change(shared: &Arc<ElapsedShared>, state: &SessionState) {
        let (previous, generation) = {
            let mut inner = shared.lock();
            inner.generation += 1;
            (inner.ticker.take(), inner.generation)
        };
        if let Some(handle) = previous {
            handle.abort();
        }

        if !state.is_active {
            shared.publish(generation, 0);
            return;
        }

        let weak = Arc::downgrade(shared);
        let period = shared.tick_interval;
        let handle = shared.runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if !tick(&weak, generation) {
                    break;
                }
            }
        });
        debug!(interval_ms = period.as_millis() as u64, "elapsed ticker armed");

        let mut inner = shared.lock();
        if inner.listeners.is_empty() || inner.generation != generation {
            handle.abort();
        } else if let Some(previous) = inner.ticker.replace(handle) {
            previous.abort();
        }
    }

    /// Store and broadcast `value`, unless a newer session change has
    /// superseded `generation`.
    fn publish(&self, generation: u64, value: u64) {
        let listeners: Vec<ElapsedListener> = {
            let mut inner = self.lock();
            if inner.generation != generation || inner.value == value {
                return;
            }
            inner.value = value;
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(value);
        }
    }

    /// Release the ticker and the store subscription.
    fn disarm(&self) {
        let (ticker, upstream) = {
            let mut inner = self.lock();
            inner.value = 0;
            inner.generation += 1;
            (inner.ticker.take(), inner.upstream.take())
        };
        if let Some(handle) = ticker {
            handle.abort();
            debug!("elapsed ticker disarmed");
        }
        drop(upstream);
    }
}

impl Drop for ElapsedShared {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = inner.ticker.take() {
            handle.abort();
        }
    }
}

/// One ticker iteration. Returns false once the ticker should stop.
fn tick(weak: &Weak<ElapsedShared>, generation: u64) -> bool {
    let Some(shared) = weak.upgrade() else {
        return false;
    };
    let now = shared.store.clock().now_ms();
    let state = shared.store.snapshot();
    if !state.is_active {
        return false;
    }
    let secs = state.elapsed_secs(now);
    trace!(elapsed_secs = secs, "tick");
    shared.publish(generation, secs);
    true
}

/// Unsubscribe handle returned by [`ElapsedTime::subscribe`].
///
/// Dropping the last handle stops the ticker.
#[must_use = "dropping an ElapsedSubscription immediately unsubscribes"]
pub struct ElapsedSubscription {
    shared: Arc<ElapsedShared>,
    id: u64,
}

impl ElapsedSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for ElapsedSubscription {
    fn drop(&mut self) {
        let now_empty = {
            let mut inner = self.shared.lock();
            inner.listeners.retain(|(id, _)| *id != self.id);
            inner.listeners.is_empty()
        };
        if now_empty {
            self.shared.disarm();
        }
    }
}
