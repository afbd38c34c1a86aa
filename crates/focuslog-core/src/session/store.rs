//! Session store: the owned, observable session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Active -> Ended
//!   ^________|________|   (reset, from any state)
//! ```
//!
//! Every command is total. `start_session` while active silently restarts,
//! `log_distraction` while idle still appends, and `end_session` without a
//! start records a zero-minute session.
//!
//! ## Usage
//!
//! ```ignore
//! let store = SessionStore::with_system_clock();
//! let _sub = store.subscribe(|state| render(state));
//! store.start_session();
//! store.log_distraction(DistractionType::QuickCheck);
//! store.end_session();
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;

use super::state::{whole_minutes_between, Distraction, DistractionType, SessionPhase, SessionState};
use crate::clock::{Clock, SystemClock};
use crate::events::SessionEvent;

/// Callback invoked with a snapshot after every mutation.
pub type SessionListener = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct StoreInner {
    state: SessionState,
    listeners: Vec<(u64, SessionListener)>,
    next_listener_id: u64,
}

/// Handle to one session context.
///
/// Clones share the same state. Listeners run after the internal lock is
/// released, so they may call [`SessionStore::snapshot`] but should not
/// mutate the store re-entrantly.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Create a store in the initial empty state.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state: SessionState::default(),
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().state.phase()
    }

    pub fn is_active(&self) -> bool {
        self.lock().state.is_active
    }

    /// Whole seconds since the session started, 0 when not active.
    pub fn elapsed_secs(&self) -> u64 {
        let now = self.clock.now_ms();
        self.lock().state.elapsed_secs(now)
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_session(&self) -> SessionEvent {
        let now = self.clock.now_ms();
        self.update(|state| {
            if state.is_active {
                debug!(
                    discarded = state.distractions.len(),
                    "restarting an active session"
                );
            }
            state.is_active = true;
            state.start_time = Some(now);
            state.end_time = None;
            state.distractions.clear();
            debug!(start_time = now, "session started");
            SessionEvent::SessionStarted { start_time: now }
        })
    }

    pub fn end_session(&self) -> SessionEvent {
        let now = self.clock.now_ms();
        self.update(|state| {
            state.duration = state
                .start_time
                .map(|start| whole_minutes_between(start, now))
                .unwrap_or(0);
            state.is_active = false;
            state.end_time = Some(now);
            debug!(
                duration_minutes = state.duration,
                distractions = state.distractions.len(),
                "session ended"
            );
            SessionEvent::SessionEnded {
                end_time: now,
                duration_minutes: state.duration,
                distraction_count: state.distractions.len(),
            }
        })
    }

    /// Log a distraction stamped with the current time.
    pub fn log_distraction(&self, kind: DistractionType) -> SessionEvent {
        let now = self.clock.now_ms();
        self.log_distraction_at(kind, now)
    }

    /// Log a distraction with an explicit epoch-millisecond timestamp.
    pub fn log_distraction_at(&self, kind: DistractionType, timestamp: i64) -> SessionEvent {
        self.update(|state| {
            state.distractions.push(Distraction::new(kind, timestamp));
            debug!(%kind, timestamp, active = state.is_active, "distraction logged");
            SessionEvent::DistractionLogged {
                kind,
                timestamp,
                total: state.distractions.len(),
            }
        })
    }

    pub fn reset(&self) -> SessionEvent {
        self.update(|state| {
            *state = SessionState::default();
            debug!("session reset");
            SessionEvent::SessionReset
        })
    }

    // ── Observers ────────────────────────────────────────────────────

    /// Register a listener. It is called immediately with the current
    /// snapshot and again after every mutation until the returned handle
    /// is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let listener: SessionListener = Arc::new(listener);
        let (id, snapshot) = {
            let mut inner = self.lock();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.state.clone())
        };
        listener(&snapshot);
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<F>(&self, mutate: F) -> SessionEvent
    where
        F: FnOnce(&mut SessionState) -> SessionEvent,
    {
        let (event, snapshot, listeners) = {
            let mut inner = self.lock();
            let event = mutate(&mut inner.state);
            let listeners: Vec<SessionListener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (event, inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
        event
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Unsubscribe handle returned by [`SessionStore::subscribe`].
///
/// Dropping it detaches the listener.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    inner: Weak<Mutex<StoreInner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
