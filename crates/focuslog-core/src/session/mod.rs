//! Session lifecycle: data model, the observable store, and the derived
//! elapsed-time ticker.

mod elapsed;
mod state;
mod store;

pub use elapsed::{ElapsedListener, ElapsedSubscription, ElapsedTime, DEFAULT_TICK_INTERVAL};
pub use state::{
    Distraction, DistractionType, DistractionTypeConfig, SessionPhase, SessionState,
    DISTRACTION_TYPES,
};
pub use store::{SessionListener, SessionStore, Subscription};
