use serde::{Deserialize, Serialize};

use crate::session::DistractionType;

/// Every mutation of the session store produces an event.
/// Front ends may log or forward them; observers get full snapshots instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        start_time: i64,
    },
    DistractionLogged {
        kind: DistractionType,
        timestamp: i64,
        /// Distractions recorded so far, including this one.
        total: usize,
    },
    SessionEnded {
        end_time: i64,
        duration_minutes: u64,
        distraction_count: usize,
    },
    SessionReset,
}
