//! # focuslog Core Library
//!
//! Core logic for focuslog, a focus-session tracker that records distractions
//! during a timed work session and turns them into simple analytics. The CLI
//! is a thin front end over this crate; any other UI can drive it the same way.
//!
//! ## Architecture
//!
//! - **Session store**: an owned, observable state machine
//!   (idle -> active -> ended) holding one session's distractions
//! - **Elapsed ticker**: a push-based per-second observer derived from the
//!   store, armed only while someone listens and the session is active
//! - **Analytics**: pure functions for focus score, heatmap, intensity,
//!   suggestions and formatting
//! - **Storage**: TOML-based host configuration (sessions are never persisted)
//!
//! ## Key Components
//!
//! - [`SessionStore`]: Session lifecycle and observers
//! - [`ElapsedTime`]: Elapsed-seconds ticker
//! - [`SessionReport`]: Bundled analytics for a finished session
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod clock;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use analytics::{
    calculate_focus_score, format_duration, format_time, generate_distraction_heatmap,
    generate_suggestions, get_distraction_intensity, render_heatmap_ascii, DistractionIntensity,
    HeatmapData, Priority, SessionReport, Suggestion, DEFAULT_HEATMAP_INTERVAL,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::SessionEvent;
pub use session::{
    Distraction, DistractionType, DistractionTypeConfig, ElapsedSubscription, ElapsedTime,
    SessionPhase, SessionState, SessionStore, Subscription, DISTRACTION_TYPES,
};
pub use storage::Config;
