//! Session data model: distraction kinds, their descriptors, and the
//! session aggregate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Severity class of a distraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistractionType {
    QuickCheck,
    GotDistracted,
    MajorBreak,
}

impl DistractionType {
    pub const ALL: [DistractionType; 3] = [
        DistractionType::QuickCheck,
        DistractionType::GotDistracted,
        DistractionType::MajorBreak,
    ];

    /// Stable identifier, matching the serialized form.
    pub fn id(self) -> &'static str {
        match self {
            DistractionType::QuickCheck => "quick_check",
            DistractionType::GotDistracted => "got_distracted",
            DistractionType::MajorBreak => "major_break",
        }
    }

    /// Static descriptor for this kind.
    pub fn config(self) -> &'static DistractionTypeConfig {
        match self {
            DistractionType::QuickCheck => &DISTRACTION_TYPES[0],
            DistractionType::GotDistracted => &DISTRACTION_TYPES[1],
            DistractionType::MajorBreak => &DISTRACTION_TYPES[2],
        }
    }
}

impl fmt::Display for DistractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for DistractionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "quick_check" | "quick" | "q" => Ok(DistractionType::QuickCheck),
            "got_distracted" | "distracted" | "d" => Ok(DistractionType::GotDistracted),
            "major_break" | "major" | "m" => Ok(DistractionType::MajorBreak),
            _ => Err(ValidationError::UnknownDistractionType(s.to_string())),
        }
    }
}

/// Descriptive metadata for a [`DistractionType`].
///
/// `max_duration_secs` is informational only; nothing enforces it.
/// `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistractionTypeConfig {
    pub id: DistractionType,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub max_duration_secs: Option<u32>,
}

/// Descriptor table, in [`DistractionType::ALL`] order.
pub static DISTRACTION_TYPES: [DistractionTypeConfig; 3] = [
    DistractionTypeConfig {
        id: DistractionType::QuickCheck,
        label: "Quick Check",
        description: "Minor distraction (< 30s)",
        icon: "👀",
        max_duration_secs: Some(30),
    },
    DistractionTypeConfig {
        id: DistractionType::GotDistracted,
        label: "Got Distracted",
        description: "Moderate interruption (1-5 min)",
        icon: "📱",
        max_duration_secs: Some(300),
    },
    DistractionTypeConfig {
        id: DistractionType::MajorBreak,
        label: "Major Break",
        description: "Context switch (> 5 min)",
        icon: "⚠️",
        max_duration_secs: None,
    },
];

/// A single logged interruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distraction {
    #[serde(rename = "type")]
    pub kind: DistractionType,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Distraction {
    pub fn new(kind: DistractionType, timestamp: i64) -> Self {
        Self { kind, timestamp }
    }
}

/// Lifecycle phase derived from a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Active,
    Ended,
}

/// The session aggregate.
///
/// `Default` is the initial empty state that `reset` returns to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_active: bool,
    /// Epoch milliseconds.
    pub start_time: Option<i64>,
    /// Epoch milliseconds.
    pub end_time: Option<i64>,
    /// Chronological, append-only until reset.
    pub distractions: Vec<Distraction>,
    /// Whole minutes, set when the session ends.
    pub duration: u64,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.is_active {
            SessionPhase::Active
        } else if self.end_time.is_some() {
            SessionPhase::Ended
        } else {
            SessionPhase::Idle
        }
    }

    /// Whole seconds since `start_time`, or 0 when not active.
    pub fn elapsed_secs(&self, now_ms: i64) -> u64 {
        match (self.is_active, self.start_time) {
            (true, Some(start)) => (now_ms.saturating_sub(start).max(0) / 1000) as u64,
            _ => 0,
        }
    }

    pub fn count_of(&self, kind: DistractionType) -> usize {
        self.distractions.iter().filter(|d| d.kind == kind).count()
    }
}

/// Whole minutes between two epoch-millisecond instants, floored.
pub(crate) fn whole_minutes_between(start_ms: i64, end_ms: i64) -> u64 {
    end_ms.saturating_sub(start_ms).div_euclid(60_000).max(0) as u64
}
