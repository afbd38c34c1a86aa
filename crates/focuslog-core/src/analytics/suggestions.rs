//! Rule-based coaching suggestions.
//!
//! Every rule is evaluated independently against the session statistics and
//! all matches become candidates. Candidates are then stably ordered by
//! priority and cut to [`MAX_SUGGESTIONS`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::heatmap::peak_bucket;
use super::score::distractions_per_hour;
use crate::session::{Distraction, DistractionType};

pub const MAX_SUGGESTIONS: usize = 3;

/// Sessions shorter than this only get the "extend your sessions" nudge.
const MIN_ANALYZABLE_MINUTES: u64 = 5;

/// Bucket width assumed when describing the peak window.
const PEAK_WINDOW_MINUTES: usize = 5;

/// Suggestion priority. Ordering is High < Medium < Low, so an ascending
/// sort puts the most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub priority: Priority,
    pub description: String,
}

impl Suggestion {
    fn new(title: &str, priority: Priority, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            priority,
            description: description.into(),
        }
    }
}

/// Statistics the rules read.
struct SessionStats {
    duration: u64,
    count: usize,
    per_hour: f64,
    quick_checks: usize,
    moderate: usize,
    major_breaks: usize,
    max_bucket: u32,
    peak_index: Option<usize>,
}

impl SessionStats {
    fn collect(duration: u64, distractions: &[Distraction], heatmap: &[u32]) -> Self {
        let count = distractions.len();
        let of_kind = |kind| distractions.iter().filter(|d| d.kind == kind).count();
        let (max_bucket, peak_index) = if count > 0 {
            let max = heatmap.iter().copied().max().unwrap_or(0);
            (max, peak_bucket(heatmap))
        } else {
            (0, None)
        };

        Self {
            duration,
            count,
            per_hour: distractions_per_hour(duration, count),
            quick_checks: of_kind(DistractionType::QuickCheck),
            moderate: of_kind(DistractionType::GotDistracted),
            major_breaks: of_kind(DistractionType::MajorBreak),
            max_bucket,
            peak_index,
        }
    }

    fn share_at_least(&self, part: usize, fraction: f64) -> bool {
        part as f64 >= self.count as f64 * fraction
    }
}

/// Produce at most three suggestions for a session, most urgent first.
pub fn generate_suggestions(
    duration: u64,
    distractions: &[Distraction],
    heatmap: &[u32],
) -> Vec<Suggestion> {
    if duration < MIN_ANALYZABLE_MINUTES {
        return vec![Suggestion::new(
            "Extend Your Focus Sessions",
            Priority::Medium,
            "This session was quite short. Try aiming for at least 15-25 minutes to build meaningful focus patterns.",
        )];
    }

    let stats = SessionStats::collect(duration, distractions, heatmap);
    let mut suggestions = Vec::new();

    if stats.count >= 5 && stats.per_hour >= 15.0 {
        suggestions.push(Suggestion::new(
            "Schedule Regular Breaks",
            Priority::High,
            "High distraction count suggests mental fatigue. Plan breaks every 25-30 minutes to maintain focus and prevent burnout.",
        ));
    }

    if let Some(peak) = stats.peak_index.filter(|_| stats.max_bucket >= 2 && stats.duration >= 15) {
        let peak_time = peak * PEAK_WINDOW_MINUTES;
        suggestions.push(Suggestion::new(
            "Try the Pomodoro Technique",
            Priority::High,
            format!(
                "Your distractions peaked around {}-{} minutes. Consider breaking sessions into 25-minute intervals with 5-minute breaks.",
                peak_time,
                peak_time + PEAK_WINDOW_MINUTES
            ),
        ));
    }

    if stats.count >= 3 && stats.share_at_least(stats.moderate, 0.6) {
        suggestions.push(Suggestion::new(
            "Silence Notifications",
            Priority::Medium,
            "Most distractions were moderate interruptions. Enable Do Not Disturb mode or use Focus modes during work sessions.",
        ));
    }

    if stats.count >= 4 && stats.share_at_least(stats.quick_checks, 0.5) {
        suggestions.push(Suggestion::new(
            "Remove Device Temptations",
            Priority::Medium,
            "You had many quick checks. Try placing your phone in another room or using app blockers during focus time.",
        ));
    }

    if stats.major_breaks >= 2 && stats.duration >= 15 {
        suggestions.push(Suggestion::new(
            "Minimize Context Switching",
            Priority::High,
            "Multiple major breaks detected. Try to batch similar tasks together and eliminate unnecessary context switches.",
        ));
    }

    if (10..25).contains(&stats.duration) && stats.count <= 2 && stats.per_hour < 8.0 {
        suggestions.push(Suggestion::new(
            "Extend Your Sessions",
            Priority::Low,
            "You maintained excellent focus! Try extending your sessions to 45-60 minutes to build deeper concentration and flow states.",
        ));
    }

    if stats.duration >= 15 && stats.count <= 1 && stats.per_hour < 4.0 {
        suggestions.push(Suggestion::new(
            "Excellent Focus!",
            Priority::Low,
            "You demonstrated strong focus this session. Maintain this momentum by keeping your environment consistent and distraction-free.",
        ));
    }

    if (2..5).contains(&stats.count) && (8.0..15.0).contains(&stats.per_hour) {
        suggestions.push(Suggestion::new(
            "Identify Your Triggers",
            Priority::Medium,
            "Track what causes your distractions. Common triggers include notifications, hunger, fatigue, or unclear task goals.",
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(if stats.count <= 1 {
            Suggestion::new(
                "Keep Building Your Focus Habit",
                Priority::Low,
                "Great start! Continue tracking your sessions to identify patterns. Aim for 25-50 minute focused work blocks for optimal productivity.",
            )
        } else {
            Suggestion::new(
                "Track More Sessions for Insights",
                Priority::Low,
                "Complete more sessions to identify your distraction patterns. Consistency in tracking will reveal helpful trends and opportunities for improvement.",
            )
        });
    }

    // `sort_by_key` is stable, so ties keep rule order.
    suggestions.sort_by_key(|s| s.priority);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
