//! One-shot analytics bundle for a session.

use serde::{Deserialize, Serialize};

use super::heatmap::{generate_distraction_heatmap, HeatmapData};
use super::score::{calculate_focus_score, get_distraction_intensity, DistractionIntensity};
use super::suggestions::{generate_suggestions, Suggestion};
use crate::session::{DistractionType, SessionState};

/// Distraction counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistractionBreakdown {
    pub quick_check: usize,
    pub got_distracted: usize,
    pub major_break: usize,
}

/// Everything a results screen shows for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub duration_minutes: u64,
    pub distraction_count: usize,
    pub breakdown: DistractionBreakdown,
    pub focus_score: u8,
    pub interval_minutes: u64,
    pub heatmap: HeatmapData,
    pub intensity: Vec<DistractionIntensity>,
    pub suggestions: Vec<Suggestion>,
}

impl SessionReport {
    /// Build a report from a session snapshot.
    ///
    /// Uses the recorded `duration`, so an in-progress session reports as
    /// zero minutes. A session that never started has an empty heatmap.
    pub fn from_state(state: &SessionState, interval_minutes: u64) -> Self {
        let duration = state.duration;
        let heatmap = match state.start_time {
            Some(start) => generate_distraction_heatmap(
                &state.distractions,
                start,
                duration,
                interval_minutes,
            ),
            None => Vec::new(),
        };

        Self {
            duration_minutes: duration,
            distraction_count: state.distractions.len(),
            breakdown: DistractionBreakdown {
                quick_check: state.count_of(DistractionType::QuickCheck),
                got_distracted: state.count_of(DistractionType::GotDistracted),
                major_break: state.count_of(DistractionType::MajorBreak),
            },
            focus_score: calculate_focus_score(duration, state.distractions.len()),
            interval_minutes,
            intensity: heatmap.iter().map(|&c| get_distraction_intensity(c)).collect(),
            suggestions: generate_suggestions(duration, &state.distractions, &heatmap),
            heatmap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Distraction;

    #[test]
    fn report_for_ended_session() {
        let state = SessionState {
            is_active: false,
            start_time: Some(0),
            end_time: Some(30 * 60_000),
            distractions: vec![
                Distraction::new(DistractionType::QuickCheck, 60_000),
                Distraction::new(DistractionType::QuickCheck, 2 * 60_000),
                Distraction::new(DistractionType::MajorBreak, 21 * 60_000),
            ],
            duration: 30,
        };

        let report = SessionReport::from_state(&state, 5);
        assert_eq!(report.distraction_count, 3);
        assert_eq!(report.breakdown.quick_check, 2);
        assert_eq!(report.breakdown.major_break, 1);
        // 6/h -> 70
        assert_eq!(report.focus_score, 70);
        assert_eq!(report.heatmap, vec![2, 0, 0, 0, 1, 0]);
        assert_eq!(report.intensity[0], DistractionIntensity::High);
        assert_eq!(report.intensity[4], DistractionIntensity::Medium);
        assert_eq!(report.intensity[1], DistractionIntensity::Low);
        assert!(!report.suggestions.is_empty());
    }

    #[test]
    fn report_for_never_started_session() {
        let state = SessionState {
            distractions: vec![Distraction::new(DistractionType::QuickCheck, 1)],
            ..Default::default()
        };
        let report = SessionReport::from_state(&state, 5);
        assert!(report.heatmap.is_empty());
        assert_eq!(report.focus_score, 100);
        assert_eq!(report.suggestions.len(), 1);
        assert_eq!(report.suggestions[0].title, "Extend Your Focus Sessions");
    }
}
