//! Focus score and distraction intensity.

use serde::{Deserialize, Serialize};

/// Points deducted per distraction-per-hour.
const PENALTY_PER_HOURLY_DISTRACTION: f64 = 5.0;

/// Distractions per hour over a session. Zero-length sessions have no rate.
pub fn distractions_per_hour(duration_minutes: u64, distraction_count: usize) -> f64 {
    if duration_minutes == 0 {
        return 0.0;
    }
    distraction_count as f64 / duration_minutes as f64 * 60.0
}

/// 0-100 score penalizing the hourly distraction rate.
///
/// A zero-minute session scores 100: there is nothing to penalize.
pub fn calculate_focus_score(duration_minutes: u64, distraction_count: usize) -> u8 {
    if duration_minutes == 0 {
        return 100;
    }
    let rate = distractions_per_hour(duration_minutes, distraction_count);
    let score = (100.0 - rate * PENALTY_PER_HOURLY_DISTRACTION).clamp(0.0, 100.0);
    score.round() as u8
}

/// Coarse density label for one heatmap bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistractionIntensity {
    Low,
    Medium,
    High,
}

impl DistractionIntensity {
    /// Glyph used by the ASCII heatmap.
    pub fn glyph(self) -> char {
        match self {
            DistractionIntensity::Low => '░',
            DistractionIntensity::Medium => '▒',
            DistractionIntensity::High => '█',
        }
    }
}

pub fn get_distraction_intensity(count: u32) -> DistractionIntensity {
    match count {
        0 => DistractionIntensity::Low,
        1 => DistractionIntensity::Medium,
        _ => DistractionIntensity::High,
    }
}
