//! Analytics module for focuslog
//!
//! Pure, side-effect-free functions over a session's distraction list:
//! focus score, heatmap bucketing, intensity, coaching suggestions and
//! display formatting.

mod format;
mod heatmap;
mod report;
mod score;
mod suggestions;

pub use format::{format_duration, format_time};

pub use heatmap::{
    generate_distraction_heatmap, peak_bucket, render_heatmap_ascii, HeatmapData,
    DEFAULT_HEATMAP_INTERVAL, MAX_HEATMAP_BUCKETS,
};

pub use report::{DistractionBreakdown, SessionReport};

pub use score::{
    calculate_focus_score, distractions_per_hour, get_distraction_intensity, DistractionIntensity,
};

pub use suggestions::{generate_suggestions, Priority, Suggestion, MAX_SUGGESTIONS};
