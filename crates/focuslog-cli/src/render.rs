//! Text rendering of reports for the terminal.

use focuslog_core::{format_duration, render_heatmap_ascii, DistractionType, SessionReport};

pub fn report_text(report: &SessionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Session: {}, {} distraction{}\n",
        format_duration(report.duration_minutes),
        report.distraction_count,
        if report.distraction_count == 1 { "" } else { "s" }
    ));
    out.push_str(&format!("Focus score: {}/100\n", report.focus_score));

    let breakdown = [
        (DistractionType::QuickCheck, report.breakdown.quick_check),
        (DistractionType::GotDistracted, report.breakdown.got_distracted),
        (DistractionType::MajorBreak, report.breakdown.major_break),
    ];
    for (kind, count) in breakdown {
        let cfg = kind.config();
        out.push_str(&format!("  {} {:<15} {}\n", cfg.icon, cfg.label, count));
    }
    out.push('\n');

    out.push_str(&render_heatmap_ascii(&report.heatmap, report.interval_minutes));
    out.push('\n');

    out.push_str("Suggestions:\n");
    for s in &report.suggestions {
        out.push_str(&format!("  [{}] {}\n      {}\n", s.priority, s.title, s.description));
    }

    out
}
