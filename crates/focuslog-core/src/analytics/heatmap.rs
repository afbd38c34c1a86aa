//! Distraction heatmap.
//!
//! Splits a session into fixed-width minute buckets and counts the
//! distractions falling into each one, to show when interruptions cluster.

use crate::analytics::score::get_distraction_intensity;
use crate::session::Distraction;

/// Per-bucket distraction counts covering `[0, duration)` minutes.
pub type HeatmapData = Vec<u32>;

/// Default bucket width in minutes.
pub const DEFAULT_HEATMAP_INTERVAL: u64 = 5;

/// Upper bound on the number of buckets a heatmap will allocate.
pub const MAX_HEATMAP_BUCKETS: usize = 1 << 16;

/// Bucket distractions by minutes elapsed since `start_time`.
///
/// Produces `ceil(duration / interval_minutes)` buckets. Minutes are floored
/// (so timestamps before the start land on negative indices), and anything
/// outside the bucket range is dropped rather than clamped. A zero interval
/// yields an empty heatmap, and sessions needing more than
/// [`MAX_HEATMAP_BUCKETS`] buckets are cut off at that many.
pub fn generate_distraction_heatmap(
    distractions: &[Distraction],
    start_time: i64,
    duration: u64,
    interval_minutes: u64,
) -> HeatmapData {
    if interval_minutes == 0 {
        return Vec::new();
    }
    let buckets = usize::try_from(duration.div_ceil(interval_minutes))
        .unwrap_or(usize::MAX)
        .min(MAX_HEATMAP_BUCKETS);
    let mut heatmap = vec![0u32; buckets];
    let interval = i64::try_from(interval_minutes).unwrap_or(i64::MAX);

    for distraction in distractions {
        // Offsets too large for i64 cannot fall inside any bucket.
        let Some(offset_ms) = distraction.timestamp.checked_sub(start_time) else {
            continue;
        };
        let index = offset_ms.div_euclid(60_000).div_euclid(interval);
        if let Ok(index) = usize::try_from(index) {
            if let Some(bucket) = heatmap.get_mut(index) {
                *bucket += 1;
            }
        }
    }

    heatmap
}

/// Index of the first bucket holding the maximum count, if that count is
/// non-zero.
pub fn peak_bucket(heatmap: &[u32]) -> Option<usize> {
    let max = heatmap.iter().copied().max()?;
    if max == 0 {
        return None;
    }
    heatmap.iter().position(|&count| count == max)
}

/// Render the heatmap as one row per bucket.
pub fn render_heatmap_ascii(heatmap: &[u32], interval_minutes: u64) -> String {
    let mut output = String::new();

    output.push_str("Distraction Heatmap\n");
    output.push_str(&"=".repeat(32));
    output.push('\n');

    if heatmap.iter().all(|&count| count == 0) {
        output.push_str("No distraction data available.\n");
        return output;
    }

    for (i, &count) in heatmap.iter().enumerate() {
        let from = i as u64 * interval_minutes;
        let label = format!("{}-{}m", from, from + interval_minutes);
        let glyph = get_distraction_intensity(count).glyph();
        let bar: String = std::iter::repeat(glyph).take(count.max(1) as usize).collect();
        output.push_str(&format!("{:>9}  {} {}\n", label, bar, count));
    }

    if let Some(peak) = peak_bucket(heatmap) {
        let from = peak as u64 * interval_minutes;
        output.push_str(&format!(
            "\nPeak: {}-{} minutes ({} distractions)\n",
            from,
            from + interval_minutes,
            heatmap[peak]
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DistractionType;

    const START: i64 = 1_700_000_000_000;

    fn at_minute(minute: f64) -> Distraction {
        Distraction::new(
            DistractionType::QuickCheck,
            START + (minute * 60_000.0) as i64,
        )
    }

    #[test]
    fn bucket_count_is_ceiling() {
        assert_eq!(generate_distraction_heatmap(&[], START, 0, 5).len(), 0);
        assert_eq!(generate_distraction_heatmap(&[], START, 1, 5).len(), 1);
        assert_eq!(generate_distraction_heatmap(&[], START, 25, 5).len(), 5);
        assert_eq!(generate_distraction_heatmap(&[], START, 26, 5), vec![0; 6]);
    }

    #[test]
    fn distractions_land_in_buckets() {
        let distractions = vec![
            at_minute(0.0),
            at_minute(4.99),
            at_minute(5.0),
            at_minute(12.5),
            at_minute(14.0),
        ];
        let heatmap = generate_distraction_heatmap(&distractions, START, 15, 5);
        assert_eq!(heatmap, vec![2, 1, 2]);
    }

    #[test]
    fn out_of_range_is_dropped() {
        let distractions = vec![
            Distraction::new(DistractionType::MajorBreak, START - 1),
            at_minute(-7.0),
            at_minute(30.0),
            at_minute(29.9),
        ];
        let heatmap = generate_distraction_heatmap(&distractions, START, 30, 10);
        assert_eq!(heatmap, vec![0, 0, 1]);
    }

    #[test]
    fn extreme_timestamps_are_dropped() {
        let distractions = vec![
            Distraction::new(DistractionType::QuickCheck, i64::MIN),
            Distraction::new(DistractionType::MajorBreak, i64::MAX),
            at_minute(3.0),
        ];
        let heatmap = generate_distraction_heatmap(&distractions, START, 10, 5);
        assert_eq!(heatmap, vec![1, 0]);

        let from_min = generate_distraction_heatmap(&distractions, i64::MIN, 10, 5);
        assert_eq!(from_min, vec![1, 0]);
    }

    #[test]
    fn huge_inputs_are_bounded() {
        let heatmap = generate_distraction_heatmap(&[at_minute(1.0)], START, u64::MAX, 1);
        assert_eq!(heatmap.len(), MAX_HEATMAP_BUCKETS);
        assert_eq!(heatmap[1], 1);

        let wide = generate_distraction_heatmap(&[at_minute(1.0)], START, 10, u64::MAX);
        assert_eq!(wide, vec![1]);
    }

    #[test]
    fn zero_interval_is_empty() {
        assert!(generate_distraction_heatmap(&[at_minute(1.0)], START, 30, 0).is_empty());
    }

    #[test]
    fn peak_is_first_maximum() {
        assert_eq!(peak_bucket(&[]), None);
        assert_eq!(peak_bucket(&[0, 0]), None);
        assert_eq!(peak_bucket(&[1, 3, 0, 3]), Some(1));
    }

    #[test]
    fn render_lists_buckets_and_peak() {
        let rendered = render_heatmap_ascii(&[0, 2, 1], 5);
        let expected = indoc::indoc! {"
            Distraction Heatmap
            ================================
                 0-5m  ░ 0
                5-10m  ██ 2
               10-15m  ▒ 1

            Peak: 5-10 minutes (2 distractions)
        "};
        assert_eq!(rendered, expected);
    }

    #[test]
    fn render_empty() {
        let rendered = render_heatmap_ascii(&[0, 0], 5);
        assert!(rendered.contains("No distraction data available."));
    }
}
