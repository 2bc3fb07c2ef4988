//! Text rendering of draw statistics for use as AI prompt grounding.

use crate::models::DrawStatistics;

fn join<T: ToString>(items: impl IntoIterator<Item = T>, sep: &str) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Render every field of `stats` as a deterministic, line-oriented summary.
pub fn render_summary(stats: &DrawStatistics) -> String {
    let hot = if stats.hot_numbers.is_empty() {
        "none".to_string()
    } else {
        join(
            stats
                .hot_numbers
                .iter()
                .map(|h| format!("{} ({} times)", h.number, h.count)),
            ", ",
        )
    };

    let cold = if stats.cold_numbers.is_empty() {
        "none".to_string()
    } else {
        join(&stats.cold_numbers, ", ")
    };

    let sections = join(
        stats
            .section_distribution
            .iter()
            .map(|s| format!("{}: {}", s.label, s.count)),
        ", ",
    );

    let lines = [
        "[Draw statistics]".to_string(),
        format!(
            "- Window: last {} draws (#{} ~ #{})",
            stats.draw_count, stats.oldest_sequence_number, stats.latest_sequence_number
        ),
        format!(
            "- Latest draw: #{} on {}: {} + bonus {}",
            stats.latest_sequence_number,
            stats.latest_date,
            join(&stats.latest_numbers, ", "),
            stats.latest_bonus
        ),
        format!("- Hot numbers: {}", hot),
        format!("- Cold numbers (absent or unseen for 10+ draws): {}", cold),
        format!(
            "- Recent sum trend (oldest -> newest): {}",
            join(&stats.recent_sums, " -> ")
        ),
        format!("- Section distribution: {}", sections),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::analyze;
    use crate::models::DrawRecord;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn scenario() -> Vec<DrawRecord> {
        let date = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        vec![
            DrawRecord::new(103, date(16), [1, 2, 3, 4, 5, 6], 40).unwrap(),
            DrawRecord::new(102, date(9), [1, 2, 3, 7, 8, 9], 41).unwrap(),
            DrawRecord::new(101, date(2), [10, 11, 12, 13, 14, 15], 42).unwrap(),
        ]
    }

    #[test]
    fn test_render_scenario() {
        let stats = analyze(&scenario()).unwrap();
        let text = render_summary(&stats);

        let expected = "\
[Draw statistics]
- Window: last 3 draws (#101 ~ #103)
- Latest draw: #103 on 2024-03-16: 1, 2, 3, 4, 5, 6 + bonus 40
- Hot numbers: 1 (2 times), 2 (2 times), 3 (2 times), 4 (1 times), 5 (1 times)
- Cold numbers (absent or unseen for 10+ draws): 16, 17, 18, 19, 20, 21, 22
- Recent sum trend (oldest -> newest): 75 -> 30 -> 21
- Section distribution: 1-10: 13, 11-20: 5, 21-30: 0, 31-40: 0, 41-45: 0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let stats = analyze(&scenario()).unwrap();
        assert_eq!(render_summary(&stats), render_summary(&stats));
    }

    #[test]
    fn test_render_one_line_per_field() {
        let stats = analyze(&scenario()[..1]).unwrap();
        let text = render_summary(&stats);

        assert!(text.ends_with("41-45: 0\n"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "[Draw statistics]");
        assert_eq!(lines[1], "- Window: last 1 draws (#103 ~ #103)");
        assert_eq!(lines[5], "- Recent sum trend (oldest -> newest): 21");
    }

    #[test]
    fn test_render_empty_cold_list() {
        let mut stats = analyze(&scenario()).unwrap();
        stats.cold_numbers.clear();

        let text = render_summary(&stats);
        assert!(text.contains("- Cold numbers (absent or unseen for 10+ draws): none"));
    }
}
