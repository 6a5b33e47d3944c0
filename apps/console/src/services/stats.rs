use crate::fixtures::stats::placeholder_stats;
use crate::models::{CategoryShare, ChangeDirection, ComprehensiveStats, MonthlyCount, StatCard};
use crate::services::fetch::FetchState;

/// What the statistics tab should draw right now. `None` while the first
/// load is still in flight; a failed load yields the placeholder dataset.
pub fn resolve_stats(state: &FetchState<ComprehensiveStats>) -> Option<(ComprehensiveStats, bool)> {
    match (&state.data, &state.error) {
        (Some(stats), _) => Some((stats.clone(), false)),
        (None, Some(_)) => Some((placeholder_stats(), true)),
        (None, None) => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub title: &'static str,
    pub value: String,
    pub change: String,
    pub direction: ChangeDirection,
}

pub fn card_views(stats: &ComprehensiveStats) -> [CardView; 4] {
    let view = |title: &'static str, card: &StatCard| CardView {
        title,
        value: card.value.to_string(),
        change: card.change.clone(),
        direction: card.change_type,
    };
    [
        view("Total Complaints", &stats.cards.total_complaints),
        view("Resolved This Month", &stats.cards.resolved_this_month),
        view("Pending Review", &stats.cards.pending_review),
        view("Avg. Resolution Time", &stats.cards.avg_resolution_time),
    ]
}

/// Bar heights as percentages of the tallest month.
pub fn bar_heights(monthly: &[MonthlyCount]) -> Vec<(String, u64, f64)> {
    let max = monthly.iter().map(|m| m.complaints).max().unwrap_or(0);
    monthly
        .iter()
        .map(|m| {
            let height = if max == 0 {
                0.0
            } else {
                m.complaints as f64 / max as f64 * 100.0
            };
            (m.month.clone(), m.complaints, height)
        })
        .collect()
}

/// Donut arcs as `(share, stroke-dasharray, stroke-dashoffset)` on a circle of
/// circumference 100.
pub fn donut_segments(shares: &[CategoryShare]) -> Vec<(CategoryShare, String, f64)> {
    let total: f64 = shares.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut offset = 0.0;
    shares
        .iter()
        .map(|share| {
            let length = share.value.max(0.0) / total * 100.0;
            let segment = (
                share.clone(),
                format!("{length:.2} {:.2}", 100.0 - length),
                25.0 - offset,
            );
            offset += length;
            segment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use crate::models::CardValue;
    use reqwest::StatusCode;

    fn failed() -> FetchState<ComprehensiveStats> {
        let mut state = FetchState::default();
        let ticket = state.begin();
        state.settle(
            ticket,
            Err(ClientError::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".into(),
            }),
        );
        state
    }

    #[test]
    fn failure_substitutes_zeroed_placeholder() {
        let (stats, is_placeholder) = resolve_stats(&failed()).unwrap();
        assert!(is_placeholder);

        let cards = card_views(&stats);
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|card| card.value == "0"));

        assert_eq!(stats.category_data.len(), 1);
        assert_eq!(stats.category_data[0].value, 100.0);
        assert_eq!(donut_segments(&stats.category_data).len(), 1);
        assert!(!stats.monthly_data.is_empty());
    }

    #[test]
    fn loading_without_data_draws_nothing() {
        let mut state = FetchState::<ComprehensiveStats>::default();
        state.begin();
        assert!(resolve_stats(&state).is_none());
    }

    #[test]
    fn loaded_stats_win_over_placeholder() {
        let mut state = FetchState::default();
        let ticket = state.begin();
        let mut stats = ComprehensiveStats::default();
        stats.cards.total_complaints.value = CardValue::Number(12.0);
        state.settle(ticket, Ok(stats));

        let (resolved, is_placeholder) = resolve_stats(&state).unwrap();
        assert!(!is_placeholder);
        assert_eq!(card_views(&resolved)[0].value, "12");
    }

    #[test]
    fn bars_scale_to_tallest_month() {
        let bars = bar_heights(&[
            MonthlyCount { month: "Jan".into(), complaints: 5 },
            MonthlyCount { month: "Feb".into(), complaints: 10 },
        ]);
        assert_eq!(bars[0].2, 50.0);
        assert_eq!(bars[1].2, 100.0);

        let flat = bar_heights(&[MonthlyCount { month: "Jan".into(), complaints: 0 }]);
        assert_eq!(flat[0].2, 0.0);
    }

    #[test]
    fn donut_segments_cover_the_circle() {
        let shares = vec![
            CategoryShare { name: "A".into(), value: 75.0, color: "#000".into() },
            CategoryShare { name: "B".into(), value: 25.0, color: "#fff".into() },
        ];
        let segments = donut_segments(&shares);
        assert_eq!(segments[0].1, "75.00 25.00");
        assert_eq!(segments[0].2, 25.0);
        assert_eq!(segments[1].1, "25.00 75.00");
        assert_eq!(segments[1].2, -50.0);
    }
}
