use std::collections::BTreeMap;

use crate::models::{
    CardValue, CategoryShare, ChangeDirection, ComprehensiveStats, MonthlyCount, StatCard,
    StatCards,
};

const PLACEHOLDER_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Zeroed statistics with the same shape the backend returns for an empty
/// database, so every chart still has something valid to draw.
pub fn placeholder_stats() -> ComprehensiveStats {
    let zero_card = || StatCard {
        value: CardValue::Number(0.0),
        change: "0%".to_string(),
        change_type: ChangeDirection::Neutral,
    };

    ComprehensiveStats {
        cards: StatCards {
            total_complaints: zero_card(),
            resolved_this_month: zero_card(),
            pending_review: zero_card(),
            avg_resolution_time: zero_card(),
        },
        monthly_data: PLACEHOLDER_MONTHS
            .iter()
            .map(|month| MonthlyCount {
                month: month.to_string(),
                complaints: 0,
            })
            .collect(),
        category_data: vec![CategoryShare {
            name: "General Administration".to_string(),
            value: 100.0,
            color: "#3B82F6".to_string(),
        }],
        by_status: BTreeMap::new(),
        by_priority: BTreeMap::new(),
        by_department: BTreeMap::new(),
        total_reports: 0,
    }
}
