use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Submitted,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

#[serde_as]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub lat: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub lng: f64,
}

/// A complaint as served by `/reports` and `/reports/{id}`. Everything except
/// the id decodes leniently: a report with odd coordinates or an unknown
/// priority still belongs in the table.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub report_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizen_phone: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub department: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_days: Option<u32>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_extracted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Map projection of a report. Coordinates decode leniently so one bad row
/// never sinks the whole payload; see [`Location::position`].
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub report_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_days: Option<u32>,
}

impl Location {
    /// `(lat, lng)` when both are present and finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterDimension {
    Category,
    Priority,
    Department,
    Status,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        Self::Category,
        Self::Priority,
        Self::Department,
        Self::Status,
    ];

    pub fn query_key(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Priority => "priority",
            Self::Department => "department",
            Self::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Priority => "Priority",
            Self::Department => "Department",
            Self::Status => "Status",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DimensionOptions {
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub all_options: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterOptions {
    #[serde(default)]
    pub categories: DimensionOptions,
    #[serde(default)]
    pub priorities: DimensionOptions,
    #[serde(default)]
    pub departments: DimensionOptions,
    #[serde(default)]
    pub statuses: DimensionOptions,
}

impl FilterOptions {
    pub fn for_dimension(&self, dimension: FilterDimension) -> &DimensionOptions {
        match dimension {
            FilterDimension::Category => &self.categories,
            FilterDimension::Priority => &self.priorities,
            FilterDimension::Department => &self.departments,
            FilterDimension::Status => &self.statuses,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Increase,
    Decrease,
    #[default]
    #[serde(other)]
    Neutral,
}

/// Card values arrive either as counts or as preformatted text ("3.2 days").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CardValue {
    Number(f64),
    Text(String),
}

impl Default for CardValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n:.1}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StatCard {
    #[serde(default)]
    pub value: CardValue,
    #[serde(default)]
    pub change: String,
    #[serde(default)]
    pub change_type: ChangeDirection,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StatCards {
    #[serde(default)]
    pub total_complaints: StatCard,
    #[serde(default)]
    pub resolved_this_month: StatCard,
    #[serde(default)]
    pub pending_review: StatCard,
    #[serde(default)]
    pub avg_resolution_time: StatCard,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MonthlyCount {
    pub month: String,
    #[serde(default)]
    pub complaints: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub color: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComprehensiveStats {
    #[serde(default)]
    pub cards: StatCards,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyCount>,
    #[serde(default)]
    pub category_data: Vec<CategoryShare>,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_priority: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_department: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_reports: u64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// One prior turn as the chatbot endpoint expects it in `chat_history`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

impl From<&ChatMessage> for ChatTurn {
    fn from(message: &ChatMessage) -> Self {
        Self {
            sender: message.sender,
            text: message.text.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// The handful of chatbot stats the assistant panel shows. The endpoint
/// returns a free-form object, so every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatStatsSummary {
    #[serde(default)]
    pub total_complaints: Option<u64>,
    #[serde(default)]
    pub recent_complaints: Option<u64>,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_priority: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_category: BTreeMap<String, u64>,
}

impl ChatStatsSummary {
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("error").is_some() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_decodes_backend_row() {
        let report: Report = serde_json::from_value(json!({
            "report_id": "a1b2c3d4-0000",
            "session_id": "s-1",
            "citizen_phone": "+911234567890",
            "description": "Streetlight not working near the market",
            "coordinates": {"lat": 12.97, "lng": 77.59},
            "image_path": "uploads/a1b2c3d4-0000.jpg",
            "category": "electricity_power",
            "priority": "very_high",
            "department": "Power Department",
            "resolution_days": 3,
            "status": "in_progress",
            "created_at": "2024-05-01 10:00:00",
            "updated_at": "2024-05-02 10:00:00",
            "location_lat": 12.97,
            "location_lon": 77.59,
            "address_extracted": "Lat: 12.97, Lng: 77.59"
        }))
        .unwrap();

        assert_eq!(report.priority, Priority::VeryHigh);
        assert_eq!(report.status, ReportStatus::InProgress);
        assert_eq!(report.coordinates, Some(Coordinates { lat: 12.97, lng: 77.59 }));
        assert_eq!(report.resolution_days, Some(3));
    }

    #[test]
    fn reports_with_odd_coordinates_stay_in_the_list() {
        let reports: Vec<Report> = crate::api::decode_list(
            json!([
                {"report_id": "ok", "coordinates": {"lat": 12.9, "lng": 77.5}},
                {
                    "report_id": "stringly",
                    "coordinates": {"lat": "12.9", "lng": "77.5"},
                    "location_lat": "12.9",
                    "location_lon": null
                },
                {
                    "report_id": "garbage",
                    "coordinates": {"lat": "north", "lng": 0},
                    "location_lat": "north",
                    "priority": "urgent",
                    "resolution_days": "soon"
                }
            ]),
            "reports",
        );

        let ids: Vec<_> = reports.iter().map(|r| r.report_id.as_str()).collect();
        assert_eq!(ids, ["ok", "stringly", "garbage"]);

        assert_eq!(reports[1].coordinates, Some(Coordinates { lat: 12.9, lng: 77.5 }));
        assert_eq!(reports[1].location_lat, Some(12.9));
        assert_eq!(reports[1].location_lon, None);

        assert_eq!(reports[2].coordinates, None);
        assert_eq!(reports[2].location_lat, None);
        assert_eq!(reports[2].priority, Priority::Medium);
        assert_eq!(reports[2].resolution_days, None);
    }

    #[test]
    fn priorities_are_ordered() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::VeryHigh);
    }

    #[test]
    fn location_coordinates_decode_leniently() {
        let locations: Vec<Location> = serde_json::from_value(json!([
            {"lat": 12.5, "lng": 77.1, "report_id": "ok"},
            {"lat": "12.5", "lng": "77.1", "report_id": "stringly"},
            {"lat": "north", "lng": 77.1, "report_id": "garbage"},
            {"lat": null, "lng": 77.1, "report_id": "null"},
            {"lng": 77.1, "report_id": "missing"},
            {"lat": "NaN", "lng": 77.1, "report_id": "nan"}
        ]))
        .unwrap();

        let positions: Vec<_> = locations.iter().map(Location::position).collect();
        assert_eq!(positions[0], Some((12.5, 77.1)));
        assert_eq!(positions[1], Some((12.5, 77.1)));
        assert_eq!(positions[2], None);
        assert_eq!(positions[3], None);
        assert_eq!(positions[4], None);
        assert_eq!(positions[5], None);
    }

    #[test]
    fn location_tolerates_unknown_priority() {
        let location: Location = serde_json::from_value(json!({
            "lat": 1.0, "lng": 2.0, "report_id": "x", "priority": "urgent", "status": "resolved"
        }))
        .unwrap();
        assert_eq!(location.priority, None);
        assert_eq!(location.status, Some(ReportStatus::Resolved));
    }

    #[test]
    fn stat_cards_accept_numbers_and_text() {
        let stats: ComprehensiveStats = serde_json::from_value(json!({
            "cards": {
                "total_complaints": {"value": 42, "change": "+10%", "change_type": "increase"},
                "avg_resolution_time": {"value": "3.2 days", "change": "-15%", "change_type": "decrease"}
            },
            "total_reports": 42
        }))
        .unwrap();

        assert_eq!(stats.cards.total_complaints.value.to_string(), "42");
        assert_eq!(stats.cards.avg_resolution_time.value.to_string(), "3.2 days");
        assert_eq!(stats.cards.avg_resolution_time.change_type, ChangeDirection::Decrease);
        assert_eq!(stats.cards.pending_review, StatCard::default());
    }

    #[test]
    fn assistant_turns_serialize_as_bot() {
        let turn = ChatTurn {
            sender: Sender::Assistant,
            text: "hello".into(),
        };
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({"sender": "bot", "text": "hello"})
        );
    }

    #[test]
    fn chat_stats_summary_ignores_error_objects() {
        assert!(ChatStatsSummary::from_value(&json!({"error": "db locked"})).is_none());

        let summary =
            ChatStatsSummary::from_value(&json!({"total_complaints": 7, "recent_complaints": 2}))
                .unwrap();
        assert_eq!(summary.total_complaints, Some(7));
        assert!(summary.by_status.is_empty());
    }
}
