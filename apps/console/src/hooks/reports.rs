use dioxus::prelude::*;
use serde_json::Value;

use crate::api::GrievanceClient;
use crate::hooks::remote::{use_remote, Remote};
use crate::models::{ComprehensiveStats, Report};

pub fn use_reports() -> Remote<Vec<Report>> {
    let client = use_context::<GrievanceClient>();
    use_remote("reports", move || {
        let client = client.clone();
        async move { client.list_reports().await }
    })
}

pub fn use_report_stats() -> Remote<ComprehensiveStats> {
    let client = use_context::<GrievanceClient>();
    use_remote("report_stats", move || {
        let client = client.clone();
        async move { client.get_report_stats().await }
    })
}

/// Loads one report. Callers key the component by id so a new selection
/// mounts a fresh hook.
pub fn use_report_detail(report_id: String) -> Remote<Report> {
    let client = use_context::<GrievanceClient>();
    use_remote("report_detail", move || {
        let client = client.clone();
        let report_id = report_id.clone();
        async move { client.get_report(&report_id).await }
    })
}

pub fn use_chat_stats() -> Remote<Value> {
    let client = use_context::<GrievanceClient>();
    use_remote("chat_stats", move || {
        let client = client.clone();
        async move { client.get_chat_stats().await }
    })
}
