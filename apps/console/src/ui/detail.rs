use dioxus::prelude::*;

use crate::api::GrievanceClient;
use crate::hooks::reports::use_report_detail;
use crate::models::Report;
use crate::services::filters::humanize;
use crate::services::table::{file_name, location_text};
use crate::state::use_app_actions;
use crate::ui::common::{priority_badge, status_badge, ErrorBanner, LoadingSkeleton};

/// Full record for one complaint. Mount it keyed by `report_id` so switching
/// selection starts a fresh load.
#[component]
pub fn ComplaintDetail(report_id: String) -> Element {
    let detail = use_report_detail(report_id.clone());
    let client = use_context::<GrievanceClient>();
    let actions = use_app_actions();
    let state = detail.state.read();

    let body = if let Some(report) = state.data.as_ref() {
        // Uploads are served by bare file name; any directory in the stored
        // path is dropped, so files kept in subfolders of the upload root
        // will not resolve.
        let image_url = report
            .image_path
            .as_deref()
            .and_then(file_name)
            .map(|name| client.config().upload_url(&name));
        render_report(report, image_url)
    } else if let Some(message) = state.error.clone() {
        let retry = detail.clone();
        rsx! {
            ErrorBanner { message, on_retry: move |_| retry.refetch() }
        }
    } else {
        rsx! { LoadingSkeleton { rows: 6 } }
    };

    rsx! {
        section { class: "space-y-3",
            header { class: "flex items-center justify-between",
                div { class: "flex flex-col gap-1",
                    h2 { class: "text-lg font-semibold text-slate-900", "Complaint details" }
                    p { class: "font-mono text-xs text-slate-500", "{report_id}" }
                }
                button {
                    class: "rounded border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100",
                    onclick: move |_| actions.clear_selection(),
                    "Back"
                }
            }
            {body}
        }
    }
}

fn render_report(report: &Report, image_url: Option<String>) -> Element {
    let location = location_text(report);
    let fields: Vec<(&str, String)> = vec![
        ("Category", humanize(&report.category)),
        ("Department", report.department.clone()),
        ("Location", location),
        (
            "Expected resolution",
            report
                .resolution_days
                .map(|days| format!("{days} days"))
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Citizen phone", report.citizen_phone.clone().unwrap_or_else(|| "-".to_string())),
        ("Submitted", report.created_at.clone().unwrap_or_else(|| "-".to_string())),
        ("Last updated", report.updated_at.clone().unwrap_or_else(|| "-".to_string())),
    ];

    rsx! {
        div { class: "grid gap-3 lg:grid-cols-[1fr_20rem]",
            div { class: "space-y-3 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                div { class: "flex gap-2",
                    {priority_badge(report.priority)}
                    {status_badge(report.status)}
                }
                p { class: "whitespace-pre-wrap text-sm text-slate-800", "{report.description}" }
                dl { class: "grid grid-cols-2 gap-x-4 gap-y-2 text-xs",
                    for (label, value) in fields {
                        dt { key: "{label}", class: "text-slate-500", "{label}" }
                        dd { class: "text-slate-800", "{value}" }
                    }
                }
            }
            {
                match image_url {
                    Some(url) => rsx! {
                        img {
                            class: "w-full rounded-lg border border-slate-200 object-cover",
                            src: "{url}",
                            alt: "Photo attached to the complaint",
                        }
                    },
                    None => rsx! {
                        div { class: "flex items-center justify-center rounded-lg border border-dashed border-slate-300 p-6 text-xs text-slate-400",
                            "No photo attached"
                        }
                    },
                }
            }
        }
    }
}
