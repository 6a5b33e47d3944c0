use dioxus::prelude::*;

use crate::hooks::reports::use_reports;
use crate::services::fetch::FetchPhase;
use crate::services::filters::humanize;
use crate::services::table::{table_body, ComplaintRow, TableBody, NO_COMPLAINTS};
use crate::state::{use_app_actions, AppActions};
use crate::ui::common::{priority_badge, status_badge, ErrorBanner, LoadingSkeleton};

const COLUMNS: [&str; 7] = [
    "Complaint",
    "Category",
    "Priority",
    "Department",
    "Status",
    "Location",
    "Submitted",
];

#[component]
pub fn ComplaintsView() -> Element {
    let reports = use_reports();
    let actions = use_app_actions();
    let state = reports.state.read();

    let body = match state.phase() {
        FetchPhase::Idle | FetchPhase::Loading if state.data.is_none() => {
            rsx! { LoadingSkeleton { rows: 8 } }
        }
        FetchPhase::Failure => {
            let message = state.error.clone().unwrap_or_default();
            let retry = reports.clone();
            let stale = state.data.as_deref().map(|rows| render_table(table_body(rows), actions));
            rsx! {
                ErrorBanner { message, on_retry: move |_| retry.refetch() }
                {stale}
            }
        }
        _ => {
            let rows = state.data.as_deref().map(table_body).unwrap_or(TableBody::Empty);
            render_table(rows, actions)
        }
    };

    rsx! {
        section { class: "space-y-3",
            header { class: "flex items-center justify-between",
                div { class: "flex flex-col gap-1",
                    h2 { class: "text-lg font-semibold text-slate-900", "Complaints" }
                    p { class: "text-xs text-slate-500", "Select a row to open the full record." }
                }
                button {
                    class: "rounded border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100",
                    onclick: {
                        let reports = reports.clone();
                        move |_| reports.refetch()
                    },
                    "Refresh"
                }
            }
            {body}
        }
    }
}

fn render_table(body: TableBody, actions: AppActions) -> Element {
    let rows = match body {
        TableBody::Empty => rsx! {
            tr {
                td {
                    class: "px-3 py-6 text-center text-sm text-slate-500",
                    colspan: "{COLUMNS.len()}",
                    "{NO_COMPLAINTS}"
                }
            }
        },
        TableBody::Rows(rows) => rsx! {
            for row in rows {
                {render_row(row, actions)}
            }
        },
    };

    rsx! {
        div { class: "overflow-x-auto rounded-lg border border-slate-200 bg-white shadow-sm",
            table { class: "min-w-full divide-y divide-slate-200 text-sm",
                thead { class: "bg-slate-50",
                    tr {
                        for column in COLUMNS {
                            th {
                                key: "{column}",
                                class: "px-3 py-2 text-left text-xs font-semibold uppercase tracking-wide text-slate-500",
                                "{column}"
                            }
                        }
                    }
                }
                tbody { class: "divide-y divide-slate-100", {rows} }
            }
        }
    }
}

fn render_row(row: ComplaintRow, actions: AppActions) -> Element {
    let report_id = row.report_id.clone();
    rsx! {
        tr {
            key: "{row.report_id}",
            class: "cursor-pointer hover:bg-slate-50",
            onclick: move |_| actions.select_complaint(report_id.clone()),
            td { class: "px-3 py-2",
                div { class: "font-medium text-slate-900", "{row.title}" }
                if let Some(image) = row.image_file.as_deref() {
                    div { class: "text-[11px] text-slate-400", "Photo: {image}" }
                }
            }
            td { class: "px-3 py-2 text-slate-700", "{humanize(&row.category)}" }
            td { class: "px-3 py-2", {priority_badge(row.priority)} }
            td { class: "px-3 py-2 text-slate-700", "{row.department}" }
            td { class: "px-3 py-2", {status_badge(row.status)} }
            td { class: "px-3 py-2 text-xs text-slate-600", "{row.location}" }
            td { class: "px-3 py-2 text-xs text-slate-500", "{row.submitted_on}" }
        }
    }
}
