use dioxus::prelude::*;

use crate::models::{Priority, ReportStatus};
use crate::services::filters::humanize;

#[component]
pub fn LoadingSkeleton(rows: usize) -> Element {
    rsx! {
        div { class: "space-y-2 animate-pulse",
            for idx in 0..rows {
                div { key: "{idx}", class: "h-4 rounded bg-slate-200" }
            }
        }
    }
}

#[component]
pub fn ErrorBanner(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "flex items-center justify-between gap-3 rounded-lg border border-red-100 bg-red-50 p-3",
            p { class: "text-sm text-red-700", "{message}" }
            button {
                class: "rounded bg-red-600 px-3 py-1 text-xs font-medium text-white hover:bg-red-700",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

pub fn priority_badge(priority: Priority) -> Element {
    let class = match priority {
        Priority::Low => "bg-emerald-100 text-emerald-700",
        Priority::Medium => "bg-amber-100 text-amber-700",
        Priority::High => "bg-orange-100 text-orange-700",
        Priority::VeryHigh => "bg-red-100 text-red-700",
    };
    rsx! {
        span { class: format!("rounded-full px-2 py-0.5 text-[11px] font-medium {class}"),
            "{priority.label()}"
        }
    }
}

pub fn status_badge(status: ReportStatus) -> Element {
    let class = match status {
        ReportStatus::Submitted => "bg-slate-100 text-slate-700",
        ReportStatus::InProgress => "bg-blue-100 text-blue-700",
        ReportStatus::Resolved => "bg-emerald-100 text-emerald-700",
    };
    rsx! {
        span { class: format!("rounded-full px-2 py-0.5 text-[11px] font-medium {class}"),
            "{status.label()}"
        }
    }
}

/// Badge for free-text values coming from chat replies or map popups.
pub fn text_badge(value: &str) -> Element {
    let label = humanize(value);
    rsx! {
        span { class: "rounded-full bg-slate-100 px-2 py-0.5 text-[11px] text-slate-700", "{label}" }
    }
}
