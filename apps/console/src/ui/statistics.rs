use dioxus::prelude::*;

use crate::hooks::reports::use_report_stats;
use crate::models::{ChangeDirection, ComprehensiveStats};
use crate::services::filters::humanize;
use crate::services::stats::{bar_heights, card_views, donut_segments, resolve_stats, CardView};
use crate::ui::common::LoadingSkeleton;

#[component]
pub fn StatisticsView() -> Element {
    let stats = use_report_stats();
    let resolved = resolve_stats(&stats.state.read());

    let body = match resolved {
        None => rsx! { LoadingSkeleton { rows: 4 } },
        Some((data, is_placeholder)) => {
            let retry = stats.clone();
            rsx! {
                if is_placeholder {
                    div { class: "flex items-center justify-between rounded-lg border border-amber-100 bg-amber-50 p-3 text-xs text-amber-800",
                        "Live statistics are unavailable; showing an empty dataset."
                        button {
                            class: "rounded border border-amber-300 px-2 py-0.5 hover:bg-amber-100",
                            onclick: move |_| retry.refetch(),
                            "Retry"
                        }
                    }
                }
                {render_dashboard(&data)}
            }
        }
    };

    rsx! {
        section { class: "space-y-3",
            header { class: "flex flex-col gap-1",
                h2 { class: "text-lg font-semibold text-slate-900", "Statistics" }
                p { class: "text-xs text-slate-500", "Complaint volume, resolution and category mix." }
            }
            {body}
        }
    }
}

fn render_dashboard(stats: &ComprehensiveStats) -> Element {
    let cards = card_views(stats);
    let bars = bar_heights(&stats.monthly_data);
    let segments = donut_segments(&stats.category_data);

    rsx! {
        div { class: "grid gap-3 sm:grid-cols-2 xl:grid-cols-4",
            for card in cards {
                {render_card(card)}
            }
        }
        div { class: "grid gap-3 lg:grid-cols-2",
            div { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                h3 { class: "mb-3 text-sm font-semibold text-slate-800", "Monthly complaints" }
                div { class: "flex h-48 items-end gap-2",
                    for (month, count, height) in bars {
                        div { key: "{month}", class: "flex flex-1 flex-col items-center gap-1",
                            span { class: "text-[11px] text-slate-500", "{count}" }
                            div {
                                class: "w-full rounded-t bg-blue-500",
                                style: "height: {height:.1}%",
                            }
                            span { class: "text-[11px] text-slate-600", "{month}" }
                        }
                    }
                }
            }
            div { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                h3 { class: "mb-3 text-sm font-semibold text-slate-800", "By category" }
                div { class: "flex items-center gap-4",
                    svg { class: "h-40 w-40", view_box: "0 0 42 42",
                        circle {
                            cx: "21",
                            cy: "21",
                            r: "15.915",
                            fill: "transparent",
                            stroke: "#E2E8F0",
                            stroke_width: "5",
                        }
                        for (share, dasharray, offset) in segments.iter().cloned() {
                            circle {
                                key: "{share.name}",
                                cx: "21",
                                cy: "21",
                                r: "15.915",
                                fill: "transparent",
                                stroke: "{share.color}",
                                stroke_width: "5",
                                stroke_dasharray: "{dasharray}",
                                stroke_dashoffset: "{offset}",
                            }
                        }
                    }
                    ul { class: "space-y-1 text-xs text-slate-700",
                        for (share, _, _) in segments {
                            li { key: "{share.name}", class: "flex items-center gap-2",
                                span {
                                    class: "h-2 w-2 rounded-full",
                                    style: "background-color: {share.color}",
                                }
                                "{humanize(&share.name)} ({share.value})"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_card(card: CardView) -> Element {
    let tone = match card.direction {
        ChangeDirection::Increase => "text-emerald-600",
        ChangeDirection::Decrease => "text-red-600",
        ChangeDirection::Neutral => "text-slate-500",
    };
    rsx! {
        div { key: "{card.title}", class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            p { class: "text-xs text-slate-500", "{card.title}" }
            p { class: "mt-1 text-2xl font-semibold text-slate-900", "{card.value}" }
            if !card.change.is_empty() {
                p { class: format!("mt-1 text-xs {tone}"), "{card.change}" }
            }
        }
    }
}
