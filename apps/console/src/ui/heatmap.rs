use dioxus::prelude::*;

use crate::api::GrievanceClient;
use crate::hooks::heatmap::{use_heatmap, HeatmapHandle};
use crate::models::{FilterDimension, FilterOptions, Location};
use crate::services::filters::{choices, humanize, FilterSelection};
use crate::services::map::{project, short_id, HeatmapBody, MapMarker, UNREACHABLE};
use crate::state::use_app_state;
use crate::ui::common::{priority_badge, status_badge, ErrorBanner, LoadingSkeleton};

#[component]
pub fn HeatmapView() -> Element {
    let heatmap = use_heatmap();
    let app = use_app_state();
    let has_tiles = use_context::<GrievanceClient>()
        .config()
        .map_access_token
        .is_some();
    let options = app.read().filter_options.options().cloned();

    let map = heatmap.map.read();
    let body_state = map.body();
    let summary = map.filters.summary();
    let selected = map.selected.clone();
    let filters = map.filters.clone();
    drop(map);

    let filter_bar = match options {
        Some(options) => render_filter_bar(heatmap.clone(), &options, &filters),
        None => rsx! {},
    };

    let body = match body_state {
        HeatmapBody::Loading => rsx! { LoadingSkeleton { rows: 6 } },
        HeatmapBody::Unreachable => render_retry(heatmap.clone(), UNREACHABLE.to_string()),
        HeatmapBody::Failed(message) => render_retry(heatmap.clone(), message),
        HeatmapBody::Empty => rsx! {
            p { class: "text-sm text-slate-500", "No complaints with a known location." }
        },
        HeatmapBody::Markers { markers, warning } => {
            let notice = warning.map(|message| render_retry(heatmap.clone(), message));
            rsx! {
                {notice}
                {render_canvas(heatmap.clone(), markers, has_tiles)}
            }
        }
    };

    let popup = match selected {
        Some(location) => render_popup(heatmap.clone(), &location),
        None => rsx! {},
    };

    rsx! {
        section { class: "space-y-3",
            header { class: "flex flex-col gap-1",
                h2 { class: "text-lg font-semibold text-slate-900", "Complaint heatmap" }
                p { class: "text-xs text-slate-500",
                    "Markers are coloured by priority and refresh periodically."
                }
            }
            {filter_bar}
            if let Some(summary) = summary {
                p { class: "text-xs text-slate-600", "Active filters: {summary}" }
            }
            div { class: "grid gap-3 lg:grid-cols-[1fr_18rem]",
                {body}
                {popup}
            }
        }
    }
}

fn render_retry(heatmap: HeatmapHandle, message: String) -> Element {
    rsx! {
        ErrorBanner { message, on_retry: move |_| heatmap.retry() }
    }
}

fn render_canvas(heatmap: HeatmapHandle, markers: Vec<MapMarker>, has_tiles: bool) -> Element {
    let positions = project(&markers);
    let dots = markers.into_iter().zip(positions).map(|(marker, (x, y))| {
        let handle = heatmap.clone();
        let report_id = marker.report_id.clone();
        rsx! {
            circle {
                key: "{marker.report_id}",
                cx: "{x}%",
                cy: "{y}%",
                r: "7",
                fill: marker.color,
                fill_opacity: "0.8",
                stroke: "white",
                stroke_width: "2",
                class: "cursor-pointer",
                onclick: move |_| handle.select_marker(&report_id),
                title { "{marker.title}" }
            }
        }
    });

    rsx! {
        div { class: "relative h-[28rem] overflow-hidden rounded-lg border border-slate-200 bg-slate-50",
            svg { class: "h-full w-full", {dots} }
            if !has_tiles {
                p { class: "absolute bottom-2 left-2 text-[10px] text-slate-400",
                    "Street tiles off: GRIEVANCE_MAP_TOKEN is not set"
                }
            }
        }
    }
}

fn render_filter_bar(
    heatmap: HeatmapHandle,
    options: &FilterOptions,
    filters: &FilterSelection,
) -> Element {
    let selects = FilterDimension::ALL.into_iter().map(|dimension| {
        let values = choices(options, dimension);
        let current = filters.get(dimension).unwrap_or_default().to_string();
        let handle = heatmap.clone();
        rsx! {
            label { key: "{dimension.label()}", class: "flex flex-col gap-1 text-xs text-slate-600",
                "{dimension.label()}"
                select {
                    name: dimension.query_key(),
                    class: "rounded border border-slate-300 bg-white px-2 py-1 text-sm",
                    value: "{current}",
                    onchange: move |evt: FormEvent| handle.set_filter(dimension, Some(evt.value())),
                    option { value: "", "All" }
                    for value in values {
                        option {
                            key: "{value}",
                            value: "{value}",
                            selected: value == current,
                            "{humanize(&value)}"
                        }
                    }
                }
            }
        }
    });
    let clear = heatmap.clone();

    rsx! {
        div { class: "flex flex-wrap items-end gap-3 rounded-lg border border-slate-200 bg-white p-3 shadow-sm",
            {selects}
            button {
                class: "rounded border border-slate-300 px-3 py-1 text-xs text-slate-700 hover:bg-slate-100 disabled:opacity-50",
                disabled: filters.is_empty(),
                onclick: move |_| clear.clear_filters(),
                "Clear filters"
            }
        }
    }
}

fn render_popup(heatmap: HeatmapHandle, location: &Location) -> Element {
    let title = if location.name.is_empty() {
        format!("Report {}", short_id(&location.report_id))
    } else {
        location.name.clone()
    };
    let close = heatmap.clone();
    let details = heatmap;

    rsx! {
        aside { class: "space-y-2 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            div { class: "flex items-start justify-between gap-2",
                h3 { class: "text-sm font-semibold text-slate-900", "{title}" }
                button {
                    class: "text-xs text-slate-400 hover:text-slate-700",
                    onclick: move |_| close.close_popup(),
                    "Close"
                }
            }
            if !location.info.is_empty() {
                p { class: "text-xs text-slate-600", "{location.info}" }
            }
            div { class: "flex flex-wrap gap-1",
                if let Some(priority) = location.priority {
                    {priority_badge(priority)}
                }
                if let Some(status) = location.status {
                    {status_badge(status)}
                }
            }
            if let Some(category) = location.category.as_deref() {
                p { class: "text-xs text-slate-500", "Category: {humanize(category)}" }
            }
            if let Some(department) = location.department.as_deref() {
                p { class: "text-xs text-slate-500", "Department: {department}" }
            }
            button {
                class: "w-full rounded bg-blue-600 px-3 py-1.5 text-xs font-medium text-white hover:bg-blue-700",
                onclick: move |_| details.view_details(),
                "View full details"
            }
        }
    }
}
