#![allow(non_snake_case)]

mod api;
mod config;
mod fixtures;
mod hooks;
mod models;
mod services;
mod state;
mod ui;

use api::GrievanceClient;
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use state::{use_app_state, AppState, Tab};
use tracing::info;
use ui::chat::AssistantView;
use ui::complaints::ComplaintsView;
use ui::detail::ComplaintDetail;
use ui::heatmap::HeatmapView;
use ui::nav::{ConnectivityBadge, TabBar};
use ui::statistics::StatisticsView;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    init_logging(config.profile.log_level());
    info!(
        api = %config.api_base_url,
        profile = ?config.profile,
        "starting grievance console"
    );
    LaunchBuilder::new().with_context(config).launch(App);
}

fn init_logging(level: tracing::Level) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(level);
    });
}

#[component]
fn App() -> Element {
    let config = use_context::<AppConfig>();
    use_context_provider(move || GrievanceClient::new(config));
    let app_state = use_signal(AppState::default);
    use_context_provider(|| app_state);

    rsx! {
        div { class: "min-h-screen bg-slate-100",
            Router::<Route> {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Dashboard {},
}

#[component]
fn Dashboard() -> Element {
    let state = use_app_state();
    let navigation = state.read().navigation.clone();

    let content = match (navigation.selected_complaint, navigation.active_tab) {
        (Some(report_id), _) => rsx! {
            ComplaintDetail { key: "{report_id}", report_id: report_id.clone() }
        },
        (None, Tab::Heatmap) => rsx! { HeatmapView {} },
        (None, Tab::Complaints) => rsx! { ComplaintsView {} },
        (None, Tab::Statistics) => rsx! { StatisticsView {} },
        (None, Tab::Assistant) => rsx! { AssistantView {} },
    };

    rsx! {
        div { class: "mx-auto max-w-7xl space-y-4 p-4",
            section { class: "flex items-center justify-between rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                div {
                    h1 { class: "text-xl font-semibold text-slate-900", "Grievance dashboard" }
                    p { class: "text-sm text-slate-600", "Citizen complaints across departments" }
                }
                ConnectivityBadge {}
            }
            TabBar {}
            {content}
        }
    }
}
