use dioxus::prelude::*;

use crate::hooks::connectivity::use_connectivity;
use crate::services::map::Connectivity;
use crate::state::{use_app_actions, use_app_state, Tab};

#[component]
pub fn TabBar() -> Element {
    let state = use_app_state();
    let actions = use_app_actions();
    let navigation = state.read().navigation.clone();
    // No tab is highlighted while the detail overlay covers it.
    let active = (!navigation.is_showing_detail()).then_some(navigation.active_tab);

    rsx! {
        nav { class: "flex gap-2 border-b border-slate-200",
            for tab in Tab::ALL {
                button {
                    key: "{tab.label()}",
                    class: if Some(tab) == active {
                        "border-b-2 border-blue-600 px-3 py-2 text-sm font-medium text-blue-700"
                    } else {
                        "px-3 py-2 text-sm text-slate-500 hover:text-slate-800"
                    },
                    onclick: move |_| actions.select_tab(tab),
                    "{tab.label()}"
                }
            }
        }
    }
}

#[component]
pub fn ConnectivityBadge() -> Element {
    let status = use_connectivity();
    let (dot, label) = match *status.read() {
        Connectivity::Unknown => ("bg-slate-400", "Checking backend..."),
        Connectivity::Connected => ("bg-emerald-500", "Backend connected"),
        Connectivity::Disconnected => ("bg-red-500", "Backend unreachable"),
    };

    rsx! {
        span { class: "flex items-center gap-2 text-xs text-slate-600",
            span { class: format!("h-2 w-2 rounded-full {dot}") }
            "{label}"
        }
    }
}
