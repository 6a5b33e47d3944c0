use dioxus::prelude::*;

use crate::models::FilterOptions;
use crate::services::filters::OptionsCache;

pub type AppSignal = Signal<AppState>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Heatmap,
    Complaints,
    Statistics,
    Assistant,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Heatmap, Self::Complaints, Self::Statistics, Self::Assistant];

    pub fn label(self) -> &'static str {
        match self {
            Self::Heatmap => "Heatmap",
            Self::Complaints => "Complaints",
            Self::Statistics => "Statistics",
            Self::Assistant => "Assistant",
        }
    }
}

/// Which section is showing and whether a complaint detail overlays it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigation {
    pub active_tab: Tab,
    pub selected_complaint: Option<String>,
}

impl Navigation {
    /// Switching tabs always drops the detail overlay. There is no back stack.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.selected_complaint = None;
    }

    pub fn select_complaint(&mut self, report_id: impl Into<String>) {
        let report_id = report_id.into();
        if !report_id.trim().is_empty() {
            self.selected_complaint = Some(report_id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_complaint = None;
    }

    pub fn is_showing_detail(&self) -> bool {
        self.selected_complaint.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub navigation: Navigation,
    /// Session-wide cache; survives the heatmap being unmounted.
    pub filter_options: OptionsCache,
}

#[derive(Clone, Copy)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    pub fn select_tab(&self, tab: Tab) {
        let mut state = self.state;
        state.write().navigation.select_tab(tab);
    }

    pub fn select_complaint(&self, report_id: String) {
        let mut state = self.state;
        state.write().navigation.select_complaint(report_id);
    }

    pub fn clear_selection(&self) {
        let mut state = self.state;
        state.write().navigation.clear_selection();
    }

    /// Claims the options load. Returns `false` when another view already
    /// started or finished it.
    pub fn claim_filter_options_load(&self) -> bool {
        let mut state = self.state;
        let mut guard = state.write();
        if guard.filter_options.needs_load() {
            guard.filter_options = OptionsCache::Loading;
            true
        } else {
            false
        }
    }

    pub fn set_filter_options(&self, options: Option<FilterOptions>) {
        let mut state = self.state;
        state.write().filter_options = match options {
            Some(options) => OptionsCache::Loaded(options),
            None => OptionsCache::Unavailable,
        };
    }
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    let state = use_app_state();
    AppActions { state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_tabs_clears_detail_overlay() {
        for from in Tab::ALL {
            for to in Tab::ALL.into_iter().filter(|tab| *tab != from) {
                let mut nav = Navigation {
                    active_tab: from,
                    selected_complaint: Some("r-1".into()),
                };
                nav.select_tab(to);
                assert_eq!(nav.active_tab, to);
                assert!(!nav.is_showing_detail(), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn selection_overlays_any_tab() {
        let mut nav = Navigation::default();
        nav.select_tab(Tab::Statistics);
        nav.select_complaint("abc");
        assert_eq!(nav.active_tab, Tab::Statistics);
        assert_eq!(nav.selected_complaint.as_deref(), Some("abc"));

        nav.clear_selection();
        assert!(!nav.is_showing_detail());
        assert_eq!(nav.active_tab, Tab::Statistics);
    }

    #[test]
    fn blank_report_ids_are_not_selected() {
        let mut nav = Navigation::default();
        nav.select_complaint("  ");
        assert!(!nav.is_showing_detail());
    }
}
