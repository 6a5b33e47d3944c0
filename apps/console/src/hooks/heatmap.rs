use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::{debug, error, info, warn};

use crate::api::{GrievanceClient, LocationQuery};
use crate::hooks::timer_millis;
use crate::models::FilterDimension;
use crate::services::fetch::RequestTicket;
use crate::services::map::{Connectivity, MapState};
use crate::state::{use_app_actions, AppActions};

/// Everything the heatmap tab needs: map state plus the operations that keep
/// it in sync with the backend.
#[derive(Clone)]
pub struct HeatmapHandle {
    pub map: Signal<MapState>,
    client: GrievanceClient,
    actions: AppActions,
}

impl HeatmapHandle {
    pub fn set_filter(&self, dimension: FilterDimension, value: Option<String>) {
        let mut map = self.map;
        let pending = map.write().apply_filter(dimension, value);
        self.spawn_fetch(pending);
    }

    pub fn clear_filters(&self) {
        let mut map = self.map;
        let pending = map.write().clear_filters();
        self.spawn_fetch(pending);
    }

    pub fn reload(&self) {
        let handle = self.clone();
        spawn(async move {
            handle.load_locations().await;
        });
    }

    /// Re-runs the mount sequence after the backend was unreachable.
    pub fn retry(&self) {
        let mut map = self.map;
        map.write().begin_retry();
        let handle = self.clone();
        spawn(async move {
            handle.sync().await;
        });
    }

    pub fn select_marker(&self, report_id: &str) {
        let mut map = self.map;
        map.write().select(report_id);
    }

    pub fn close_popup(&self) {
        let mut map = self.map;
        map.write().close_popup();
    }

    /// Promotes the popup selection to the global detail overlay.
    pub fn view_details(&self) {
        let selected = self
            .map
            .read()
            .selected
            .as_ref()
            .map(|location| location.report_id.clone());
        if let Some(report_id) = selected {
            self.actions.select_complaint(report_id);
        }
    }

    async fn probe(&self) -> bool {
        let healthy = self.client.check_health().await;
        let mut map = self.map;
        map.write().connectivity = Connectivity::from_probe(healthy);
        healthy
    }

    fn spawn_fetch(&self, pending: Option<(RequestTicket, LocationQuery)>) {
        let Some((ticket, query)) = pending else {
            return;
        };
        let handle = self.clone();
        spawn(async move {
            handle.fetch_locations(ticket, query).await;
        });
    }

    /// Probe, then filter options, then locations.
    async fn sync(&self) {
        if !self.probe().await {
            warn!("backend unreachable; map stays empty until retry or the next refresh");
            return;
        }
        self.ensure_filter_options().await;
        self.load_locations().await;
    }

    async fn load_locations(&self) {
        let mut map = self.map;
        let (ticket, query) = map.write().begin_load();
        self.fetch_locations(ticket, query).await;
    }

    async fn fetch_locations(&self, ticket: RequestTicket, query: LocationQuery) {
        debug!(?query, "loading map locations");
        let mut map = self.map;
        let outcome = self.client.get_locations(&query).await;
        let succeeded = outcome.is_ok();
        if let Err(err) = &outcome {
            error!(status = ?err.status(), "location fetch failed: {err}");
        }
        map.write().settle_load(ticket, outcome);

        if succeeded {
            self.ensure_filter_options().await;
        }
    }

    async fn ensure_filter_options(&self) {
        if !self.actions.claim_filter_options_load() {
            return;
        }
        match self.client.get_filter_options().await {
            Ok(options) => self.actions.set_filter_options(Some(options)),
            Err(err) => {
                warn!("filter options unavailable, hiding filter bar: {err}");
                self.actions.set_filter_options(None);
            }
        }
    }
}

pub fn use_heatmap() -> HeatmapHandle {
    let client = use_context::<GrievanceClient>();
    let actions = use_app_actions();
    let map = use_signal(MapState::default);

    let handle = HeatmapHandle {
        map,
        client,
        actions,
    };

    let on_mount = handle.clone();
    use_future(move || {
        let handle = on_mount.clone();
        async move {
            handle.sync().await;
        }
    });

    let on_tick = handle.clone();
    use_future(move || {
        let handle = on_tick.clone();
        async move {
            let period = timer_millis(handle.client.config().map_refresh_interval);
            loop {
                TimeoutFuture::new(period).await;
                info!("refreshing map locations");
                if handle.probe().await {
                    handle.load_locations().await;
                }
            }
        }
    });

    handle
}
