use crate::api::{ClientResult, LocationQuery};
use crate::models::{Location, Priority};
use crate::models::FilterDimension;
use crate::services::fetch::{FetchPhase, FetchState, RequestTicket};
use crate::services::filters::FilterSelection;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn from_probe(healthy: bool) -> Self {
        if healthy {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }
}

/// A location that is safe to hand to the marker layer.
#[derive(Clone, Debug, PartialEq)]
pub struct MapMarker {
    pub report_id: String,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub color: &'static str,
}

/// View state behind the heatmap tab.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapState {
    pub filters: FilterSelection,
    pub locations: FetchState<Vec<Location>>,
    pub connectivity: Connectivity,
    /// Popup selection, local to the map.
    pub selected: Option<Location>,
    initial_load_done: bool,
}

impl MapState {
    /// The query the next location load should use. The very first load is
    /// unfiltered whatever the selection holds.
    pub fn next_query(&self) -> LocationQuery {
        if self.initial_load_done {
            self.filters.to_query()
        } else {
            LocationQuery::default()
        }
    }

    pub fn begin_load(&mut self) -> (RequestTicket, LocationQuery) {
        let query = self.next_query();
        self.initial_load_done = true;
        (self.locations.begin(), query)
    }

    pub fn settle_load(
        &mut self,
        ticket: RequestTicket,
        outcome: ClientResult<Vec<Location>>,
    ) -> bool {
        let applied = self.locations.settle(ticket, outcome);
        if applied {
            let still_present = self.selected.as_ref().map(|selected| {
                self.locations
                    .data
                    .as_ref()
                    .map(|all| all.iter().any(|l| l.report_id == selected.report_id))
                    .unwrap_or(false)
            });
            if still_present == Some(false) {
                self.selected = None;
            }
        }
        applied
    }

    /// Applies one dimension change. A real change starts a load carrying the
    /// full filter combination; re-selecting the current value starts nothing.
    pub fn apply_filter(
        &mut self,
        dimension: FilterDimension,
        value: Option<String>,
    ) -> Option<(RequestTicket, LocationQuery)> {
        self.filters
            .set(dimension, value)
            .then(|| self.begin_load())
    }

    pub fn clear_filters(&mut self) -> Option<(RequestTicket, LocationQuery)> {
        self.filters.clear().then(|| self.begin_load())
    }

    /// Forgets the last probe result so the view shows progress while a
    /// manual retry runs.
    pub fn begin_retry(&mut self) {
        self.connectivity = Connectivity::Unknown;
    }

    pub fn body(&self) -> HeatmapBody {
        let markers = self.markers();
        if !markers.is_empty() {
            let warning = match (&self.locations.error, self.connectivity) {
                (Some(error), _) => Some(error.clone()),
                (None, Connectivity::Disconnected) => Some(UNREACHABLE.to_string()),
                _ => None,
            };
            return HeatmapBody::Markers { markers, warning };
        }

        if self.connectivity == Connectivity::Disconnected {
            return HeatmapBody::Unreachable;
        }
        if self.connectivity == Connectivity::Unknown
            || matches!(self.locations.phase(), FetchPhase::Idle | FetchPhase::Loading)
        {
            return HeatmapBody::Loading;
        }
        match &self.locations.error {
            Some(error) => HeatmapBody::Failed(error.clone()),
            None => HeatmapBody::Empty,
        }
    }

    pub fn markers(&self) -> Vec<MapMarker> {
        self.locations
            .data
            .as_deref()
            .map(renderable_markers)
            .unwrap_or_default()
    }

    pub fn select(&mut self, report_id: &str) {
        self.selected = self.locations.data.as_ref().and_then(|all| {
            all.iter()
                .find(|location| location.report_id == report_id && location.position().is_some())
                .cloned()
        });
    }

    pub fn close_popup(&mut self) {
        self.selected = None;
    }
}

pub const UNREACHABLE: &str = "The complaint service is unreachable.";

/// What the heatmap canvas area shows.
#[derive(Clone, Debug, PartialEq)]
pub enum HeatmapBody {
    Loading,
    Unreachable,
    Failed(String),
    Empty,
    /// `warning` carries a failed refresh or lost connection over stale markers.
    Markers {
        markers: Vec<MapMarker>,
        warning: Option<String>,
    },
}

/// Drops every location whose coordinates are missing, non-numeric or not
/// finite.
pub fn renderable_markers(locations: &[Location]) -> Vec<MapMarker> {
    locations
        .iter()
        .filter_map(|location| {
            let (lat, lng) = location.position()?;
            Some(MapMarker {
                report_id: location.report_id.clone(),
                lat,
                lng,
                title: if location.name.is_empty() {
                    format!("Report {}", short_id(&location.report_id))
                } else {
                    location.name.clone()
                },
                color: marker_color(location.priority),
            })
        })
        .collect()
}

pub fn marker_color(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::Low) => "#10B981",
        Some(Priority::Medium) => "#F59E0B",
        Some(Priority::High) => "#F97316",
        Some(Priority::VeryHigh) => "#EF4444",
        None => "#64748B",
    }
}

pub fn short_id(report_id: &str) -> &str {
    match report_id.char_indices().nth(8) {
        Some((idx, _)) => &report_id[..idx],
        None => report_id,
    }
}

/// Projects markers onto a percentage box for the lightweight SVG map. Returns
/// `(x%, y%)` per marker, padded so edge markers stay visible.
pub fn project(markers: &[MapMarker]) -> Vec<(f64, f64)> {
    if markers.is_empty() {
        return Vec::new();
    }
    let (mut min_lat, mut max_lat) = (f64::MAX, f64::MIN);
    let (mut min_lng, mut max_lng) = (f64::MAX, f64::MIN);
    for marker in markers {
        min_lat = min_lat.min(marker.lat);
        max_lat = max_lat.max(marker.lat);
        min_lng = min_lng.min(marker.lng);
        max_lng = max_lng.max(marker.lng);
    }
    let lat_span = (max_lat - min_lat).max(f64::EPSILON);
    let lng_span = (max_lng - min_lng).max(f64::EPSILON);

    markers
        .iter()
        .map(|marker| {
            let x = if max_lng > min_lng {
                (marker.lng - min_lng) / lng_span
            } else {
                0.5
            };
            let y = if max_lat > min_lat {
                1.0 - (marker.lat - min_lat) / lat_span
            } else {
                0.5
            };
            (5.0 + x * 90.0, 5.0 + y * 90.0)
        })
        .collect()
}
