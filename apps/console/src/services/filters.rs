use serde::{Deserialize, Serialize};

use crate::api::LocationQuery;
use crate::models::{FilterDimension, FilterOptions};

/// Active map constraints. `None` means the dimension is unconstrained;
/// set dimensions combine with logical AND.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl FilterSelection {
    pub fn get(&self, dimension: FilterDimension) -> Option<&str> {
        self.slot(dimension).as_deref()
    }

    /// Routes a dimension-keyed change to its setter. Returns whether the
    /// selection changed.
    pub fn set(&mut self, dimension: FilterDimension, value: Option<String>) -> bool {
        match dimension {
            FilterDimension::Category => self.set_category(value),
            FilterDimension::Priority => self.set_priority(value),
            FilterDimension::Department => self.set_department(value),
            FilterDimension::Status => self.set_status(value),
        }
    }

    pub fn set_category(&mut self, value: Option<String>) -> bool {
        assign(&mut self.category, value)
    }

    pub fn set_priority(&mut self, value: Option<String>) -> bool {
        assign(&mut self.priority, value)
    }

    pub fn set_department(&mut self, value: Option<String>) -> bool {
        assign(&mut self.department, value)
    }

    pub fn set_status(&mut self, value: Option<String>) -> bool {
        assign(&mut self.status, value)
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        *self = Self::default();
        changed
    }

    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|dimension| self.get(*dimension).is_none())
    }

    /// Set dimensions in display order.
    pub fn active(&self) -> Vec<(FilterDimension, String)> {
        FilterDimension::ALL
            .iter()
            .filter_map(|dimension| {
                self.get(*dimension)
                    .map(|value| (*dimension, value.to_string()))
            })
            .collect()
    }

    /// Human-readable summary such as `Category: road_infrastructure · Status: resolved`.
    pub fn summary(&self) -> Option<String> {
        let active = self.active();
        if active.is_empty() {
            return None;
        }
        Some(
            active
                .iter()
                .map(|(dimension, value)| format!("{}: {}", dimension.label(), humanize(value)))
                .collect::<Vec<_>>()
                .join(" · "),
        )
    }

    pub fn to_query(&self) -> LocationQuery {
        LocationQuery {
            category: self.category.clone(),
            priority: self.priority.clone(),
            department: self.department.clone(),
            status: self.status.clone(),
        }
    }

    fn slot(&self, dimension: FilterDimension) -> &Option<String> {
        match dimension {
            FilterDimension::Category => &self.category,
            FilterDimension::Priority => &self.priority,
            FilterDimension::Department => &self.department,
            FilterDimension::Status => &self.status,
        }
    }
}

/// Empty and whitespace-only values clear the slot. Returns whether it changed.
fn assign(slot: &mut Option<String>, value: Option<String>) -> bool {
    let normalized = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if *slot == normalized {
        return false;
    }
    *slot = normalized;
    true
}

/// Session cache for `/filter-options`. Loaded at most once; a failed load
/// leaves the filter bar hidden rather than blocking the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OptionsCache {
    #[default]
    NotLoaded,
    Loading,
    Loaded(FilterOptions),
    Unavailable,
}

impl OptionsCache {
    pub fn needs_load(&self) -> bool {
        matches!(self, Self::NotLoaded)
    }

    pub fn options(&self) -> Option<&FilterOptions> {
        match self {
            Self::Loaded(options) => Some(options),
            _ => None,
        }
    }
}

/// Values offered in a dimension's dropdown: the values present in data,
/// falling back to the full vocabulary when nothing is present yet.
pub fn choices(options: &FilterOptions, dimension: FilterDimension) -> Vec<String> {
    let dimension_options = options.for_dimension(dimension);
    if dimension_options.available.is_empty() {
        dimension_options.all_options.clone()
    } else {
        dimension_options.available.clone()
    }
}

/// `water_sanitation` -> `Water Sanitation`; department names pass through.
pub fn humanize(value: &str) -> String {
    value
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
