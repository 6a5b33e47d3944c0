use std::time::Duration;

pub mod chat;
pub mod connectivity;
pub mod heatmap;
pub mod remote;
pub mod reports;

/// Converts a poll period into the millisecond count `TimeoutFuture` takes.
pub(crate) fn timer_millis(period: Duration) -> u32 {
    u32::try_from(period.as_millis()).unwrap_or(u32::MAX)
}
