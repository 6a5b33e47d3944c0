use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

use crate::api::GrievanceClient;
use crate::hooks::timer_millis;
use crate::services::map::Connectivity;

/// Probes `/health` on mount and then on every poll interval until the
/// owning component unmounts, which cancels the loop.
pub fn use_connectivity() -> Signal<Connectivity> {
    let client = use_context::<GrievanceClient>();
    let status = use_signal(Connectivity::default);

    use_future(move || {
        let client = client.clone();
        let mut status = status;
        async move {
            let period = timer_millis(client.config().health_poll_interval);
            loop {
                let healthy = client.check_health().await;
                let next = Connectivity::from_probe(healthy);
                if *status.peek() != next {
                    debug!(?next, "connectivity changed");
                    status.set(next);
                }
                TimeoutFuture::new(period).await;
            }
        }
    });

    status
}
