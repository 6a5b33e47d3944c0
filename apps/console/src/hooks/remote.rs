//! Generic "load on mount, expose refetch" hook.

use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use tracing::error;

use crate::api::ClientResult;
use crate::services::fetch::FetchState;

type Fetcher<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, ClientResult<T>>>;

pub struct Remote<T: 'static> {
    pub state: Signal<FetchState<T>>,
    fetcher: Fetcher<T>,
    label: &'static str,
}

impl<T: 'static> Clone for Remote<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            fetcher: Rc::clone(&self.fetcher),
            label: self.label,
        }
    }
}

impl<T: 'static> Remote<T> {
    pub async fn load(&self) {
        load_into(self.state, (self.fetcher)(), self.label).await;
    }

    /// Re-issues the request. Safe to call while a load is in flight; only
    /// the newest response is applied.
    pub fn refetch(&self) {
        let state = self.state;
        let label = self.label;
        let request = (self.fetcher)();
        spawn(async move {
            load_into(state, request, label).await;
        });
    }
}

async fn load_into<T: 'static>(
    mut state: Signal<FetchState<T>>,
    request: LocalBoxFuture<'static, ClientResult<T>>,
    label: &'static str,
) {
    let ticket = state.write().begin();
    let outcome = request.await;
    if let Err(err) = &outcome {
        error!(resource = label, status = ?err.status(), "fetch failed: {err}");
    }
    state.write().settle(ticket, outcome);
}

pub fn use_remote<T, F, Fut>(label: &'static str, fetch: F) -> Remote<T>
where
    T: 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    let state = use_signal(FetchState::<T>::default);
    let fetcher = use_hook(move || -> Fetcher<T> { Rc::new(move || fetch().boxed_local()) });

    let remote = Remote {
        state,
        fetcher,
        label,
    };

    let on_mount = remote.clone();
    use_future(move || {
        let remote = on_mount.clone();
        async move {
            remote.load().await;
        }
    });

    remote
}
