//! Load/error bookkeeping shared by every remote resource.
//!
//! Each request is tagged with a [`RequestTicket`]; only the most recently
//! issued ticket may settle the state, so an older response that arrives late
//! is discarded instead of overwriting fresher data.

use tracing::debug;

use crate::api::{ClientError, ClientResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    issued: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
            issued: 0,
        }
    }
}

impl<T> FetchState<T> {
    pub fn phase(&self) -> FetchPhase {
        if self.is_loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Failure
        } else if self.data.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }

    /// Enters `Loading` and clears any prior error. Held data stays put.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.is_loading = true;
        self.error = None;
        RequestTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Applies an outcome. Returns `false` when the ticket is stale and the
    /// outcome was dropped.
    pub fn settle(&mut self, ticket: RequestTicket, outcome: ClientResult<T>) -> bool {
        self.settle_with(ticket, outcome, |err| err.display_message())
    }

    pub fn settle_with(
        &mut self,
        ticket: RequestTicket,
        outcome: ClientResult<T>,
        describe: impl FnOnce(&ClientError) -> String,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }

        self.is_loading = false;
        match outcome {
            Ok(payload) => {
                self.data = Some(payload);
                self.error = None;
            }
            Err(err) => {
                let message = describe(&err);
                self.error = Some(if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                });
            }
        }
        true
    }
}

pub const FALLBACK_ERROR: &str = "Something went wrong while loading data";

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn rejected(message: &str) -> ClientError {
        ClientError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }

    #[test]
    fn walks_idle_loading_success() {
        let mut state = FetchState::<Vec<u32>>::default();
        assert_eq!(state.phase(), FetchPhase::Idle);

        let ticket = state.begin();
        assert_eq!(state.phase(), FetchPhase::Loading);

        assert!(state.settle(ticket, Ok(vec![1, 2, 3])));
        assert_eq!(state.phase(), FetchPhase::Success);
        assert_eq!(state.data.as_deref(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut state = FetchState::<Vec<u32>>::default();
        let first = state.begin();
        state.settle(first, Ok(vec![7]));

        let second = state.begin();
        assert!(state.error.is_none());
        assert_eq!(state.data.as_deref(), Some(&[7][..]));

        state.settle(second, Err(rejected("backend exploded")));
        assert_eq!(state.phase(), FetchPhase::Failure);
        assert_eq!(state.error.as_deref(), Some("backend exploded"));
        assert_eq!(state.data.as_deref(), Some(&[7][..]));
    }

    #[test]
    fn refetch_clears_error_while_loading() {
        let mut state = FetchState::<u8>::default();
        let ticket = state.begin();
        state.settle(ticket, Err(rejected("nope")));
        assert!(state.error.is_some());

        state.begin();
        assert!(state.error.is_none());
        assert_eq!(state.phase(), FetchPhase::Loading);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = FetchState::<&'static str>::default();
        let older = state.begin();
        let newer = state.begin();

        assert!(state.settle(newer, Ok("fresh")));
        assert!(!state.settle(older, Ok("stale")));
        assert_eq!(state.data, Some("fresh"));
        assert!(!state.is_loading);
    }

    #[test]
    fn stale_failure_does_not_clobber_loading_flag() {
        let mut state = FetchState::<u8>::default();
        let older = state.begin();
        let _newer = state.begin();

        assert!(!state.settle(older, Err(rejected("late"))));
        assert!(state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn blank_message_falls_back_to_generic_text() {
        let mut state = FetchState::<u8>::default();
        let ticket = state.begin();
        state.settle_with(ticket, Err(rejected("")), |_| String::new());
        assert_eq!(state.error.as_deref(), Some(FALLBACK_ERROR));
    }
}
