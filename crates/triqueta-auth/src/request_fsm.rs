//! Per-request lifecycle state machine using rust-fsm.
//!
//! Every call through the authenticated client walks this machine once.
//! No state is re-entered; `Done` and `LoggedOut` are terminal.
//!
//! ## State Diagram
//!
//! ```text
//! ┌─────────┐ Dispatch  ┌──────────┐  Completed / AuthEndpointRejected /
//! │  Ready  │ ────────► │ InFlight │  AlreadyRetried / TransportFailed
//! └─────────┘           └────┬─────┘ ─────────────────────────────────► Done
//!                            │ Unauthorized
//!                            ▼
//!                     ┌────────────┐ RefreshFailed ┌───────────┐
//!                     │ Refreshing │ ────────────► │ LoggedOut │
//!                     └─────┬──────┘               └───────────┘
//!                           │ RefreshSucceeded
//!                           ▼
//!                     ┌──────────┐  Completed / TransportFailed
//!                     │ Retrying │ ─────────────────────────────► Done
//!                     └──────────┘
//! ```

use crate::{AuthError, AuthResult};
use rust_fsm::*;
use tracing::trace;

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub request_machine(Ready)

    Ready => {
        Dispatch => InFlight
    },
    InFlight => {
        // Any status other than 401
        Completed => Done,
        // 401 from login, register or refresh
        AuthEndpointRejected => Done,
        // 401 on a call that was already replayed once
        AlreadyRetried => Done,
        TransportFailed => Done,
        // First 401 on a protected endpoint
        Unauthorized => Refreshing
    },
    Refreshing => {
        RefreshSucceeded => Retrying,
        RefreshFailed => LoggedOut
    },
    Retrying => {
        // Whatever the replay yields, 401 included
        Completed => Done,
        TransportFailed => Done
    }
}

pub use request_machine::Input as RequestInput;
pub use request_machine::State as RequestState;
pub use request_machine::StateMachine as RequestMachine;

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Done | RequestState::LoggedOut)
    }
}

/// A [`RequestMachine`] that reports illegal transitions as errors and
/// traces legal ones.
pub(crate) struct RequestLifecycle {
    machine: RequestMachine,
    method: String,
    path: String,
}

impl RequestLifecycle {
    pub(crate) fn new(method: &reqwest::Method, path: &str) -> Self {
        Self {
            machine: RequestMachine::new(),
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    pub(crate) fn state(&self) -> &RequestState {
        self.machine.state()
    }

    pub(crate) fn advance(&mut self, input: RequestInput) -> AuthResult<()> {
        let from = self.machine.state().clone();
        self.machine.consume(&input).map_err(|_| {
            AuthError::InvalidStateTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input, from
            ))
        })?;
        trace!(
            method = %self.method,
            path = %self.path,
            from = ?from,
            to = ?self.machine.state(),
            "request state transition"
        );
        Ok(())
    }
}
