//! The session lifecycle state machine.
//!
//! A session moves through five states in one direction only:
//!
//! ```text
//! Uninitialized -> Initializing -> Operating -> Closing -> Closed
//! ```
//!
//! There is no path back to an earlier state. `Session` enforces this by
//! refusing any transition whose target does not strictly follow the
//! current state.

use mcp_schema::{MCPError, MCPResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// No `initialize` exchange has happened yet. Only `initialize`
    /// (and, for a server, replying to one) may go out.
    Uninitialized,
    /// The `initialize` request/response has been sent or received, but
    /// the peer has not yet observed `notifications/initialized`.
    Initializing,
    /// The handshake is complete; any registered operation may be sent.
    Operating,
    /// `close` has been called; pending requests are being drained.
    Closing,
    /// Terminal. Every pending request has completed and no further
    /// traffic will be sent or accepted.
    Closed,
}

impl SessionState {
    /// `true` once the handshake is far enough along that ordinary
    /// (non-`initialize`, non-`ping`) requests are allowed.
    pub fn is_operating(self) -> bool {
        matches!(self, SessionState::Operating)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Closed)
    }

    /// Validate a transition from `self` to `next`. Transitions must
    /// move strictly forward through the fixed ordering; anything else
    /// (including staying put) is rejected.
    pub fn validate_transition(self, next: SessionState) -> MCPResult<()> {
        if next as u8 <= self as u8 {
            return Err(MCPError::initialization(format!(
                "invalid session state transition: {self:?} -> {next:?}"
            )));
        }
        Ok(())
    }
}
