//! The bidirectional JSON-RPC session engine: one symmetric
//! implementation that drives both the client and server side of an MCP
//! connection.
//!
//! A [`Session`] owns a transport, assigns and tracks outbound request
//! ids, dispatches inbound traffic to registered handlers, and enforces
//! the five-state lifecycle (`Uninitialized -> Initializing ->
//! Operating -> Closing -> Closed`). It has no notion of "client" or
//! "server" beyond which handlers get registered under which method
//! names — see `mcp-client` and `mcp-server` for those.

pub mod handlers;
pub mod pending;
pub mod session;
pub mod state;

pub use handlers::{BoxFuture, HandlerTable, NotificationHandler, RequestHandler};
pub use pending::PendingRequestTable;
pub use session::{Session, INITIALIZED_NOTIFICATION};
pub use state::SessionState;
