//! The server half of a Model Context Protocol session: registers
//! tools, resources, and prompts, answers the `initialize` handshake,
//! and can itself call out to the client for sampling or the root
//! list.
//!
//! Built on [`mcp_session::Session`] the same way `mcp-client` is —
//! this crate only adds the handler registrations and registries a
//! server needs.

pub mod handlers;
pub mod registry;
pub mod server;

pub use handlers::{PromptHandler, ResourceHandler, ToolHandler};
pub use registry::{PromptRegistry, ResourceRegistry, ToolRegistry};
pub use server::Server;
