//! Wire-level request, response, and notification payloads for every
//! MCP operation, plus the shared types (content blocks, capabilities)
//! those payloads are built from.
//!
//! - [`content`]: the shared `ContentBlock`/`Role` union used by tool
//!   results, prompt messages, and sampling messages.
//! - [`tools`], [`resources`], [`prompts`], [`sampling`], [`roots`]:
//!   one module per feature area, each holding that area's
//!   request/response/notification types.
//! - [`client`], [`server`]: `Implementation` info and the capability
//!   structs re-exported from [`crate::protocol::capabilities`].
//! - [`notifications`]: the change notifications, logging level/message
//!   pair, and `ping`.

pub mod client;
pub mod content;
pub mod notifications;
pub mod prompts;
pub mod resources;
pub mod roots;
pub mod sampling;
pub mod server;
pub mod tools;

pub use client::*;
pub use content::*;
pub use notifications::*;
pub use prompts::*;
pub use resources::*;
pub use roots::*;
pub use sampling::*;
pub use server::*;
pub use tools::*;
