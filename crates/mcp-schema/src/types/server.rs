pub use crate::protocol::capabilities::{
    LoggingCapability, PromptsCapability, ResourcesCapability, ServerCapabilities, ToolsCapability,
};
pub use crate::types::client::Implementation;

pub type ServerInfo = Implementation;
