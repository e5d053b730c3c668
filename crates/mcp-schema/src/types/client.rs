use serde::{Deserialize, Serialize};

/// `{name, version}` identity a peer sends about itself during
/// `initialize`. Used for both `clientInfo` and `serverInfo`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

impl Implementation {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

pub type ClientInfo = Implementation;

pub use crate::protocol::capabilities::{ClientCapabilities, RootsCapability, SamplingCapability};
