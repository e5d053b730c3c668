//! Supported protocol version list and negotiation.
//!
//! The wire version is an opaque date string (`"2025-06-18"`); the core
//! never parses it into a structured date, it only compares it against
//! the list of versions this implementation understands.

/// The version this implementation prefers to offer when initiating a
/// session (client `initialize` request, or server fallback when the
/// client's requested version is unsupported).
pub const CURRENT_VERSION: &str = "2025-06-18";

/// All protocol versions this implementation can speak, oldest first.
pub const SUPPORTED_VERSIONS: &[&str] = &["2024-11-05", "2025-06-18"];

pub fn is_supported_version(version: &str) -> bool {
    SUPPORTED_VERSIONS.contains(&version)
}

/// Negotiate a protocol version for an `initialize` exchange: exact
/// match wins, otherwise fall back to [`CURRENT_VERSION`] so the server
/// can report what it does support in its response and let the client
/// decide whether to continue.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_VERSIONS
        .iter()
        .find(|&&v| v == requested)
        .copied()
        .unwrap_or(CURRENT_VERSION)
}
