//! Common test assertion helpers.

use std::fmt::Debug;

use mcp_schema::MCPResult;

/// Assert that a result is an error whose `Display` output contains
/// `expected_substring`.
pub fn assert_mcp_error<T: Debug>(result: MCPResult<T>, expected_substring: &str) {
    match result {
        Ok(value) => panic!("expected error containing '{expected_substring}', got Ok({value:?})"),
        Err(error) => {
            let message = error.to_string();
            assert!(
                message.contains(expected_substring),
                "expected error to contain '{expected_substring}', got: {message}"
            );
        }
    }
}

/// Assert that a result is an error of a specific [`MCPError`] variant,
/// matched against its `Debug` output (e.g. `"Capability"`).
///
/// [`MCPError`]: mcp_schema::MCPError
pub fn assert_mcp_error_variant<T: Debug>(result: MCPResult<T>, variant_name: &str) {
    match result {
        Ok(value) => panic!("expected a {variant_name} error, got Ok({value:?})"),
        Err(error) => {
            let debug = format!("{error:?}");
            assert!(
                debug.contains(variant_name),
                "expected a {variant_name} error, got: {error:?}"
            );
        }
    }
}

/// Unwrap a result, panicking with the error's `Display` output if it
/// failed.
pub fn assert_mcp_success<T: Debug>(result: MCPResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("expected success, got error: {error}"),
    }
}

/// Assert two JSON values are equal, pretty-printing both on mismatch.
pub fn assert_json_eq(left: &serde_json::Value, right: &serde_json::Value) {
    if left != right {
        panic!(
            "JSON values are not equal:\nleft:  {}\nright: {}",
            serde_json::to_string_pretty(left).unwrap_or_else(|_| format!("{left:?}")),
            serde_json::to_string_pretty(right).unwrap_or_else(|_| format!("{right:?}")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_schema::error::ProtocolError;
    use mcp_schema::MCPError;

    #[test]
    fn assert_mcp_error_matches_on_substring() {
        let result: MCPResult<()> = Err(MCPError::Protocol(ProtocolError::InvalidRequest("bad shape".to_string())));
        assert_mcp_error(result, "bad shape");
    }

    #[test]
    #[should_panic(expected = "expected error containing")]
    fn assert_mcp_error_panics_on_success() {
        let result: MCPResult<()> = Ok(());
        assert_mcp_error(result, "anything");
    }

    #[test]
    fn assert_mcp_error_variant_matches_debug_tag() {
        let result: MCPResult<()> = Err(MCPError::capability("nope"));
        assert_mcp_error_variant(result, "Capability");
    }

    #[test]
    fn assert_mcp_success_unwraps_ok() {
        assert_eq!(assert_mcp_success(Ok::<_, MCPError>(42)), 42);
    }

    #[test]
    #[should_panic(expected = "expected success")]
    fn assert_mcp_success_panics_on_error() {
        let result: MCPResult<()> = Err(MCPError::capability("nope"));
        assert_mcp_success(result);
    }

    #[test]
    fn assert_json_eq_accepts_equal_values() {
        assert_json_eq(&serde_json::json!({"k": "v"}), &serde_json::json!({"k": "v"}));
    }
}
