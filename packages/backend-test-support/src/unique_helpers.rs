//! Unique test data, so tests sharing a database never collide.

use ulid::Ulid;

/// A unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("session");
/// assert_ne!(a, unique_str("session"));
/// assert!(a.starts_with("session-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique session key in the generated-id style, `test_{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_session_key;
///
/// assert!(unique_session_key().starts_with("test_"));
/// ```
pub fn unique_session_key() -> String {
    format!("test_{}", Ulid::new().to_string().to_ascii_lowercase())
}
