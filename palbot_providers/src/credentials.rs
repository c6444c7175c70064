//! Credential resolution for key-bearing backends.
//!
//! A non-empty ambient environment variable takes precedence over the
//! configured key. Nothing is written back to the process environment;
//! the resolved key is passed into the backend client constructor
//! explicitly.

/// Resolve the API key for a backend from the ambient environment value
/// and the configured value, in that order of precedence.
///
/// Blank values are treated as absent.
#[must_use]
pub fn resolve_api_key(configured: &str, ambient: Option<&str>) -> Option<String> {
    ambient
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| Some(configured.trim()).filter(|v| !v.is_empty()))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_wins_over_configured() {
        assert_eq!(
            resolve_api_key("config-key", Some("env-key")),
            Some("env-key".to_string())
        );
    }

    #[test]
    fn configured_used_when_ambient_absent() {
        assert_eq!(
            resolve_api_key("config-key", None),
            Some("config-key".to_string())
        );
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(
            resolve_api_key("config-key", Some("   ")),
            Some("config-key".to_string())
        );
        assert_eq!(resolve_api_key("", None), None);
        assert_eq!(resolve_api_key("  ", Some("")), None);
    }
}
