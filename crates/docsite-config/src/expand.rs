//! Environment variable expansion for configuration strings.
//!
//! Only `${VAR}` and `${VAR:-default}` forms are recognized; a bare `$VAR`
//! passes through unchanged.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// `${VAR}` expands to the value of VAR and errors if unset;
/// `${VAR:-default}` falls back to the default when VAR is unset.
/// Strings without `${` are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(UnsetVar {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(|cow| cow.into_owned())
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct UnsetVar {
    var_name: String,
}
