use std::{env::VarError, str::FromStr};

use crate::config::ConfigError;

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables. A variable that is
/// set but not valid unicode is reported as [`ConfigError::InvalidValue`].
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|e| match e {
        VarError::NotPresent => ConfigError::MissingEnvVar(name.to_string()),
        VarError::NotUnicode(_) => ConfigError::invalid(name, "value is not valid unicode"),
    })
}

/// Reads and parses an optional environment variable.
///
/// Returns `Ok(None)` when the variable is unset, and an
/// [`ConfigError::InvalidValue`] when it is set but does not parse as `T`.
pub fn get_env_parsed<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::invalid(name, e.to_string())),
        Err(ConfigError::MissingEnvVar(_)) => Ok(None),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_reported_by_name() {
        let err = get_env_var("SHARED_UTILS_TEST_SURELY_UNSET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SHARED_UTILS_TEST_SURELY_UNSET"
        );
    }

    #[test]
    fn unset_parsed_var_is_none() {
        let value: Option<f64> = get_env_parsed("SHARED_UTILS_TEST_SURELY_UNSET").unwrap();
        assert!(value.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_var_is_invalid_not_missing() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        const NAME: &str = "SHARED_UTILS_TEST_NON_UNICODE";
        // SAFETY: the variable name is private to this test.
        unsafe { std::env::set_var(NAME, OsStr::from_bytes(b"0.\xff")) };

        let err = get_env_var(NAME).unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { key, .. } if key == NAME),
            "{err}"
        );
        let parsed = get_env_parsed::<f64>(NAME);
        assert!(matches!(parsed, Err(ConfigError::InvalidValue { .. })));

        unsafe { std::env::remove_var(NAME) };
    }
}
