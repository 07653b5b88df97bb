//! Environment variable expansion for configuration strings.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).map(Some))
}

fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Result<Option<String>, VarError>,
{
    shellexpand::env_with_context(value, lookup)
        .map(Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(
        vars: &HashMap<&str, &str>,
    ) -> impl FnMut(&str) -> Result<Option<String>, VarError> {
        |name| {
            vars.get(name)
                .map(|value| Some((*value).to_owned()))
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn test_expand_set_variable() {
        let vars = HashMap::from([("ENGINE", "xml")]);
        let result = expand_with("${ENGINE}", "engine.name", lookup_in(&vars)).unwrap();
        assert_eq!(result, "xml");
    }

    #[test]
    fn test_expand_default_when_unset() {
        let vars = HashMap::new();
        let result = expand_with("${ENGINE:-html5}", "engine.name", lookup_in(&vars)).unwrap();
        assert_eq!(result, "html5");
    }

    #[test]
    fn test_expand_unset_variable_fails() {
        let vars = HashMap::new();
        let err = expand_with("${ENGINE}", "engine.name", lookup_in(&vars)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in engine.name: ${ENGINE} not set"
        );
    }

    #[test]
    fn test_literal_unchanged() {
        let vars = HashMap::new();
        let result = expand_with("html5", "engine.name", lookup_in(&vars)).unwrap();
        assert_eq!(result, "html5");
    }
}
