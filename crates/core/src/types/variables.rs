use std::collections::BTreeMap;

/// Prefix under which process environment variables are exposed to templates
pub const ENV_VAR_PREFIX: &str = "env.";

/// Flattened variable environment used to render command templates.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    /// Create a new empty environment
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Merge the three variable sources, lowest precedence first:
    /// document variables, process environment under `env.`, caller overrides.
    ///
    /// Bare and `env.`-prefixed names are distinct keys and never collide.
    #[must_use]
    pub fn merge<C, P, O>(config: C, process_env: P, overrides: O) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        P: IntoIterator<Item = (String, String)>,
        O: IntoIterator<Item = (String, String)>,
    {
        let mut vars: BTreeMap<String, String> = config.into_iter().collect();
        vars.extend(
            process_env
                .into_iter()
                .map(|(key, value)| (format!("{ENV_VAR_PREFIX}{key}"), value)),
        );
        vars.extend(overrides);
        Self(vars)
    }

    /// Merge using the current process environment
    #[must_use]
    pub fn from_process<C, O>(config: C, overrides: O) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        O: IntoIterator<Item = (String, String)>,
    {
        Self::merge(config, std::env::vars(), overrides)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for Variables {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_precedence_keeps_env_prefix_distinct() {
        let vars = Variables::merge(
            pairs(&[("NAME", "cfg")]),
            pairs(&[("NAME", "envval")]),
            pairs(&[("NAME", "cli")]),
        );

        assert_eq!(vars.get("NAME"), Some("cli"));
        assert_eq!(vars.get("env.NAME"), Some("envval"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_config_value_survives_without_override() {
        let vars = Variables::merge(pairs(&[("MSG", "hello")]), pairs(&[]), pairs(&[]));
        assert_eq!(vars.get("MSG"), Some("hello"));
        assert!(!vars.contains("env.MSG"));
    }

    #[test]
    fn test_override_may_target_prefixed_key() {
        let vars = Variables::merge(
            pairs(&[]),
            pairs(&[("HOME", "/home/real")]),
            pairs(&[("env.HOME", "/home/fake")]),
        );
        assert_eq!(vars.get("env.HOME"), Some("/home/fake"));
    }
}
