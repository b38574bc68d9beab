use serde::{Deserialize, Serialize};

/// A container environment variable declared in `confx.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Declare `value` as an exposed port in the runtime stage.
    #[serde(default)]
    pub expose: bool,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            expose: false,
        }
    }

    /// Same as [`EnvVar::new`] with `expose` set.
    pub fn exposed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expose: true,
            ..Self::new(key, value)
        }
    }

    /// Whether this entry produces an `EXPOSE` directive.
    ///
    /// Both conditions are required: an exposed entry with an empty value
    /// and a non-exposed entry with a value are both skipped.
    pub fn is_exposed_port(&self) -> bool {
        !self.value.is_empty() && self.expose
    }
}

/// Ordered registry of environment variables.
///
/// Iteration follows insertion order. Pushing a key that is already
/// registered replaces the entry in place, keeping its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EnvVar>", into = "Vec<EnvVar>")]
pub struct EnvVars {
    values: Vec<EnvVar>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, var: EnvVar) {
        match self.values.iter_mut().find(|v| v.key == var.key) {
            Some(existing) => *existing = var,
            None => self.values.push(var),
        }
    }

    pub fn get(&self, key: &str) -> Option<&EnvVar> {
        self.values.iter().find(|v| v.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnvVar> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values to declare with `EXPOSE`, in registry order.
    pub fn exposed_ports(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|v| v.is_exposed_port())
            .map(|v| v.value.as_str())
    }
}

impl From<Vec<EnvVar>> for EnvVars {
    fn from(values: Vec<EnvVar>) -> Self {
        values.into_iter().collect()
    }
}

impl From<EnvVars> for Vec<EnvVar> {
    fn from(vars: EnvVars) -> Self {
        vars.values
    }
}

impl FromIterator<EnvVar> for EnvVars {
    fn from_iter<I: IntoIterator<Item = EnvVar>>(iter: I) -> Self {
        let mut vars = Self::new();
        for var in iter {
            vars.push(var);
        }
        vars
    }
}

impl<'a> IntoIterator for &'a EnvVars {
    type Item = &'a EnvVar;
    type IntoIter = std::slice::Iter<'a, EnvVar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order() {
        let mut vars = EnvVars::new();
        vars.push(EnvVar::new("B", "2"));
        vars.push(EnvVar::new("A", "1"));
        vars.push(EnvVar::new("C", "3"));

        let keys: Vec<&str> = vars.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn push_existing_key_replaces_in_place() {
        let mut vars = EnvVars::new();
        vars.push(EnvVar::new("PORT", "80"));
        vars.push(EnvVar::new("MODE", "prod"));
        vars.push(EnvVar::exposed("PORT", "8080"));

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.iter().next().unwrap().key, "PORT");
        assert_eq!(vars.get("PORT").unwrap().value, "8080");
        assert!(vars.get("PORT").unwrap().expose);
    }

    #[test]
    fn exposed_ports_requires_value_and_flag() {
        let vars: EnvVars = vec![
            EnvVar::exposed("HTTP", "8080"),
            EnvVar::exposed("EMPTY", ""),
            EnvVar::new("GRPC", "9090"),
            EnvVar::exposed("ADMIN", "9000"),
        ]
        .into();

        let ports: Vec<&str> = vars.exposed_ports().collect();
        assert_eq!(ports, ["8080", "9000"]);
    }

    #[test]
    fn empty_registry_has_no_ports() {
        let vars = EnvVars::new();
        assert!(vars.is_empty());
        assert_eq!(vars.exposed_ports().count(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn env_var() -> impl Strategy<Value = EnvVar> {
            ("[A-Z]{1,6}", "[0-9]{0,5}", any::<bool>()).prop_map(|(key, value, expose)| EnvVar {
                key,
                value,
                expose,
            })
        }

        proptest! {
            #[test]
            fn exposed_ports_match_filter(vars in proptest::collection::vec(env_var(), 0..12)) {
                let registry: EnvVars = vars.into();
                let expected: Vec<&str> = registry
                    .iter()
                    .filter(|v| !v.value.is_empty() && v.expose)
                    .map(|v| v.value.as_str())
                    .collect();
                let ports: Vec<&str> = registry.exposed_ports().collect();
                prop_assert_eq!(ports, expected);
            }

            #[test]
            fn keys_are_unique(vars in proptest::collection::vec(env_var(), 0..12)) {
                let registry: EnvVars = vars.into();
                let mut keys: Vec<&str> = registry.iter().map(|v| v.key.as_str()).collect();
                let total = keys.len();
                keys.sort_unstable();
                keys.dedup();
                prop_assert_eq!(keys.len(), total);
            }
        }
    }
}
