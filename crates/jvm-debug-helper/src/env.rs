//! Environment snapshots and configuration deltas.
//!
//! Contributors never read `std::env` directly. The caller takes a snapshot once,
//! hands it to every contributor, and merges the returned deltas itself.

use std::collections::BTreeMap;

/// Enables the debug agent when set to an affirmative value.
pub const BPL_DEBUG_ENABLED: &str = "BPL_DEBUG_ENABLED";
/// Overrides the JDWP listener port.
pub const BPL_DEBUG_PORT: &str = "BPL_DEBUG_PORT";
/// Makes the JVM wait for a debugger before running `main`.
pub const BPL_DEBUG_SUSPEND: &str = "BPL_DEBUG_SUSPEND";
/// Options picked up by every JVM started in the container.
pub const JAVA_TOOL_OPTIONS: &str = "JAVA_TOOL_OPTIONS";
/// Log level (or `EnvFilter` directives) for the helper itself.
pub const BPL_LOG_LEVEL: &str = "BPL_LOG_LEVEL";

/// Variables a contributor wants the caller to set.
///
/// An empty delta means "no change".
pub type EnvDelta = BTreeMap<String, String>;

/// Immutable view of the process environment, taken once per evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped; none of the
    /// variables the helpers care about can legitimately contain such bytes.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Builder-style setter, mostly useful in tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Returns `None` when `key` is absent. A present-but-empty variable is `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Returns the value of `key`, or `default` when it is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Resolve `key` as a boolean flag.
    ///
    /// Absent variables and anything that isn't an affirmative spelling are `false`.
    pub fn resolve_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_affirmative)
    }

    /// Apply `delta` on top of this snapshot, returning the merged environment.
    pub fn merged(&self, delta: &EnvDelta) -> Self {
        let mut vars = self.vars.clone();
        vars.extend(delta.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { vars }
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Boolean spellings accepted as "true" by the buildpack launch tooling.
pub fn is_affirmative(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Append `value` to an existing space-separated option string.
///
/// The existing content is kept verbatim; an empty `existing` yields `value` alone.
pub fn append_option(existing: &str, value: &str) -> String {
    if existing.is_empty() {
        value.to_owned()
    } else {
        format!("{existing} {value}")
    }
}
