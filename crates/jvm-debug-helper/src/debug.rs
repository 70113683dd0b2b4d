//! JDWP debug agent contributor.
//!
//! When `BPL_DEBUG_ENABLED` is set, appends a `-agentlib:jdwp=...` flag to
//! `JAVA_TOOL_OPTIONS` so every JVM in the container listens for a debugger.

use std::fmt;

use crate::config::HelperConfig;
use crate::contributor::Contributor;
use crate::env::{
    append_option, EnvDelta, Environment, BPL_DEBUG_ENABLED, BPL_DEBUG_PORT, BPL_DEBUG_SUSPEND,
    JAVA_TOOL_OPTIONS,
};
use crate::ipv6::Ipv6Probe;

/// Substring that identifies an already-configured JDWP agent.
pub const JDWP_AGENT_MARKER: &str = "-agentlib:jdwp=";

pub const DEFAULT_DEBUG_PORT: &str = "8000";

/// Listen on every interface, IPv4 and IPv6.
const WILDCARD_HOST: &str = "*";
/// Listen on every IPv4 interface. Used when the kernel has IPv6 disabled.
pub const IPV4_WILDCARD_HOST: &str = "0.0.0.0";

/// Parameters for a single JDWP agent flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSettings {
    /// Passed through verbatim; the JVM reports invalid ports itself.
    pub port: String,
    pub suspend: bool,
    pub bind_host: String,
}

impl DebugSettings {
    /// Resolve the port and suspend overrides from `env`. The bind host starts as the
    /// dual-stack wildcard.
    pub fn from_env(env: &Environment) -> Self {
        let port = env
            .get(BPL_DEBUG_PORT)
            .filter(|port| !port.is_empty())
            .unwrap_or(DEFAULT_DEBUG_PORT)
            .to_owned();

        Self {
            port,
            suspend: env.resolve_bool(BPL_DEBUG_SUSPEND),
            bind_host: WILDCARD_HOST.to_owned(),
        }
    }
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_DEBUG_PORT.to_owned(),
            suspend: false,
            bind_host: WILDCARD_HOST.to_owned(),
        }
    }
}

impl fmt::Display for DebugSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{JDWP_AGENT_MARKER}transport=dt_socket,server=y,address={}:{},suspend={}",
            self.bind_host,
            self.port,
            if self.suspend { "y" } else { "n" }
        )
    }
}

/// Contributes the JDWP agent to `JAVA_TOOL_OPTIONS`.
#[derive(Debug, Clone, Default)]
pub struct DebugAgentContributor {
    probe: Ipv6Probe,
}

impl DebugAgentContributor {
    pub fn new(config: HelperConfig) -> Self {
        Self {
            probe: Ipv6Probe::new(config.ipv6_probe_path),
        }
    }

    /// Compute the `JAVA_TOOL_OPTIONS` delta for `env`.
    ///
    /// Returns an empty delta when debugging is not enabled or a JDWP agent is already
    /// present in `JAVA_TOOL_OPTIONS`.
    pub fn execute(&self, env: &Environment) -> EnvDelta {
        if !env.resolve_bool(BPL_DEBUG_ENABLED) {
            return EnvDelta::new();
        }

        let existing = env.get_or(JAVA_TOOL_OPTIONS, "");
        if existing.contains(JDWP_AGENT_MARKER) {
            tracing::info!("Java agent 'jdwp' already configured");
            return EnvDelta::new();
        }

        let mut settings = DebugSettings::from_env(env);
        if settings.suspend {
            tracing::info!("Debugging enabled on port {}, suspended on start", settings.port);
        } else {
            tracing::info!("Debugging enabled on port {}", settings.port);
        }

        if !self.probe.ipv6_available() {
            tracing::debug!(
                probe = %self.probe.path().display(),
                "IPv6 disabled; binding debug agent to {IPV4_WILDCARD_HOST}"
            );
            settings.bind_host = IPV4_WILDCARD_HOST.to_owned();
        }

        let options = append_option(existing, &settings.to_string());
        EnvDelta::from([(JAVA_TOOL_OPTIONS.to_owned(), options)])
    }
}

impl Contributor for DebugAgentContributor {
    fn name(&self) -> &str {
        "debug-agent"
    }

    fn execute(&self, env: &Environment) -> EnvDelta {
        DebugAgentContributor::execute(self, env)
    }
}
