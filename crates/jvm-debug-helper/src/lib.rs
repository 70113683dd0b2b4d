//! Launch-time JVM debug helper.
//!
//! This crate provides:
//! - [`DebugAgentContributor`], which decides from the environment whether to enable
//!   the JDWP agent and computes the `JAVA_TOOL_OPTIONS` value to set.
//! - A small [`Contributor`] abstraction for running several such helpers in order.
//! - Output helpers that write the resulting variables in the `exec.d` TOML format.
//!
//! Contributors never mutate the process environment; they take an [`Environment`]
//! snapshot and return an [`EnvDelta`] for the caller to apply.

pub mod config;
pub mod contributor;
pub mod debug;
pub mod env;
pub mod error;
pub mod exec_d;
pub mod ipv6;

pub use crate::config::{init_tracing, HelperConfig, LoggingConfig};
pub use crate::contributor::{run_contributors, Contributor};
pub use crate::debug::{DebugAgentContributor, DebugSettings, JDWP_AGENT_MARKER};
pub use crate::env::{EnvDelta, Environment};
pub use crate::error::{HelperError, HelperResult};
pub use crate::exec_d::{write_delta, OutputFormat, OutputSink};
pub use crate::ipv6::{Ipv6Probe, DEFAULT_IPV6_PROBE_PATH};
