use anyhow::Context;
use clap::Parser;
use jvm_debug_helper::{
    init_tracing, run_contributors, write_delta, DebugAgentContributor, Environment,
    HelperConfig, LoggingConfig, OutputFormat, OutputSink,
};
use std::path::PathBuf;

/// Enable the JDWP debug agent for JVMs started in this container.
///
/// Reads `BPL_DEBUG_ENABLED`, `BPL_DEBUG_PORT` and `BPL_DEBUG_SUSPEND` and emits the
/// `JAVA_TOOL_OPTIONS` value to use. By default the result is written to fd 3 in the
/// `exec.d` TOML format.
#[derive(Debug, Parser)]
#[command(name = "jvm-debug-helper", version, about)]
struct Cli {
    /// File that reads `1` when the kernel has IPv6 disabled.
    #[arg(long, value_name = "PATH")]
    probe_path: Option<PathBuf>,

    /// Where to write the result: `exec-d` (fd 3), `stdout`/`-`, or a file path.
    #[arg(long, value_name = "SINK")]
    output: Option<OutputSink>,

    /// Output encoding.
    #[arg(long, default_value = "toml")]
    format: OutputFormat,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env = Environment::from_process();

    let mut logging = LoggingConfig::from_env(&env);
    logging.json |= cli.json_logs;
    init_tracing(&logging, env.get("RUST_LOG"));

    let mut config = HelperConfig::default();
    if let Some(path) = cli.probe_path {
        config = config.with_ipv6_probe_path(path);
    }

    let debug = DebugAgentContributor::new(config);
    let delta = run_contributors(&env, &[&debug]);

    let sink = cli.output.unwrap_or_else(OutputSink::platform_default);
    write_delta(&sink, cli.format, &delta)
        .with_context(|| format!("failed to write helper output to {sink:?}"))?;
    Ok(())
}
