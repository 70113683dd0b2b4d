use std::path::Path;

use jvm_debug_helper::env::{
    BPL_DEBUG_ENABLED, BPL_DEBUG_PORT, BPL_DEBUG_SUSPEND, JAVA_TOOL_OPTIONS,
};
use jvm_debug_helper::{DebugAgentContributor, EnvDelta, Environment, HelperConfig};
use tempfile::TempDir;

const DEFAULT_FLAG: &str = "-agentlib:jdwp=transport=dt_socket,server=y,address=*:8000,suspend=n";

/// A contributor whose IPv6 probe file contains `content`.
struct Fixture {
    _dir: TempDir,
    contributor: DebugAgentContributor,
}

impl Fixture {
    fn with_probe(content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disable_ipv6");
        std::fs::write(&path, content).unwrap();
        Self::at(dir, &path)
    }

    fn at(dir: TempDir, probe: &Path) -> Self {
        let contributor =
            DebugAgentContributor::new(HelperConfig::default().with_ipv6_probe_path(probe));
        Self {
            _dir: dir,
            contributor,
        }
    }

    fn execute(&self, env: &Environment) -> EnvDelta {
        self.contributor.execute(env)
    }
}

fn enabled() -> Environment {
    Environment::new().with(BPL_DEBUG_ENABLED, "true")
}

fn tool_options(value: &str) -> EnvDelta {
    EnvDelta::from([(JAVA_TOOL_OPTIONS.to_owned(), value.to_owned())])
}

#[test]
fn does_nothing_without_bpl_debug_enabled() {
    let fixture = Fixture::with_probe("0");
    assert!(fixture.execute(&Environment::new()).is_empty());

    let env = Environment::new()
        .with(BPL_DEBUG_PORT, "8001")
        .with(BPL_DEBUG_SUSPEND, "true")
        .with(JAVA_TOOL_OPTIONS, "-Xmx1g");
    assert!(fixture.execute(&env).is_empty());
}

#[test]
fn contributes_default_configuration() {
    let fixture = Fixture::with_probe("0");
    assert_eq!(fixture.execute(&enabled()), tool_options(DEFAULT_FLAG));
}

#[test]
fn does_not_update_when_jdwp_already_configured() {
    let fixture = Fixture::with_probe("0");
    let env = enabled()
        .with(JAVA_TOOL_OPTIONS, "-agentlib:jdwp=something")
        .with(BPL_DEBUG_PORT, "9000")
        .with(BPL_DEBUG_SUSPEND, "true");
    assert!(fixture.execute(&env).is_empty());

    let env = enabled().with(JAVA_TOOL_OPTIONS, "-Xmx1g -agentlib:jdwp=transport=dt_socket");
    assert!(fixture.execute(&env).is_empty());
}

#[test]
fn contributes_port_from_bpl_debug_port() {
    let fixture = Fixture::with_probe("0");
    let env = enabled().with(BPL_DEBUG_PORT, "8001");
    assert_eq!(
        fixture.execute(&env),
        tool_options("-agentlib:jdwp=transport=dt_socket,server=y,address=*:8001,suspend=n")
    );
}

#[test]
fn empty_bpl_debug_port_uses_default() {
    let fixture = Fixture::with_probe("0");
    let env = enabled().with(BPL_DEBUG_PORT, "");
    assert_eq!(fixture.execute(&env), tool_options(DEFAULT_FLAG));
}

#[test]
fn contributes_suspend_from_bpl_debug_suspend() {
    let fixture = Fixture::with_probe("0");
    let env = enabled().with(BPL_DEBUG_SUSPEND, "true");
    assert_eq!(
        fixture.execute(&env),
        tool_options("-agentlib:jdwp=transport=dt_socket,server=y,address=*:8000,suspend=y")
    );
}

#[test]
fn appends_to_existing_java_tool_options() {
    let fixture = Fixture::with_probe("0");
    let env = enabled().with(JAVA_TOOL_OPTIONS, "test-java-tool-options");
    assert_eq!(
        fixture.execute(&env),
        tool_options(&format!("test-java-tool-options {DEFAULT_FLAG}"))
    );
}

#[test]
fn empty_java_tool_options_yields_flag_alone() {
    let fixture = Fixture::with_probe("0");
    let env = enabled().with(JAVA_TOOL_OPTIONS, "");
    assert_eq!(fixture.execute(&env), tool_options(DEFAULT_FLAG));
}

#[test]
fn binds_ipv4_wildcard_when_ipv6_disabled() {
    let fixture = Fixture::with_probe("1");
    assert_eq!(
        fixture.execute(&enabled()),
        tool_options("-agentlib:jdwp=transport=dt_socket,server=y,address=0.0.0.0:8000,suspend=n")
    );
}

#[test]
fn missing_probe_file_keeps_dual_stack_wildcard() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");
    let fixture = Fixture::at(dir, &missing);
    assert_eq!(fixture.execute(&enabled()), tool_options(DEFAULT_FLAG));
}

#[test]
fn overrides_combine() {
    let fixture = Fixture::with_probe("1\n");
    let env = enabled()
        .with(BPL_DEBUG_PORT, "5005")
        .with(BPL_DEBUG_SUSPEND, "True")
        .with(JAVA_TOOL_OPTIONS, "-XX:+UseG1GC -Dfoo=bar");
    assert_eq!(
        fixture.execute(&env),
        tool_options(
            "-XX:+UseG1GC -Dfoo=bar \
             -agentlib:jdwp=transport=dt_socket,server=y,address=0.0.0.0:5005,suspend=y"
        )
    );
}

#[test]
fn probe_is_read_on_every_call() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disable_ipv6");
    std::fs::write(&path, "0").unwrap();
    let fixture = Fixture::at(dir, &path);

    assert_eq!(fixture.execute(&enabled()), tool_options(DEFAULT_FLAG));

    std::fs::write(&path, "1").unwrap();
    assert_eq!(
        fixture.execute(&enabled()),
        tool_options("-agentlib:jdwp=transport=dt_socket,server=y,address=0.0.0.0:8000,suspend=n")
    );
}
