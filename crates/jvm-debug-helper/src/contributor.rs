use crate::env::{EnvDelta, Environment};

/// A launch-time helper that contributes environment variables.
///
/// Implementations must not touch the process environment; they receive a snapshot
/// and return the variables they want set.
pub trait Contributor {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn execute(&self, env: &Environment) -> EnvDelta;
}

/// Run `contributors` in order and return the union of their deltas.
///
/// Each contributor sees the snapshot with all earlier deltas applied. When two
/// contributors set the same variable, the later value wins.
pub fn run_contributors(env: &Environment, contributors: &[&dyn Contributor]) -> EnvDelta {
    let mut current = env.clone();
    let mut combined = EnvDelta::new();

    for contributor in contributors {
        let delta = contributor.execute(&current);
        tracing::debug!(
            contributor = contributor.name(),
            vars = delta.len(),
            "contributor finished"
        );
        if delta.is_empty() {
            continue;
        }
        current = current.merged(&delta);
        combined.extend(delta);
    }

    combined
}
