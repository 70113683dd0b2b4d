//! Writing contributor output for the launcher.
//!
//! Under the buildpack `exec.d` protocol a helper prints a TOML table of environment
//! variables to file descriptor 3. Stdout and plain files are supported for local use.

#[cfg(unix)]
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::env::EnvDelta;
use crate::error::{HelperError, HelperResult};

#[cfg(unix)]
const EXEC_D_FD_PATH: &str = "/dev/fd/3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format `{other}` (expected toml or json)")),
        }
    }
}

/// Where the rendered delta goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// File descriptor 3, as expected by `exec.d`.
    ExecD,
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    /// `exec-d` on unix, stdout elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(unix) {
            Self::ExecD
        } else {
            Self::Stdout
        }
    }
}

impl FromStr for OutputSink {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("output must not be empty".to_owned()),
            "exec-d" | "exec.d" | "fd3" => Ok(Self::ExecD),
            "-" | "stdout" => Ok(Self::Stdout),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

/// Render `delta` as a TOML table of string values. An empty delta renders as an
/// empty document.
pub fn render_toml(delta: &EnvDelta) -> HelperResult<String> {
    Ok(toml::to_string(delta)?)
}

pub fn render_json(delta: &EnvDelta) -> HelperResult<String> {
    let mut out = serde_json::to_string_pretty(delta)?;
    out.push('\n');
    Ok(out)
}

pub fn render(format: OutputFormat, delta: &EnvDelta) -> HelperResult<String> {
    match format {
        OutputFormat::Toml => render_toml(delta),
        OutputFormat::Json => render_json(delta),
    }
}

/// Render `delta` in `format` and write it to `sink`.
pub fn write_delta(sink: &OutputSink, format: OutputFormat, delta: &EnvDelta) -> HelperResult<()> {
    let rendered = render(format, delta)?;
    match sink {
        OutputSink::ExecD => write_exec_d(rendered.as_bytes()),
        OutputSink::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| HelperError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
        OutputSink::File(path) => write_file(path, rendered.as_bytes()),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> HelperResult<()> {
    std::fs::write(path, bytes).map_err(|source| HelperError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn write_exec_d(bytes: &[u8]) -> HelperResult<()> {
    let mut fd3 = OpenOptions::new()
        .write(true)
        .open(EXEC_D_FD_PATH)
        .map_err(HelperError::ExecD)?;
    fd3.write_all(bytes).map_err(HelperError::ExecD)?;
    fd3.flush().map_err(HelperError::ExecD)
}

#[cfg(not(unix))]
fn write_exec_d(_bytes: &[u8]) -> HelperResult<()> {
    Err(HelperError::ExecDUnsupported)
}
