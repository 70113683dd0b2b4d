use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type HelperResult<T> = Result<T, HelperError>;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to exec.d output (fd 3): {0}")]
    ExecD(#[source] io::Error),
    #[error("exec.d output (fd 3) is only supported on unix")]
    ExecDUnsupported,
    #[error("failed to encode TOML: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
