//! Kernel IPv6 capability probe.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Kernel switch that reads `1` when IPv6 is disabled for all interfaces.
pub const DEFAULT_IPV6_PROBE_PATH: &str = "/proc/sys/net/ipv6/conf/all/disable_ipv6";

/// Reads the IPv6 probe file.
///
/// The probe is best-effort: a missing or unreadable file counts as "IPv6 available".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Probe {
    path: PathBuf,
}

impl Ipv6Probe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` unless the probe file exists and starts with `1`.
    pub fn ipv6_available(&self) -> bool {
        match first_byte(&self.path) {
            Ok(Some(b'1')) => false,
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %err,
                    "IPv6 probe unreadable; assuming IPv6 is available"
                );
                true
            }
        }
    }
}

impl Default for Ipv6Probe {
    fn default() -> Self {
        Self::new(DEFAULT_IPV6_PROBE_PATH)
    }
}

fn first_byte(path: &Path) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    let n = File::open(path)?.read(&mut buf)?;
    Ok((n == 1).then_some(buf[0]))
}
