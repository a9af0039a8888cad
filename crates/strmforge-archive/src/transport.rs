//! External remote-copy transport
//!
//! Uploads and downloads go through an external archive-sync tool (rclone by
//! default), invoked once per direction with a local path and a remote
//! `alias:/path` pair. Transport failures are fatal for the phase that
//! invoked them; the caller decides whether the run continues.

use strmforge_types::{Error, Result};
use tokio::process::Command;
use tracing::info;

/// Default transport program
pub const DEFAULT_PROGRAM: &str = "rclone";

/// Handle to the external remote-copy transport
#[derive(Debug, Clone)]
pub struct RemoteTransport {
    program: String,
}

impl RemoteTransport {
    /// Create a transport using the default program
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Create a transport using a specific program
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Copy `source` to `dest`, either side local or `alias:/path` remote
    pub async fn copy(&self, source: &str, dest: &str) -> Result<()> {
        info!("{} copy {} {}", self.program, source, dest);
        let status = Command::new(&self.program)
            .arg("copy")
            .arg("-P")
            .arg(source)
            .arg(dest)
            .status()
            .await
            .map_err(|e| Error::transport(format!("failed to invoke {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::transport(format!(
                "{} copy {} {} exited with {}",
                self.program, source, dest, status
            )));
        }
        Ok(())
    }
}

impl Default for RemoteTransport {
    fn default() -> Self {
        Self::new()
    }
}
