//! Unix sandbox enforcement.

use crate::config::SandboxConfig;
use crate::config::SandboxMode;
use crate::error::Result;
use crate::error::sandbox_error::*;
use crate::platform::SandboxPlatform;

/// Sandbox enforcement on macOS and Linux.
///
/// Linux enforcement applies a seccomp filter restricting dangerous syscalls;
/// macOS relies on the caller having already scoped file/network access
/// (e.g. via `sandbox-exec`) before this runs. Neither platform's enforcement
/// is implemented yet; `apply` currently only validates the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixSandbox;

impl SandboxPlatform for UnixSandbox {
    fn available(&self) -> bool {
        cfg!(target_os = "macos") || cfg!(target_os = "linux")
    }

    fn apply(&self, config: &SandboxConfig) -> Result<()> {
        if config.mode == SandboxMode::None {
            return Ok(());
        }

        if !self.available() {
            return ApplyFailedSnafu {
                message: "unix sandbox is not available on this platform".to_string(),
            }
            .fail();
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "unix.test.rs"]
mod tests;
