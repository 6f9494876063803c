//! Windows sandbox enforcement.

use crate::config::SandboxConfig;
use crate::config::SandboxMode;
use crate::error::Result;
use crate::error::sandbox_error::*;
use crate::platform::SandboxPlatform;

/// Sandbox enforcement on Windows. Not yet implemented beyond the `None`
/// mode no-op; `available` reports `false` everywhere else so callers fall
/// back to unsandboxed execution rather than a silently-unenforced sandbox.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsSandbox;

impl SandboxPlatform for WindowsSandbox {
    fn available(&self) -> bool {
        cfg!(target_os = "windows")
    }

    fn apply(&self, config: &SandboxConfig) -> Result<()> {
        if config.mode == SandboxMode::None {
            return Ok(());
        }

        if !self.available() {
            return ApplyFailedSnafu {
                message: "windows sandbox is not available on this platform".to_string(),
            }
            .fail();
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "windows.test.rs"]
mod tests;
