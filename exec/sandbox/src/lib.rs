//! Sandbox enforcement for tool execution.
//!
//! This crate maps a [`SandboxConfig`] onto filesystem and network
//! permission checks, and (where a platform backend is available) onto
//! actual OS-level enforcement via [`platform::platform_sandbox`].
//!
//! ```
//! use tessera_sandbox::{PermissionChecker, SandboxConfig, SandboxMode};
//! use std::path::{Path, PathBuf};
//!
//! let config = SandboxConfig {
//!     mode: SandboxMode::Strict,
//!     allowed_paths: vec![PathBuf::from("/project")],
//!     denied_paths: vec![PathBuf::from("/project/.env")],
//!     allow_network: false,
//! };
//! let checker = PermissionChecker::new(config);
//! assert!(checker.check_path(Path::new("/project/src/main.rs"), true).is_ok());
//! assert!(checker.check_path(Path::new("/project/.env"), false).is_err());
//! ```

pub mod checker;
pub mod config;
pub mod error;
pub mod platform;

pub use checker::PermissionChecker;
pub use config::SandboxConfig;
pub use config::SandboxMode;
pub use config::SandboxSettings;
pub use error::Result;
pub use error::SandboxError;
pub use platform::SandboxPlatform;
pub use platform::platform_sandbox;
