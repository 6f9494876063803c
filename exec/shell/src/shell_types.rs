//! Shell detection and invocation argument derivation.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;

use crate::snapshot::ShellSnapshot;

/// A recognized shell flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellType {
    Bash,
    Zsh,
    Sh,
    PowerShell,
    Cmd,
}

/// Detects the shell flavor from an executable path or name.
///
/// Matches on the file stem (without extension), case-insensitively, so
/// `/bin/bash`, `bash`, and `bash.exe` all resolve the same way. Returns
/// `None` for unrecognized shells (e.g. `fish`).
pub fn detect_shell_type(path: &Path) -> Option<ShellType> {
    let stem = path.file_stem()?.to_str()?.to_lowercase();
    match stem.as_str() {
        "bash" => Some(ShellType::Bash),
        "zsh" => Some(ShellType::Zsh),
        "sh" => Some(ShellType::Sh),
        "pwsh" | "powershell" => Some(ShellType::PowerShell),
        "cmd" => Some(ShellType::Cmd),
        _ => None,
    }
}

/// A resolved shell, ready to build invocation arguments for.
#[derive(Debug, Clone)]
pub struct Shell {
    pub shell_type: ShellType,
    pub shell_path: PathBuf,
    /// Resolves once background snapshot capture completes, if started.
    pub shell_snapshot: watch::Receiver<Option<Arc<ShellSnapshot>>>,
}

impl PartialEq for Shell {
    fn eq(&self, other: &Self) -> bool {
        self.shell_type == other.shell_type && self.shell_path == other.shell_path
    }
}

impl Eq for Shell {}

impl Shell {
    /// The shell's flavor.
    pub fn shell_type(&self) -> &ShellType {
        &self.shell_type
    }

    /// The shell's executable path.
    pub fn shell_path(&self) -> &Path {
        &self.shell_path
    }

    /// Human-readable shell name, used for logging and diagnostics.
    pub fn name(&self) -> &'static str {
        match self.shell_type {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Sh => "sh",
            ShellType::PowerShell => "powershell",
            ShellType::Cmd => "cmd",
        }
    }

    /// Swaps in a new snapshot receiver, e.g. once background capture starts.
    pub fn set_shell_snapshot_receiver(
        &mut self,
        receiver: watch::Receiver<Option<Arc<ShellSnapshot>>>,
    ) {
        self.shell_snapshot = receiver;
    }

    /// The current shell snapshot, if capture has completed.
    pub fn shell_snapshot(&self) -> Option<Arc<ShellSnapshot>> {
        self.shell_snapshot.borrow().clone()
    }

    /// Builds the argv for invoking this shell with `command`.
    ///
    /// `login` requests a login shell, which is how environment
    /// customizations (aliases, PATH tweaks) get picked up; callers fall
    /// back to a non-login invocation once a snapshot makes that
    /// unnecessary.
    pub fn derive_exec_args(&self, command: &str, login: bool) -> Vec<String> {
        let shell_path = self.shell_path.display().to_string();
        match self.shell_type {
            ShellType::Bash | ShellType::Zsh => {
                let flag = if login { "-lc" } else { "-c" };
                vec![shell_path, flag.to_string(), command.to_string()]
            }
            ShellType::Sh => vec![shell_path, "-c".to_string(), command.to_string()],
            ShellType::PowerShell => {
                if login {
                    vec![shell_path, "-Command".to_string(), command.to_string()]
                } else {
                    vec![
                        shell_path,
                        "-NoProfile".to_string(),
                        "-Command".to_string(),
                        command.to_string(),
                    ]
                }
            }
            ShellType::Cmd => vec![shell_path, "/c".to_string(), command.to_string()],
        }
    }
}

fn empty_shell_snapshot_receiver() -> watch::Receiver<Option<Arc<ShellSnapshot>>> {
    watch::channel(None).1
}

fn new_shell(shell_type: ShellType, shell_path: PathBuf) -> Shell {
    Shell {
        shell_type,
        shell_path,
        shell_snapshot: empty_shell_snapshot_receiver(),
    }
}

/// Resolves a shell by flavor, searching `PATH` (or a caller-supplied
/// override path) for a matching executable.
pub fn get_shell(shell_type: ShellType, override_path: Option<&Path>) -> Option<Shell> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Some(new_shell(shell_type, path.to_path_buf()));
        }
        return None;
    }

    let candidates: &[&str] = match shell_type {
        ShellType::Bash => &["bash"],
        ShellType::Zsh => &["zsh"],
        ShellType::Sh => &["sh"],
        ShellType::PowerShell => &["pwsh", "powershell"],
        ShellType::Cmd => &["cmd"],
    };

    for candidate in candidates {
        if let Ok(path) = which::which(candidate) {
            return Some(new_shell(shell_type, path));
        }
    }

    None
}

/// Resolves a shell from an explicit executable path, inferring its flavor.
pub fn get_shell_by_path(path: &Path) -> Option<Shell> {
    let shell_type = detect_shell_type(path)?;
    Some(new_shell(shell_type, path.to_path_buf()))
}

/// Shell invoked for the ultimate fallback, when nothing else can be found.
fn ultimate_fallback_shell() -> Shell {
    if cfg!(windows) {
        new_shell(ShellType::Cmd, PathBuf::from("cmd.exe"))
    } else {
        new_shell(ShellType::Sh, PathBuf::from("/bin/sh"))
    }
}

/// Resolves the user's preferred shell.
///
/// Honors `$SHELL` on Unix and `$COMSPEC` on Windows, falling back through
/// bash, then the platform's baseline shell if neither resolves.
pub fn default_user_shell() -> Shell {
    #[cfg(windows)]
    {
        if let Ok(comspec) = std::env::var("COMSPEC") {
            if let Some(shell) = get_shell_by_path(Path::new(&comspec)) {
                return shell;
            }
        }
    }

    #[cfg(unix)]
    {
        if let Ok(shell_env) = std::env::var("SHELL") {
            if let Some(shell) = get_shell_by_path(Path::new(&shell_env)) {
                return shell;
            }
        }
    }

    if let Some(shell) = get_shell(ShellType::Bash, None) {
        return shell;
    }

    ultimate_fallback_shell()
}

#[cfg(test)]
#[path = "shell_types.test.rs"]
mod tests;
