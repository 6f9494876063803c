//! Shell snapshot capture scripts.
//!
//! Each script dumps the current shell's aliases, functions, options, and
//! exported environment variables in a form that can be re-sourced later to
//! reconstruct an equivalent environment. Working-directory variables are
//! excluded since they would fight the executor's own CWD tracking.

/// Marker line every snapshot script emits first, used to strip any shell
/// startup noise that precedes it in captured output.
pub(crate) const SNAPSHOT_MARKER: &str = "# Snapshot file";

/// Environment variables excluded from snapshots.
const EXCLUDED_EXPORT_NAMES: &[&str] = &["PWD", "OLDPWD"];

/// A `grep -E`-ready alternation pattern matching [`EXCLUDED_EXPORT_NAMES`].
fn excluded_exports_regex() -> String {
    EXCLUDED_EXPORT_NAMES.join("|")
}

fn export_filter(regex: &str) -> String {
    format!("export -p | grep -Ev '^(export|declare -x) ({regex})='")
}

/// Snapshot script for zsh.
pub fn zsh_snapshot_script() -> String {
    format!(
        "echo '{marker}'\n\
         unalias -a 2>/dev/null || true\n\
         functions 2>/dev/null\n\
         setopt 2>/dev/null\n\
         alias -L 2>/dev/null\n\
         {exports}\n",
        marker = SNAPSHOT_MARKER,
        exports = export_filter(&excluded_exports_regex()),
    )
}

/// Snapshot script for bash.
pub fn bash_snapshot_script() -> String {
    format!(
        "echo '{marker}'\n\
         unalias -a 2>/dev/null || true\n\
         declare -f 2>/dev/null\n\
         alias -p 2>/dev/null\n\
         set -o 2>/dev/null\n\
         {exports}\n",
        marker = SNAPSHOT_MARKER,
        exports = export_filter(&excluded_exports_regex()),
    )
}

/// Snapshot script for POSIX `sh`.
///
/// `sh` implementations vary in whether they support `typeset -f` (ksh-style)
/// or `declare -f` (bash-as-sh) for dumping functions, so both are tried.
pub fn sh_snapshot_script() -> String {
    format!(
        "echo '{marker}'\n\
         unalias -a 2>/dev/null || true\n\
         {{ typeset -f 2>/dev/null || declare -f 2>/dev/null || true; }}\n\
         {exports}\n",
        marker = SNAPSHOT_MARKER,
        exports = export_filter(&excluded_exports_regex()),
    )
}

/// Snapshot script for PowerShell.
pub fn powershell_snapshot_script() -> &'static str {
    "Write-Output '# Snapshot file'\n\
     Remove-Item Alias:* -Force -ErrorAction SilentlyContinue\n\
     Get-Alias | ForEach-Object { \"Set-Alias -Name $($_.Name) -Value $($_.Definition)\" }\n\
     Get-ChildItem Function: | ForEach-Object { \"function $($_.Name) { $($_.Definition) }\" }\n\
     Get-ChildItem Env: | Where-Object { $_.Name -notin @('PWD','OLDPWD') } | \
     ForEach-Object { \"$env:$($_.Name) = '$($_.Value)'\" }\n"
}

#[cfg(test)]
#[path = "scripts.test.rs"]
mod tests;
