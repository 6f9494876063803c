//! Plugin directory scanning and loading.
//!
//! A plugin directory declares its metadata and contributions in either a
//! `PLUGIN.toml` (the format used by installed/marketplace plugins, see
//! [`crate::manifest`]) or a `plugin.json` (the format used by directly
//! scanned plugin directories, see the crate docs for its shape). `PLUGIN.toml`
//! is preferred when both are present. Loading a plugin resolves every
//! contribution path relative to the plugin directory and loads it via the
//! matching `*_loader` module.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::agent_loader::load_agents_from_dir;
use crate::command_loader::load_commands_from_dir;
use crate::contribution::PluginContribution;
use crate::error::Result;
use crate::error::plugin_error::InvalidManifestSnafu;
use crate::error::plugin_error::IoSnafu;
use crate::error::plugin_error::ManifestNotFoundSnafu;
use crate::manifest::PLUGIN_TOML;
use crate::manifest::PluginManifest;
use crate::mcp_loader::load_mcp_servers_from_dir;
use crate::scope::PluginScope;

/// The expected manifest file name for directory-scanned plugins.
pub const PLUGIN_JSON: &str = "plugin.json";

/// Returns the manifest file in `dir`, preferring `PLUGIN.toml` over
/// `plugin.json` when both are present.
fn manifest_file(dir: &Path) -> Option<PathBuf> {
    let toml_path = dir.join(PLUGIN_TOML);
    if toml_path.is_file() {
        return Some(toml_path);
    }
    let json_path = dir.join(PLUGIN_JSON);
    if json_path.is_file() {
        return Some(json_path);
    }
    None
}

/// A fully loaded plugin: its manifest plus every resolved contribution.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    /// The plugin's parsed manifest.
    pub manifest: PluginManifest,
    /// The directory the plugin was loaded from.
    pub path: PathBuf,
    /// The scope this plugin was discovered in.
    pub scope: PluginScope,
    /// Resolved contributions (skills, hooks, agents, commands, MCP servers).
    pub contributions: Vec<PluginContribution>,
}

impl LoadedPlugin {
    /// The plugin's name.
    pub fn name(&self) -> &str {
        &self.manifest.plugin.name
    }

    /// The plugin's version.
    pub fn version(&self) -> &str {
        &self.manifest.plugin.version
    }
}

/// Scans a directory and loads every plugin it finds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluginLoader;

impl PluginLoader {
    /// Creates a new loader.
    pub fn new() -> Self {
        Self
    }

    /// Returns the immediate subdirectories of `root` that contain a
    /// `PLUGIN.toml` or `plugin.json` manifest.
    pub fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(root) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() && manifest_file(&path).is_some() {
                found.push(path);
            }
        }
        found.sort();
        found
    }

    /// Loads a single plugin from `dir`, resolving all of its contributions.
    pub fn load(&self, dir: &Path, scope: PluginScope) -> Result<LoadedPlugin> {
        let manifest_path = manifest_file(dir).ok_or_else(|| {
            ManifestNotFoundSnafu {
                path: dir.join(PLUGIN_JSON),
            }
            .build()
        })?;

        let is_toml = manifest_path.file_name().and_then(|n| n.to_str()) == Some(PLUGIN_TOML);
        let manifest: PluginManifest = if is_toml {
            PluginManifest::from_file(&manifest_path)?
        } else {
            let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
                IoSnafu {
                    path: manifest_path.clone(),
                    message: e.to_string(),
                }
                .build()
            })?;

            serde_json::from_str(&content).map_err(|e| {
                InvalidManifestSnafu {
                    path: manifest_path.clone(),
                    message: e.to_string(),
                }
                .build()
            })?
        };

        let plugin_name = manifest.plugin.name.clone();
        let contributions = load_contributions(dir, &plugin_name, &manifest);

        debug!(
            plugin = %plugin_name,
            scope = %scope,
            contributions = contributions.len(),
            "Loaded plugin"
        );

        Ok(LoadedPlugin {
            manifest,
            path: dir.to_path_buf(),
            scope,
            contributions,
        })
    }
}

/// Resolves every contribution path declared in `manifest` relative to
/// `plugin_dir` and loads it.
fn load_contributions(
    plugin_dir: &Path,
    plugin_name: &str,
    manifest: &PluginManifest,
) -> Vec<PluginContribution> {
    let mut contributions = Vec::new();

    for path in &manifest.contributions.skills {
        let skill_dir = plugin_dir.join(path);
        for outcome in tessera_skill::load_skills_from_dir(&skill_dir) {
            match outcome {
                tessera_skill::SkillLoadOutcome::Success { skill, .. } => {
                    contributions.push(PluginContribution::Skill {
                        skill,
                        plugin_name: plugin_name.to_string(),
                    });
                }
                tessera_skill::SkillLoadOutcome::Failed { path, error } => {
                    warn!(
                        plugin = %plugin_name,
                        path = %path.display(),
                        %error,
                        "Failed to load skill contribution"
                    );
                }
            }
        }
    }

    for path in &manifest.contributions.hooks {
        let hooks_path = plugin_dir.join(path);
        match tessera_hooks::load_hooks_from_json(&hooks_path) {
            Ok(hooks) => {
                for hook in hooks {
                    contributions.push(PluginContribution::Hook {
                        hook,
                        plugin_name: plugin_name.to_string(),
                    });
                }
            }
            Err(e) => {
                warn!(
                    plugin = %plugin_name,
                    path = %hooks_path.display(),
                    error = %e,
                    "Failed to load hook contribution"
                );
            }
        }
    }

    for path in &manifest.contributions.agents {
        contributions.extend(load_agents_from_dir(&plugin_dir.join(path), plugin_name));
    }

    for path in &manifest.contributions.commands {
        contributions.extend(load_commands_from_dir(&plugin_dir.join(path), plugin_name));
    }

    for path in &manifest.contributions.mcp_servers {
        contributions.extend(load_mcp_servers_from_dir(
            &plugin_dir.join(path),
            plugin_name,
        ));
    }

    contributions
}

/// Scans every `(root, scope)` pair and loads all plugins found within.
pub fn load_plugins_from_roots(roots: &[(PathBuf, PluginScope)]) -> Vec<LoadedPlugin> {
    let loader = PluginLoader::new();
    let mut plugins = Vec::new();

    for (root, scope) in roots {
        if !root.is_dir() {
            continue;
        }
        for plugin_dir in loader.scan(root) {
            match loader.load(&plugin_dir, *scope) {
                Ok(plugin) => plugins.push(plugin),
                Err(e) => {
                    warn!(
                        path = %plugin_dir.display(),
                        error = %e,
                        "Failed to load plugin"
                    );
                }
            }
        }
    }

    plugins
}

#[cfg(test)]
#[path = "loader.test.rs"]
mod tests;
