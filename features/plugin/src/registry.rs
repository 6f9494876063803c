//! Registry of loaded plugins.
//!
//! Keeps every successfully loaded plugin indexed by name, grouped by the
//! scope it was discovered in.

use std::collections::BTreeMap;

use tessera_hooks::HookDefinition;
use tessera_hooks::HookRegistry;
use tessera_skill::SkillManager;
use tessera_skill::SkillPromptCommand;
use tessera_subagent::AgentDefinition;
use tessera_subagent::SubagentManager;
use tracing::warn;

use crate::command::PluginCommand;
use crate::contribution::PluginContribution;
use crate::error::Result;
use crate::error::plugin_error::AlreadyRegisteredSnafu;
use crate::loader::LoadedPlugin;
use crate::mcp::McpServerConfig;
use crate::scope::PluginScope;

/// Holds every registered plugin, keyed by name.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, LoadedPlugin>,
}

impl PluginRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loaded plugin.
    ///
    /// Fails if a plugin with the same name is already registered.
    pub fn register(&mut self, plugin: LoadedPlugin) -> Result<()> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(AlreadyRegisteredSnafu { name }.build());
        }
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Returns `true` if a plugin with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Returns the plugin with this name, if registered.
    pub fn get(&self, name: &str) -> Option<&LoadedPlugin> {
        self.plugins.get(name)
    }

    /// Removes and returns the plugin with this name, if registered.
    pub fn unregister(&mut self, name: &str) -> Option<LoadedPlugin> {
        self.plugins.remove(name)
    }

    /// Returns the names of every registered plugin, in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    /// Returns every registered plugin from the given scope.
    pub fn by_scope(&self, scope: PluginScope) -> Vec<&LoadedPlugin> {
        self.plugins
            .values()
            .filter(|p| p.scope == scope)
            .collect()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Returns every registered plugin.
    pub fn all(&self) -> impl Iterator<Item = &LoadedPlugin> {
        self.plugins.values()
    }

    /// Registers every plugin in `plugins`, logging (and skipping) duplicates.
    pub fn register_all(&mut self, plugins: impl IntoIterator<Item = LoadedPlugin>) {
        for plugin in plugins {
            let name = plugin.name().to_string();
            if let Err(e) = self.register(plugin) {
                warn!(plugin = %name, error = %e, "Skipping duplicate plugin registration");
            }
        }
    }

    /// Returns every skill contribution across all registered plugins.
    pub fn skill_contributions(&self) -> Vec<(&SkillPromptCommand, &str)> {
        self.contributions_of(PluginContribution::is_skill, |c| match c {
            PluginContribution::Skill { skill, plugin_name } => (skill, plugin_name.as_str()),
            _ => unreachable!(),
        })
    }

    /// Returns every hook contribution across all registered plugins.
    pub fn hook_contributions(&self) -> Vec<(&HookDefinition, &str)> {
        self.contributions_of(PluginContribution::is_hook, |c| match c {
            PluginContribution::Hook { hook, plugin_name } => (hook, plugin_name.as_str()),
            _ => unreachable!(),
        })
    }

    /// Returns every agent contribution across all registered plugins.
    pub fn agent_contributions(&self) -> Vec<(&AgentDefinition, &str)> {
        self.contributions_of(PluginContribution::is_agent, |c| match c {
            PluginContribution::Agent {
                definition,
                plugin_name,
            } => (definition, plugin_name.as_str()),
            _ => unreachable!(),
        })
    }

    /// Returns every command contribution across all registered plugins.
    pub fn command_contributions(&self) -> Vec<(&PluginCommand, &str)> {
        self.contributions_of(PluginContribution::is_command, |c| match c {
            PluginContribution::Command {
                command,
                plugin_name,
            } => (command, plugin_name.as_str()),
            _ => unreachable!(),
        })
    }

    /// Returns every MCP server contribution across all registered plugins.
    pub fn mcp_server_contributions(&self) -> Vec<(&McpServerConfig, &str)> {
        self.contributions_of(PluginContribution::is_mcp_server, |c| match c {
            PluginContribution::McpServer { config, plugin_name } => {
                (config, plugin_name.as_str())
            }
            _ => unreachable!(),
        })
    }

    fn contributions_of<'a, T>(
        &'a self,
        filter: fn(&PluginContribution) -> bool,
        extract: fn(&'a PluginContribution) -> T,
    ) -> Vec<T> {
        self.plugins
            .values()
            .flat_map(|p| p.contributions.iter())
            .filter(|c| filter(c))
            .map(extract)
            .collect()
    }

    /// Registers every skill contribution with `skill_manager`.
    pub fn apply_skills_to(&self, skill_manager: &mut SkillManager) {
        for (skill, plugin_name) in self.skill_contributions() {
            tracing::debug!(plugin = %plugin_name, skill = %skill.name, "Applying plugin skill");
            skill_manager.register(skill.clone());
        }
    }

    /// Registers every hook contribution with `hook_registry`.
    pub fn apply_hooks_to(&self, hook_registry: &HookRegistry) {
        let hooks: Vec<HookDefinition> = self
            .hook_contributions()
            .into_iter()
            .map(|(hook, _)| hook.clone())
            .collect();
        hook_registry.register_all(hooks);
    }

    /// Registers every agent contribution with `subagent_manager`.
    pub fn apply_agents_to(&self, subagent_manager: &mut SubagentManager) {
        for (definition, plugin_name) in self.agent_contributions() {
            tracing::debug!(plugin = %plugin_name, agent = %definition.name, "Applying plugin agent");
            subagent_manager.register_agent_type(definition.clone());
        }
    }

    /// Applies every command contribution.
    ///
    /// Plugin commands are logged for now; dispatching `Shell`/`Skill`/`Agent`
    /// handlers into a unified slash-command surface is not yet wired up to
    /// a shared sink, so this only makes the contributions discoverable via
    /// [`PluginRegistry::command_contributions`].
    pub fn apply_commands_to(
        &self,
        _skill_manager: &mut SkillManager,
        _subagent_manager: Option<&mut SubagentManager>,
    ) {
        for (command, plugin_name) in self.command_contributions() {
            tracing::debug!(plugin = %plugin_name, command = %command.name, "Discovered plugin command");
        }
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
