//! Registry and lifecycle tracking for spawned subagents.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::background::BackgroundAgent;
use crate::definition::AgentDefinition;
use crate::spawn::SpawnInput;

/// Current lifecycle state of a spawned subagent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    /// Running in the foreground, awaiting completion.
    Running,
    /// Completed successfully.
    Completed,
    /// Failed with an error.
    Failed,
    /// Moved to the background; the caller can resume it later.
    Backgrounded,
}

/// Pluggable hook for actually driving a subagent's turn loop.
///
/// Tests and the default stub never install one, in which case `spawn`
/// completes immediately with no output. A caller wanting real execution
/// installs a function that runs the agent loop and returns its final text.
pub type AgentExecuteFn =
    Arc<dyn Fn(&AgentDefinition, &SpawnInput) -> Option<String> + Send + Sync>;

/// Tracked state for a single spawned agent instance.
#[derive(Debug, Clone)]
pub struct AgentInstance {
    /// Agent type this instance was spawned from.
    pub agent_type: String,
    /// Prompt the agent was spawned with.
    pub prompt: String,
    /// Current lifecycle status.
    pub status: AgentStatus,
    /// Output produced so far, if any.
    pub output: Option<String>,
    /// Background handle, if this instance was (or is) backgrounded.
    pub background: Option<BackgroundAgent>,
}

/// Result of a full spawn, including background bookkeeping.
#[derive(Debug, Clone)]
pub struct SpawnResult {
    /// Identifier of the spawned agent instance.
    pub agent_id: String,
    /// Immediate output, present only for foreground spawns that completed.
    pub output: Option<String>,
    /// Background handle, present only when the spawn was backgrounded.
    pub background: Option<BackgroundAgent>,
}

/// Registry of known agent type definitions and live/completed instances.
#[derive(Default)]
pub struct SubagentManager {
    pub(crate) definitions: Vec<AgentDefinition>,
    pub(crate) agents: HashMap<String, AgentInstance>,
    execute_fn: Option<AgentExecuteFn>,
}

impl SubagentManager {
    /// Create an empty manager with no registered agent types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a function used to actually drive spawned agents.
    ///
    /// Without one, `spawn`/`spawn_full` complete immediately as a stub.
    pub fn with_execute_fn(mut self, execute_fn: AgentExecuteFn) -> Self {
        self.execute_fn = Some(execute_fn);
        self
    }

    /// Register a new agent type definition.
    pub fn register_agent_type(&mut self, definition: AgentDefinition) {
        self.definitions.push(definition);
    }

    /// Look up a registered agent type definition by `agent_type`.
    pub fn find_definition(&self, agent_type: &str) -> Option<&AgentDefinition> {
        self.definitions.iter().find(|d| d.agent_type == agent_type)
    }

    /// Spawn an agent of `agent_type` with a bare prompt, running in the
    /// foreground. Returns the new instance's id.
    pub async fn spawn(&mut self, agent_type: &str, prompt: &str) -> Result<String, String> {
        let input = SpawnInput {
            agent_type: agent_type.to_string(),
            prompt: prompt.to_string(),
            identity: None,
            max_turns: None,
            run_in_background: false,
            allowed_tools: None,
            resume_from: None,
        };
        let result = self.spawn_full(input).await?;
        Ok(result.agent_id)
    }

    /// Spawn an agent from a full [`SpawnInput`], optionally backgrounding it.
    pub async fn spawn_full(&mut self, input: SpawnInput) -> Result<SpawnResult, String> {
        let definition = self
            .find_definition(&input.agent_type)
            .cloned()
            .ok_or_else(|| format!("unknown agent type: {}", input.agent_type))?;

        let agent_id = Uuid::new_v4().to_string();
        let output = self
            .execute_fn
            .as_ref()
            .and_then(|f| f(&definition, &input));

        if input.run_in_background {
            let background = BackgroundAgent {
                agent_id: agent_id.clone(),
                output_file: std::env::temp_dir().join(format!("{agent_id}.output")),
            };
            self.agents.insert(
                agent_id.clone(),
                AgentInstance {
                    agent_type: input.agent_type,
                    prompt: input.prompt,
                    status: AgentStatus::Backgrounded,
                    output: None,
                    background: Some(background.clone()),
                },
            );
            return Ok(SpawnResult {
                agent_id,
                output: None,
                background: Some(background),
            });
        }

        self.agents.insert(
            agent_id.clone(),
            AgentInstance {
                agent_type: input.agent_type,
                prompt: input.prompt,
                status: AgentStatus::Completed,
                output: output.clone(),
                background: None,
            },
        );
        Ok(SpawnResult {
            agent_id,
            output,
            background: None,
        })
    }

    /// Resume a backgrounded agent, transitioning it back to `Running`.
    pub async fn resume(&mut self, agent_id: &str) -> Result<String, String> {
        let instance = self
            .agents
            .get_mut(agent_id)
            .ok_or_else(|| format!("unknown agent: {agent_id}"))?;
        if instance.status != AgentStatus::Backgrounded {
            return Err(format!("agent {agent_id} is not backgrounded"));
        }
        instance.status = AgentStatus::Running;
        Ok(agent_id.to_string())
    }

    /// Current status of a tracked agent instance, if known.
    pub fn get_status(&self, agent_id: &str) -> Option<AgentStatus> {
        self.agents.get(agent_id).map(|a| a.status)
    }

    /// Output recorded for a tracked agent instance, if any.
    pub fn get_output(&self, agent_id: &str) -> Option<&str> {
        self.agents.get(agent_id).and_then(|a| a.output.as_deref())
    }
}

#[cfg(test)]
#[path = "manager.test.rs"]
mod tests;
