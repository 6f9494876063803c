//! Extended-thinking ("reasoning") configuration for a single request.

use crate::model::ReasoningEffort;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::str::FromStr;

/// How hard the model should think before responding, plus any provider-specific
/// budget knobs.
///
/// Serializes as a bare string (`"high"`) when only `effort` is set, and as an
/// object when a budget, output cap, or interleaving flag is also present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThinkingLevel {
    /// Requested reasoning effort.
    pub effort: ReasoningEffort,
    /// Provider-specific thinking token budget.
    pub budget_tokens: Option<i64>,
    /// Cap on output tokens when thinking is enabled.
    pub max_output_tokens: Option<i64>,
    /// Whether thinking blocks should be interleaved with tool calls.
    pub interleaved: bool,
}

impl ThinkingLevel {
    /// Create a thinking level with only an effort set.
    pub fn new(effort: ReasoningEffort) -> Self {
        Self {
            effort,
            budget_tokens: None,
            max_output_tokens: None,
            interleaved: false,
        }
    }

    /// Create a thinking level with an explicit token budget.
    pub fn with_budget(effort: ReasoningEffort, budget_tokens: i64) -> Self {
        Self {
            budget_tokens: Some(budget_tokens),
            ..Self::new(effort)
        }
    }

    /// No extended thinking.
    pub fn none() -> Self {
        Self::new(ReasoningEffort::None)
    }

    /// Low reasoning effort.
    pub fn low() -> Self {
        Self::new(ReasoningEffort::Low)
    }

    /// Medium reasoning effort.
    pub fn medium() -> Self {
        Self::new(ReasoningEffort::Medium)
    }

    /// High reasoning effort.
    pub fn high() -> Self {
        Self::new(ReasoningEffort::High)
    }

    /// Extra-high reasoning effort.
    pub fn xhigh() -> Self {
        Self::new(ReasoningEffort::XHigh)
    }

    /// Whether thinking is enabled at all (effort above `None`).
    pub fn is_enabled(&self) -> bool {
        self.effort != ReasoningEffort::None
    }

    /// Validate that any set numeric fields are non-negative.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(budget) = self.budget_tokens {
            if budget < 0 {
                return Err(format!("budget_tokens must be non-negative, got {budget}"));
            }
        }
        if let Some(max_output) = self.max_output_tokens {
            if max_output < 0 {
                return Err(format!(
                    "max_output_tokens must be non-negative, got {max_output}"
                ));
            }
        }
        Ok(())
    }

    /// Builder: set the token budget.
    pub fn set_budget(mut self, budget_tokens: i64) -> Self {
        self.budget_tokens = Some(budget_tokens);
        self
    }

    /// Builder: set the output token cap.
    pub fn set_max_output_tokens(mut self, max_output_tokens: i64) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Builder: set whether thinking is interleaved with tool calls.
    pub fn set_interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = interleaved;
        self
    }

    fn is_simple(&self) -> bool {
        self.budget_tokens.is_none() && self.max_output_tokens.is_none() && !self.interleaved
    }
}

impl fmt::Display for ThinkingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.effort)
    }
}

impl FromStr for ThinkingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let effort = match s {
            "none" => ReasoningEffort::None,
            "minimal" => ReasoningEffort::Minimal,
            "low" => ReasoningEffort::Low,
            "medium" => ReasoningEffort::Medium,
            "high" => ReasoningEffort::High,
            "xhigh" => ReasoningEffort::XHigh,
            other => return Err(format!("unknown thinking level: {other}")),
        };
        Ok(Self::new(effort))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThinkingLevelRepr {
    Simple(String),
    Object {
        effort: ReasoningEffort,
        #[serde(default)]
        budget_tokens: Option<i64>,
        #[serde(default)]
        max_output_tokens: Option<i64>,
        #[serde(default)]
        interleaved: bool,
    },
}

impl Serialize for ThinkingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_simple() {
            self.effort.serialize(serializer)
        } else {
            use serde::ser::SerializeStruct;
            let mut state = serializer.serialize_struct("ThinkingLevel", 4)?;
            state.serialize_field("effort", &self.effort)?;
            if let Some(budget) = self.budget_tokens {
                state.serialize_field("budget_tokens", &budget)?;
            }
            if let Some(max_output) = self.max_output_tokens {
                state.serialize_field("max_output_tokens", &max_output)?;
            }
            if self.interleaved {
                state.serialize_field("interleaved", &self.interleaved)?;
            }
            state.end()
        }
    }
}

impl<'de> Deserialize<'de> for ThinkingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ThinkingLevelRepr::deserialize(deserializer)? {
            ThinkingLevelRepr::Simple(s) => s.parse().map_err(serde::de::Error::custom),
            ThinkingLevelRepr::Object {
                effort,
                budget_tokens,
                max_output_tokens,
                interleaved,
            } => Ok(Self {
                effort,
                budget_tokens,
                max_output_tokens,
                interleaved,
            }),
        }
    }
}

#[cfg(test)]
#[path = "thinking.test.rs"]
mod tests;
