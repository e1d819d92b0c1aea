// Copyright 2025 Cowboy AI, LLC.

//! Workflow state definitions
//!
//! States are the nodes of a workflow graph. They are value objects: built
//! once when added to a definition and never mutated afterwards.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::StateId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One node of a workflow graph
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewState")]
pub struct State {
    id: StateId,
    name: String,
    is_initial: bool,
    is_final: bool,
    enabled: bool,
    description: Option<String>,
}

/// Raw state input as received at the boundary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewState {
    /// Unique id within the definition
    #[serde(default)]
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Whether instances start here
    #[serde(default)]
    pub is_initial: bool,
    /// Whether this state is terminal
    #[serde(default)]
    pub is_final: bool,
    /// Whether the state is active/usable
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Optional description of the state's purpose
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for NewState {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            is_initial: false,
            is_final: false,
            enabled: default_enabled(),
            description: None,
        }
    }
}

pub(crate) fn default_enabled() -> bool {
    true
}

impl State {
    /// Create a new enabled, non-initial, non-final state
    ///
    /// Fails when `id` or `name` is empty.
    pub fn new(id: impl Into<StateId>, name: impl Into<String>) -> WorkflowResult<Self> {
        let id = id.into();
        let name = name.into();

        if id.is_empty() {
            return Err(WorkflowError::invalid_input(
                "State ID must be a non-empty string",
            ));
        }
        if name.is_empty() {
            return Err(WorkflowError::invalid_input(
                "State name must be a non-empty string",
            ));
        }

        Ok(Self {
            id,
            name,
            is_initial: false,
            is_final: false,
            enabled: true,
            description: None,
        })
    }

    /// Mark (or unmark) this state as the starting state
    pub fn with_initial(mut self, is_initial: bool) -> Self {
        self.is_initial = is_initial;
        self
    }

    /// Mark (or unmark) this state as terminal
    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Unique identifier for this state
    pub fn id(&self) -> &StateId {
        &self.id
    }

    /// Human-readable name for this state
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether instances start in this state
    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Whether this is a terminal state (no outgoing actions allowed)
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether this state is enabled
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Optional description of what this state represents
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl TryFrom<NewState> for State {
    type Error = WorkflowError;

    fn try_from(input: NewState) -> Result<Self, Self::Error> {
        let mut state = State::new(input.id, input.name)?
            .with_initial(input.is_initial)
            .with_final(input.is_final)
            .with_enabled(input.enabled);
        state.description = input.description;
        Ok(state)
    }
}
