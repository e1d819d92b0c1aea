// Copyright 2025 Cowboy AI, LLC.

//! Workflow action definitions
//!
//! Actions are the directed edges of a workflow graph. One action may be
//! entered from several source states but always leads to exactly one
//! target state.

use super::state::default_enabled;
use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{ActionId, StateId};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A named transition between states
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewAction")]
pub struct Action {
    id: ActionId,
    name: String,
    enabled: bool,
    from_states: Vec<StateId>,
    to_state: StateId,
    description: Option<String>,
}

/// Raw action input as received at the boundary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewAction {
    /// Unique id within the definition
    #[serde(default)]
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Whether the action can be executed at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// States the action may be executed from; `null` reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Option<Vec<String>>")]
    pub from_states: Vec<String>,
    /// State the action leads to
    #[serde(default)]
    pub to_state: String,
    /// Optional description of the action's purpose
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Default for NewAction {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            enabled: default_enabled(),
            from_states: Vec::new(),
            to_state: String::new(),
            description: None,
        }
    }
}

impl Action {
    /// Create a new enabled action with no source states
    ///
    /// Fails when `id`, `name` or `to_state` is empty.
    pub fn new(
        id: impl Into<ActionId>,
        name: impl Into<String>,
        to_state: impl Into<StateId>,
    ) -> WorkflowResult<Self> {
        let id = id.into();
        let name = name.into();
        let to_state = to_state.into();

        if id.is_empty() {
            return Err(WorkflowError::invalid_input(
                "Action ID must be a non-empty string",
            ));
        }
        if name.is_empty() {
            return Err(WorkflowError::invalid_input(
                "Action name must be a non-empty string",
            ));
        }
        if to_state.is_empty() {
            return Err(WorkflowError::invalid_input(
                "Action must have a valid target state",
            ));
        }

        Ok(Self {
            id,
            name,
            enabled: true,
            from_states: Vec::new(),
            to_state,
            description: None,
        })
    }

    /// Set the states this action can be executed from
    pub fn with_from_states<I, S>(mut self, from_states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.from_states = from_states.into_iter().map(Into::into).collect();
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

    /// Unique identifier for this action
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    /// Human-readable name for this action
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the action is switched on
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Source states, in the order they were given
    pub fn from_states(&self) -> &[StateId] {
        &self.from_states
    }

    /// Target state
    pub fn to_state(&self) -> &StateId {
        &self.to_state
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether `state_id` is one of this action's source states
    ///
    /// An action without source states can never be executed.
    pub fn can_execute_from_state(&self, state_id: &str) -> bool {
        self.from_states.iter().any(|s| s == state_id)
    }
}

impl TryFrom<NewAction> for Action {
    type Error = WorkflowError;

    fn try_from(input: NewAction) -> Result<Self, Self::Error> {
        let mut action = Action::new(input.id, input.name, input.to_state)?
            .with_from_states(input.from_states)
            .with_enabled(input.enabled);
        action.description = input.description;
        Ok(action)
    }
}
