// Copyright 2025 Cowboy AI, LLC.

//! Workflow definitions
//!
//! A definition aggregates the states and actions of one workflow graph.
//! Construction is two-phase: states and actions are added in any order,
//! then [`WorkflowDefinition::validate`] checks the assembled graph as a
//! whole. Cross references are therefore never rejected at insertion time.

use super::action::{Action, NewAction};
use super::state::{NewState, State};
use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{ActionId, DefinitionId, StateId};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A workflow graph: states plus the actions connecting them
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkflowDefinition {
    id: DefinitionId,
    name: String,
    description: Option<String>,
    states: IndexMap<StateId, State>,
    actions: IndexMap<ActionId, Action>,
}

/// Raw definition input as received at the boundary
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewWorkflowDefinition {
    /// Globally unique definition id
    #[serde(default)]
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Optional description of the workflow's purpose
    #[serde(default)]
    pub description: Option<String>,
    /// States of the graph
    #[serde(default)]
    pub states: Vec<NewState>,
    /// Actions of the graph
    #[serde(default)]
    pub actions: Vec<NewAction>,
}

impl WorkflowDefinition {
    /// Create an empty definition
    pub fn new(id: impl Into<DefinitionId>, name: impl Into<String>) -> WorkflowResult<Self> {
        let id = id.into();
        let name = name.into();

        if id.is_empty() {
            return Err(WorkflowError::invalid_input(
                "Workflow definition ID must be a non-empty string",
            ));
        }
        if name.is_empty() {
            return Err(WorkflowError::invalid_input(
                "Workflow definition name must be a non-empty string",
            ));
        }

        Ok(Self {
            id,
            name,
            description: None,
            states: IndexMap::new(),
            actions: IndexMap::new(),
        })
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build a definition from raw input without validating the graph
    ///
    /// Construction errors of individual states and actions, and duplicate
    /// ids, are returned as they are met.
    pub fn from_new(input: NewWorkflowDefinition) -> WorkflowResult<Self> {
        let mut definition = Self::new(input.id, input.name)?;
        definition.description = input.description;

        for state in input.states {
            definition.add_state(State::try_from(state)?)?;
        }
        for action in input.actions {
            definition.add_action(Action::try_from(action)?)?;
        }

        Ok(definition)
    }

    /// Add a state; fails without mutating if the id is already present
    pub fn add_state(&mut self, state: State) -> WorkflowResult<()> {
        if self.states.contains_key(state.id()) {
            return Err(WorkflowError::DuplicateState(state.id().clone()));
        }
        self.states.insert(state.id().clone(), state);
        Ok(())
    }

    /// Add an action; fails without mutating if the id is already present
    pub fn add_action(&mut self, action: Action) -> WorkflowResult<()> {
        if self.actions.contains_key(action.id()) {
            return Err(WorkflowError::DuplicateAction(action.id().clone()));
        }
        self.actions.insert(action.id().clone(), action);
        Ok(())
    }

    /// Definition id
    pub fn id(&self) -> &DefinitionId {
        &self.id
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// States keyed by id, in insertion order
    pub fn states(&self) -> &IndexMap<StateId, State> {
        &self.states
    }

    /// Actions keyed by id, in insertion order
    pub fn actions(&self) -> &IndexMap<ActionId, Action> {
        &self.actions
    }

    /// Look up a state
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.get(id)
    }

    /// Look up an action
    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    /// The first state flagged as initial, if any
    ///
    /// Does not enforce that there is exactly one; see [`Self::validate`].
    pub fn get_initial_state(&self) -> Option<&State> {
        self.states.values().find(|s| s.is_initial())
    }

    /// Collect every structural violation of the graph
    ///
    /// An empty list means the definition is valid. All checks always run,
    /// so callers see the complete set of problems at once.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let initial_count = self.states.values().filter(|s| s.is_initial()).count();
        match initial_count {
            0 => errors.push("Workflow must have exactly one initial state".to_string()),
            1 => {}
            n => errors.push(format!(
                "Workflow must have exactly one initial state, found multiple ({n})"
            )),
        }

        // Keys come from the values on insert; re-check in case that ever drifts.
        let state_ids: HashSet<&StateId> = self.states.values().map(State::id).collect();
        if state_ids.len() != self.states.len()
            || self.states.iter().any(|(key, state)| key != state.id())
        {
            errors.push("Duplicate state IDs found".to_string());
        }

        let action_ids: HashSet<&ActionId> = self.actions.values().map(Action::id).collect();
        if action_ids.len() != self.actions.len()
            || self.actions.iter().any(|(key, action)| key != action.id())
        {
            errors.push("Duplicate action IDs found".to_string());
        }

        for action in self.actions.values() {
            for from_state in action.from_states() {
                if !self.states.contains_key(from_state) {
                    errors.push(format!(
                        "Action '{}' references non-existent from_state '{}'",
                        action.id(),
                        from_state
                    ));
                }
            }

            if !self.states.contains_key(action.to_state()) {
                errors.push(format!(
                    "Action '{}' references non-existent to_state '{}'",
                    action.id(),
                    action.to_state()
                ));
            }
        }

        errors
    }

    /// Shorthand for `validate().is_empty()`
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
