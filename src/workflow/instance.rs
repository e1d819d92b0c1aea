// Copyright 2025 Cowboy AI, LLC.

//! Workflow instances
//!
//! An instance is a single token moving over the states of one definition.
//! It refers to its definition by id only; every read or transition takes
//! the resolved definition as an argument, so there is no reference that
//! could dangle.

use super::action::Action;
use super::definition::WorkflowDefinition;
use super::state::State;
use crate::errors::TransitionRejection;
use crate::identifiers::{ActionId, DefinitionId, InstanceId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one executed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Action that was executed
    pub action_id: ActionId,
    /// When the action was executed
    pub timestamp: DateTime<Utc>,
    /// State before the action
    pub from_state_id: StateId,
    /// State after the action
    pub to_state_id: StateId,
}

/// A running instance of a workflow definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInstance {
    id: InstanceId,
    definition_id: DefinitionId,
    current_state_id: StateId,
    #[serde(default)]
    history: Vec<HistoryEntry>,
    created_at: DateTime<Utc>,
}

impl WorkflowInstance {
    /// Create an instance positioned on `initial_state` with empty history
    pub fn new(id: InstanceId, definition_id: DefinitionId, initial_state: StateId) -> Self {
        Self::new_at(id, definition_id, initial_state, Utc::now())
    }

    /// Same as [`Self::new`] with an explicit creation time
    pub fn new_at(
        id: InstanceId,
        definition_id: DefinitionId,
        initial_state: StateId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            definition_id,
            current_state_id: initial_state,
            history: Vec::new(),
            created_at,
        }
    }

    /// Instance id
    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    /// Id of the definition this instance runs
    pub fn definition_id(&self) -> &DefinitionId {
        &self.definition_id
    }

    /// Id of the state the token is on
    pub fn current_state_id(&self) -> &StateId {
        &self.current_state_id
    }

    /// Executed actions, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// When the instance was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Resolve the definition argument against this instance
    ///
    /// A definition with a different id is treated as not loaded.
    fn resolve<'d>(
        &self,
        definition: Option<&'d WorkflowDefinition>,
    ) -> Result<&'d WorkflowDefinition, TransitionRejection> {
        match definition {
            Some(def) if def.id() == &self.definition_id => Ok(def),
            _ => Err(TransitionRejection::NoDefinition {
                definition_id: self.definition_id.clone(),
            }),
        }
    }

    /// Check whether `action_id` may run from the current state
    ///
    /// Pure predicate. Checks run in a fixed order and the first failing
    /// one is reported: definition, action existence, enabled flag, final
    /// state lockout, source state, target state.
    pub fn can_execute_action<'d>(
        &self,
        definition: Option<&'d WorkflowDefinition>,
        action_id: &str,
    ) -> Result<&'d Action, TransitionRejection> {
        let definition = self.resolve(definition)?;

        let action = definition
            .action(action_id)
            .ok_or_else(|| TransitionRejection::UnknownAction {
                action_id: action_id.into(),
            })?;

        if !action.enabled() {
            return Err(TransitionRejection::ActionDisabled {
                action_id: action.id().clone(),
            });
        }

        // Final states block every action, even ones listing them as a source.
        if let Some(state) = definition.state(self.current_state_id.as_str()) {
            if state.is_final() {
                return Err(TransitionRejection::TerminalState {
                    state_id: self.current_state_id.clone(),
                });
            }
        }

        if !action.can_execute_from_state(self.current_state_id.as_str()) {
            return Err(TransitionRejection::InvalidSource {
                action_id: action.id().clone(),
                state_id: self.current_state_id.clone(),
            });
        }

        if definition.state(action.to_state().as_str()).is_none() {
            return Err(TransitionRejection::InvalidTarget {
                action_id: action.id().clone(),
                to_state: action.to_state().clone(),
            });
        }

        Ok(action)
    }

    /// Execute an action now
    pub fn execute_action(
        &mut self,
        definition: Option<&WorkflowDefinition>,
        action_id: &str,
    ) -> Result<HistoryEntry, TransitionRejection> {
        self.execute_action_at(definition, action_id, Utc::now())
    }

    /// Execute an action, stamping the history entry with `timestamp`
    ///
    /// On success the current state moves to the action's target and one
    /// history entry is appended; on rejection nothing changes.
    pub fn execute_action_at(
        &mut self,
        definition: Option<&WorkflowDefinition>,
        action_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<HistoryEntry, TransitionRejection> {
        let action = self.can_execute_action(definition, action_id)?;

        let entry = HistoryEntry {
            action_id: action.id().clone(),
            timestamp,
            from_state_id: self.current_state_id.clone(),
            to_state_id: action.to_state().clone(),
        };

        self.current_state_id = entry.to_state_id.clone();
        self.history.push(entry.clone());

        Ok(entry)
    }

    /// The current state, if the definition resolves and contains it
    pub fn get_current_state<'d>(
        &self,
        definition: Option<&'d WorkflowDefinition>,
    ) -> Option<&'d State> {
        self.resolve(definition)
            .ok()?
            .state(self.current_state_id.as_str())
    }

    /// Whether the current state resolves and is final
    pub fn is_in_final_state(&self, definition: Option<&WorkflowDefinition>) -> bool {
        self.get_current_state(definition)
            .map(State::is_final)
            .unwrap_or(false)
    }

    /// Every action of the definition that is currently executable
    pub fn available_actions<'d>(
        &self,
        definition: Option<&'d WorkflowDefinition>,
    ) -> Vec<&'d Action> {
        let Ok(def) = self.resolve(definition) else {
            return Vec::new();
        };

        def.actions()
            .values()
            .filter(|action| {
                self.can_execute_action(Some(def), action.id().as_str())
                    .is_ok()
            })
            .collect()
    }
}
