// Copyright 2025 Cowboy AI, LLC.

//! Read-optimised views of an instance

use super::action::Action;
use super::definition::WorkflowDefinition;
use super::instance::WorkflowInstance;
use super::state::State;
use serde::{Deserialize, Serialize};

/// An instance together with its derived `is_final` flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Instance fields
    #[serde(flatten)]
    pub instance: WorkflowInstance,
    /// Whether the current state is final
    pub is_final: bool,
}

impl InstanceRecord {
    /// Build the record, resolving `is_final` against `definition`
    pub fn new(instance: WorkflowInstance, definition: Option<&WorkflowDefinition>) -> Self {
        let is_final = instance.is_in_final_state(definition);
        Self { instance, is_final }
    }
}

/// Current state, full instance record and next valid moves in one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceSummary {
    /// The instance record
    pub instance: InstanceRecord,
    /// Resolved current state
    pub current_state: Option<State>,
    /// Actions executable right now
    pub available_actions: Vec<Action>,
}

impl InstanceSummary {
    /// Compose the summary from one consistent instance snapshot
    pub fn new(instance: &WorkflowInstance, definition: Option<&WorkflowDefinition>) -> Self {
        let current_state = instance.get_current_state(definition).cloned();
        let available_actions = instance
            .available_actions(definition)
            .into_iter()
            .cloned()
            .collect();

        Self {
            instance: InstanceRecord::new(instance.clone(), definition),
            current_state,
            available_actions,
        }
    }
}
