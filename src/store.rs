// Copyright 2025 Cowboy AI, LLC.

//! In-memory registry of workflow definitions and instances
//!
//! [`WorkflowStore`] is the only component that writes to either registry.
//! Both are `DashMap`s: duplicate checks go through the entry API so that
//! check-then-insert is a single critical section, and action execution
//! holds the instance's exclusive entry guard for the whole
//! check-then-mutate sequence.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{DefinitionId, InstanceId};
use crate::workflow::{
    Action, HistoryEntry, InstanceRecord, InstanceSummary, NewWorkflowDefinition,
    WorkflowDefinition, WorkflowInstance,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry sizes, reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of registered definitions
    pub definitions_count: usize,
    /// Number of started instances
    pub instances_count: usize,
}

/// Orchestrates definition registration, instance creation and execution
#[derive(Debug, Default)]
pub struct WorkflowStore {
    definitions: DashMap<DefinitionId, Arc<WorkflowDefinition>>,
    instances: DashMap<InstanceId, WorkflowInstance>,
}

impl WorkflowStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn definition(&self, id: &str) -> Option<Arc<WorkflowDefinition>> {
        self.definitions.get(id).map(|d| Arc::clone(d.value()))
    }

    // Workflow definitions

    /// Build, validate and register a definition
    ///
    /// Only a fully valid definition is ever registered; every failure
    /// leaves the registry untouched.
    pub fn create_workflow_definition(
        &self,
        input: NewWorkflowDefinition,
    ) -> WorkflowResult<Arc<WorkflowDefinition>> {
        if !input.id.is_empty() && self.definitions.contains_key(input.id.as_str()) {
            warn!(definition_id = %input.id, "duplicate workflow definition rejected");
            return Err(WorkflowError::DuplicateDefinition(input.id.into()));
        }

        let definition = WorkflowDefinition::from_new(input)?;

        let errors = definition.validate();
        if !errors.is_empty() {
            warn!(
                definition_id = %definition.id(),
                error_count = errors.len(),
                "workflow definition failed validation"
            );
            return Err(WorkflowError::ValidationFailed(errors));
        }

        let definition = Arc::new(definition);
        match self.definitions.entry(definition.id().clone()) {
            Entry::Occupied(entry) => {
                warn!(definition_id = %entry.key(), "duplicate workflow definition rejected");
                Err(WorkflowError::DuplicateDefinition(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&definition));
                info!(
                    definition_id = %definition.id(),
                    states = definition.states().len(),
                    actions = definition.actions().len(),
                    "workflow definition created"
                );
                Ok(definition)
            }
        }
    }

    /// Look up a definition by id
    pub fn get_workflow_definition(&self, id: &str) -> Option<Arc<WorkflowDefinition>> {
        self.definition(id)
    }

    /// All definitions, sorted by id
    pub fn list_workflow_definitions(&self) -> Vec<Arc<WorkflowDefinition>> {
        let mut definitions: Vec<_> = self
            .definitions
            .iter()
            .map(|d| Arc::clone(d.value()))
            .collect();
        definitions.sort_by(|a, b| a.id().cmp(b.id()));
        definitions
    }

    // Workflow instances

    /// Start an instance of `definition_id` on its initial state
    ///
    /// A fresh id is generated when `instance_id` is `None` or empty.
    pub fn start_workflow_instance(
        &self,
        definition_id: &str,
        instance_id: Option<String>,
    ) -> WorkflowResult<InstanceRecord> {
        let definition = self
            .definition(definition_id)
            .ok_or_else(|| WorkflowError::DefinitionNotFound(definition_id.into()))?;

        let requested = instance_id.filter(|id| !id.is_empty()).map(InstanceId::from);

        if let Some(id) = &requested {
            if self.instances.contains_key(id) {
                return Err(WorkflowError::DuplicateInstance(id.clone()));
            }
        }

        let initial_state = definition
            .get_initial_state()
            .ok_or_else(|| WorkflowError::NoInitialState(definition.id().clone()))?
            .id()
            .clone();

        let instance = loop {
            let id = requested.clone().unwrap_or_else(InstanceId::generate);
            match self.instances.entry(id) {
                Entry::Vacant(entry) => {
                    let instance = WorkflowInstance::new(
                        entry.key().clone(),
                        definition.id().clone(),
                        initial_state.clone(),
                    );
                    entry.insert(instance.clone());
                    break instance;
                }
                Entry::Occupied(entry) if requested.is_some() => {
                    return Err(WorkflowError::DuplicateInstance(entry.key().clone()));
                }
                // Generated id collided; draw another.
                Entry::Occupied(_) => continue,
            }
        };

        info!(
            instance_id = %instance.id(),
            definition_id = %definition.id(),
            state = %instance.current_state_id(),
            "workflow instance started"
        );

        Ok(InstanceRecord::new(instance, Some(&definition)))
    }

    /// Snapshot of an instance
    pub fn get_workflow_instance(&self, id: &str) -> Option<WorkflowInstance> {
        let instance = self.instances.get(id).map(|i| i.value().clone());
        debug!(instance_id = id, found = instance.is_some(), "instance lookup");
        instance
    }

    /// All instances with their `is_final` flag, oldest first
    pub fn list_workflow_instances(&self) -> Vec<InstanceRecord> {
        let snapshots: Vec<WorkflowInstance> =
            self.instances.iter().map(|i| i.value().clone()).collect();

        let mut records: Vec<InstanceRecord> = snapshots
            .into_iter()
            .map(|instance| {
                let definition = self.definition(instance.definition_id().as_str());
                InstanceRecord::new(instance, definition.as_deref())
            })
            .collect();
        records.sort_by(|a, b| {
            a.instance
                .created_at()
                .cmp(&b.instance.created_at())
                .then_with(|| a.instance.id().cmp(b.instance.id()))
        });
        records
    }

    /// Execute `action_id` on an instance
    ///
    /// The eligibility check and the mutation happen under the instance's
    /// exclusive guard, so concurrent calls on one instance serialize.
    pub fn execute_action(&self, instance_id: &str, action_id: &str) -> WorkflowResult<HistoryEntry> {
        self.execute_locked(instance_id, action_id, |_, _| ())
            .map(|(entry, ())| entry)
    }

    /// Execute `action_id` and return the resulting summary
    ///
    /// The summary is built before the instance guard is released, so it
    /// shows exactly this transition and no later one.
    pub fn execute_action_with_summary(
        &self,
        instance_id: &str,
        action_id: &str,
    ) -> WorkflowResult<InstanceSummary> {
        self.execute_locked(instance_id, action_id, InstanceSummary::new)
            .map(|(_, summary)| summary)
    }

    fn execute_locked<T>(
        &self,
        instance_id: &str,
        action_id: &str,
        after: impl FnOnce(&WorkflowInstance, Option<&WorkflowDefinition>) -> T,
    ) -> WorkflowResult<(HistoryEntry, T)> {
        let mut instance = self
            .instances
            .get_mut(instance_id)
            .ok_or_else(|| WorkflowError::InstanceNotFound(instance_id.into()))?;

        let definition = self.definition(instance.definition_id().as_str());

        match instance.execute_action(definition.as_deref(), action_id) {
            Ok(entry) => {
                info!(
                    instance_id,
                    action_id,
                    from = %entry.from_state_id,
                    to = %entry.to_state_id,
                    "action executed"
                );
                let view = after(instance.value(), definition.as_deref());
                Ok((entry, view))
            }
            Err(rejection) => {
                warn!(instance_id, action_id, reason = %rejection, "action rejected");
                Err(rejection.into())
            }
        }
    }

    // Utility methods

    /// Actions currently executable on an instance; `None` if it is unknown
    pub fn get_available_actions(&self, instance_id: &str) -> Option<Vec<Action>> {
        let instance = self.instances.get(instance_id)?;
        let definition = self.definition(instance.definition_id().as_str());

        Some(
            instance
                .available_actions(definition.as_deref())
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    /// Current state, instance record and available actions in one view
    pub fn get_instance_summary(&self, instance_id: &str) -> Option<InstanceSummary> {
        let instance = self.instances.get(instance_id)?;
        let definition = self.definition(instance.definition_id().as_str());
        Some(InstanceSummary::new(instance.value(), definition.as_deref()))
    }

    /// Registry sizes
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            definitions_count: self.definitions.len(),
            instances_count: self.instances.len(),
        }
    }
}
