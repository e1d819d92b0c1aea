// Copyright 2025 Cowboy AI, LLC.

//! Error types for workflow operations

use crate::identifiers::{ActionId, DefinitionId, InstanceId, StateId};
use thiserror::Error;

/// Errors that can occur in workflow operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// A required field was missing, empty or malformed
    #[error("{0}")]
    InvalidInput(String),

    /// Definition failed structural validation
    #[error("Validation errors: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// State id already present in the definition
    #[error("State with ID '{0}' already exists")]
    DuplicateState(StateId),

    /// Action id already present in the definition
    #[error("Action with ID '{0}' already exists")]
    DuplicateAction(ActionId),

    /// Definition id already registered
    #[error("Workflow definition with ID '{0}' already exists")]
    DuplicateDefinition(DefinitionId),

    /// Instance id already registered
    #[error("Workflow instance with ID '{0}' already exists")]
    DuplicateInstance(InstanceId),

    /// Unknown definition id
    #[error("Workflow definition '{0}' not found")]
    DefinitionNotFound(DefinitionId),

    /// Unknown instance id
    #[error("Workflow instance '{0}' not found")]
    InstanceNotFound(InstanceId),

    /// Definition has no state flagged as initial
    #[error("Workflow definition '{0}' has no initial state")]
    NoInitialState(DefinitionId),

    /// Action is not executable in the instance's current context
    #[error(transparent)]
    Rejected(#[from] TransitionRejection),
}

/// Result type for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    /// Create an input-shape error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        WorkflowError::InvalidInput(msg.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WorkflowError::DefinitionNotFound(_) | WorkflowError::InstanceNotFound(_)
        )
    }

    /// Check if this is an input or validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            WorkflowError::InvalidInput(_) | WorkflowError::ValidationFailed(_)
        )
    }

    /// Check if this is an identity conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            WorkflowError::DuplicateState(_)
                | WorkflowError::DuplicateAction(_)
                | WorkflowError::DuplicateDefinition(_)
                | WorkflowError::DuplicateInstance(_)
        )
    }

    /// Check if this is an eligibility rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, WorkflowError::Rejected(_))
    }
}

/// Reasons an action cannot be executed from an instance's current state
///
/// The display form is the human-readable reason reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionRejection {
    /// The instance's definition could not be resolved
    #[error("Workflow definition '{definition_id}' not loaded")]
    NoDefinition {
        /// Definition the instance refers to
        definition_id: DefinitionId,
    },

    /// The action id is not part of the definition
    #[error("Action '{action_id}' does not exist in workflow definition")]
    UnknownAction {
        /// Requested action
        action_id: ActionId,
    },

    /// The action exists but is switched off
    #[error("Action '{action_id}' is disabled")]
    ActionDisabled {
        /// Requested action
        action_id: ActionId,
    },

    /// Final states accept no actions
    #[error("Cannot execute actions from final state '{state_id}'")]
    TerminalState {
        /// Current (final) state
        state_id: StateId,
    },

    /// Current state is not one of the action's source states
    #[error("Action '{action_id}' cannot be executed from state '{state_id}'")]
    InvalidSource {
        /// Requested action
        action_id: ActionId,
        /// Current state
        state_id: StateId,
    },

    /// The action points at a state the definition does not contain
    #[error("Action '{action_id}' targets non-existent state '{to_state}'")]
    InvalidTarget {
        /// Requested action
        action_id: ActionId,
        /// Dangling target
        to_state: StateId,
    },
}
