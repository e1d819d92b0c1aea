// Copyright 2025 Cowboy AI, LLC.

//! # CIM Workflow Engine
//!
//! An in-memory finite-state-machine workflow engine exposed over HTTP.
//!
//! Clients register a workflow definition (states plus the actions that move
//! between them), start instances of it, and drive each instance forward by
//! executing actions. Every executed action is recorded in the instance's
//! history.
//!
//! - **State**: a node of the workflow graph (initial, final, enabled)
//! - **Action**: a named transition from a set of source states to one target
//! - **WorkflowDefinition**: a validated graph of states and actions
//! - **WorkflowInstance**: one running execution with its transition history
//! - **WorkflowStore**: the registry that creates, looks up and drives both
//!
//! ```mermaid
//! graph LR
//!     Client -->|JSON| Api[api::router]
//!     Api --> Store[WorkflowStore]
//!     Store --> Definitions[(definitions)]
//!     Store --> Instances[(instances)]
//!     Instances -.->|definition_id| Definitions
//! ```
//!
//! ## Example
//!
//! ```
//! use cim_workflow_engine::{Action, State, WorkflowDefinition, WorkflowInstance};
//!
//! let mut def = WorkflowDefinition::new("doc", "Document").unwrap();
//! def.add_state(State::new("draft", "Draft").unwrap().with_initial(true)).unwrap();
//! def.add_state(State::new("published", "Published").unwrap().with_final(true)).unwrap();
//! def.add_action(
//!     Action::new("publish", "Publish", "published")
//!         .unwrap()
//!         .with_from_states(["draft"]),
//! )
//! .unwrap();
//! assert!(def.validate().is_empty());
//!
//! let mut instance = WorkflowInstance::new("d-1".into(), "doc".into(), "draft".into());
//! instance.execute_action(Some(&def), "publish").unwrap();
//! assert!(instance.is_in_final_state(Some(&def)));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod errors;
pub mod identifiers;
pub mod store;
pub mod telemetry;
pub mod workflow;

pub use errors::{TransitionRejection, WorkflowError, WorkflowResult};
pub use identifiers::{ActionId, DefinitionId, InstanceId, StateId};
pub use store::{StoreStats, WorkflowStore};
pub use workflow::{
    Action, HistoryEntry, InstanceRecord, InstanceSummary, NewAction, NewState,
    NewWorkflowDefinition, State, WorkflowDefinition, WorkflowInstance,
};
