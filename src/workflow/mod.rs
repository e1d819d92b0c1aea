// Copyright 2025 Cowboy AI, LLC.

//! Workflow module: states, actions, definitions and running instances
//!
//! This module provides the state-machine domain logic:
//! - States are the nodes of a workflow graph
//! - Actions are the named, directed transitions between them
//! - Definitions assemble both and validate the resulting graph
//! - Instances move a single token over a definition and record history

pub mod action;
pub mod definition;
pub mod instance;
pub mod state;
pub mod summary;

pub use action::*;
pub use definition::*;
pub use instance::*;
pub use state::*;
pub use summary::*;
