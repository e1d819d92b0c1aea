// Copyright 2025 Cowboy AI, LLC.

//! Identifier types for workflow definitions, their states and actions,
//! and running instances
//!
//! All identifiers are caller-chosen strings. They carry no structure of
//! their own; the newtypes only keep a state id from being passed where an
//! action id is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from a string
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the underlying string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is the empty string
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume into the underlying string
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// State ID - identifies a state within one workflow definition
    ///
    /// States are not entities; the id is only unique inside its definition.
    StateId
}

string_id! {
    /// Action ID - identifies a transition within one workflow definition
    ActionId
}

string_id! {
    /// Definition ID - globally unique key of a registered workflow definition
    DefinitionId
}

string_id! {
    /// Instance ID - globally unique key of a running workflow instance
    InstanceId
}

impl InstanceId {
    /// Create a new random instance ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
