//! Change planning types

use serde::{Deserialize, Serialize};

/// Type of operation a reconciliation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create a new resource
    Create,
    /// Update an existing resource in place
    Update,
    /// Destroy the resource and create it again
    Replace,
    /// Delete a resource
    Delete,
    /// No changes needed
    NoOp,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Update => write!(f, "update"),
            ActionType::Replace => write!(f, "replace"),
            ActionType::Delete => write!(f, "delete"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}

/// Planned change for a single resource, derived from a (desired, observed) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<U> {
    Create,
    /// Only the fields that differ are set on the request
    Update(U),
    /// Immutable fields that differ
    Replace { fields: Vec<&'static str> },
    Delete,
    NoOp,
}

impl<U> Change<U> {
    pub fn action_type(&self) -> ActionType {
        match self {
            Change::Create => ActionType::Create,
            Change::Update(_) => ActionType::Update,
            Change::Replace { .. } => ActionType::Replace,
            Change::Delete => ActionType::Delete,
            Change::NoOp => ActionType::NoOp,
        }
    }

    pub fn has_changes(&self) -> bool {
        !matches!(self, Change::NoOp)
    }
}

/// Result of executing a planned change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled<E> {
    Created(E),
    Updated(E),
    Replaced(E),
    Deleted,
    Unchanged,
}

impl<E> Reconciled<E> {
    pub fn action_type(&self) -> ActionType {
        match self {
            Reconciled::Created(_) => ActionType::Create,
            Reconciled::Updated(_) => ActionType::Update,
            Reconciled::Replaced(_) => ActionType::Replace,
            Reconciled::Deleted => ActionType::Delete,
            Reconciled::Unchanged => ActionType::NoOp,
        }
    }

    /// The entity now held by the backend, if the operation produced one
    pub fn entity(&self) -> Option<&E> {
        match self {
            Reconciled::Created(e) | Reconciled::Updated(e) | Reconciled::Replaced(e) => Some(e),
            Reconciled::Deleted | Reconciled::Unchanged => None,
        }
    }
}
