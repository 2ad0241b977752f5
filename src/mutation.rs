//! Write-side async state
//!
//! Mutations differ from resource fetches in two ways: they are triggered
//! explicitly by the caller, and they have no "previous snapshot" while running.

use crate::state::AsyncState;

/// Represents the state of a mutation
#[derive(Clone, PartialEq, Debug)]
pub enum MutationState<T, E> {
    /// The mutation has not been triggered, or was reset
    Idle,
    /// The mutation is currently running
    Loading,
    /// The mutation completed successfully
    Success(T),
    /// The mutation failed
    Error(E),
}

impl<T, E> Default for MutationState<T, E> {
    fn default() -> Self {
        MutationState::Idle
    }
}

impl<T, E> AsyncState for MutationState<T, E> {
    type Data = T;
    type Error = E;

    fn is_idle(&self) -> bool {
        matches!(self, MutationState::Idle)
    }

    fn is_loading(&self) -> bool {
        matches!(self, MutationState::Loading)
    }

    fn is_success(&self) -> bool {
        matches!(self, MutationState::Success(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, MutationState::Error(_))
    }

    fn data(&self) -> Option<&T> {
        match self {
            MutationState::Success(data) => Some(data),
            _ => None,
        }
    }

    fn error(&self) -> Option<&E> {
        match self {
            MutationState::Error(error) => Some(error),
            _ => None,
        }
    }
}
