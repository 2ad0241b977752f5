//! State: Async state enums for portfolio-provider
//!
//! This module provides the read-side [`State`] enum and the [`AsyncState`] trait
//! shared with [`MutationState`](crate::mutation::MutationState).

/// Common trait for async state types that represent loading, success, and error states
///
/// This trait provides a unified interface for working with different async state types
/// in portfolio-provider, such as `State` and `MutationState`.
pub trait AsyncState {
    /// The type of successful data
    type Data;
    /// The type of error
    type Error;

    /// Returns true if nothing has been requested
    fn is_idle(&self) -> bool;

    /// Returns true if the state is currently loading
    fn is_loading(&self) -> bool;

    /// Returns true if the state contains successful data
    fn is_success(&self) -> bool;

    /// Returns true if the state contains an error
    fn is_error(&self) -> bool;

    /// Returns the data if available, None otherwise
    fn data(&self) -> Option<&Self::Data>;

    /// Returns the error if failed, None otherwise
    fn error(&self) -> Option<&Self::Error>;
}

/// Represents the state of one resource fetch instance
///
/// Transitions: `Idle → Loading → {Success | Error}`; a canceled `Loading`
/// returns to `Idle` without ever passing through `Error`.
#[derive(Clone, PartialEq, Debug)]
pub enum State<T, E> {
    /// No request has been issued (no endpoint, or fetching is disabled)
    Idle,
    /// A request is in flight; `previous` is the last successful snapshot, if any
    Loading { previous: Option<T> },
    /// The operation completed successfully with data
    Success(T),
    /// The operation failed with an error
    Error(E),
}

impl<T, E> Default for State<T, E> {
    fn default() -> Self {
        State::Idle
    }
}

impl<T, E> AsyncState for State<T, E> {
    type Data = T;
    type Error = E;

    fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }

    fn is_loading(&self) -> bool {
        matches!(self, State::Loading { .. })
    }

    fn is_success(&self) -> bool {
        matches!(self, State::Success(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, State::Error(_))
    }

    fn data(&self) -> Option<&T> {
        match self {
            State::Success(data) => Some(data),
            State::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    fn error(&self) -> Option<&E> {
        match self {
            State::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl<T, E> State<T, E> {
    /// Returns true if nothing has been requested
    pub fn is_idle(&self) -> bool {
        <Self as AsyncState>::is_idle(self)
    }

    /// Returns true if the state is currently loading
    pub fn is_loading(&self) -> bool {
        <Self as AsyncState>::is_loading(self)
    }

    /// Returns true if the state contains successful data
    pub fn is_success(&self) -> bool {
        <Self as AsyncState>::is_success(self)
    }

    /// Returns true if the state contains an error
    pub fn is_error(&self) -> bool {
        <Self as AsyncState>::is_error(self)
    }

    /// Returns the data if available, None otherwise
    pub fn data(&self) -> Option<&T> {
        <Self as AsyncState>::data(self)
    }

    /// Returns the error if failed, None otherwise
    pub fn error(&self) -> Option<&E> {
        <Self as AsyncState>::error(self)
    }

    /// Loading state that keeps the data of a settled success around
    pub(crate) fn reloading(&self) -> Self
    where
        T: Clone,
    {
        State::Loading {
            previous: self.data().cloned(),
        }
    }

    /// Maps a State<T, E> to State<U, E> by applying a function to the contained data.
    pub fn map<U, F>(self, op: F) -> State<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            State::Idle => State::Idle,
            State::Loading { previous } => State::Loading {
                previous: previous.map(op),
            },
            State::Success(data) => State::Success(op(data)),
            State::Error(e) => State::Error(e),
        }
    }

    /// Maps a State<T, E> to State<T, F> by applying a function to the contained error if failed.
    pub fn map_err<F, O>(self, op: O) -> State<T, F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            State::Idle => State::Idle,
            State::Loading { previous } => State::Loading { previous },
            State::Success(data) => State::Success(data),
            State::Error(e) => State::Error(op(e)),
        }
    }

    /// Chains a State<T, E> to State<U, E> by applying a function to the contained data if successful.
    pub fn and_then<U, F>(self, op: F) -> State<U, E>
    where
        F: FnOnce(T) -> State<U, E>,
    {
        match self {
            State::Idle => State::Idle,
            State::Loading { .. } => State::Loading { previous: None },
            State::Success(data) => op(data),
            State::Error(e) => State::Error(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for State<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => State::Success(data),
            Err(error) => State::Error(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_exposes_previous_snapshot() {
        let settled: State<u32, ()> = State::Success(7);
        let loading = settled.reloading();
        assert!(loading.is_loading());
        assert_eq!(loading.data(), Some(&7));

        let failed: State<u32, &str> = State::Error("boom");
        let retry = failed.reloading();
        assert_eq!(retry.data(), None);
        assert!(!retry.is_error());
    }

    #[test]
    fn idle_is_neither_loading_nor_error() {
        let state: State<u32, ()> = State::default();
        assert!(state.is_idle());
        assert!(!state.is_loading());
        assert!(!state.is_error());
        assert_eq!(state.data(), None);
    }

    #[test]
    fn combinators_preserve_variant() {
        let state: State<u32, String> = Ok(2).into();
        assert_eq!(state.clone().map(|n| n * 10), State::Success(20));
        assert_eq!(
            State::<u32, String>::Error("x".into()).map_err(|e| e.len()),
            State::Error(1)
        );
        assert_eq!(
            state.and_then(|n| if n > 1 {
                State::Success(n)
            } else {
                State::Error("small".into())
            }),
            State::Success(2)
        );
    }
}
