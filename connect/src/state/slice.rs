//! The contract every client state slice implements.

use std::fmt;

use async_trait::async_trait;

use super::resource::{Action, ResourceState, reduce};
use crate::domain::Session;
use crate::domain::ports::ApiError;

/// State held by a slice.
pub type SliceState<S> = ResourceState<<S as Slice>::Item, <S as Slice>::Extra>;

/// A named partition of client state plus the operations that update it.
///
/// Implementors are marker types. The store drives them: it validates a
/// command against the current state, executes it against the API port, and
/// feeds the outcome through [`Slice::reduce`].
#[async_trait]
pub trait Slice: Sized + Send + Sync + 'static {
    /// Record type held in `items` and `focused`.
    type Item: Clone + Send + Sync + 'static;
    /// Slice-specific state.
    type Extra: Default + Clone + Send + Sync + 'static;
    /// Operations the slice accepts.
    type Command: fmt::Debug + Send + Sync + 'static;
    /// Decoded result of a successful operation.
    type Payload: Send + 'static;
    /// API port the operations run against.
    type Api: ?Sized + Send + Sync + 'static;

    /// Name used in logs and lifecycle events.
    const NAME: &'static str;

    /// Whether `command` changes server data.
    fn is_mutation(command: &Self::Command) -> bool;

    /// Reject a command locally before any request is sent.
    fn validate(_state: &SliceState<Self>, _command: &Self::Command) -> Result<(), ApiError> {
        Ok(())
    }

    /// Perform the single API call behind `command`.
    async fn execute(
        api: &Self::Api,
        session: &Session,
        command: &Self::Command,
    ) -> Result<Self::Payload, ApiError>;

    /// Place a successful payload into the state.
    fn apply(state: &mut SliceState<Self>, payload: Self::Payload);

    /// Reduce an action with this slice's payload placement.
    fn reduce(state: &mut SliceState<Self>, action: Action<Self::Payload>) {
        reduce(state, action, Self::apply);
    }
}
