//! Per-slice store that runs operations and publishes state.
//!
//! Every dispatch emits exactly one `Pending` followed by exactly one
//! `Fulfilled` or `Rejected`. Concurrent dispatches are not serialised:
//! outcomes are reduced in the order they settle, so the last response to
//! arrive decides `items`, `loading`, `error` and `success`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span, trace};

use super::cancel::{CancellationSource, CancellationToken};
use super::resource::Action;
use super::slice::{Slice, SliceState};
use crate::domain::Session;
use crate::domain::ports::ApiError;

const LIFECYCLE_CAPACITY: usize = 64;

/// Phase reported by a [`LifecycleEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The operation started.
    Pending,
    /// The operation succeeded.
    Fulfilled,
    /// The operation failed or was cancelled.
    Rejected {
        /// User-visible message.
        message: String,
    },
}

impl Phase {
    /// Whether the phase ends an operation.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Notification that an operation changed phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Slice the operation belongs to.
    pub slice: &'static str,
    /// Store-local operation number, increasing from zero.
    pub operation: u64,
    /// New phase.
    pub phase: Phase,
}

struct Inner<S: Slice> {
    api: Arc<S::Api>,
    state_tx: watch::Sender<SliceState<S>>,
    events_tx: broadcast::Sender<LifecycleEvent>,
    next_operation: AtomicU64,
}

/// Store owning one slice's state.
///
/// Cloning is cheap and every clone shares the same state.
pub struct SliceStore<S: Slice> {
    inner: Arc<Inner<S>>,
}

impl<S: Slice> Clone for SliceStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Slice> SliceStore<S> {
    /// Create a store with empty state over `api`.
    pub fn new(api: Arc<S::Api>) -> Self {
        let (state_tx, _state_rx) = watch::channel(SliceState::<S>::default());
        let (events_tx, _events_rx) = broadcast::channel(LIFECYCLE_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                api,
                state_tx,
                events_tx,
                next_operation: AtomicU64::new(0),
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SliceState<S> {
        self.inner.state_tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SliceState<S>> {
        self.inner.state_tx.subscribe()
    }

    /// Receiver of operation lifecycle events emitted from now on.
    pub fn lifecycle(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.inner.events_tx.subscribe()
    }

    /// Dismiss the current error.
    pub fn clear_error(&self) {
        self.reduce(Action::ClearError);
    }

    /// Acknowledge the last successful mutation.
    pub fn reset_success(&self) {
        self.reduce(Action::ResetSuccess);
    }

    /// Run `command` to completion.
    ///
    /// The outcome is both reduced into the state and returned. Dropping the
    /// future before it completes settles the operation as cancelled.
    pub async fn dispatch(&self, session: &Session, command: S::Command) -> Result<(), ApiError> {
        self.dispatch_until_cancelled(session, command, &CancellationToken::never())
            .await
    }

    /// Run `command` until it settles or `cancel` fires.
    ///
    /// A cancelled operation settles as rejected with the message
    /// `operation cancelled`, so `loading` is always lowered.
    pub async fn dispatch_until_cancelled(
        &self,
        session: &Session,
        command: S::Command,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        let operation = self.inner.next_operation.fetch_add(1, Ordering::Relaxed);
        let span = debug_span!("slice_operation", slice = S::NAME, operation, ?command);
        self.run(operation, session, command, cancel)
            .instrument(span)
            .await
    }

    /// Run `command` on a background task.
    ///
    /// Dropping the returned handle neither cancels nor aborts the operation.
    pub fn spawn(&self, session: Session, command: S::Command) -> InFlight {
        let source = CancellationSource::new();
        let token = source.token();
        let store = self.clone();
        let join = tokio::spawn(async move {
            store
                .dispatch_until_cancelled(&session, command, &token)
                .await
        });
        InFlight {
            cancel: source,
            join,
        }
    }

    async fn run(
        &self,
        operation: u64,
        session: &Session,
        command: S::Command,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        let mutation = S::is_mutation(&command);
        self.reduce(Action::Pending { mutation });
        self.emit(operation, Phase::Pending);
        let unsettled = Unsettled::new(self, operation);

        let verdict = S::validate(&self.inner.state_tx.borrow(), &command);
        let result = match verdict {
            Err(error) => Err(error),
            Ok(()) => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(ApiError::cancelled()),
                    result = S::execute(self.inner.api.as_ref(), session, &command) => result,
                }
            }
        };
        unsettled.disarm();

        match result {
            Ok(payload) => {
                self.reduce(Action::Fulfilled { mutation, payload });
                self.emit(operation, Phase::Fulfilled);
                debug!("operation fulfilled");
                Ok(())
            }
            Err(error) => {
                let message = error.to_string();
                debug!(%message, "operation rejected");
                self.settle_rejected(operation, message);
                Err(error)
            }
        }
    }

    fn settle_rejected(&self, operation: u64, message: String) {
        self.reduce(Action::Rejected {
            message: message.clone(),
        });
        self.emit(operation, Phase::Rejected { message });
    }

    fn reduce(&self, action: Action<S::Payload>) {
        self.inner.state_tx.send_modify(|state| S::reduce(state, action));
    }

    fn emit(&self, operation: u64, phase: Phase) {
        let event = LifecycleEvent {
            slice: S::NAME,
            operation,
            phase,
        };
        if self.inner.events_tx.send(event).is_err() {
            trace!(operation, "no lifecycle subscribers");
        }
    }
}

/// Settles an operation as cancelled if its future is dropped after
/// `Pending` was published but before it reached a terminal phase.
struct Unsettled<'a, S: Slice> {
    store: &'a SliceStore<S>,
    operation: u64,
    armed: bool,
}

impl<'a, S: Slice> Unsettled<'a, S> {
    const fn new(store: &'a SliceStore<S>, operation: u64) -> Self {
        Self {
            store,
            operation,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: Slice> Drop for Unsettled<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            debug!(operation = self.operation, "operation dropped before settling");
            self.store
                .settle_rejected(self.operation, ApiError::cancelled().to_string());
        }
    }
}

/// Handle to an operation running on a background task.
#[derive(Debug)]
pub struct InFlight {
    cancel: CancellationSource,
    join: JoinHandle<Result<(), ApiError>>,
}

impl InFlight {
    /// Request cancellation; the operation settles as rejected.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the operation to settle.
    pub async fn join(self) -> Result<(), ApiError> {
        match self.join.await {
            Ok(result) => result,
            Err(error) => Err(ApiError::internal(format!("operation task failed: {error}"))),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
