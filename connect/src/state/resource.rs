//! Resource collection state and the pure reducer applied to it.

/// Client-side state of one slice.
///
/// `loading` is true while an operation is in flight. `success` is a one-shot
/// flag raised by a fulfilled mutation and lowered by the consumer. `error`
/// holds the message of the last rejection until cleared or until the next
/// operation starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T, X = ()> {
    /// Fetched records.
    pub items: Vec<T>,
    /// Record opened on a detail screen.
    pub focused: Option<T>,
    /// An operation is in flight.
    pub loading: bool,
    /// Message of the last failed operation.
    pub error: Option<String>,
    /// The last mutation succeeded and the consumer has not reset the flag.
    pub success: bool,
    /// Slice-specific state.
    pub extra: X,
}

impl<T, X: Default> Default for ResourceState<T, X> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            focused: None,
            loading: false,
            error: None,
            success: false,
            extra: X::default(),
        }
    }
}

/// Outcome of an operation, or a consumer request, fed to [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action<P> {
    /// An operation started.
    Pending {
        /// Whether the operation changes server data.
        mutation: bool,
    },
    /// An operation succeeded.
    Fulfilled {
        /// Whether the operation changes server data.
        mutation: bool,
        /// Decoded response.
        payload: P,
    },
    /// An operation failed or was cancelled.
    Rejected {
        /// User-visible message.
        message: String,
    },
    /// Dismiss the error banner.
    ClearError,
    /// Acknowledge a successful mutation.
    ResetSuccess,
}

/// Apply `action` to `state`, delegating payload placement to `apply`.
///
/// # Examples
/// ```
/// use connect::state::{Action, ResourceState, reduce};
///
/// let mut state: ResourceState<u32> = ResourceState::default();
/// reduce(&mut state, Action::Pending { mutation: true }, |_, _: Vec<u32>| {});
/// assert!(state.loading);
///
/// reduce(
///     &mut state,
///     Action::Fulfilled { mutation: true, payload: vec![7] },
///     |state, payload| state.items = payload,
/// );
/// assert!(!state.loading);
/// assert!(state.success);
/// assert_eq!(state.items, vec![7]);
/// ```
pub fn reduce<T, X, P>(
    state: &mut ResourceState<T, X>,
    action: Action<P>,
    apply: impl FnOnce(&mut ResourceState<T, X>, P),
) {
    match action {
        Action::Pending { mutation } => {
            state.loading = true;
            state.error = None;
            if mutation {
                state.success = false;
            }
        }
        Action::Fulfilled { mutation, payload } => {
            state.loading = false;
            apply(state, payload);
            if mutation {
                state.success = true;
            }
        }
        Action::Rejected { message } => {
            state.loading = false;
            state.error = Some(message);
        }
        Action::ClearError => state.error = None,
        Action::ResetSuccess => state.success = false,
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    type Numbers = ResourceState<u32>;

    fn replace(state: &mut Numbers, payload: Vec<u32>) {
        state.items = payload;
    }

    #[fixture]
    fn failed() -> Numbers {
        Numbers {
            error: Some("Request failed with status code 500".to_owned()),
            success: true,
            ..Numbers::default()
        }
    }

    #[rstest]
    fn pending_clears_error_and_sets_loading(mut failed: Numbers) {
        reduce(&mut failed, Action::Pending { mutation: false }, replace);

        assert!(failed.loading);
        assert!(failed.error.is_none());
        assert!(failed.success, "queries leave the success flag alone");
    }

    #[rstest]
    fn pending_mutation_lowers_success(mut failed: Numbers) {
        reduce(&mut failed, Action::Pending { mutation: true }, replace);
        assert!(!failed.success);
    }

    #[rstest]
    #[case(false, false)]
    #[case(true, true)]
    fn fulfilled_applies_payload(#[case] mutation: bool, #[case] success: bool) {
        let mut state = Numbers::default();
        reduce(&mut state, Action::Pending { mutation }, replace);
        reduce(
            &mut state,
            Action::Fulfilled {
                mutation,
                payload: vec![1, 2, 3],
            },
            replace,
        );

        assert!(!state.loading);
        assert_eq!(state.items, vec![1, 2, 3]);
        assert_eq!(state.success, success);
    }

    #[rstest]
    fn rejected_records_message_and_keeps_items() {
        let mut state = Numbers {
            items: vec![9],
            ..Numbers::default()
        };
        reduce(&mut state, Action::Pending { mutation: false }, replace);
        reduce(
            &mut state,
            Action::Rejected {
                message: "Not authorized".to_owned(),
            },
            replace,
        );

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Not authorized"));
        assert_eq!(state.items, vec![9]);
    }

    #[rstest]
    fn consumer_actions_reset_flags(mut failed: Numbers) {
        reduce(&mut failed, Action::ClearError, replace);
        reduce(&mut failed, Action::ResetSuccess, replace);

        assert!(failed.error.is_none());
        assert!(!failed.success);
    }
}
