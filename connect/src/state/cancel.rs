//! Cancellation of in-flight operations.
//!
//! A [`CancellationSource`] owns a watch channel; each [`CancellationToken`]
//! observes it. Dropping the source without cancelling leaves its tokens
//! pending forever, so an abandoned handle never cancels anything.

use tokio::sync::watch;

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct CancellationSource {
    cancel_tx: watch::Sender<bool>,
}

impl CancellationSource {
    /// Create a source that has not been cancelled.
    pub fn new() -> Self {
        let (cancel_tx, _cancel_rx) = watch::channel(false);
        Self { cancel_tx }
    }

    /// Token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancel_rx: self.cancel_tx.subscribe(),
        }
    }

    /// Signal every token. Repeated calls are harmless.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancel_rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        CancellationSource::new().token()
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Resolve once cancellation is requested.
    pub async fn cancelled(&self) {
        let mut cancel_rx = self.cancel_rx.clone();
        if cancel_rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Source dropped without cancelling.
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn token_resolves_after_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        assert!(!token.is_cancelled());

        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token resolves");
        assert!(token.is_cancelled());
    }

    #[rstest]
    #[tokio::test]
    async fn never_token_stays_pending() {
        let token = CancellationToken::never();
        let waited = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(waited.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn cancelling_before_waiting_still_resolves() {
        let source = CancellationSource::new();
        source.cancel();
        let token = source.token();

        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token resolves");
    }
}
