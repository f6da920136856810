use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{pending, select_all};
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    #[error("context cancelled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Carries cancellation and a deadline into every call that reaches Snowflake.
///
/// Contexts derived with [`Context::with_cancel`] or [`Context::with_timeout`] keep every signal
/// of their parent, so cancelling a parent cancels its children.
#[derive(Debug, Clone, Default)]
pub struct Context {
    signals: Vec<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the context it was created with. Dropping it without calling [`CancelHandle::cancel`]
/// leaves the context running.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// Never cancelled, no deadline.
    pub fn background() -> Self {
        Context::default()
    }

    pub fn with_cancel(&self) -> (Context, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let mut context = self.clone();
        context.signals.push(receiver);
        (
            context,
            CancelHandle {
                sender: Arc::new(sender),
            },
        )
    }

    pub fn with_timeout(&self, timeout: Duration) -> Context {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The earlier of `deadline` and the parent's deadline applies.
    pub fn with_deadline(&self, deadline: Instant) -> Context {
        let mut context = self.clone();
        context.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        context
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the context is done, `None` while it is still live.
    pub fn err(&self) -> Option<CancelReason> {
        if self.signals.iter().any(|signal| *signal.borrow()) {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> CancelReason {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };
        let cancelled = async {
            if self.signals.is_empty() {
                return pending::<()>().await;
            }
            let waits = self.signals.iter().cloned().map(|mut signal| {
                Box::pin(async move {
                    // A dropped handle can no longer cancel.
                    let closed = signal.wait_for(|cancelled| *cancelled).await.is_err();
                    if closed {
                        pending::<()>().await;
                    }
                })
            });
            select_all(waits).await;
        };
        tokio::select! {
            _ = cancelled => CancelReason::Cancelled,
            _ = deadline => CancelReason::DeadlineExceeded,
        }
    }

    /// Races `future` against the context.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, CancelReason> {
        if let Some(reason) = self.err() {
            return Err(reason);
        }
        tokio::select! {
            biased;
            reason = self.done() => Err(reason),
            output = future => Ok(output),
        }
    }
}
