// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cancellation and deadlines for query execution
//!
//! A [`QueryContext`] is threaded through every network step of a query
//! (connect, ping, find, cursor drain). Each step races against the caller's
//! cancel signal and the deadline; the losing future is dropped, which
//! releases whatever connection it held.

use super::error::QueryError;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Caller-side handle that aborts every query run under the paired context
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: std::sync::Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

/// Cancellation signal plus optional deadline for one request
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl QueryContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that can be cancelled through the returned handle
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let context = Self {
            cancel: Some(receiver),
            deadline: None,
        };
        let handle = CancelHandle {
            sender: std::sync::Arc::new(sender),
        };
        (context, handle)
    }

    /// Tighten the deadline to at most `timeout` from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Tighten the deadline to at most `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Apply `timeout` only when the caller set no deadline of its own
    pub fn or_timeout(self, timeout: Option<Duration>) -> Self {
        match (self.deadline, timeout) {
            (None, Some(timeout)) => self.with_timeout(timeout),
            _ => self,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        let signalled = self.cancel.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        signalled || expired
    }

    /// Run one step of a query, aborting it on cancellation or deadline
    pub async fn run<T, F>(&self, step: &str, future: F) -> Result<T, QueryError>
    where
        F: Future<Output = Result<T, QueryError>>,
    {
        if self.is_cancelled() {
            return Err(QueryError::Cancelled(format!("cancelled before {}", step)));
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = future => result,
            _ = self.cancelled() => {
                Err(QueryError::Cancelled(format!("cancelled during {}", step)))
            }
            _ = deadline => {
                Err(QueryError::Cancelled(format!("deadline exceeded during {}", step)))
            }
        }
    }

    /// Resolves once the cancel signal fires; never resolves without one
    async fn cancelled(&self) {
        let Some(receiver) = &self.cancel else {
            return std::future::pending().await;
        };

        let mut receiver = receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                // Handle dropped: fire only if it cancelled on the way out
                if *receiver.borrow() {
                    return;
                }
                return std::future::pending().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn slow_ok() -> Result<u32, QueryError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(1)
    }

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = QueryContext::background();
        let value = ctx.run("find", async { Ok::<_, QueryError>(7) }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn test_cancel_before_step() {
        let (ctx, handle) = QueryContext::with_cancel();
        handle.cancel();
        assert!(ctx.is_cancelled());

        let err = ctx.run("connect", slow_ok()).await.unwrap_err();
        assert_eq!(err, QueryError::Cancelled("cancelled before connect".into()));
    }

    #[tokio::test]
    async fn test_cancel_during_step() {
        let (ctx, handle) = QueryContext::with_cancel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let err = ctx.run("find", slow_ok()).await.unwrap_err();
        assert_eq!(err, QueryError::Cancelled("cancelled during find".into()));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = QueryContext::background().with_timeout(Duration::from_millis(20));
        let err = ctx.run("ping", slow_ok()).await.unwrap_err();
        assert_eq!(err, QueryError::Cancelled("deadline exceeded during ping".into()));
    }

    #[tokio::test]
    async fn test_deadline_only_tightens() {
        let ctx = QueryContext::background().with_timeout(Duration::from_secs(1));
        let first = ctx.deadline().unwrap();
        let ctx = ctx.with_timeout(Duration::from_secs(60));
        assert_eq!(ctx.deadline(), Some(first));
    }

    #[tokio::test]
    async fn test_or_timeout_keeps_caller_deadline() {
        let ctx = QueryContext::background().with_timeout(Duration::from_secs(1));
        let first = ctx.deadline();
        assert_eq!(ctx.or_timeout(Some(Duration::from_millis(1))).deadline(), first);

        let ctx = QueryContext::background().or_timeout(Some(Duration::from_secs(5)));
        assert!(ctx.deadline().is_some());
        assert!(QueryContext::background().or_timeout(None).deadline().is_none());
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let (ctx, handle) = QueryContext::with_cancel();
        drop(handle);
        let value = ctx.run("find", async { Ok::<_, QueryError>("done") }).await;
        assert_eq!(value, Ok("done"));
    }
}
