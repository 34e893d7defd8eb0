//! Bounded-time operations.
//!
//! # Responsibilities
//! - Race a caller-supplied task against a fixed wall-clock budget
//! - Turn an elapsed budget into one fixed timeout failure
//! - Pass task values and task failures through unchanged
//!
//! # Design Decisions
//! - The task runs as its own tokio task; losing the race abandons it, it is not cancelled
//! - The timer branch is polled first, so a tie resolves to a timeout
//! - Budget is bound at construction and shared read-only by every call
//! - `run_cancellable` is the opt-in variant that signals the abandoned task

use std::future::Future;
use std::panic;
use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::TimeoutConfig;
use crate::observability::metrics;

/// The failure produced when a bounded operation runs out of time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TimeoutFailure {
    pub status: StatusCode,
    pub message: String,
}

impl Default for TimeoutFailure {
    fn default() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "timed out!".to_string(),
        }
    }
}

/// Terminal result of racing a task against its budget.
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// The task settled first with a value.
    Success(T),
    /// The budget elapsed first.
    Timeout(TimeoutFailure),
    /// The task settled first with its own failure.
    TaskFailure(E),
}

impl<T, E> Outcome<T, E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Timeout(_))
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Timeout(_) => "timeout",
            Outcome::TaskFailure(_) => "task_failure",
        }
    }

    /// Collapse into a `Result`, folding the timeout into the task's error type.
    pub fn into_result(self) -> Result<T, E>
    where
        E: From<TimeoutFailure>,
    {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Timeout(failure) => Err(E::from(failure)),
            Outcome::TaskFailure(err) => Err(err),
        }
    }
}

/// Runs tasks under a fixed wall-clock budget.
///
/// Cheap to clone; every clone shares the same budget and timeout failure.
#[derive(Debug, Clone)]
pub struct BoundedRunner {
    budget: Duration,
    failure: TimeoutFailure,
}

impl BoundedRunner {
    /// Create a runner with the given budget and the default timeout failure.
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            failure: TimeoutFailure::default(),
        }
    }

    /// Replace the failure reported on timeout.
    pub fn with_failure(mut self, failure: TimeoutFailure) -> Self {
        self.failure = failure;
        self
    }

    /// Build a runner from validated configuration.
    pub fn from_config(config: &TimeoutConfig) -> Self {
        let status = StatusCode::from_u16(config.timeout_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self::new(Duration::from_millis(config.operation_budget_ms)).with_failure(TimeoutFailure {
            status,
            message: config.timeout_message.clone(),
        })
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn timeout_failure(&self) -> &TimeoutFailure {
        &self.failure
    }

    /// Run `task` and resolve to its result or to a timeout, whichever comes first.
    ///
    /// `task` is invoked exactly once, synchronously; a panic while invoking it
    /// propagates to the caller. When the budget wins, the task's future keeps
    /// running detached and its eventual result is discarded.
    pub async fn run_bounded<F, Fut, T, E>(&self, task: F) -> Outcome<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let deadline = Instant::now() + self.budget;
        let handle = tokio::spawn(task());
        self.race(deadline, handle).await
    }

    /// Like [`run_bounded`](Self::run_bounded), but the task receives a
    /// cancellation token that is cancelled if the budget elapses first.
    ///
    /// The runner still does not wait for the task to observe the token.
    pub async fn run_cancellable<F, Fut, T, E>(&self, task: F) -> Outcome<T, E>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let token = CancellationToken::new();
        let deadline = Instant::now() + self.budget;
        let handle = tokio::spawn(task(token.child_token()));

        let outcome = self.race(deadline, handle).await;
        if outcome.is_timeout() {
            token.cancel();
        }
        outcome
    }

    async fn race<T, E>(&self, deadline: Instant, mut handle: JoinHandle<Result<T, E>>) -> Outcome<T, E> {
        let budget_ms = self.budget.as_millis() as u64;

        let outcome = if self.budget.is_zero() {
            Outcome::Timeout(self.failure.clone())
        } else {
            tokio::select! {
                biased;
                _ = time::sleep_until(deadline) => Outcome::Timeout(self.failure.clone()),
                joined = &mut handle => match joined {
                    Ok(Ok(value)) => Outcome::Success(value),
                    Ok(Err(err)) => Outcome::TaskFailure(err),
                    Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
                    Err(err) => {
                        // Only reachable if the runtime tears the task down under us.
                        tracing::warn!(error = %err, "Bounded task ended without settling");
                        Outcome::Timeout(self.failure.clone())
                    }
                },
            }
        };

        // Dropping the handle detaches the task instead of aborting it.
        drop(handle);

        match &outcome {
            Outcome::Timeout(failure) => tracing::warn!(
                budget_ms,
                status = %failure.status,
                "Bounded operation timed out; abandoning task"
            ),
            other => tracing::debug!(budget_ms, outcome = other.label(), "Bounded operation settled"),
        }
        metrics::record_bounded_outcome(outcome.label());

        outcome
    }
}

impl Default for BoundedRunner {
    fn default() -> Self {
        Self::from_config(&TimeoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ApiError;
    use std::future;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn runner(ms: u64) -> BoundedRunner {
        BoundedRunner::new(Duration::from_millis(ms))
    }

    async fn finish_after(ms: u64) -> Result<&'static str, ApiError> {
        time::sleep(Duration::from_millis(ms)).await;
        Ok("i did it!")
    }

    fn assert_near(elapsed: Duration, expected_ms: u64) {
        let ms = elapsed.as_millis() as u64;
        assert!(
            ms >= expected_ms && ms <= expected_ms + 5,
            "expected ≈{expected_ms}ms, got {ms}ms"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_task_times_out_at_budget() {
        let start = Instant::now();
        let outcome = runner(10_000).run_bounded(|| finish_after(11_000)).await;

        assert_near(start.elapsed(), 10_000);
        match outcome {
            Outcome::Timeout(failure) => {
                assert_eq!(failure.status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(failure.message, "timed out!");
            }
            other => panic!("expected timeout, got {}", other.label()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_task_passes_through_without_waiting_for_budget() {
        let start = Instant::now();
        let outcome = runner(10_000).run_bounded(|| finish_after(9_000)).await;

        assert_near(start.elapsed(), 9_000);
        assert!(matches!(outcome, Outcome::Success("i did it!")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_failure_keeps_status_and_message() {
        let start = Instant::now();
        let outcome = runner(10_000)
            .run_bounded(|| async {
                Err::<(), _>(ApiError::new(StatusCode::NOT_FOUND, "not found"))
            })
            .await;

        assert_near(start.elapsed(), 0);
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_budget_always_times_out() {
        let outcome = runner(0)
            .run_bounded(|| future::ready(Ok::<_, ApiError>("instant")))
            .await;

        assert!(outcome.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundary_resolves_to_timeout() {
        let outcome = runner(1_000).run_bounded(|| finish_after(1_000)).await;
        assert!(outcome.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_folds_into_task_error_type() {
        let failure = TimeoutFailure {
            status: StatusCode::GATEWAY_TIMEOUT,
            message: "too slow".into(),
        };
        let runner = runner(50).with_failure(failure.clone());

        let err = runner
            .run_bounded(|| finish_after(100))
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(err.status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.message, "too slow");
        assert_eq!(runner.timeout_failure(), &failure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_task_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let outcome = runner(100)
            .run_bounded(move || async move {
                time::sleep(Duration::from_millis(300)).await;
                flag.store(true, Ordering::SeqCst);
                Ok::<_, ApiError>(())
            })
            .await;

        assert!(outcome.is_timeout());
        assert!(!finished.load(Ordering::SeqCst));

        time::sleep(Duration::from_millis(500)).await;
        assert!(finished.load(Ordering::SeqCst), "abandoned task should not be cancelled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellable_signals_task_on_timeout() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let outcome = runner(100)
            .run_cancellable(move |token| async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        flag.store(true, Ordering::SeqCst);
                        Err(ApiError::internal("cancelled"))
                    }
                    _ = time::sleep(Duration::from_secs(60)) => Ok(()),
                }
            })
            .await;

        assert!(outcome.is_timeout());
        time::sleep(Duration::from_millis(10)).await;
        assert!(cancelled.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellable_leaves_token_alone_on_success() {
        let outcome = runner(1_000)
            .run_cancellable(|token| async move {
                time::sleep(Duration::from_millis(10)).await;
                Ok::<_, ApiError>(token.is_cancelled())
            })
            .await;

        assert!(matches!(outcome, Outcome::Success(false)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_runs_share_budget() {
        let runner = runner(1_000);
        let (fast, slow) = tokio::join!(
            runner.run_bounded(|| finish_after(500)),
            runner.run_bounded(|| finish_after(1_500)),
        );

        assert!(matches!(fast, Outcome::Success(_)));
        assert!(slow.is_timeout());
    }

    #[tokio::test]
    #[should_panic(expected = "failed to build task")]
    async fn test_synchronous_panic_propagates() {
        runner(1_000)
            .run_bounded(|| -> future::Ready<Result<(), ApiError>> { panic!("failed to build task") })
            .await;
    }

    #[tokio::test]
    #[should_panic(expected = "task blew up")]
    async fn test_task_panic_is_not_a_timeout() {
        runner(1_000)
            .run_bounded(|| async {
                if true {
                    panic!("task blew up");
                }
                Ok::<(), ApiError>(())
            })
            .await;
    }

    #[test]
    fn test_from_config() {
        let runner = BoundedRunner::from_config(&TimeoutConfig {
            operation_budget_ms: 2_500,
            timeout_status: 504,
            timeout_message: "gave up".into(),
            ..TimeoutConfig::default()
        });

        assert_eq!(runner.budget(), Duration::from_millis(2_500));
        assert_eq!(runner.timeout_failure().status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(runner.timeout_failure().message, "gave up");
    }
}
