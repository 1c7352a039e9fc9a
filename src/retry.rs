//! Fixed-interval polling for operations the backend rejects transiently.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::{Result, StardustError};

/// Leading text of the backend message when it cannot estimate gas for a
/// withdrawal transaction.
pub const GAS_ESTIMATION_FAILURE_PREFIX: &str = "cannot estimate gas";
/// Marker the backend includes when the failure is about the gas limit.
pub const GAS_LIMIT_MARKER: &str = "UNPREDICTABLE_GAS_LIMIT";

/// Interval and iteration budget for [`retry_until`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Constant delay between attempts.
    pub interval: Duration,
    /// Maximum number of attempts, including the first.
    pub max_iterations: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10_000),
            max_iterations: 60,
        }
    }
}

/// Runs `operation` until it succeeds, fails with an error `is_retryable`
/// rejects, or `policy.max_iterations` attempts have failed retryably.
///
/// Exhaustion yields [`StardustError::RetryExhausted`]. A budget of zero is
/// treated as one attempt.
pub async fn retry_until<T, F, Fut, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&StardustError) -> bool,
{
    let attempts = policy.max_iterations.max(1);
    let mut remaining = attempts;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retryable(&err) {
            return Err(err);
        }

        remaining -= 1;
        if remaining == 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(attempts, "retry budget exhausted");

            return Err(StardustError::RetryExhausted {
                attempts,
                last_error: err.to_string(),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            remaining,
            interval_ms = policy.interval.as_millis() as u64,
            "retryable failure, waiting before next attempt"
        );

        sleep(policy.interval).await;
    }
}

/// True for the 500 the backend returns while a withdrawal's gas cannot yet
/// be estimated. Every other error, including other 500s, is final.
pub fn is_gas_estimation_failure(err: &StardustError) -> bool {
    if err.status() != Some(500) {
        return false;
    }
    err.response_message().is_some_and(|message| {
        message.starts_with(GAS_ESTIMATION_FAILURE_PREFIX) && message.contains(GAS_LIMIT_MARKER)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use serde_json::json;

    use super::{is_gas_estimation_failure, retry_until, RetryPolicy};
    use crate::StardustError;

    fn fast_policy(max_iterations: u32) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_millis(1),
            max_iterations,
        }
    }

    fn gas_error() -> StardustError {
        StardustError::Http {
            status: 500,
            body: json!({
                "message": "cannot estimate gas; transaction may fail or may require manual gas limit (code=UNPREDICTABLE_GAS_LIMIT)",
                "statusCode": 500,
            })
            .to_string(),
        }
    }

    #[tokio::test]
    async fn returns_success_after_retryable_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_until(
            &fast_policy(60),
            || {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if call < 2 {
                        Err(gas_error())
                    } else {
                        Ok("settled")
                    }
                }
            },
            is_gas_estimation_failure,
        )
        .await
        .expect("third attempt must succeed");

        assert_eq!(result, "settled");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_error_fails_fast() {
        let calls = AtomicU32::new(0);
        let err = retry_until(
            &fast_policy(60),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(), _>(StardustError::Http {
                        status: 400,
                        body: json!({ "message": "player_validation_error" }).to_string(),
                    })
                }
            },
            is_gas_estimation_failure,
        )
        .await
        .expect_err("must propagate");

        assert_eq!(err.status(), Some(400));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhaustion_stops_at_max_iterations() {
        let calls = AtomicU32::new(0);
        let err = retry_until(
            &fast_policy(4),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(gas_error()) }
            },
            is_gas_estimation_failure,
        )
        .await
        .expect_err("must time out");

        match err {
            StardustError::RetryExhausted { attempts, last_error } => {
                assert_eq!(attempts, 4);
                assert!(last_error.contains("cannot estimate gas"));
            }
            other => panic!("expected retry exhaustion, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn zero_budget_still_attempts_once() {
        let calls = AtomicU32::new(0);
        let err = retry_until(
            &fast_policy(0),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(gas_error()) }
            },
            |_| true,
        )
        .await
        .expect_err("must time out");

        assert!(matches!(err, StardustError::RetryExhausted { attempts: 1, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn default_policy_polls_every_ten_seconds_sixty_times() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(10));
        assert_eq!(policy.max_iterations, 60);
    }

    #[test]
    fn gas_predicate_requires_status_prefix_and_marker() {
        assert!(is_gas_estimation_failure(&gas_error()));

        let wrong_status = StardustError::Http {
            status: 400,
            body: json!({ "message": "cannot estimate gas (UNPREDICTABLE_GAS_LIMIT)" }).to_string(),
        };
        assert!(!is_gas_estimation_failure(&wrong_status));

        let missing_marker = StardustError::Http {
            status: 500,
            body: json!({ "message": "cannot estimate gas; insufficient funds" }).to_string(),
        };
        assert!(!is_gas_estimation_failure(&missing_marker));

        let wrong_prefix = StardustError::Http {
            status: 500,
            body: json!({ "message": "internal: UNPREDICTABLE_GAS_LIMIT cannot estimate gas" })
                .to_string(),
        };
        assert!(!is_gas_estimation_failure(&wrong_prefix));

        let other_shape = StardustError::Http {
            status: 500,
            body: "cannot estimate gas UNPREDICTABLE_GAS_LIMIT".to_owned(),
        };
        assert!(!is_gas_estimation_failure(&other_shape));

        assert!(!is_gas_estimation_failure(&StardustError::Decode("x".to_owned())));
    }
}
