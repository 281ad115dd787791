//! Bounded store calls
//!
//! Every repository call made by a service goes through a bounded timeout
//! so that a hung store surfaces as `StoreUnavailable` instead of a request
//! that never completes.

use std::future::Future;
use std::time::Duration;

use crate::domain::{DomainError, DomainResult};

pub(crate) async fn store_call<T>(
    timeout: Duration,
    operation: &str,
    fut: impl Future<Output = DomainResult<T>>,
) -> DomainResult<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(DomainError::StoreUnavailable(format!(
            "{} timed out after {}ms",
            operation,
            timeout.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timeout_maps_to_store_unavailable() {
        let result: DomainResult<()> = store_call(Duration::from_millis(5), "slow_op", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let result = store_call(Duration::from_millis(50), "fast_op", async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
