//! Simulated round-trip latency.
//!
//! Every store and façade operation waits a fixed amount of time before
//! doing any work. The wait goes through an injectable [`Delay`] so tests
//! can run without sleeping.

use futures::future::{self, BoxFuture, FutureExt};
use std::time::Duration;

/// Shim round trip, applied to every document store operation.
pub const STORE: Duration = Duration::from_millis(500);
/// Login and signup.
pub const AUTH: Duration = Duration::from_millis(800);
/// Logout.
pub const LOGOUT: Duration = Duration::from_millis(300);
/// Full collection reads.
pub const LIST: Duration = Duration::from_millis(600);
/// Single-record lookups.
pub const LOOKUP: Duration = Duration::from_millis(400);
/// Updates.
pub const UPDATE: Duration = Duration::from_millis(500);
/// Adds and removes.
pub const MUTATE: Duration = Duration::from_millis(400);

/// Source of artificial delay.
pub trait Delay: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Waits on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
        future::ready(()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_waits() {
        let start = Instant::now();
        TokioDelay.sleep(LIST).await;
        assert!(start.elapsed() >= LIST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_is_immediate() {
        let start = Instant::now();
        NoDelay.sleep(AUTH).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
