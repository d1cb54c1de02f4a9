//! Tokio-timer implementation of the `Sleeper` port.

use std::time::Duration;

use crate::application::ports::Sleeper;

/// Waits on the tokio timer. Not cancellable beyond dropping the future.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
