// src/crawl/throttle.rs
// =============================================================================
// Request pacing shared by all fetches of one crawl.
//
// Every fetch calls wait() before it starts. Starts are spaced at least
// `delay` apart no matter how many fetches run at once, so raising the
// crawl's concurrency never raises the request rate against the wiki.
// =============================================================================

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_start: Mutex::new(None),
        }
    }

    /// Waits until a request may start, then records the start.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        // Holding the lock across the sleep queues callers in order.
        let mut last_start = self.last_start.lock().await;
        if let Some(last) = *last_start {
            tokio::time::sleep_until(last + self.delay).await;
        }
        *last_start = Some(Instant::now());
    }
}
