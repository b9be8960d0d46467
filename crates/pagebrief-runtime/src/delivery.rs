//! Result delivery with retry and linear backoff.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use pagebrief_config::DeliveryConfig;
use pagebrief_protocols::error::PlatformError;
use pagebrief_protocols::platform::Platform;
use pagebrief_protocols::types::{ResultMessage, SurfaceId};

/// How often and how patiently a result is sent to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Total attempts, including the first. Never less than one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Extra delay added for each further failed attempt.
    pub delay_step: Duration,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::from_config(&DeliveryConfig::default())
    }
}

impl DeliveryPolicy {
    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.base_delay(),
            delay_step: config.delay_step(),
        }
    }

    /// Delay between failed attempt `attempt` (0-based) and the next one.
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        self.base_delay + self.delay_step * attempt
    }

    /// Send `message` to `surface`, retrying on failure.
    ///
    /// Returns the number of attempts used. At most one send succeeds, and
    /// nothing is sent after the returned error.
    pub async fn deliver<P: Platform + ?Sized>(
        &self,
        platform: &P,
        request_id: Uuid,
        surface: SurfaceId,
        message: &ResultMessage,
    ) -> Result<u32, DeliveryFailure> {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match platform.send_message(surface, message).await {
                Ok(()) => {
                    debug!(
                        request_id = %request_id,
                        surface = %surface,
                        attempt = attempt + 1,
                        "Result delivered"
                    );
                    return Ok(attempt + 1);
                }
                Err(e) if attempt + 1 >= max_attempts => {
                    warn!(
                        request_id = %request_id,
                        surface = %surface,
                        attempts = max_attempts,
                        error = %e,
                        "Result delivery failed, giving up"
                    );
                    return Err(DeliveryFailure {
                        attempts: max_attempts,
                        last_error: e,
                    });
                }
                Err(e) => {
                    let delay = self.delay_after_attempt(attempt);
                    warn!(
                        request_id = %request_id,
                        surface = %surface,
                        "Delivery failed (attempt {}/{}): {}, retrying in {:?}",
                        attempt + 1,
                        max_attempts,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Every attempt failed.
#[derive(Debug)]
pub struct DeliveryFailure {
    pub attempts: u32,
    pub last_error: PlatformError,
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
