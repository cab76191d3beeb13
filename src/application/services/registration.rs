//! Registration Agent
//!
//! Announces this charger's descriptor to the central registry once the API
//! listener is bound. Failed attempts are retried after a fixed delay for as
//! long as the process runs; after the first accepted attempt the agent
//! stops for good (no re-announcement).

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::application::ports::RegistryClient;
use crate::domain::ChargerDescriptor;
use crate::shared::shutdown::ShutdownSignal;

/// Fixed pause between failed registration attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// How the registration loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The registry accepted the descriptor on attempt number `attempts`.
    Registered { attempts: u32 },
    /// Process shutdown interrupted the loop before registration succeeded.
    Cancelled { attempts: u32 },
}

/// Background registration loop.
pub struct RegistrationAgent {
    client: Arc<dyn RegistryClient>,
    descriptor: Arc<ChargerDescriptor>,
    retry_delay: Duration,
}

impl RegistrationAgent {
    pub fn new(client: Arc<dyn RegistryClient>, descriptor: Arc<ChargerDescriptor>) -> Self {
        Self {
            client,
            descriptor,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Start the registration loop on its own task.
    pub fn spawn(self, shutdown: ShutdownSignal) -> JoinHandle<RegistrationOutcome> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    /// Attempt registration until the registry accepts it or shutdown fires.
    pub async fn run(&self, shutdown: ShutdownSignal) -> RegistrationOutcome {
        let mut attempts = 0u32;

        loop {
            if shutdown.is_triggered() {
                return RegistrationOutcome::Cancelled { attempts };
            }

            attempts += 1;
            info!(
                attempt = attempts,
                uuid = %self.descriptor.uuid,
                port = self.descriptor.port,
                "📡 Registering charger with registry"
            );

            let result = tokio::select! {
                result = self.client.register(&self.descriptor) => result,
                _ = shutdown.wait() => {
                    info!(attempts, "Registration interrupted by shutdown");
                    return RegistrationOutcome::Cancelled { attempts };
                }
            };

            match result {
                Ok(()) => {
                    info!(attempts, "✅ Registration done");
                    return RegistrationOutcome::Registered { attempts };
                }
                Err(e) => {
                    warn!(
                        attempt = attempts,
                        error = %e,
                        retry_in_secs = self.retry_delay.as_secs_f64(),
                        "Registration failed, retrying"
                    );
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_delay) => {}
                _ = shutdown.wait() => {
                    info!(attempts, "Registration cancelled by shutdown");
                    return RegistrationOutcome::Cancelled { attempts };
                }
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
