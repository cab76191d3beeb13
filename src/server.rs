//! Charger agent runtime.
//!
//! Provides [`AgentHandle`] that encapsulates the agent lifecycle: bind the
//! API listener on an OS-assigned port, build the charger descriptor from
//! the bound address, start the registration task, serve the REST API, and
//! shut everything down gracefully.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::application::services::{RegistrationAgent, RegistrationOutcome, DEFAULT_RETRY_DELAY};
use crate::application::RegistrationError;
use crate::config::{AppConfig, LoggingConfig};
use crate::domain::{ChargerDescriptor, ReservationRepository};
use crate::infrastructure::registry::{DEFAULT_REGISTRY_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::infrastructure::{HttpRegistryClient, InMemoryReservationRepository};
use crate::interfaces::http::{create_api_router, AgentState};
use crate::shared::shutdown::ShutdownCoordinator;

/// Startup failures. All of them are fatal for the process.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unable to bind API listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to build registry client: {0}")]
    Registry(#[from] RegistrationError),
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the agent.
pub struct AgentOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Registry endpoint the descriptor is posted to.
    pub registry_url: String,
    /// Pause between failed registration attempts.
    pub retry_delay: Duration,
    /// Upper bound for one registration request.
    pub request_timeout: Duration,
}

impl AgentOptions {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

// ── AgentHandle ────────────────────────────────────────────────────

/// Handle to a running agent.
///
/// # Examples
///
/// ```rust,no_run
/// use charger_agent::config::AppConfig;
/// use charger_agent::server::{AgentHandle, AgentOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = AppConfig::load(std::path::Path::new("config.yml"))?;
///     let handle = AgentHandle::start(AgentOptions::new(config)).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct AgentHandle {
    /// Descriptor advertised to the registry and served on `/config`.
    pub descriptor: Arc<ChargerDescriptor>,
    /// Reservation store shared with the API handlers.
    pub reservations: Arc<dyn ReservationRepository>,
    /// Address the API listener is bound to.
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    registration_task: JoinHandle<RegistrationOutcome>,
}

impl AgentHandle {
    /// Start the agent.
    ///
    /// The registration task is only spawned after the listener is bound, so
    /// the descriptor it sends always carries the real port.
    pub async fn start(opts: AgentOptions) -> Result<Self, ServerError> {
        let app_cfg = opts.config;

        info!(uuid = %app_cfg.charger.uuid, "Starting charger agent...");

        // ── Listener ───────────────────────────────────────────
        let bind_addr = format!("{}:0", app_cfg.server.host);
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind {
                addr: bind_addr,
                source,
            })?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        // ── Shared state ───────────────────────────────────────
        let descriptor = Arc::new(ChargerDescriptor::bound(
            app_cfg.charger.clone(),
            local_addr,
        ));
        let reservations: Arc<dyn ReservationRepository> =
            Arc::new(InMemoryReservationRepository::new());

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Registration ───────────────────────────────────────
        let registry_client =
            HttpRegistryClient::with_timeout(opts.registry_url, opts.request_timeout)?;
        info!(url = %registry_client.url(), "Registry endpoint");
        let registration_task =
            RegistrationAgent::new(Arc::new(registry_client), descriptor.clone())
                .with_retry_delay(opts.retry_delay)
                .spawn(shutdown_signal.clone());

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(AgentState {
            descriptor: descriptor.clone(),
            reservations: reservations.clone(),
        });

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Charger agent started.");

        Ok(Self {
            descriptor,
            reservations,
            local_addr,
            shutdown,
            api_task,
            registration_task,
        })
    }

    /// Port the API listener is bound to.
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until shutdown is triggered and every task has stopped.
    pub async fn wait(self) {
        let Self {
            shutdown,
            api_task,
            registration_task,
            ..
        } = self;

        shutdown.signal().wait().await;

        shutdown
            .drain(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;

        match registration_task.await {
            Ok(RegistrationOutcome::Registered { attempts }) => {
                info!(attempts, "Registration task finished (registered)")
            }
            Ok(RegistrationOutcome::Cancelled { attempts }) => {
                info!(attempts, "Registration task finished (not registered)")
            }
            Err(e) => error!("Registration task panicked: {}", e),
        }

        info!("👋 Charger agent shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down charger agent...");
        self.trigger_shutdown();
        self.wait().await;
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the logging config.
///
/// `RUST_LOG` takes precedence over the configured level. Call this once at
/// process startup (before [`AgentHandle::start`]).
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
