use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use burrow_core::Repository;
use burrow_storage::{FileRepository, InMemoryRepository};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

use crate::app::App;
use crate::error::ServeError;
use crate::state::AppState;

/// How long in-flight connections may take to finish after shutdown starts.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings of the gateway.
#[derive(Debug, Clone, TypedBuilder)]
pub struct GatewaySettings {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// Public base URL short links are built from.
    #[builder(setter(into))]
    pub base_url: String,
    /// Snapshot file; `None` keeps links in memory only.
    #[builder(default, setter(strip_option, into))]
    pub storage_path: Option<PathBuf>,
    /// Upper bound on draining connections once shutdown is requested.
    #[builder(default = DEFAULT_DRAIN_TIMEOUT)]
    pub drain_timeout: Duration,
}

/// Opens the repository selected by `settings`.
pub async fn open_repository(
    settings: &GatewaySettings,
) -> Result<Arc<dyn Repository>, ServeError> {
    match &settings.storage_path {
        Some(path) if !path.as_os_str().is_empty() => {
            let repository = FileRepository::open(path.clone()).await?;
            Ok(Arc::new(repository))
        }
        _ => {
            info!("no storage path configured, links are kept in memory");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

/// A bound, ready-to-serve gateway.
pub struct Gateway {
    listener: TcpListener,
    router: Router,
    drain_timeout: Duration,
}

impl Gateway {
    /// Opens storage and binds the listener.
    pub async fn bind(settings: &GatewaySettings) -> Result<Self, ServeError> {
        let repository = open_repository(settings).await?;
        let state = AppState::new(repository, settings.base_url.clone());

        let listener = TcpListener::bind(settings.listen_addr)
            .await
            .map_err(|source| ServeError::Bind {
                addr: settings.listen_addr,
                source,
            })?;

        Ok(Self {
            listener,
            router: App::router(state),
            drain_timeout: settings.drain_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServeError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` resolves, then drains in-flight
    /// connections for at most the configured drain timeout.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(listen_addr = %self.local_addr()?, "starting gateway server");

        let drain_timeout = self.drain_timeout;
        let (draining_tx, draining_rx) = oneshot::channel::<()>();
        let signal = async move {
            shutdown.await;
            let _ = draining_tx.send(());
        };

        let server = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .into_future();
        tokio::pin!(server);

        let deadline = async move {
            if draining_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(drain_timeout).await;
        };

        tokio::select! {
            result = &mut server => result?,
            _ = deadline => {
                warn!(?drain_timeout, "connections still open after drain timeout, forcing shutdown");
            }
        }

        info!("gateway server stopped");
        Ok(())
    }
}
