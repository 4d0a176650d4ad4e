//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::Locale,
    usecase::{
        ForceCheckUseCase, GetHistoryUseCase, GetStatusUseCase, ListRemoteUsersUseCase,
        UpdateStatusUseCase,
    },
};

use super::{
    error::ServerError,
    handler::{force_check, get_history, get_status, get_users, health_check, index},
    poller::StatusPoller,
    signal::shutdown_signal,
    state::AppState,
};

/// Build the HTTP routes over `state`
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Web UI
        .route("/", get(index))
        // HTTP API
        .route("/api/health", get(health_check))
        .route("/api/status", get(get_status))
        .route("/api/history", get(get_history))
        .route("/api/force_check", get(force_check))
        .route("/api/users", get(get_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Remote desktop status server
///
/// This struct encapsulates the use cases and provides methods to run the
/// HTTP API together with the background poller.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     update_status_usecase,
///     force_check_usecase,
///     get_status_usecase,
///     get_history_usecase,
///     list_remote_users_usecase,
///     Locale::ZhCn,
///     Duration::from_secs(10),
/// );
/// server.run("0.0.0.0".to_string(), 51472).await?;
/// ```
pub struct Server {
    /// UpdateStatusUseCase（確認付き更新のユースケース）
    update_status_usecase: Arc<UpdateStatusUseCase>,
    /// ForceCheckUseCase（即時確認のユースケース）
    force_check_usecase: Arc<ForceCheckUseCase>,
    /// GetStatusUseCase（スナップショット取得のユースケース）
    get_status_usecase: Arc<GetStatusUseCase>,
    /// GetHistoryUseCase（履歴取得のユースケース）
    get_history_usecase: Arc<GetHistoryUseCase>,
    /// ListRemoteUsersUseCase（ユーザー一覧取得のユースケース）
    list_remote_users_usecase: Arc<ListRemoteUsersUseCase>,
    locale: Locale,
    poll_interval: Duration,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `update_status_usecase` - UseCase for the confirmed periodic update
    /// * `force_check_usecase` - UseCase for the immediate unconfirmed update
    /// * `get_status_usecase` - UseCase for the status snapshot
    /// * `get_history_usecase` - UseCase for the retained history
    /// * `list_remote_users_usecase` - UseCase for the live user list
    /// * `locale` - Language of status phrases
    /// * `poll_interval` - Cadence of the background poller
    pub fn new(
        update_status_usecase: Arc<UpdateStatusUseCase>,
        force_check_usecase: Arc<ForceCheckUseCase>,
        get_status_usecase: Arc<GetStatusUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        list_remote_users_usecase: Arc<ListRemoteUsersUseCase>,
        locale: Locale,
        poll_interval: Duration,
    ) -> Self {
        Self {
            update_status_usecase,
            force_check_usecase,
            get_status_usecase,
            get_history_usecase,
            list_remote_users_usecase,
            locale,
            poll_interval,
        }
    }

    /// Run the status server until a shutdown signal arrives
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 51472)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        // Start the background poller before accepting requests
        let poller = StatusPoller::new(self.update_status_usecase.clone(), self.poll_interval)
            .spawn();

        let app_state = Arc::new(AppState {
            update_status_usecase: self.update_status_usecase,
            force_check_usecase: self.force_check_usecase,
            get_status_usecase: self.get_status_usecase,
            get_history_usecase: self.get_history_usecase,
            list_remote_users_usecase: self.list_remote_users_usecase,
            locale: self.locale,
        });
        let app = router(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
            Ok(listener) => listener,
            Err(source) => {
                poller.abort();
                return Err(ServerError::Bind {
                    addr: bind_addr,
                    source,
                });
            }
        };

        // Start the server
        tracing::info!(
            "Remote desktop status server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Open http://localhost:{}/ to view the status page", port);
        tracing::info!("API endpoints: /api/status, /api/history, /api/force_check, /api/users");
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;
        poller.abort();
        served?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
