/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. Open the configured document store
 * 2. Build the account service and session table
 * 3. Create the router
 * 4. Start the periodic session reaper
 *
 * The reaper is owned by the caller: `SessionReaper::shutdown` stops it,
 * and dropping the handle aborts it.
 */

use axum::Router;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::backend::auth::sessions::SessionStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::open_store;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::AppConfig;

/// How often expired sessions are purged
const SESSION_REAP_INTERVAL: Duration = Duration::from_secs(300);

/// Open the store and build the application state
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be opened.
pub async fn build_state(config: &AppConfig) -> Result<AppState, StoreError> {
    tracing::info!("Initializing docauth backend");
    let store = open_store(config).await?;
    Ok(AppState::new(store, config))
}

/// Create and configure the Axum application
///
/// Must be called inside a Tokio runtime: it spawns the session reaper.
/// Keep the returned reaper alive for as long as the router serves.
pub fn create_app(state: AppState) -> (Router<()>, SessionReaper) {
    let reaper = SessionReaper::spawn(state.sessions.clone(), SESSION_REAP_INTERVAL);

    let app = create_router(state);
    tracing::info!("Router configured with periodic session cleanup");
    (app, reaper)
}

/// Background task purging expired sessions
#[derive(Debug)]
pub struct SessionReaper {
    handle: Option<JoinHandle<()>>,
}

impl SessionReaper {
    /// Purge `sessions` every `every`
    pub fn spawn(sessions: SessionStore, every: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    tracing::debug!("Purged {} expired sessions", purged);
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            tracing::debug!("Session reaper stopped");
        }
    }
}

impl Drop for SessionReaper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
