//! Async data fetching for the IPO view

use {
    super::state::{ApiStatus, AppState},
    async_trait::async_trait,
    ipo_api::{IpoClient, IpoRecord, StatusResponse},
    std::sync::Arc,
    tokio::sync::Mutex as TokioMutex,
    tracing::{error, info, warn},
};

/// Where IPO data comes from
#[async_trait]
pub trait IpoSource: Send + Sync {
    async fn list_ipos(&self) -> ipo_api::Result<Vec<IpoRecord>>;
    async fn refresh(&self) -> ipo_api::Result<()>;
    async fn status(&self) -> ipo_api::Result<StatusResponse>;
}

#[async_trait]
impl IpoSource for IpoClient {
    async fn list_ipos(&self) -> ipo_api::Result<Vec<IpoRecord>> {
        IpoClient::list_ipos(self).await
    }

    async fn refresh(&self) -> ipo_api::Result<()> {
        IpoClient::refresh(self).await
    }

    async fn status(&self) -> ipo_api::Result<StatusResponse> {
        IpoClient::status(self).await
    }
}

/// What a refresh request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Backend refreshed and the list was reloaded with this many records
    Refreshed(usize),
    /// Another refresh was still running
    Skipped,
}

/// Fetch the IPO list and replace the view's records with it.
///
/// On failure the previous records stay in place; the error is logged and
/// handed back for callers that want to report it.
pub async fn load(
    app_state: &TokioMutex<AppState>,
    source: &dyn IpoSource,
) -> ipo_api::Result<usize> {
    match source.list_ipos().await {
        Ok(records) => {
            let count = records.len();
            info!("Loaded {} IPO records", count);
            let mut app = app_state.lock().await;
            app.view.apply_records(records);
            app.scroll.details = 0;
            app.scroll.selector = 0;
            Ok(count)
        },
        Err(e) => {
            error!("Error loading data: {}", e);
            Err(e)
        },
    }
}

/// Ask the backend to refresh, then reload the list.
///
/// The refresh flag is held by a guard for the whole call, so it is cleared
/// however this returns.
pub async fn refresh(
    app_state: &TokioMutex<AppState>,
    source: &dyn IpoSource,
) -> ipo_api::Result<RefreshOutcome> {
    let _guard = {
        let app = app_state.lock().await;
        match app.view.begin_refresh() {
            Some(guard) => guard,
            None => {
                warn!("Refresh already in progress, ignoring");
                return Ok(RefreshOutcome::Skipped);
            },
        }
    };

    info!("Refreshing IPO data...");
    if let Err(e) = source.refresh().await {
        error!("Error refreshing data: {}", e);
        return Err(e);
    }

    let count = load(app_state, source).await?;
    Ok(RefreshOutcome::Refreshed(count))
}

/// Check the API root and record whether it answered
pub async fn check_status(app_state: &TokioMutex<AppState>, source: &dyn IpoSource) -> ApiStatus {
    let status = match source.status().await {
        Ok(StatusResponse { message }) => {
            info!("API online: {}", message);
            ApiStatus::Online(message)
        },
        Err(e) => {
            warn!("API status check failed: {}", e);
            ApiStatus::Offline
        },
    };
    app_state.lock().await.api_status = status.clone();
    status
}

/// Spawn async task to load the IPO list
pub fn spawn_load(app_state: Arc<TokioMutex<AppState>>, source: Arc<dyn IpoSource>) {
    tokio::spawn(async move {
        let _ = load(&app_state, source.as_ref()).await;
    });
}

/// Spawn async task to refresh the backend and reload
pub fn spawn_refresh(app_state: Arc<TokioMutex<AppState>>, source: Arc<dyn IpoSource>) {
    tokio::spawn(async move {
        let _ = refresh(&app_state, source.as_ref()).await;
    });
}

/// Spawn async task to check the API status
pub fn spawn_status_check(app_state: Arc<TokioMutex<AppState>>, source: Arc<dyn IpoSource>) {
    tokio::spawn(async move {
        check_status(&app_state, source.as_ref()).await;
    });
}
