//! Remote loader: the single GET of the user list and its normalization.
//!
//! The request runs on a Tokio runtime; results are handed to the UI thread over an
//! unbounded channel so the store is only ever mutated from the event loop.
//!
use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::model::{User, image_url_for};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Outcome of one load, as delivered to the event loop.
pub type LoadResult = std::result::Result<Vec<User>, LoadError>;

#[derive(Clone, Debug)]
pub struct RemoteLoader {
    http: Client,
    endpoint: String,
}

impl RemoteLoader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch every user in one request. No retry, no timeout.
    pub async fn fetch_all(&self) -> LoadResult {
        info!(endpoint = %self.endpoint, "fetching users");
        let response = self
            .http
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(status, "user fetch returned non-success status");
            return Err(LoadError::Status { status });
        }

        let body = response.bytes().await?;
        let users = parse_users(&body)?;
        info!(count = users.len(), "fetched users");
        Ok(users)
    }
}

impl Default for RemoteLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Decode a JSON array of users and attach the derived image URL to each one.
pub fn parse_users(body: &[u8]) -> LoadResult {
    let mut users: Vec<User> = serde_json::from_slice(body)?;
    for u in &mut users {
        u.image_url = image_url_for(u.id);
    }
    Ok(users)
}

/// Run `fetch_all` on `handle` and send the result to `tx`.
pub fn spawn_fetch(handle: &Handle, loader: RemoteLoader, tx: UnboundedSender<LoadResult>) -> JoinHandle<()> {
    handle.spawn(async move {
        let result = loader.fetch_all().await;
        if let Err(e) = &result {
            warn!(error = %e, "user fetch failed");
        }
        // Receiver gone means the UI already shut down.
        let _ = tx.send(result);
    })
}
