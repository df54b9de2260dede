//! Single-attempt tile fetching.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::debug;
use trafo_common::{TrafoError, TrafoResult};

use crate::provider::TileProvider;
use crate::tiles::TileCoord;

/// HTTP client wrapper for tile downloads.
///
/// Each tile is fetched exactly once per render: no retry, no caching.
/// Timeouts are fixed at client construction.
pub struct TileFetcher {
    client: Client,
}

impl TileFetcher {
    pub fn new() -> TrafoResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("trafo-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TrafoError::InternalError(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Fetch one tile's raw bytes.
    pub async fn fetch_tile(
        &self,
        provider: &TileProvider,
        coord: TileCoord,
    ) -> TrafoResult<Bytes> {
        let url = provider.tile_url(coord);
        debug!(provider = %provider.name, url = %url, "fetching tile");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TrafoError::TileProviderError(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrafoError::TileProviderError(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response.bytes().await.map_err(|e| {
            TrafoError::TileProviderError(format!("reading body of {} failed: {}", url, e))
        })
    }
}
