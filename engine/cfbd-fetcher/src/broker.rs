//! Key broker client
//!
//! The upstream bearer credential is never embedded in the app; a local
//! trusted broker vends it from `GET /api-key`.

use serde::Deserialize;

use crate::error::{FetchError, Result};

#[derive(Debug, Deserialize)]
struct BrokerKey {
    key: Option<String>,
}

/// Fetch the upstream bearer credential from the local broker.
///
/// Callers are expected to degrade to an empty credential when this fails;
/// the upstream then rejects protected endpoints and the refresh paths
/// degrade per category.
pub async fn fetch_broker_key(broker_url: &str) -> Result<String> {
    let url = format!("{}/api-key", broker_url.trim_end_matches('/'));
    let response = reqwest::get(&url).await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Upstream { status: status.as_u16(), body });
    }

    let parsed: BrokerKey = response.json().await?;
    Ok(parsed.key.unwrap_or_default())
}
