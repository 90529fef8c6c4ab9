use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{FetchError, Result};

/// One GET against a source endpoint, with an optional credential header
/// and a bounded per-request timeout. Returns the body on any 2xx status.
pub(crate) async fn get(
    client: &Client,
    url: &str,
    header: Option<(&str, &str)>,
    timeout: Duration,
) -> Result<String> {
    debug!(target: "source_client", url = %url, "Fetching");

    let mut request = client.get(url).timeout(timeout);
    if let Some((name, value)) = header {
        request = request.header(name, value);
    }

    let response = request.send().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })
}
