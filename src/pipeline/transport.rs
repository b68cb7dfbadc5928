//! Transport: the single HTTP round-trip to the processing endpoint.
//!
//! The only stage with network I/O. The whole-request timeout configured in
//! [`ClientConfig`] is enforced here by the HTTP client itself; the workflow
//! above imposes no deadline of its own. Failures are mapped onto the error
//! taxonomy: could-not-reach, reached-but-declined, and
//! arrived-but-unreadable are distinct variants because the user's next step
//! differs for each.

use crate::config::ClientConfig;
use crate::error::StudioError;
use crate::pipeline::payload::Payload;
use std::time::Duration;
use tracing::{debug, info};

/// Build the HTTP client used for submissions.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, StudioError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| StudioError::Internal(format!("http client: {e}")))
}

/// Submit the payload and return the raw response body.
///
/// Exactly one request leaves this function per call.
pub async fn send(
    client: &reqwest::Client,
    config: &ClientConfig,
    payload: Payload,
) -> Result<Vec<u8>, StudioError> {
    let photo_bytes = payload.photo.len();
    let form = payload.into_form()?;

    info!(
        "Submitting photo ({} bytes) to {}",
        photo_bytes, config.endpoint
    );

    let response = client
        .post(&config.endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                StudioError::RequestTimeout {
                    endpoint: config.endpoint.clone(),
                    secs: config.request_timeout_secs,
                }
            } else {
                StudioError::ConnectionFailed {
                    endpoint: config.endpoint.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StudioError::ServiceFailure {
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| StudioError::UnusableResult {
            reason: format!("response body: {e}"),
        })?;

    debug!("Received {} bytes from service", body.len());
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{CopyCount, SelectedPhoto};
    use mockito::Server;

    fn payload() -> Payload {
        Payload {
            photo: SelectedPhoto::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "me.jpg"),
            bg_color: "#ffffff".to_string(),
            copies: CopyCount::Six,
        }
    }

    fn config_for(server: &Server) -> ClientConfig {
        ClientConfig::builder()
            .endpoint(format!("{}/process", server.url()))
            .request_timeout_secs(5)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn success_returns_body_bytes() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/process")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .with_body(vec![b'P', b'K', 3, 4, 9, 9])
            .create_async()
            .await;

        let config = config_for(&server);
        let client = build_client(&config).unwrap();
        let body = send(&client, &config, payload()).await.unwrap();

        assert_eq!(body, vec![b'P', b'K', 3, 4, 9, 9]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_service_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/process")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let config = config_for(&server);
        let client = build_client(&config).unwrap();
        let err = send(&client, &config, payload()).await.unwrap_err();

        assert!(matches!(err, StudioError::ServiceFailure { status: 500 }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_connection_failure() {
        // Port 9 (discard) is not listening in the test environment.
        let config = ClientConfig::builder()
            .endpoint("http://127.0.0.1:9/process")
            .request_timeout_secs(2)
            .build()
            .unwrap();
        let client = build_client(&config).unwrap();
        let err = send(&client, &config, payload()).await.unwrap_err();

        match err {
            StudioError::ConnectionFailed { endpoint, .. } => {
                assert!(endpoint.contains("127.0.0.1:9"));
            }
            StudioError::RequestTimeout { .. } => {} // some stacks surface this as a timeout
            other => panic!("unexpected error: {other}"),
        }
    }
}
