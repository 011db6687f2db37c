use async_trait::async_trait;
use reqwest::header::ACCEPT;
use url::Url;

use crate::config::Config;
use crate::types::{MintRequest, MintResponse, SubmissionResult};

pub const CONNECTIVITY_MESSAGE: &str =
    "Could not reach the minting service. Check your connection and try again.";
pub const TIMEOUT_MESSAGE: &str = "The minting service took too long to respond. Try again.";
pub const OTHER_FAILURE_MESSAGE: &str = "Mint failed due to an unexpected error. Try again.";
const BUSINESS_FAILURE_MESSAGE: &str = "Mint failed";

/// Performs one mint round trip. Implementations never fail: every outcome,
/// including transport errors, comes back as a `SubmissionResult`.
#[async_trait]
pub trait MintService: Send + Sync {
    async fn mint(&self, request: &MintRequest) -> SubmissionResult;
}

/// Why a round trip did not produce a usable response. Only logged, the user
/// sees `user_message()`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connectivity(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("request failed: {0}")]
    Other(String),
}

impl TransportError {
    pub fn user_message(&self) -> &'static str {
        match self {
            TransportError::Connectivity(_) => CONNECTIVITY_MESSAGE,
            TransportError::Timeout(_) => TIMEOUT_MESSAGE,
            TransportError::MalformedResponse(_) | TransportError::Other(_) => {
                OTHER_FAILURE_MESSAGE
            }
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // connect timeouts report both, they count as timeouts
        if err.is_timeout() {
            return TransportError::Timeout(err.to_string());
        }
        if err.is_connect() {
            return TransportError::Connectivity(err.to_string());
        }
        if err.is_decode() {
            return TransportError::MalformedResponse(err.to_string());
        }
        TransportError::Other(err.to_string())
    }
}

/// HTTP client for `POST {base}/mint`. No retries, no caching.
#[derive(Debug, Clone)]
pub struct MintClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl MintClient {
    pub fn new(config: &Config) -> eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.mint_endpoint()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn round_trip(&self, request: &MintRequest) -> Result<SubmissionResult, TransportError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // error bodies are optional, fall back to the status
            let parsed = serde_json::from_str::<MintResponse>(&body).unwrap_or_default();
            tracing::warn!(
                chain = %request.chain,
                status = status.as_u16(),
                code = parsed.code.as_deref(),
                "Minting service returned an error status"
            );

            let message = match parsed.message() {
                Some(msg) => msg.to_string(),
                None => format!("Mint request failed with status {}", status.as_u16()),
            };
            return Ok(SubmissionResult::failure(message, parsed.code));
        }

        let parsed = serde_json::from_str::<MintResponse>(&body)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        match parsed.success {
            Some(true) => {
                let tx_hash = parsed.tx_hash.unwrap_or_default();
                if tx_hash.is_empty() {
                    tracing::warn!(chain = %request.chain, "Mint succeeded without a tx hash");
                }
                tracing::info!(chain = %request.chain, tx_hash = %tx_hash, "Mint succeeded");
                Ok(SubmissionResult::success(tx_hash))
            }
            Some(false) => {
                tracing::info!(
                    chain = %request.chain,
                    code = parsed.code.as_deref(),
                    "Minting service rejected the mint"
                );
                let message = parsed.message().unwrap_or(BUSINESS_FAILURE_MESSAGE).to_string();
                Ok(SubmissionResult::failure(message, parsed.code))
            }
            None => Err(TransportError::MalformedResponse(
                "response has no success flag".to_string(),
            )),
        }
    }
}

#[async_trait]
impl MintService for MintClient {
    async fn mint(&self, request: &MintRequest) -> SubmissionResult {
        tracing::debug!(chain = %request.chain, endpoint = %self.endpoint, "Submitting mint");

        match self.round_trip(request).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    chain = %request.chain,
                    error = err.to_string(),
                    "Mint request failed before a usable response"
                );
                SubmissionResult::failure(err.user_message(), None)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::chain::Chain;

    fn test_request() -> MintRequest {
        MintRequest {
            chain: Chain::Bsc,
            private_key: "k".repeat(32),
            collection_id: String::new(),
            mint_quantity: 5,
            mint_stage: String::new(),
            contract_address: format!("0x{}", "a".repeat(40)),
        }
    }

    fn test_client(uri: String) -> MintClient {
        MintClient::new(&Config::test_default().with_api_url(uri)).unwrap()
    }

    #[tokio::test]
    async fn test_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mint"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "chain": "BSC",
                "privateKey": "k".repeat(32),
                "collectionId": "",
                "mintQuantity": 5,
                "mintStage": "",
                "contractAddress": format!("0x{}", "a".repeat(40)),
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "txHash": "0xabc"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(result, SubmissionResult::success("0xabc"));
    }

    #[tokio::test]
    async fn test_business_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mint"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "msg": "mint not live",
                "code": "STAGE_CLOSED"
            })))
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(
            result,
            SubmissionResult::failure("mint not live", Some("STAGE_CLOSED".to_string()))
        );
    }

    #[tokio::test]
    async fn test_business_failure_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": false})),
            )
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(result, SubmissionResult::failure("Mint failed", None));
    }

    #[tokio::test]
    async fn test_error_status_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mint"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"msg": "insufficient funds"})),
            )
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(result, SubmissionResult::failure("insufficient funds", None));
    }

    #[tokio::test]
    async fn test_error_status_ignores_success_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(serde_json::json!({"success": true, "txHash": "0xabc"})),
            )
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(
            result,
            SubmissionResult::failure("Mint request failed with status 502", None)
        );
    }

    #[tokio::test]
    async fn test_error_status_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(
            result,
            SubmissionResult::failure("Mint request failed with status 404", None)
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(result, SubmissionResult::failure(OTHER_FAILURE_MESSAGE, None));
    }

    #[tokio::test]
    async fn test_missing_success_flag_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"txHash": "0xabc"})),
            )
            .mount(&server)
            .await;

        let result = test_client(server.uri()).mint(&test_request()).await;
        assert_eq!(result, SubmissionResult::failure(OTHER_FAILURE_MESSAGE, None));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // nothing listens on port 1
        let result = test_client("http://127.0.0.1:1".to_string())
            .mint(&test_request())
            .await;

        assert_eq!(result, SubmissionResult::failure(CONNECTIVITY_MESSAGE, None));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "txHash": "0xabc"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut config = Config::test_default().with_api_url(server.uri());
        config.request_timeout_ms = 200;
        let client = MintClient::new(&config).unwrap();

        let result = client.mint(&test_request()).await;
        assert_eq!(result, SubmissionResult::failure(TIMEOUT_MESSAGE, None));
    }

    #[test]
    fn test_transport_messages_do_not_leak() {
        let err = TransportError::Connectivity("tcp connect error: 10.0.0.1:443".to_string());
        assert!(!err.user_message().contains("10.0.0.1"));
        assert!(err.to_string().contains("10.0.0.1"));
        assert_eq!(
            TransportError::MalformedResponse("eof".to_string()).user_message(),
            OTHER_FAILURE_MESSAGE
        );
    }
}
