//! HTTP Check-in Gateway implementation

use super::status::{error_for_status, transport_error};
use super::wire::{HistoryEntryDto, QuestionsResponse, SubmitRequest, SubmitResponse};
use crate::config::FileHttpConfig;
use async_trait::async_trait;
use checkin_application::ports::checkin_gateway::{CheckInGateway, GatewayError};
use checkin_domain::{Answer, CheckInResult, ChildId, HistoryEntry, Question};
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Header carrying the service API key
const API_KEY_HEADER: &str = "X-API-Key";

/// Gateway to the live check-in service over HTTP
pub struct HttpCheckInGateway {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    bearer_token: Option<String>,
}

impl HttpCheckInGateway {
    /// Create a gateway from the `[http]` config section
    pub fn new(config: &FileHttpConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Transport(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Transport(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("bloom-checkin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        info!(base_url = %base_url, "HttpCheckInGateway initialized");

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// `{base}/children/{child_id}/{tail..}`, with every segment percent-encoded
    fn endpoint(&self, child_id: &ChildId, tail: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                GatewayError::Transport(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .push("children")
                .push(child_id.as_str())
                .extend(tail);
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        };
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "Check-in service responded");

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }

    fn ensure_child(child_id: &ChildId) -> Result<(), GatewayError> {
        if child_id.is_blank() {
            return Err(GatewayError::NotFound("Child id is empty".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CheckInGateway for HttpCheckInGateway {
    async fn fetch_questions(&self, child_id: &ChildId) -> Result<Vec<Question>, GatewayError> {
        Self::ensure_child(child_id)?;
        let url = self.endpoint(child_id, &["check-in", "questions"])?;

        let response: QuestionsResponse = self.send(self.client.get(url)).await?;
        if let Some(message) = &response.message {
            debug!(child_id = %child_id, message = %message, "Questions message");
        }
        response.into_questions()
    }

    async fn submit_answers(
        &self,
        child_id: &ChildId,
        answers: &[Answer],
    ) -> Result<CheckInResult, GatewayError> {
        Self::ensure_child(child_id)?;
        let url = self.endpoint(child_id, &["check-in", "submit"])?;

        let body = SubmitRequest::from_answers(answers);
        let response: SubmitResponse = self.send(self.client.post(url).json(&body)).await?;
        if let Some(message) = &response.message {
            debug!(child_id = %child_id, message = %message, "Submit message");
        }
        Ok(response.into_result(Utc::now()))
    }

    async fn recommendation_history(
        &self,
        child_id: &ChildId,
    ) -> Result<Vec<HistoryEntry>, GatewayError> {
        Self::ensure_child(child_id)?;
        let url = self.endpoint(child_id, &["recommendations-history"])?;

        let entries: Vec<HistoryEntryDto> = self.send(self.client.get(url)).await?;
        entries.into_iter().map(HistoryEntryDto::into_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base_url: &str) -> HttpCheckInGateway {
        let config = FileHttpConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        HttpCheckInGateway::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let gw = gateway("http://localhost:8000/");
        let url = gw
            .endpoint(&ChildId::new("abc"), &["check-in", "questions"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/children/abc/check-in/questions");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let gw = gateway("https://api.example.com/v1");
        let url = gw
            .endpoint(&ChildId::new("abc"), &["recommendations-history"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/children/abc/recommendations-history"
        );
    }

    #[test]
    fn test_endpoint_encodes_child_id() {
        let gw = gateway("http://localhost:8000");
        let url = gw
            .endpoint(&ChildId::new("a/b c"), &["check-in", "submit"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/children/a%2Fb%20c/check-in/submit"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = FileHttpConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpCheckInGateway::new(&config),
            Err(GatewayError::Transport(_))
        ));
    }

    #[test]
    fn test_auth_headers_applied() {
        let config = FileHttpConfig {
            api_key: Some("key-123".to_string()),
            bearer_token: Some("tok".to_string()),
            ..Default::default()
        };
        let gw = HttpCheckInGateway::new(&config).unwrap();
        let request = gw
            .authorize(gw.client.get("http://localhost:8000/"))
            .build()
            .unwrap();

        assert_eq!(request.headers()[API_KEY_HEADER], "key-123");
        assert_eq!(request.headers()["authorization"], "Bearer tok");
    }

    #[tokio::test]
    async fn test_blank_child_rejected_before_request() {
        let gw = gateway("http://localhost:8000");
        let err = gw.fetch_questions(&ChildId::new("")).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }
}
