use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{AskError, AskSettings, FailureKind, ServiceConfig};

#[derive(Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    answer: String,
}

/// Something that can turn a question into an answer.
#[async_trait::async_trait]
pub trait AnswerClient: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, AskError>;
}

/// `POST <base>/chat` with `{"question": ...}`, expecting `{"answer": ...}` back.
#[derive(Debug, Clone)]
pub struct ReqwestAnswerClient {
    config: ServiceConfig,
    settings: AskSettings,
}

impl ReqwestAnswerClient {
    pub fn new(config: ServiceConfig, settings: AskSettings) -> Self {
        Self { config, settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, AskError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AskError::new(FailureKind::Internal, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> AskError {
        AskError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl AnswerClient for ReqwestAnswerClient {
    async fn ask(&self, question: &str) -> Result<String, AskError> {
        let endpoint = self.config.chat_endpoint()?;
        let client = self.build_client()?;
        let body = serde_json::to_vec(&ChatRequest { question })
            .map_err(|err| AskError::new(FailureKind::Internal, err.to_string()))?;

        let response = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AskError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if bytes.len() as u64 > self.settings.max_bytes {
            return Err(self.too_large(bytes.len() as u64));
        }

        let parsed: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|err| AskError::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(parsed.answer)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AskError {
    if err.is_timeout() {
        return AskError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return AskError::new(FailureKind::MalformedBody, err.to_string());
    }
    AskError::new(FailureKind::Network, err.to_string())
}
