use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use crate::config::{AssistantConfig, API_KEY_ENV};
use crate::{Error, Result};

/// Marker the upstream puts in the error body for a bad key.
const INVALID_KEY_MARKER: &str = "API_KEY_INVALID";

/// Client for the `generateContent` REST call
pub struct GeminiClient {
    client: Client,
    api_key: String,
    url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(Error::UpstreamAuth(format!("{API_KEY_ENV} is not set")));
        }

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(url = %self.url, "sending generateContent request");
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(classify_failure(status, &text));
        }
        parse_answer(&text)
    }
}

fn classify_failure(status: StatusCode, body: &str) -> Error {
    let detail = format!("{status}: {body}");
    if status == StatusCode::UNAUTHORIZED || body.contains(INVALID_KEY_MARKER) {
        Error::UpstreamAuth(detail)
    } else {
        Error::UpstreamUnavailable(detail)
    }
}

/// Concatenated text parts of the first candidate.
fn parse_answer(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let answer: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if answer.is_empty() {
        return Err(Error::UpstreamUnavailable("response contained no text".to_string()));
    }
    Ok(answer)
}
