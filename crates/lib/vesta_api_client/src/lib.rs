//! # vesta_api_client
//!
//! Typed HTTP client for the Vesta chat API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;
use vesta_core::{ChatRequest, ChatResponse, ChatTransport, Message, TransportError};

/// Server the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Client for the `/chat` endpoint.
///
/// One request per call; no retries and no timeout.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: Url,
}

impl ChatClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Network(format!("invalid endpoint URL: {e}")))
    }

    /// `POST /chat` with the whole transcript.
    pub async fn chat(&self, messages: &[Message]) -> Result<ChatResponse, TransportError> {
        let body = ChatRequest {
            messages: messages.to_vec(),
        };
        let resp = self
            .http
            .post(self.endpoint("chat")?)
            .json(&body)
            .send()
            .await
            .map_err(network)?;
        decode_reply(check_status(resp)?).await
    }

    /// `GET /chat` liveness check.
    pub async fn liveness(&self) -> Result<ChatResponse, TransportError> {
        let resp = self
            .http
            .get(self.endpoint("chat")?)
            .send()
            .await
            .map_err(network)?;
        decode_reply(check_status(resp)?).await
    }

    /// `GET /` plain-text banner.
    pub async fn banner(&self) -> Result<String, TransportError> {
        let resp = self
            .http
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(network)?;
        check_status(resp)?.text().await.map_err(network)
    }
}

#[async_trait]
impl ChatTransport for ChatClient {
    async fn send_transcript(&self, messages: &[Message]) -> Result<ChatResponse, TransportError> {
        self.chat(messages).await
    }
}

fn network(e: reqwest::Error) -> TransportError {
    TransportError::Network(e.to_string())
}

fn check_status(resp: Response) -> Result<Response, TransportError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        log::warn!("chat endpoint answered {status}");
        Err(TransportError::Status(status.as_u16()))
    }
}

async fn decode_reply(resp: Response) -> Result<ChatResponse, TransportError> {
    resp.json::<ChatResponse>().await.map_err(|e| {
        if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            network(e)
        }
    })
}
