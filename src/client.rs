use async_trait::async_trait;
use reqwest::{Client, Response};
use snafu::{ResultExt, Snafu};
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::Config,
    models::{GenerateContentRequest, GenerationResponse},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to construct URL (probably incorrect model name): {suffix}"))]
    ConstructUrl {
        source: url::ParseError,
        suffix: String,
    },

    #[snafu(display("failed to perform request to '{url}'"))]
    PerformRequest { source: reqwest::Error, url: Url },

    #[snafu(display(
        "bad response from server; code {code}; description: {}",
        description.as_deref().unwrap_or("none")
    ))]
    BadResponse {
        code: u16,
        description: Option<String>,
    },

    #[snafu(display("failed to deserialize JSON response"))]
    Deserialize { source: serde_json::Error },

    #[snafu(display("failed to read response body"))]
    DecodeResponse { source: reqwest::Error },
}

impl Error {
    /// HTTP status code for errors that came back from the API
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::BadResponse { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A backend able to run a single `generateContent` call.
///
/// [`Gemini`] is the HTTP implementation; tests and embedders can provide their
/// own to avoid the network.
#[async_trait]
pub trait Generate: Send + Sync {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerationResponse, Error>;
}

/// Internal client for making requests to the Gemini API
pub(crate) struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    fn from_config(config: &Config) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Generate content
    #[instrument(skip_all, fields(model = %self.model))]
    async fn generate_content_raw(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerationResponse, Error> {
        let url = self.build_url("generateContent")?;
        debug!(
            tools.count = request.tools.as_ref().map_or(0, Vec::len),
            retrieval.hint = request
                .tool_config
                .as_ref()
                .and_then(|c| c.retrieval_config.as_ref())
                .is_some(),
            "sending generateContent request"
        );

        let response = self
            .http_client
            .post(url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context(PerformRequestSnafu { url })?;

        let response = Self::check_response(response).await?;
        let body = response.bytes().await.context(DecodeResponseSnafu)?;
        serde_json::from_slice(&body).context(DeserializeSnafu)
    }

    /// Turn non-2xx responses into [`Error::BadResponse`]
    async fn check_response(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if !status.is_success() {
            let description = response.text().await.ok();
            BadResponseSnafu {
                code: status.as_u16(),
                description,
            }
            .fail()
        } else {
            Ok(response)
        }
    }

    /// Build a URL for the API
    fn build_url(&self, endpoint: &str) -> Result<Url, Error> {
        let suffix = format!("{}:{}", self.model, endpoint);
        self.base_url
            .join(&suffix)
            .context(ConstructUrlSnafu { suffix })
    }
}

/// Client for the Gemini API
#[derive(Clone)]
pub struct Gemini {
    client: Arc<GeminiClient>,
}

impl Gemini {
    /// Create a new client from an explicit configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Arc::new(GeminiClient::from_config(config)),
        }
    }

    /// Model resource name this client talks to
    pub fn model(&self) -> &str {
        &self.client.model
    }
}

#[async_trait]
impl Generate for Gemini {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerationResponse, Error> {
        self.client.generate_content_raw(request).await
    }
}
