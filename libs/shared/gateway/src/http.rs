use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{AppError, Collection, Person, PersonId, Resource};

use crate::ApiGateway;

/// reqwest-backed gateway: `{base}/{resource}[/{id}]`.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpGateway {
    pub fn new(config: &AppConfig) -> Result<Self> {
        if !config.is_configured() {
            bail!("Dashboard API URL is not configured");
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Like `new`, but reports a missing or unusable configuration as `AppError::NotConfigured`.
    pub fn connect(config: &AppConfig) -> Result<Self, AppError> {
        if !config.is_configured() {
            return Err(AppError::NotConfigured("DASHBOARD_API_URL".to_string()));
        }
        Self::new(config).map_err(|e| AppError::NotConfigured(format!("{:#}", e)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("API token is not a valid header value")?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn url(&self, resource: Resource, id: Option<PersonId>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, resource.as_str(), id),
            None => format!("{}/{}", self.base_url, resource.as_str()),
        }
    }

    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<Response> {
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, url).headers(self.get_headers()?);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        Ok(response)
    }

    async fn request<T>(&self, method: Method, url: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, url, body).await?;
        let data = response
            .json::<T>()
            .await
            .with_context(|| format!("unexpected response body from {}", url))?;
        Ok(data)
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn load_all(&self, resource: Resource) -> Result<Collection<Person>> {
        self.request(Method::GET, &self.url(resource, None), None).await
    }

    async fn load_all_by_id(&self, resource: Resource, id: PersonId) -> Result<Vec<Value>> {
        self.request(Method::GET, &self.url(resource, Some(id)), None).await
    }

    async fn create(&self, resource: Resource, data: Value) -> Result<Person> {
        self.request(Method::POST, &self.url(resource, None), Some(data)).await
    }

    async fn create_by_id(&self, resource: Resource, id: PersonId, data: Value) -> Result<Value> {
        let response = self
            .send(Method::POST, &self.url(resource, Some(id)), Some(data))
            .await?;
        let text = response.text().await?;

        // Some endpoints acknowledge with an empty body.
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).context("unexpected response body")
    }

    async fn update(&self, resource: Resource, id: PersonId, data: Value) -> Result<Person> {
        self.request(Method::PUT, &self.url(resource, Some(id)), Some(data)).await
    }

    async fn remove(&self, resource: Resource, id: PersonId) -> Result<()> {
        self.send(Method::DELETE, &self.url(resource, Some(id)), None).await?;
        Ok(())
    }
}
