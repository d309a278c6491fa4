//! HTTP transport for the inventory and sales API

use crate::session::SessionHandle;
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiErrorBody;

/// HTTP client trait
///
/// Paths are relative to the configured base URL (leading `/` optional).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn get_with_query<T: DeserializeOwned + Send, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    fn session(&self) -> &SessionHandle;
}

/// Network HTTP client (reqwest)
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        if let Some(token) = &config.token {
            session.sign_in(token.clone(), None);
        }
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned + Send>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned + Send>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().path().to_string();
            let text = response.text().await?;
            // Structured body first
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    code: body.code,
                    message: body.message,
                });
            }
            let detail = if text.is_empty() { url } else { text };
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(detail)),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(detail)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(detail)),
                StatusCode::METHOD_NOT_ALLOWED => Err(ClientError::MethodNotAllowed(detail)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::Validation(detail))
                }
                _ => Err(ClientError::Internal(detail)),
            };
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn get_with_query<T: DeserializeOwned + Send, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn patch<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    async fn patch_empty<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::PATCH, path)).await
    }

    fn session(&self) -> &SessionHandle {
        &self.session
    }
}
