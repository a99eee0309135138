use std::sync::Arc;
use std::time::Duration;

use debate_client_core::{ClientError, DecodedBody, SessionStore, decode_body};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::config::ApiClientConfig;

/// HTTP transport shared by every service. Attaches the bearer token
/// when the session holds one, decodes the response envelope, and turns
/// 401 responses into a forced logout.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ApiTransport {
    #[must_use]
    pub fn new(config: &ApiClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms.max(250)),
            http: reqwest::Client::new(),
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.base_url, trimmed))
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.get(url)).await
    }

    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.get(url).query(query)).await
    }

    pub async fn post_json<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, ClientError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.url(path)?;
        self.execute(self.http.post(url).json(payload)).await
    }

    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.post(url).query(query)).await
    }

    pub async fn put_json<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, ClientError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.url(path)?;
        self.execute(self.http.put(url).json(payload)).await
    }

    pub async fn put_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.put(url).query(query)).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.put(url)).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.delete(url)).await
    }

    /// Multipart upload. No content-type header is set here or in
    /// [`Self::decorate`]; the client owns the boundary.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        self.execute(self.http.post(url).multipart(form)).await
    }

    fn url(&self, path: &str) -> Result<String, ClientError> {
        self.endpoint(path)
            .ok_or_else(|| ClientError::network("empty request path"))
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()))
            .timeout(self.timeout);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self
            .decorate(builder)
            .send()
            .await
            .map_err(|error| ClientError::network(error.to_string()))?;
        let payload = self.decode_response(response).await?;
        serde_json::from_value(payload).map_err(|error| ClientError::Protocol {
            message: format!("unexpected response shape: {error}"),
        })
    }

    async fn decode_response(&self, response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| ClientError::network(error.to_string()))?;
        self.interpret_response(status, &bytes)
    }

    fn interpret_response(&self, status: StatusCode, bytes: &[u8]) -> Result<Value, ClientError> {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(status = %status, "authentication rejected, clearing session");
            // One forced logout per 401 response.
            self.session.on_unauthorized();
            return Err(ClientError::Unauthorized);
        }

        if status.is_success() {
            let body = parse_body(bytes)?;
            return decode_body(body).map(DecodedBody::into_value);
        }

        // A failure status with an envelope body carries the server
        // message; anything else maps to a plain HTTP error.
        if let Ok(body) = serde_json::from_slice::<Value>(bytes) {
            if let Err(error) = decode_body(body) {
                return Err(error);
            }
        }
        Err(format_http_error(status, bytes))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, ClientError> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|error| ClientError::Protocol {
        message: format!("response was not valid JSON: {error}"),
    })
}

#[must_use]
pub fn format_http_error(status: StatusCode, body: &[u8]) -> ClientError {
    let body = String::from_utf8_lossy(body);
    let body = body.trim();
    let body = if body.is_empty() { "<empty>" } else { body };
    ClientError::Http {
        status: status.as_u16(),
        body: body.to_string(),
    }
}
