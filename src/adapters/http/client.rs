//! Shared reqwest client for the billing backend.
//!
//! Attaches the stored bearer token, applies the process-wide timeout, and maps failures into
//! `DomainError`. A 401 clears the stored credential before returning `Unauthorized`; a 404 becomes
//! `NotFound`. No retries.

use crate::domain::DomainError;
use crate::domain::aggregates::MessageBody;
use crate::ports::CredentialStore;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Query for endpoints that take none.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// HTTP gateway to the backend. Implements every resource port (see sibling modules).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// # Arguments
    /// * `base_url` - API root, e.g. `http://localhost:5000/api` (trailing slash optional)
    /// * `timeout` - per-request timeout
    /// * `credentials` - source of the bearer token; cleared on 401
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kanakku/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Transport(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let res = self
            .execute(self.request(Method::GET, path).query(query), path)
            .await?;
        decode(res, path).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let res = self
            .execute(self.request(Method::POST, path).json(body), path)
            .await?;
        decode(res, path).await
    }

    pub(crate) async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let res = self
            .execute(self.request(Method::PUT, path).json(body), path)
            .await?;
        decode(res, path).await
    }

    pub(crate) async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let res = self
            .execute(self.request(Method::PATCH, path).json(body), path)
            .await?;
        decode(res, path).await
    }

    /// DELETE; the acknowledgement body is ignored.
    pub(crate) async fn delete_path(&self, path: &str) -> Result<(), DomainError> {
        self.execute(self.request(Method::DELETE, path), path)
            .await
            .map(|_| ())
    }

    /// Send with bearer auth and map the status. Success responses are returned undecoded.
    async fn execute(&self, req: RequestBuilder, path: &str) -> Result<Response, DomainError> {
        let req = match self.credentials.token().await? {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let res = req.send().await.map_err(|e| {
            warn!(path, error = %e, "request failed");
            if e.is_timeout() {
                DomainError::Transport("request timed out".to_string())
            } else {
                DomainError::Transport(e.to_string())
            }
        })?;

        let status = res.status();
        debug!(path, status = status.as_u16(), "backend responded");

        if status.is_success() {
            return Ok(res);
        }

        let text = res.text().await.unwrap_or_default();
        let message = server_message(&text);
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(path, "backend rejected credential, clearing session");
                if let Err(e) = self.credentials.clear().await {
                    warn!(error = %e, "failed to clear stored credential");
                }
                Err(DomainError::Unauthorized(message))
            }
            StatusCode::NOT_FOUND => {
                warn!(path, "backend has no such resource");
                Err(DomainError::NotFound {
                    path: path.to_string(),
                    message,
                })
            }
            _ => {
                warn!(
                    path,
                    status = status.as_u16(),
                    body = %text.chars().take(200).collect::<String>(),
                    "backend returned error"
                );
                Err(DomainError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(res: Response, path: &str) -> Result<T, DomainError> {
    let bytes = res
        .bytes()
        .await
        .map_err(|e| DomainError::Transport(format!("read body: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(path, error = %e, "response did not match the expected shape");
        DomainError::Transport(format!("decode {}: {}", path, e))
    })
}

/// Server-supplied `message` from an error body; empty when absent or not JSON.
pub(crate) fn server_message(body: &str) -> String {
    serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .unwrap_or_default()
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::MemoryCredentials;
    use serde_json::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response on a local port. The handle yields the raw request head.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).to_string()
        });
        (format!("http://{}/api", addr), handle)
    }

    fn client(base_url: &str, credentials: Arc<MemoryCredentials>) -> ApiClient {
        ApiClient::new(base_url, Duration::from_secs(5), credentials).unwrap()
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let (base, server) = serve_once("200 OK", r#"{"ok":true}"#).await;
        let creds = Arc::new(MemoryCredentials::with_token("tok"));
        let api = client(&base, creds);

        let body: Value = api.get_json("clients", NO_QUERY).await.unwrap();
        assert_eq!(body["ok"], true);

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /api/clients"));
        assert!(head.contains("authorization: bearer tok\r\n"));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token() {
        let (base, server) =
            serve_once("401 Unauthorized", r#"{"message":"Account disabled"}"#).await;
        let creds = Arc::new(MemoryCredentials::with_token("tok"));
        let api = client(&base, Arc::clone(&creds));

        let err = api
            .get_json::<Value, _>("auth/me", NO_QUERY)
            .await
            .unwrap_err();
        server.await.unwrap();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Account disabled");
        assert_eq!(creds.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let (base, server) =
            serve_once("400 Bad Request", r#"{"success":false,"message":"Client has invoices"}"#)
                .await;
        let creds = Arc::new(MemoryCredentials::with_token("tok"));
        let api = client(&base, Arc::clone(&creds));

        let err = api.delete_path("clients/c1").await.unwrap_err();
        server.await.unwrap();
        match err {
            DomainError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Client has invoices");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
        assert_eq!(creds.token().await.unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let (base, server) =
            serve_once("404 Not Found", r#"{"message":"Invoice not found"}"#).await;
        let api = client(&base, Arc::new(MemoryCredentials::default()));

        let err = api
            .get_json::<Value, _>("invoices/x1", NO_QUERY)
            .await
            .unwrap_err();
        let head = server.await.unwrap().to_lowercase();
        assert!(!head.contains("authorization:"));
        match &err {
            DomainError::NotFound { path, message } => {
                assert_eq!(path, "invoices/x1");
                assert_eq!(message, "Invoice not found");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(err.notice_or("Failed to load"), "Invoice not found");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let (base, server) = serve_once("200 OK", "<html>oops</html>").await;
        let api = client(&base, Arc::new(MemoryCredentials::with_token("tok")));

        let err = api
            .get_json::<Value, _>("dashboard", NO_QUERY)
            .await
            .unwrap_err();
        server.await.unwrap();
        match err {
            DomainError::Transport(msg) => assert!(msg.starts_with("decode dashboard:")),
            other => panic!("expected Transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:5000/api/", "/clients"),
            "http://localhost:5000/api/clients"
        );
        assert_eq!(
            join_url("http://h/api", "invoices/1/status"),
            "http://h/api/invoices/1/status"
        );
    }

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(r#"{"success":false,"message":"Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(server_message(r#"{"error":"x"}"#), "");
        assert_eq!(server_message("<html>Bad Gateway</html>"), "");
    }
}
