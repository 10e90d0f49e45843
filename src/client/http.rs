use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Method;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type transports report; surfaced as [`crate::BeemError::Transport`].
pub type TransportFailure = Box<dyn StdError + Send + Sync>;

/// A fully-built outbound request.
///
/// `Debug` masks the `Authorization` value.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (*name, "***")
                } else {
                    (*name, value.as_str())
                }
            })
            .collect::<Vec<_>>();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body.as_ref().map(|body| body.len()))
            .finish()
    }
}

/// Status and fully-read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes one HTTP request. Implementations must be safe to share between tasks
/// and must read (and release) the whole response body before returning.
pub trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>>;
}

/// Pool limits applied to the default [`ReqwestTransport`].
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const TCP_KEEPALIVE: Duration = Duration::from_secs(15);
pub(crate) const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
pub(crate) const POOL_MAX_IDLE_PER_HOST: usize = 100;

/// [`HttpTransport`] over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing client; its pool and timeouts are used as-is.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the crate's default pool limits.
    pub fn pooled(
        timeout: Option<Duration>,
        user_agent: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_keepalive(TCP_KEEPALIVE)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportFailure>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, &request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = HttpRequest {
            method: Method::GET,
            url: "https://example.invalid".to_owned(),
            headers: vec![("Accept", "application/json".to_owned())],
            body: None,
        };
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn debug_output_masks_authorization() {
        let request = HttpRequest {
            method: Method::POST,
            url: "https://example.invalid/v1/send".to_owned(),
            headers: vec![
                ("Content-Type", "application/json".to_owned()),
                (
                    "Authorization",
                    "Basic dGVzdF9rZXk6dGVzdF9zZWNyZXQ=".to_owned(),
                ),
            ],
            body: Some(b"{}".to_vec()),
        };
        let printed = format!("{request:?}");
        assert!(!printed.contains("dGVzdF9rZXk6dGVzdF9zZWNyZXQ="));
        assert!(printed.contains(r#"("Authorization", "***")"#));
        assert!(printed.contains("application/json"));
    }

    #[test]
    fn pooled_transport_builds() {
        assert!(ReqwestTransport::pooled(Some(Duration::from_secs(30)), None).is_ok());
    }
}
