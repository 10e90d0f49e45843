//! Client layer: the shared request pipeline and one method per Beem endpoint.

mod context;
mod http;
mod logger;
mod target;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub use context::CallContext;
pub use http::{
    BoxFuture, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportFailure,
};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use target::ResponseTarget;

use crate::domain::{
    AirtimeAmount, AirtimeTransfer, ApiKey, ApiSecret, AppId, Balance, MessageText, Msisdn,
    OtpChallenge, OtpVerification, Pin, PinId, ReferenceId, SendSms, SendSmsReceipt, SenderId,
    SenderName, SenderNamePage, SenderNameQuery, ValidationError,
};
use crate::transport::{
    self, BalanceJson, OtpRequestJson, OtpVerifyJson, SendSmsJson, SenderNameEnvelopeJson,
    SenderNamesJson, TransferJson,
};
use logger::FnLogger;

const DEFAULT_SMS_BASE_URL: &str = "https://apisms.beem.africa";
const DEFAULT_OTP_BASE_URL: &str = "https://apiotp.beem.africa";
const DEFAULT_AIRTIME_BASE_URL: &str = "https://apiairtime.beem.africa";
const DEFAULT_TOPUP_BASE_URL: &str = "https://apitopup.beem.africa";

const API_VERSION: &str = "v1";

#[derive(Debug, Clone)]
/// Beem API key and secret.
///
/// Both parts are trimmed and must be non-empty, so a [`Client`] can never be
/// built with credentials that would send unauthenticated requests.
pub struct Credentials {
    api_key: ApiKey,
    api_secret: ApiSecret,
}

impl Credentials {
    /// Environment variable read by [`Credentials::from_env`] for the key.
    pub const API_KEY_ENV: &'static str = "BEEM_API_KEY";
    /// Environment variable read by [`Credentials::from_env`] for the secret.
    pub const API_SECRET_ENV: &'static str = "BEEM_API_SECRET";

    /// Validate and store a key/secret pair.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            api_secret: ApiSecret::new(api_secret)?,
        })
    }

    /// Read `BEEM_API_KEY` and `BEEM_API_SECRET`.
    pub fn from_env() -> Result<Self, ValidationError> {
        let api_key = std::env::var(Self::API_KEY_ENV).map_err(|_| ValidationError::MissingEnv {
            var: Self::API_KEY_ENV,
        })?;
        let api_secret =
            std::env::var(Self::API_SECRET_ENV).map_err(|_| ValidationError::MissingEnv {
                var: Self::API_SECRET_ENV,
            })?;
        Self::new(api_key, api_secret)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    fn authorization(&self) -> String {
        transport::basic_auth_header(self.api_key.as_str(), self.api_secret.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Client`].
///
/// Every call yields at most one of these; nothing is retried internally.
pub enum BeemError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A base URL override could not be used.
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request body could not be serialized; nothing was sent.
    #[error("request encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// HTTP client / transport failure (DNS, TLS, connect, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] TransportFailure),

    /// The call context's cancellation token fired before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The call context's deadline passed before a response arrived.
    #[error("request deadline exceeded")]
    TimedOut,

    /// Status other than `200`/`204`; `body` holds the exact response bytes.
    #[error("API error: HTTP {status}: {}", String::from_utf8_lossy(.body))]
    Api { status: u16, body: Vec<u8> },

    /// The response body did not match the expected shape.
    #[error("decoding error: {source}; response: {payload}")]
    Decode {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered `204 No Content` where a body was required.
    #[error("empty response: expected a body, got 204 No Content")]
    EmptyResponse,

    /// Sequential send stopped at `failed_index`; earlier receipts are kept in `delivered`.
    #[error(
        "send to recipient #{failed_index} ({recipient}) failed after {} delivered: {source}",
        .delivered.len()
    )]
    PartialSend {
        failed_index: usize,
        recipient: String,
        delivered: Vec<SendSmsReceipt>,
        #[source]
        source: Box<BeemError>,
    },
}

impl BeemError {
    /// HTTP status of an [`BeemError::Api`] failure, looking through [`BeemError::PartialSend`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::PartialSend { source, .. } => source.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct BaseUrls {
    sms: Url,
    otp: Url,
    airtime: Url,
    topup: Url,
}

#[derive(Clone)]
/// Builder for [`Client`].
///
/// Use this when you need to customize base URLs, the transport, timeouts, or logging.
pub struct ClientBuilder {
    credentials: Credentials,
    sms_base_url: String,
    otp_base_url: String,
    airtime_base_url: String,
    topup_base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("credentials", &self.credentials)
            .field("sms_base_url", &self.sms_base_url)
            .field("otp_base_url", &self.otp_base_url)
            .field("airtime_base_url", &self.airtime_base_url)
            .field("topup_base_url", &self.topup_base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a builder with the production base URLs, the default pooled
    /// transport, and [`TracingLogger`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sms_base_url: DEFAULT_SMS_BASE_URL.to_owned(),
            otp_base_url: DEFAULT_OTP_BASE_URL.to_owned(),
            airtime_base_url: DEFAULT_AIRTIME_BASE_URL.to_owned(),
            topup_base_url: DEFAULT_TOPUP_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Override the SMS service base URL (send, balance, sender names).
    pub fn sms_base_url(mut self, url: impl Into<String>) -> Self {
        self.sms_base_url = url.into();
        self
    }

    /// Override the OTP service base URL.
    pub fn otp_base_url(mut self, url: impl Into<String>) -> Self {
        self.otp_base_url = url.into();
        self
    }

    /// Override the airtime transfer base URL.
    pub fn airtime_base_url(mut self, url: impl Into<String>) -> Self {
        self.airtime_base_url = url.into();
        self
    }

    /// Override the top-up (airtime balance) base URL.
    pub fn topup_base_url(mut self, url: impl Into<String>) -> Self {
        self.topup_base_url = url.into();
        self
    }

    /// Set an HTTP client timeout applied to each entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the default pooled transport.
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a caller-built `reqwest::Client` (and its pool) as the transport.
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(ReqwestTransport::new(client))
    }

    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Log through a closure receiving the call context, a message, and key/value fields.
    pub fn log_fn<F>(self, log: F) -> Self
    where
        F: Fn(&CallContext, &str, &[(&'static str, String)]) + Send + Sync + 'static,
    {
        self.logger(FnLogger(log))
    }

    /// Build a [`Client`].
    pub fn build(self) -> Result<Client, BeemError> {
        let base = BaseUrls {
            sms: parse_base_url(&self.sms_base_url)?,
            otp: parse_base_url(&self.otp_base_url)?,
            airtime: parse_base_url(&self.airtime_base_url)?,
            topup: parse_base_url(&self.topup_base_url)?,
        };

        let http = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::pooled(self.timeout, self.user_agent)
                    .map_err(|err| BeemError::Transport(Box::new(err)))?,
            ),
        };

        Ok(Client {
            authorization: self.credentials.authorization(),
            base,
            http,
            logger: self.logger,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BeemError> {
    let url = Url::parse(raw.trim()).map_err(|err| BeemError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(BeemError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "URL cannot be a base".to_owned(),
        });
    }
    Ok(url)
}

fn endpoint(base: &Url, segments: &[&str], query: &[(&str, String)]) -> Result<Url, BeemError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| BeemError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level Beem client.
///
/// Every endpoint method funnels through [`Client::execute`], which issues exactly
/// one HTTP request with Basic auth and JSON headers. Cloning is cheap; clones
/// share the transport's connection pool.
pub struct Client {
    authorization: String,
    base: BaseUrls,
    http: Arc<dyn HttpTransport>,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with the production base URLs and the default pooled transport.
    ///
    /// For more customization, use [`Client::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, BeemError> {
        Self::builder(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Send one authenticated JSON request and fill `target` from the response.
    ///
    /// - `body`, when present, is serialized to JSON before anything is sent.
    /// - `200 OK` fills `target`; `204 No Content` leaves it untouched.
    /// - Any other status is returned as [`BeemError::Api`] with the raw body.
    ///
    /// The call is abandoned with [`BeemError::Cancelled`] or [`BeemError::TimedOut`]
    /// when `ctx` fires first.
    pub async fn execute<B, T>(
        &self,
        ctx: &CallContext,
        method: Method,
        url: &str,
        body: Option<&B>,
        target: &mut T,
    ) -> Result<(), BeemError>
    where
        B: Serialize + ?Sized,
        T: ResponseTarget + ?Sized,
    {
        self.logger.log(
            ctx,
            "request started",
            &[("method", method.to_string()), ("endpoint", url.to_owned())],
        );

        let outcome = self.round_trip(ctx, method, url, body).await;

        // 0 when no response was received.
        let status = outcome.as_ref().map_or(0, |response| response.status);
        self.logger
            .log(ctx, "request completed", &[("status", status.to_string())]);

        let response = outcome?;
        match response.status {
            204 => Ok(()),
            200 => target
                .fill(&response.body)
                .map_err(|source| BeemError::Decode {
                    payload: String::from_utf8_lossy(&response.body).into_owned(),
                    source,
                }),
            status => Err(BeemError::Api {
                status,
                body: response.body,
            }),
        }
    }

    async fn round_trip<B>(
        &self,
        ctx: &CallContext,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpResponse, BeemError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(BeemError::Encode)?;

        let request = HttpRequest {
            method,
            url: url.to_owned(),
            headers: vec![
                ("Cache-Control", "no-cache".to_owned()),
                ("Content-Type", "application/json".to_owned()),
                ("Accept", "application/json".to_owned()),
                ("Authorization", self.authorization.clone()),
            ],
            body,
        };

        ctx.guard(self.http.send(request))
            .await?
            .map_err(BeemError::Transport)
    }

    async fn call<B, W>(
        &self,
        ctx: &CallContext,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> Result<W, BeemError>
    where
        B: Serialize + ?Sized,
        W: DeserializeOwned,
    {
        let mut target: Option<W> = None;
        self.execute(ctx, method, url.as_str(), body, &mut target)
            .await?;
        target.ok_or(BeemError::EmptyResponse)
    }

    /// Send one message to all recipients in a single request.
    pub async fn send_sms(
        &self,
        ctx: &CallContext,
        request: &SendSms,
    ) -> Result<SendSmsReceipt, BeemError> {
        let url = endpoint(&self.base.sms, &[API_VERSION, "send"], &[])?;
        let body = transport::encode_send_sms_body(request);
        let parsed: SendSmsJson = self.call(ctx, Method::POST, &url, Some(&body)).await?;
        Ok(parsed.into())
    }

    /// Send the message with one request per recipient, strictly one after another.
    ///
    /// Dispatch stops at the first failure: later recipients are never contacted and
    /// the error is [`BeemError::PartialSend`], which carries the receipts of the
    /// recipients already served and the failing call's error as its source.
    pub async fn send_sms_each(
        &self,
        ctx: &CallContext,
        request: &SendSms,
    ) -> Result<Vec<SendSmsReceipt>, BeemError> {
        let url = endpoint(&self.base.sms, &[API_VERSION, "send"], &[])?;
        let mut delivered = Vec::with_capacity(request.recipients().len());

        for (index, dest) in request.recipients().iter().enumerate() {
            let body = transport::encode_send_sms_single(request, index, dest);
            match self
                .call::<_, SendSmsJson>(ctx, Method::POST, &url, Some(&body))
                .await
            {
                Ok(parsed) => delivered.push(parsed.into()),
                Err(source) => {
                    return Err(BeemError::PartialSend {
                        failed_index: index,
                        recipient: dest.as_str().to_owned(),
                        delivered,
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(delivered)
    }

    /// Remaining SMS credit.
    pub async fn sms_balance(&self, ctx: &CallContext) -> Result<Balance, BeemError> {
        let url = endpoint(
            &self.base.sms,
            &["public", API_VERSION, "vendors", "balance"],
            &[],
        )?;
        let parsed: BalanceJson = self.call(ctx, Method::GET, &url, None::<&()>).await?;
        Ok(parsed.into())
    }

    /// Ask Beem to approve a new sender name. Approval is reported out of band.
    pub async fn request_sender_name(
        &self,
        ctx: &CallContext,
        sender_id: &SenderId,
        sample_content: &MessageText,
    ) -> Result<SenderName, BeemError> {
        let url = endpoint(&self.base.sms, &["public", API_VERSION, "sender-names"], &[])?;
        let body = transport::encode_sender_name_body(sender_id, sample_content);
        let parsed: SenderNameEnvelopeJson =
            self.call(ctx, Method::POST, &url, Some(&body)).await?;
        Ok(parsed.into())
    }

    /// One page of sender names; follow [`crate::Pagination`] yourself for more.
    pub async fn sender_names(
        &self,
        ctx: &CallContext,
        query: &SenderNameQuery,
    ) -> Result<SenderNamePage, BeemError> {
        let url = endpoint(
            &self.base.sms,
            &["public", API_VERSION, "sender-names"],
            &transport::encode_sender_names_query(query),
        )?;
        let parsed: SenderNamesJson = self.call(ctx, Method::GET, &url, None::<&()>).await?;
        Ok(parsed.into())
    }

    /// Generate a one-time pin and text it to `msisdn`.
    pub async fn request_otp(
        &self,
        ctx: &CallContext,
        app_id: AppId,
        msisdn: &Msisdn,
    ) -> Result<OtpChallenge, BeemError> {
        let url = endpoint(&self.base.otp, &[API_VERSION, "request"], &[])?;
        let body = transport::encode_request_otp_body(app_id, msisdn);
        let parsed: OtpRequestJson = self.call(ctx, Method::POST, &url, Some(&body)).await?;
        Ok(parsed.into())
    }

    /// Check `pin` against the challenge identified by `pin_id`.
    ///
    /// A wrong pin is not an error; see [`OtpVerification::is_valid`].
    pub async fn verify_otp(
        &self,
        ctx: &CallContext,
        pin_id: &PinId,
        pin: &Pin,
    ) -> Result<OtpVerification, BeemError> {
        let url = endpoint(&self.base.otp, &[API_VERSION, "verify"], &[])?;
        let body = transport::encode_verify_otp_body(pin_id, pin);
        let parsed: OtpVerifyJson = self.call(ctx, Method::POST, &url, Some(&body)).await?;
        Ok(parsed.into())
    }

    /// Transfer airtime from the account to `dest`.
    pub async fn transfer_airtime(
        &self,
        ctx: &CallContext,
        dest: &Msisdn,
        amount: AirtimeAmount,
        reference: ReferenceId,
    ) -> Result<AirtimeTransfer, BeemError> {
        let url = endpoint(&self.base.airtime, &[API_VERSION, "transfer"], &[])?;
        let body = transport::encode_transfer_body(dest, amount, reference);
        let parsed: TransferJson = self.call(ctx, Method::POST, &url, Some(&body)).await?;
        Ok(parsed.into())
    }

    /// Remaining airtime credit.
    pub async fn airtime_balance(&self, ctx: &CallContext) -> Result<Balance, BeemError> {
        let url = endpoint(
            &self.base.topup,
            &[API_VERSION, "credit-balance"],
            &[("app_name", transport::AIRTIME_APP_NAME.to_owned())],
        )?;
        let parsed: BalanceJson = self.call(ctx, Method::GET, &url, None::<&()>).await?;
        Ok(parsed.into())
    }
}
