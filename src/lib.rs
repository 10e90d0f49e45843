//! Typed Rust client for the Beem Africa SMS, OTP, and airtime HTTP APIs.
//!
//! The crate is split into a domain layer of validated types, a transport layer
//! that owns the JSON wire shapes, and a client layer that runs every call through
//! one request pipeline (Basic auth, JSON headers, cancellation, and logging).
//!
//! ```rust,no_run
//! use beem::{CallContext, Client, Credentials, MessageText, Msisdn, SendSms, SenderId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), beem::BeemError> {
//!     let client = Client::new(Credentials::new("api-key", "secret-key")?)?;
//!     let request = SendSms::new(
//!         SenderId::new("INFO")?,
//!         MessageText::new("hello")?,
//!         vec![Msisdn::new("255712345678")?],
//!     )?;
//!     let receipt = client.send_sms(&CallContext::new(), &request).await?;
//!     println!("accepted: {}", receipt.successful);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BeemError, BoxFuture, CallContext, Client, ClientBuilder, Credentials, HttpRequest,
    HttpResponse, HttpTransport, Logger, NoopLogger, ReqwestTransport, ResponseTarget,
    TracingLogger, TransportFailure,
};
pub use domain::{
    AirtimeAmount, AirtimeTransfer, ApiKey, ApiSecret, AppId, Balance, Encoding,
    KnownResponseCode, MessageText, Msisdn, OtpChallenge, OtpVerification, Pagination,
    PhoneNumber, Pin, PinId, ReferenceId, ResponseCode, ScheduleTime, SendSms, SendSmsReceipt,
    SenderId, SenderName, SenderNamePage, SenderNameQuery, ValidationError,
};
