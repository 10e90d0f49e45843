//! Transport layer: wire-format details (JSON bodies, response shapes, auth header).

mod airtime;
mod auth;
mod balance;
mod otp;
mod scalar;
mod sms;

pub use airtime::{AIRTIME_APP_NAME, TransferJson, encode_transfer_body};
pub use auth::basic_auth_header;
pub use balance::BalanceJson;
pub use otp::{OtpRequestJson, OtpVerifyJson, encode_request_otp_body, encode_verify_otp_body};
pub use sms::{
    SendSmsJson, SenderNameEnvelopeJson, SenderNamesJson, encode_send_sms_body,
    encode_send_sms_single, encode_sender_name_body, encode_sender_names_query,
};
