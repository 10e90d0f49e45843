use crate::domain::value::{PinId, ResponseCode};

/// Result of `POST /v1/send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsReceipt {
    pub successful: bool,
    pub request_id: Option<String>,
    pub code: ResponseCode,
    pub message: Option<String>,
    /// Recipients Beem accepted.
    pub valid: u32,
    /// Recipients Beem rejected as malformed.
    pub invalid: u32,
    /// Recipients dropped because they appeared more than once.
    pub duplicates: u32,
}

/// Prepaid credit balance of an SMS or airtime account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub credit_balance: f64,
}

/// A sender name registered (or requested) on the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderName {
    pub id: Option<String>,
    pub sender_id: String,
    pub sample_content: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
}

/// Pagination metadata attached to list responses. Pages are not followed automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub total_items: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderNamePage {
    pub data: Vec<SenderName>,
    pub pagination: Pagination,
}

/// Result of an OTP request: the pin id needed to verify the code later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub pin_id: PinId,
    pub code: ResponseCode,
    pub message: Option<String>,
}

/// Result of an OTP verification.
///
/// Beem answers `200 OK` for both valid and invalid pins; inspect [`OtpVerification::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpVerification {
    pub code: ResponseCode,
    pub message: Option<String>,
}

impl OtpVerification {
    /// Code reported for a matching pin.
    pub const VALID_PIN: i32 = 117;

    pub fn is_valid(&self) -> bool {
        self.code.as_i32() == Self::VALID_PIN
    }
}

/// Result of `POST /v1/transfer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtimeTransfer {
    pub code: ResponseCode,
    pub transaction_id: Option<String>,
    pub message: Option<String>,
}
