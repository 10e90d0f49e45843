use chrono::{DateTime, NaiveDateTime, Utc};
use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Beem account API key.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Beem account secret key.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct ApiSecret(String);

impl ApiSecret {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "secret_key";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated secret.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in the form Beem expects (`dest_addr`, `msisdn`).
///
/// International format, digits only, no leading `+` (e.g. `255712345678`).
/// A leading `+` in the input is stripped. No further normalization is done;
/// parse into [`PhoneNumber`] and convert if you need it.
pub struct Msisdn(String);

impl Msisdn {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "dest_addr";

    /// Shortest accepted number (country code plus subscriber number).
    pub const MIN_DIGITS: usize = 7;
    /// Longest number allowed by E.164.
    pub const MAX_DIGITS: usize = 15;

    /// Create a validated [`Msisdn`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let valid = digits.bytes().all(|b| b.is_ascii_digit())
            && (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len());
        if !valid {
            return Err(ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Digits as sent to Beem.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Msisdn {
    /// Convert an already-parsed phone number to Beem's digits-only form.
    fn from(value: PhoneNumber) -> Self {
        let digits = value.0.trim_start_matches('+').to_owned();
        Self(digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Phone number normalized to E.164 (`+255712345678`) by the `phonenumber` crate.
///
/// Accepts national formats when a default region is given; convert into
/// [`Msisdn`] to send it.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "phone_number";

    pub fn parse(
        default_region: Option<country::Id>,
        input: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let raw = input.as_ref().trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;
        Ok(Self(
            phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
        ))
    }

    pub fn e164(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by Beem (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name shown on the handset (`source_addr`, `senderid`).
///
/// Invariant: non-empty after trimming and at most [`SenderId::MAX_LEN`] characters.
/// The value must be approved on your Beem account before it can be used for sending.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used by the sender-names endpoint (`senderid`).
    pub const FIELD: &'static str = "senderid";

    /// Alphanumeric sender ids are limited to 11 characters by the GSM network.
    pub const MAX_LEN: usize = 11;

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Scheduled delivery time (`schedule_time`), in GMT+0.
///
/// Beem accepts minute precision; seconds are dropped when formatting.
pub struct ScheduleTime(NaiveDateTime);

impl ScheduleTime {
    /// JSON field name used by Beem (`schedule_time`).
    pub const FIELD: &'static str = "schedule_time";

    /// Wire format expected by Beem.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M";

    /// Wrap a naive date-time that is already expressed in GMT+0.
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Parse a `yyyy-mm-dd hh:mm` string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        NaiveDateTime::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidScheduleTime {
                input: trimmed.to_owned(),
            })
    }

    /// Underlying date-time.
    pub fn value(self) -> NaiveDateTime {
        self.0
    }

    /// Format as sent to Beem.
    pub fn to_wire(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl From<DateTime<Utc>> for ScheduleTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.naive_utc())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// OTP application id (`appId`) from the Beem dashboard.
///
/// Invariant: non-zero.
pub struct AppId(u32);

impl AppId {
    /// JSON field name used by Beem (`appId`).
    pub const FIELD: &'static str = "appId";

    /// Create a validated [`AppId`].
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: 1,
                actual: 0,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Opaque OTP challenge id (`pinId`) returned by the OTP request call.
///
/// Invariant: non-empty after trimming.
pub struct PinId(String);

impl PinId {
    /// JSON field name used by Beem (`pinId`).
    pub const FIELD: &'static str = "pinId";

    /// Create a validated [`PinId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated pin id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One-time code entered by the user (`pin`).
///
/// Invariant: non-empty and digits only, after trimming.
pub struct Pin(String);

impl Pin {
    /// JSON field name used by Beem (`pin`).
    pub const FIELD: &'static str = "pin";

    /// Create a validated [`Pin`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotNumeric {
                field: Self::FIELD,
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated pin.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Airtime amount to transfer (`amount`), in the destination's currency units.
///
/// Invariant: at least 1.
pub struct AirtimeAmount(u32);

impl AirtimeAmount {
    /// JSON field name used by Beem (`amount`).
    pub const FIELD: &'static str = "amount";

    /// Create a validated [`AirtimeAmount`].
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: 1,
                actual: 0,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Caller-chosen reference for an airtime transfer (`reference_id`).
pub struct ReferenceId(u64);

impl ReferenceId {
    /// JSON field name used by Beem (`reference_id`).
    pub const FIELD: &'static str = "reference_id";

    /// Create a reference id (no validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Application-level `code` reported inside successful Beem responses.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ResponseCode(i32);

impl ResponseCode {
    /// Construct a response code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Beem.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(self) -> Option<KnownResponseCode> {
        KnownResponseCode::from_code(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Response codes this crate knows how to name.
///
/// Unknown codes are preserved as [`ResponseCode`] and return `None` from
/// [`KnownResponseCode::from_code`].
pub enum KnownResponseCode {
    /// Request accepted (SMS submitted, OTP sent, disbursement in progress).
    Accepted,
    IncorrectPin,
    PinTimeout,
    AttemptsExceeded,
    ValidPin,
}

impl KnownResponseCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            100 => Self::Accepted,
            114 => Self::IncorrectPin,
            115 => Self::PinTimeout,
            116 => Self::AttemptsExceeded,
            117 => Self::ValidPin,
            _ => return None,
        })
    }
}
