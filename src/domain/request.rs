use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Msisdn, ScheduleTime, SenderId};

/// Character encoding requested for an outgoing SMS (`encoding`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// GSM 7-bit default alphabet.
    #[default]
    Gsm7,
    /// UCS-2, needed for characters outside the GSM alphabet.
    Ucs2,
}

impl Encoding {
    pub fn code(self) -> u8 {
        match self {
            Self::Gsm7 => 0,
            Self::Ucs2 => 8,
        }
    }
}

/// One message addressed to one or more recipients.
#[derive(Debug, Clone)]
pub struct SendSms {
    sender_id: SenderId,
    message: MessageText,
    recipients: Vec<Msisdn>,
    schedule: Option<ScheduleTime>,
    encoding: Encoding,
}

impl SendSms {
    /// Build a send request for immediate delivery.
    ///
    /// At least one recipient is required.
    pub fn new(
        sender_id: SenderId,
        message: MessageText,
        recipients: Vec<Msisdn>,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: Msisdn::FIELD,
            });
        }
        Ok(Self {
            sender_id,
            message,
            recipients,
            schedule: None,
            encoding: Encoding::default(),
        })
    }

    /// Deliver at the given GMT+0 time instead of now.
    pub fn schedule_at(mut self, at: ScheduleTime) -> Self {
        self.schedule = Some(at);
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn recipients(&self) -> &[Msisdn] {
        &self.recipients
    }

    pub fn schedule(&self) -> Option<ScheduleTime> {
        self.schedule
    }

    pub fn encoding_kind(&self) -> Encoding {
        self.encoding
    }
}

/// Filters for listing sender names. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderNameQuery {
    /// Free-text search over sender ids (`q`).
    pub search: Option<String>,
    /// Approval status filter (`status`), e.g. `active` or `pending`.
    pub status: Option<String>,
    /// 1-based page number (`page`).
    pub page: Option<u32>,
}
