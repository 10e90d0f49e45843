//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{Encoding, SendSms, SenderNameQuery};
pub use response::{
    AirtimeTransfer, Balance, OtpChallenge, OtpVerification, Pagination, SendSmsReceipt,
    SenderName, SenderNamePage,
};
pub use validation::ValidationError;
pub use value::{
    AirtimeAmount, ApiKey, ApiSecret, AppId, KnownResponseCode, MessageText, Msisdn, PhoneNumber,
    Pin, PinId, ReferenceId, ResponseCode, ScheduleTime, SenderId,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> SenderId {
        SenderId::new("INFO").unwrap()
    }

    fn text() -> MessageText {
        MessageText::new("hello").unwrap()
    }

    #[test]
    fn send_sms_requires_recipients() {
        let err = SendSms::new(sender(), text(), Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: Msisdn::FIELD
            }
        ));
    }

    #[test]
    fn send_sms_defaults_to_gsm7_and_immediate_delivery() {
        let recipient = Msisdn::new("255712345678").unwrap();
        let request = SendSms::new(sender(), text(), vec![recipient.clone()]).unwrap();
        assert_eq!(request.encoding_kind(), Encoding::Gsm7);
        assert_eq!(request.encoding_kind().code(), 0);
        assert_eq!(request.schedule(), None);
        assert_eq!(request.recipients(), &[recipient]);
    }

    #[test]
    fn send_sms_builder_methods_apply() {
        let at = ScheduleTime::parse("2024-05-01 09:30").unwrap();
        let request = SendSms::new(
            sender(),
            text(),
            vec![Msisdn::new("255712345678").unwrap()],
        )
        .unwrap()
        .schedule_at(at)
        .encoding(Encoding::Ucs2);

        assert_eq!(request.schedule(), Some(at));
        assert_eq!(request.encoding_kind().code(), 8);
    }

    #[test]
    fn otp_verification_validity_follows_code() {
        let valid = OtpVerification {
            code: ResponseCode::new(117),
            message: Some("Valid Pin".to_owned()),
        };
        assert!(valid.is_valid());

        let wrong = OtpVerification {
            code: ResponseCode::new(114),
            message: Some("Incorrect Pin".to_owned()),
        };
        assert!(!wrong.is_valid());
    }

    #[test]
    fn pagination_reports_remaining_pages() {
        let page = Pagination {
            total_items: 30,
            current_page: 1,
            page_size: 25,
            total_pages: 2,
        };
        assert!(page.has_next());
        assert!(!Pagination::default().has_next());
    }
}
