use serde::{Deserialize, Serialize};

use super::scalar::TransportId;
use crate::domain::{
    MessageText, Msisdn, Pagination, ResponseCode, SendSms, SendSmsReceipt, SenderId, SenderName,
    SenderNamePage, SenderNameQuery,
};

#[derive(Debug, Clone, Serialize)]
pub struct SendSmsBody<'a> {
    source_addr: &'a str,
    schedule_time: String,
    encoding: u8,
    message: &'a str,
    recipients: Vec<RecipientBody<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct RecipientBody<'a> {
    recipient_id: usize,
    dest_addr: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendSmsJson {
    #[serde(default)]
    successful: bool,
    #[serde(default)]
    request_id: Option<TransportId>,
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    valid: u32,
    #[serde(default)]
    invalid: u32,
    #[serde(default)]
    duplicates: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderNameBody<'a> {
    senderid: &'a str,
    sample_content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct SenderNameJson {
    #[serde(default)]
    id: Option<TransportId>,
    senderid: String,
    #[serde(default)]
    sample_content: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "created_at")]
    created: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SenderNameEnvelopeJson {
    data: SenderNameJson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SenderNamesJson {
    #[serde(default)]
    data: Vec<SenderNameJson>,
    #[serde(default)]
    pagination: PaginationJson,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationJson {
    #[serde(default)]
    total_items: u32,
    #[serde(default)]
    current_page: u32,
    #[serde(default)]
    page_size: u32,
    #[serde(default)]
    total_pages: u32,
}

/// Body for a single batched send: every recipient in one request, numbered from 1.
pub fn encode_send_sms_body(request: &SendSms) -> SendSmsBody<'_> {
    let recipients = request
        .recipients()
        .iter()
        .enumerate()
        .map(|(idx, dest)| recipient(idx, dest))
        .collect();
    body_with(request, recipients)
}

/// Body addressed to `dest` alone, keeping its batch position `index` as `recipient_id`.
pub fn encode_send_sms_single<'a>(
    request: &'a SendSms,
    index: usize,
    dest: &'a Msisdn,
) -> SendSmsBody<'a> {
    body_with(request, vec![recipient(index, dest)])
}

fn recipient(index: usize, dest: &Msisdn) -> RecipientBody<'_> {
    RecipientBody {
        recipient_id: index + 1,
        dest_addr: dest.as_str(),
    }
}

fn body_with<'a>(request: &'a SendSms, recipients: Vec<RecipientBody<'a>>) -> SendSmsBody<'a> {
    SendSmsBody {
        source_addr: request.sender_id().as_str(),
        // Beem treats an empty schedule as "send now".
        schedule_time: request
            .schedule()
            .map(|at| at.to_wire())
            .unwrap_or_default(),
        encoding: request.encoding_kind().code(),
        message: request.message().as_str(),
        recipients,
    }
}

pub fn encode_sender_name_body<'a>(
    sender_id: &'a SenderId,
    sample_content: &'a MessageText,
) -> SenderNameBody<'a> {
    SenderNameBody {
        senderid: sender_id.as_str(),
        sample_content: sample_content.as_str(),
    }
}

pub fn encode_sender_names_query(query: &SenderNameQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        params.push(("q", search.to_owned()));
    }
    if let Some(status) = query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        params.push(("status", status.to_owned()));
    }
    if let Some(page) = query.page {
        params.push(("page", page.to_string()));
    }
    params
}

impl From<SendSmsJson> for SendSmsReceipt {
    fn from(value: SendSmsJson) -> Self {
        SendSmsReceipt {
            successful: value.successful,
            request_id: value.request_id.map(TransportId::into_string),
            code: ResponseCode::new(value.code),
            message: value.message,
            valid: value.valid,
            invalid: value.invalid,
            duplicates: value.duplicates,
        }
    }
}

impl From<SenderNameJson> for SenderName {
    fn from(value: SenderNameJson) -> Self {
        SenderName {
            id: value.id.map(TransportId::into_string),
            sender_id: value.senderid,
            sample_content: value.sample_content,
            status: value.status,
            created: value.created,
        }
    }
}

impl From<SenderNameEnvelopeJson> for SenderName {
    fn from(value: SenderNameEnvelopeJson) -> Self {
        value.data.into()
    }
}

impl From<SenderNamesJson> for SenderNamePage {
    fn from(value: SenderNamesJson) -> Self {
        SenderNamePage {
            data: value.data.into_iter().map(SenderName::from).collect(),
            pagination: Pagination {
                total_items: value.pagination.total_items,
                current_page: value.pagination.current_page,
                page_size: value.pagination.page_size,
                total_pages: value.pagination.total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{Encoding, ScheduleTime};

    use super::*;

    fn request() -> SendSms {
        SendSms::new(
            SenderId::new("INFO").unwrap(),
            MessageText::new("hello").unwrap(),
            vec![
                Msisdn::new("255712345678").unwrap(),
                Msisdn::new("+255687654321").unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn encode_batched_body_numbers_recipients_from_one() {
        let req = request();
        let body = serde_json::to_value(encode_send_sms_body(&req)).unwrap();
        assert_eq!(
            body,
            json!({
                "source_addr": "INFO",
                "schedule_time": "",
                "encoding": 0,
                "message": "hello",
                "recipients": [
                    {"recipient_id": 1, "dest_addr": "255712345678"},
                    {"recipient_id": 2, "dest_addr": "255687654321"}
                ]
            })
        );
    }

    #[test]
    fn encode_single_body_keeps_batch_position() {
        let req = request()
            .schedule_at(ScheduleTime::parse("2024-05-01 09:30").unwrap())
            .encoding(Encoding::Ucs2);
        let dest = &req.recipients()[1];
        let body = serde_json::to_value(encode_send_sms_single(&req, 1, dest)).unwrap();
        assert_eq!(body["schedule_time"], "2024-05-01 09:30");
        assert_eq!(body["encoding"], 8);
        assert_eq!(
            body["recipients"],
            json!([{"recipient_id": 2, "dest_addr": "255687654321"}])
        );
    }

    #[test]
    fn sender_names_query_skips_blank_filters() {
        let query = SenderNameQuery {
            search: Some("  ".to_owned()),
            status: Some(" active ".to_owned()),
            page: Some(2),
        };
        assert_eq!(
            encode_sender_names_query(&query),
            vec![("status", "active".to_owned()), ("page", "2".to_owned())]
        );
        assert!(encode_sender_names_query(&SenderNameQuery::default()).is_empty());
    }

    #[test]
    fn decode_send_receipt() {
        let json = r#"
        {
          "successful": true,
          "request_id": 13470117,
          "code": 100,
          "message": "Message Submitted Successfully",
          "valid": 2,
          "invalid": 0,
          "duplicates": 0
        }
        "#;
        let parsed: SendSmsJson = serde_json::from_str(json).unwrap();
        let receipt = SendSmsReceipt::from(parsed);
        assert!(receipt.successful);
        assert_eq!(receipt.request_id.as_deref(), Some("13470117"));
        assert_eq!(receipt.code, ResponseCode::new(100));
        assert_eq!(receipt.valid, 2);
    }

    #[test]
    fn decode_sender_names_page_with_pagination() {
        let json = r#"
        {
          "data": [
            {
              "id": 41,
              "senderid": "INFO",
              "sample_content": "Your order has shipped",
              "status": "active",
              "created": "2023-02-11T10:00:00.000Z"
            }
          ],
          "pagination": {
            "totalItems": 26,
            "currentPage": 1,
            "pageSize": 25,
            "totalPages": 2
          }
        }
        "#;
        let parsed: SenderNamesJson = serde_json::from_str(json).unwrap();
        let page = SenderNamePage::from(parsed);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id.as_deref(), Some("41"));
        assert_eq!(page.data[0].sender_id, "INFO");
        assert_eq!(page.pagination.total_items, 26);
        assert!(page.pagination.has_next());
    }

    #[test]
    fn decode_sender_names_tolerates_missing_pagination() {
        let parsed: SenderNamesJson = serde_json::from_str(r#"{"data": []}"#).unwrap();
        let page = SenderNamePage::from(parsed);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination, Pagination::default());
    }
}
