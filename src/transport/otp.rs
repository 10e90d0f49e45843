use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{AppId, Msisdn, OtpChallenge, OtpVerification, Pin, PinId, ResponseCode};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpBody<'a> {
    app_id: u32,
    msisdn: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpBody<'a> {
    pin_id: &'a str,
    pin: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpRequestJson {
    data: OtpRequestData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OtpRequestData {
    #[serde(deserialize_with = "deserialize_pin_id")]
    pin_id: PinId,
    #[serde(default)]
    message: OtpMessageJson,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerifyJson {
    data: OtpVerifyData,
}

#[derive(Debug, Clone, Deserialize)]
struct OtpVerifyData {
    #[serde(default)]
    message: OtpMessageJson,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OtpMessageJson {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: Option<String>,
}

fn deserialize_pin_id<'de, D>(deserializer: D) -> Result<PinId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    PinId::new(raw).map_err(D::Error::custom)
}

pub fn encode_request_otp_body(app_id: AppId, msisdn: &Msisdn) -> RequestOtpBody<'_> {
    RequestOtpBody {
        app_id: app_id.value(),
        msisdn: msisdn.as_str(),
    }
}

pub fn encode_verify_otp_body<'a>(pin_id: &'a PinId, pin: &'a Pin) -> VerifyOtpBody<'a> {
    VerifyOtpBody {
        pin_id: pin_id.as_str(),
        pin: pin.as_str(),
    }
}

impl From<OtpRequestJson> for OtpChallenge {
    fn from(value: OtpRequestJson) -> Self {
        OtpChallenge {
            pin_id: value.data.pin_id,
            code: ResponseCode::new(value.data.message.code),
            message: value.data.message.message,
        }
    }
}

impl From<OtpVerifyJson> for OtpVerification {
    fn from(value: OtpVerifyJson) -> Self {
        OtpVerification {
            code: ResponseCode::new(value.data.message.code),
            message: value.data.message.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_bodies_use_camel_case_keys() {
        let msisdn = Msisdn::new("255712345678").unwrap();
        let body = encode_request_otp_body(AppId::new(7).unwrap(), &msisdn);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"appId": 7, "msisdn": "255712345678"})
        );

        let pin_id = PinId::new("pin-1").unwrap();
        let pin = Pin::new("123456").unwrap();
        assert_eq!(
            serde_json::to_value(encode_verify_otp_body(&pin_id, &pin)).unwrap(),
            json!({"pinId": "pin-1", "pin": "123456"})
        );
    }

    #[test]
    fn decode_request_response_extracts_pin_id() {
        let json = r#"
        {
          "data": {
            "pinId": "3c2e9a1f-7b4d",
            "message": {"code": 100, "message": "SMS sent successfully"}
          }
        }
        "#;
        let parsed: OtpRequestJson = serde_json::from_str(json).unwrap();
        let challenge = OtpChallenge::from(parsed);
        assert_eq!(challenge.pin_id.as_str(), "3c2e9a1f-7b4d");
        assert_eq!(challenge.code, ResponseCode::new(100));
        assert_eq!(challenge.message.as_deref(), Some("SMS sent successfully"));
    }

    #[test]
    fn decode_request_rejects_blank_pin_id() {
        let json = r#"{"data": {"pinId": "  "}}"#;
        assert!(serde_json::from_str::<OtpRequestJson>(json).is_err());
    }

    #[test]
    fn decode_verify_response() {
        let json = r#"{"data": {"message": {"code": 117, "message": "Valid Pin"}}}"#;
        let parsed: OtpVerifyJson = serde_json::from_str(json).unwrap();
        let verification = OtpVerification::from(parsed);
        assert!(verification.is_valid());
        assert_eq!(verification.message.as_deref(), Some("Valid Pin"));
    }
}
