use serde::{Deserialize, Serialize};

use super::scalar::TransportId;
use crate::domain::{AirtimeAmount, AirtimeTransfer, Msisdn, ReferenceId, ResponseCode};

/// `app_name` query value selecting the airtime wallet on the top-up service.
pub const AIRTIME_APP_NAME: &str = "AIRTIME";

#[derive(Debug, Clone, Serialize)]
pub struct TransferBody<'a> {
    dest_addr: &'a str,
    amount: u32,
    reference_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferJson {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    transaction_id: Option<TransportId>,
    #[serde(default)]
    message: Option<String>,
}

pub fn encode_transfer_body(
    dest: &Msisdn,
    amount: AirtimeAmount,
    reference: ReferenceId,
) -> TransferBody<'_> {
    TransferBody {
        dest_addr: dest.as_str(),
        amount: amount.value(),
        reference_id: reference.value(),
    }
}

impl From<TransferJson> for AirtimeTransfer {
    fn from(value: TransferJson) -> Self {
        AirtimeTransfer {
            code: ResponseCode::new(value.code),
            transaction_id: value.transaction_id.map(TransportId::into_string),
            message: value.message,
        }
    }
}
