use serde::Deserialize;

use super::scalar::TransportAmount;
use crate::domain::Balance;

/// Balance envelope shared by the SMS vendor balance and the airtime credit balance.
///
/// The SMS service reports `credit_balance`, the top-up service `credit_bal`.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceJson {
    data: BalanceData,
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceData {
    #[serde(alias = "credit_bal")]
    credit_balance: TransportAmount,
}

impl From<BalanceJson> for Balance {
    fn from(value: BalanceJson) -> Self {
        Balance {
            credit_balance: value.data.credit_balance.into_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sms_balance_exactly() {
        let parsed: BalanceJson =
            serde_json::from_str(r#"{"data":{"credit_balance": 42.5}}"#).unwrap();
        let balance = Balance::from(parsed);
        assert_eq!(balance.credit_balance, 42.5);
    }

    #[test]
    fn decodes_topup_balance_from_string() {
        let parsed: BalanceJson =
            serde_json::from_str(r#"{"data":{"credit_bal":"5000.0000"}}"#).unwrap();
        assert_eq!(Balance::from(parsed).credit_balance, 5000.0);
    }

    #[test]
    fn missing_balance_is_an_error() {
        assert!(serde_json::from_str::<BalanceJson>(r#"{"data":{}}"#).is_err());
    }
}
