use serde::Deserialize;
use serde::de::Error as DeError;

/// Decimal amount returned by Beem as either a JSON number or a JSON string.
///
/// Numbers are parsed from their raw JSON token, so `42.5` decodes to exactly
/// the same `f64` as a native float literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportAmount(f64);

impl TransportAmount {
    pub fn into_f64(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        let text = match token.as_bytes().first().copied() {
            Some(b'"') => serde_json::from_str::<String>(token).map_err(D::Error::custom)?,
            Some(b'-' | b'0'..=b'9') => token.to_owned(),
            _ => {
                return Err(D::Error::custom(
                    "expected amount field to be JSON string or number",
                ));
            }
        };

        text.trim()
            .parse::<f64>()
            .map(Self)
            .map_err(|_| D::Error::custom(format!("invalid amount: {text}")))
    }
}

/// Identifier returned by Beem as either a JSON integer or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TransportId {
    Int(i64),
    String(String),
}

impl TransportId {
    pub fn into_string(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::String(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        amount: TransportAmount,
    }

    #[test]
    fn amount_accepts_number_and_string() {
        let parsed: Holder = serde_json::from_str(r#"{"amount": 42.5}"#).unwrap();
        assert_eq!(parsed.amount.into_f64(), 42.5);

        let parsed: Holder = serde_json::from_str(r#"{"amount": " 1000.0000 "}"#).unwrap();
        assert_eq!(parsed.amount.into_f64(), 1000.0);

        let parsed: Holder = serde_json::from_str(r#"{"amount": -3}"#).unwrap();
        assert_eq!(parsed.amount.into_f64(), -3.0);
    }

    #[test]
    fn amount_rejects_other_json_types() {
        assert!(serde_json::from_str::<Holder>(r#"{"amount": null}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"amount": "lots"}"#).is_err());
    }

    #[test]
    fn id_accepts_int_or_string() {
        let id: TransportId = serde_json::from_str("12345").unwrap();
        assert_eq!(id.into_string(), "12345");

        let id: TransportId = serde_json::from_str(r#""abc-1""#).unwrap();
        assert_eq!(id.into_string(), "abc-1");
    }
}
