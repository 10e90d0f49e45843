use serde::de::DeserializeOwned;

/// Destination the pipeline fills from a `200 OK` body.
///
/// A `204 No Content` never reaches [`ResponseTarget::fill`], so the target keeps
/// whatever it held before the call.
pub trait ResponseTarget {
    fn fill(&mut self, payload: &[u8]) -> Result<(), serde_json::Error>;
}

/// Raw passthrough: the body is stored as text without JSON decoding.
///
/// The conversion is lossy: invalid UTF-8 becomes `U+FFFD`. Use `Vec<u8>` to keep
/// the exact bytes.
impl ResponseTarget for String {
    fn fill(&mut self, payload: &[u8]) -> Result<(), serde_json::Error> {
        *self = String::from_utf8_lossy(payload).into_owned();
        Ok(())
    }
}

/// Raw passthrough of the exact bytes.
impl ResponseTarget for Vec<u8> {
    fn fill(&mut self, payload: &[u8]) -> Result<(), serde_json::Error> {
        payload.clone_into(self);
        Ok(())
    }
}

/// JSON-decoded value; `None` until a body has been decoded.
impl<T> ResponseTarget for Option<T>
where
    T: DeserializeOwned,
{
    fn fill(&mut self, payload: &[u8]) -> Result<(), serde_json::Error> {
        *self = Some(serde_json::from_slice(payload)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        ok: bool,
    }

    #[test]
    fn string_target_keeps_body_verbatim() {
        let mut target = String::from("previous");
        target.fill(b"not { json").unwrap();
        assert_eq!(target, "not { json");
    }

    #[test]
    fn string_target_replaces_invalid_utf8() {
        let mut target = String::new();
        target.fill(b"\xffabc").unwrap();
        assert_eq!(target, "\u{FFFD}abc");

        let mut exact: Vec<u8> = Vec::new();
        exact.fill(b"\xffabc").unwrap();
        assert_eq!(exact, b"\xffabc");
    }

    #[test]
    fn bytes_target_copies_payload() {
        let mut target = vec![1, 2, 3];
        target.fill(&[0xff, 0x00]).unwrap();
        assert_eq!(target, vec![0xff, 0x00]);
    }

    #[test]
    fn option_target_decodes_json() {
        let mut target: Option<Probe> = None;
        target.fill(br#"{"ok": true}"#).unwrap();
        assert_eq!(target, Some(Probe { ok: true }));
    }

    #[test]
    fn option_target_reports_decode_failure_and_keeps_prior_value() {
        let mut target = Some(Probe { ok: false });
        assert!(target.fill(b"<html>").is_err());
        assert_eq!(target, Some(Probe { ok: false }));
    }
}
