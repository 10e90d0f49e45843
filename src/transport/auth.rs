use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

/// Build the `Authorization` header value for a key/secret pair.
///
/// Both parts are trimmed before being joined as `key:secret` and base64-encoded.
pub fn basic_auth_header(api_key: &str, api_secret: &str) -> String {
    let credentials = format!("{}:{}", api_key.trim(), api_secret.trim());
    format!("Basic {}", BASE64_STANDARD.encode(credentials.as_bytes()))
}
