use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks.
/// Use this for comparing API keys and other shared secrets.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Shared-secret check for the translate endpoint.
///
/// No configured secret means the API is public and every request passes.
/// With a secret configured, the caller must present a matching key; a
/// missing key is treated the same as a wrong one.
pub fn api_key_authorized(expected: Option<&str>, provided: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => provided.is_some_and(|key| constant_time_compare(expected, key)),
    }
}
