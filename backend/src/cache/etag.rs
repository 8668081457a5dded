use serde::Serialize;

/// Weak validator over the JSON form of `data`.
///
/// 32-bit rolling hash (`h = h * 31 + unit` over UTF-16 code units), rendered
/// as a quoted hex string. Good enough for revalidation, not for integrity.
pub fn generate_etag<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(data)?;
    Ok(etag_for_text(&json))
}

pub fn etag_for_text(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32));

    format!("\"{:x}\"", hash.unsigned_abs())
}

/// Whether an `If-None-Match` header value matches `etag`
pub fn matches_if_none_match(header: &str, etag: &str) -> bool {
    header
        .split(',')
        .map(|candidate| candidate.trim())
        .map(|candidate| candidate.strip_prefix("W/").unwrap_or(candidate))
        .any(|candidate| candidate == "*" || candidate == etag)
}
