//! Permissive field readers for loosely-typed provider JSON.
//!
//! Every reader returns `None` (or a neutral value) instead of failing, so the
//! normalizer can fall back to its defaults field by field.

use reqwest::Url;
use serde_json::Value;

/// A non-empty, trimmed string value.
pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// A non-empty string found at `outer.inner`.
pub(crate) fn nested_str(value: Option<&Value>, inner: &str) -> Option<String> {
    non_empty_str(value.and_then(|v| v.get(inner)))
}

/// Text value that may arrive as a string or a bare number.
pub(crate) fn text_or_number(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        other => non_empty_str(other),
    }
}

/// A finite `f64` from a JSON number or numeric string.
pub(crate) fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// A non-negative count from an integer, float or numeric string.
///
/// Thousands separators (`"1,204"`) are accepted. Negative or unparseable
/// input yields `None`; values beyond `u32::MAX` saturate.
pub(crate) fn coerce_count(value: Option<&Value>) -> Option<u32> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = parsed.trunc().min(f64::from(u32::MAX)) as u32;
    Some(count)
}

/// Keeps `candidate` only if it parses as an absolute http(s) URL.
pub(crate) fn http_url(candidate: Option<String>) -> Option<String> {
    let raw = candidate?;
    let url = Url::parse(&raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(raw)
}
