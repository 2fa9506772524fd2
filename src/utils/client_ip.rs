use axum::http::HeaderMap;

pub const UNKNOWN_IP: &str = "unknown";

/// Caller address as reported by the fronting proxy.
///
/// Uses the first entry of `X-Forwarded-For`, then `X-Real-IP`, then
/// [`UNKNOWN_IP`]. The headers are client-controlled when no proxy rewrites
/// them, so the value is informational only.
pub fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}
