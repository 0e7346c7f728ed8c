//! Masking of personal data and secrets before anything reaches the log.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::HeaderMap;

const MASK: &str = "***";

/// Headers whose values are never logged verbatim.
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "x-guid",
    "guid",
    "vin",
    "cookie",
    "set-cookie",
    "x-api-key",
];

/// JSON keys whose values are masked in bodies.
const SENSITIVE_KEYS: &str = "access_token|refresh_token|id_token|tokenId|password|code|vin|guid|uuid|\
email|emailAddress|phone|phoneNumber|mobile|nickName|registrationNumber|imei|contractId|\
latitude|longitude|lat|lon|startLat|startLon|endLat|endLon";

struct Patterns {
    json_field: Regex,
    bearer: Regex,
    cookie: Regex,
    email: Regex,
    uuid: Regex,
    vin: Regex,
    phone: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        json_field: Regex::new(&format!(
            r#""({SENSITIVE_KEYS})"\s*:\s*("(?:[^"\\]|\\.)*"|-?[0-9][0-9.eE+-]*)"#
        ))
        .expect("valid json field pattern"),
        bearer: Regex::new(r"(?i)\b(bearer\s+)[A-Za-z0-9\-._~+/]+=*")
            .expect("valid bearer pattern"),
        cookie: Regex::new(r"(iPlanetDirectoryPro=)[^;\s&]+").expect("valid cookie pattern"),
        email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("valid email pattern"),
        uuid: Regex::new(
            r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b",
        )
        .expect("valid uuid pattern"),
        vin: Regex::new(r"\b[A-HJ-NPR-Z0-9]{17}\b").expect("valid vin pattern"),
        phone: Regex::new(r"\+[0-9][0-9 ()\-]{6,}[0-9]").expect("valid phone pattern"),
    })
}

/// Mask sensitive values in free text or a JSON body.
pub fn redact(text: &str) -> String {
    let p = patterns();
    let out = p
        .json_field
        .replace_all(text, format!(r#""$1":"{MASK}""#).as_str());
    let out = p.bearer.replace_all(&out, format!("${{1}}{MASK}").as_str());
    let out = p.cookie.replace_all(&out, format!("${{1}}{MASK}").as_str());
    let out = p.email.replace_all(&out, MASK);
    let out = p.uuid.replace_all(&out, MASK);
    let out = p.vin.replace_all(&out, MASK);
    let out = p.phone.replace_all(&out, MASK);
    out.into_owned()
}

/// Render headers for logging, masking identity and secret values.
pub fn redact_headers(headers: &HeaderMap) -> String {
    let mut rendered: Vec<String> = headers
        .iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                MASK.to_string()
            } else {
                redact(value.to_str().unwrap_or("<binary>"))
            };
            format!("{name}: {value}")
        })
        .collect();
    rendered.sort();
    rendered.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn masks_tokens_in_json_bodies() {
        let body = r#"{"access_token":"abc.def","expires_in":3600,"refresh_token":"r-1"}"#;
        let out = redact(body);
        assert!(!out.contains("abc.def"));
        assert!(!out.contains("r-1"));
        assert!(out.contains(r#""expires_in":3600"#));
    }

    #[test]
    fn masks_coordinates() {
        let out = redact(r#"{"latitude": 51.5072, "longitude": -0.1276, "displayName": "Home"}"#);
        assert!(!out.contains("51.5072"));
        assert!(!out.contains("-0.1276"));
        assert!(out.contains("Home"));
    }

    #[test]
    fn masks_vins_emails_and_guids_in_free_text() {
        let out = redact(
            "vin JTDKB20U123456789 for driver@example.com guid 123e4567-e89b-12d3-a456-426614174000",
        );
        assert!(!out.contains("JTDKB20U123456789"));
        assert!(!out.contains("driver@example.com"));
        assert!(!out.contains("426614174000"));
    }

    #[test]
    fn masks_bearer_and_cookie_values() {
        let out = redact("Bearer eyJhbGciOi.payload.sig; iPlanetDirectoryPro=tok-123; x=1");
        assert!(!out.contains("eyJhbGciOi"));
        assert!(!out.contains("tok-123"));
        assert!(out.contains("x=1"));
    }

    #[test]
    fn masks_phone_numbers() {
        let out = redact("call +44 20 7946 0958 now");
        assert!(!out.contains("7946"));
    }

    #[test]
    fn leaves_ordinary_fields_alone() {
        let body = r#"{"status":"SUCCESS","odometer":{"value":1234,"unit":"km"}}"#;
        assert_eq!(redact(body), body);
    }

    #[test]
    fn masks_sensitive_header_values() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer secret"));
        headers.insert("vin", HeaderValue::from_static("JTDKB20U123456789"));
        headers.insert("x-channel", HeaderValue::from_static("ONEAPP"));
        let out = redact_headers(&headers);
        assert!(!out.contains("secret"));
        assert!(!out.contains("JTDKB20U123456789"));
        assert!(out.contains("x-channel: ONEAPP"));
    }
}
