// ============================================================================
// form — urlencoded bodies and the session cookie
// ============================================================================

use std::collections::HashMap;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "xpost_session";

/// Parse an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

/// Session id from a `Cookie` header, if present and non-empty
pub fn session_id(cookie_header: Option<&str>) -> Option<String> {
    cookie_header?
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE, id
    )
}

pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0",
        SESSION_COOKIE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form() {
        let form = parse_form("text=hello+world%21&quote_url=https%3A%2F%2Fx.com%2Fa%2Fstatus%2F1");
        assert_eq!(form.get("text").map(String::as_str), Some("hello world!"));
        assert_eq!(
            form.get("quote_url").map(String::as_str),
            Some("https://x.com/a/status/1")
        );
    }

    #[test]
    fn test_session_id() {
        assert_eq!(session_id(None), None);
        assert_eq!(session_id(Some("other=1")), None);
        assert_eq!(session_id(Some("xpost_session=")), None);
        assert_eq!(
            session_id(Some("theme=dark; xpost_session=abc123")),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc");
        assert!(cookie.starts_with("xpost_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}
