//! 请求凭据解析

use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine};

/// 会话 cookie 名称
pub const SESSION_COOKIE: &str = "sessionid";

/// 请求携带的凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Basic base64(username:password)`
    Basic { username: String, password: String },
    /// `Authorization: Bearer <token>` 或 `sessionid` cookie
    Session(String),
}

impl Credentials {
    /// Authorization 头优先于 cookie；格式错误的头视为没有凭据
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        if let Some(value) = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            return parse_authorization(value);
        }

        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_cookie)
            .map(Credentials::Session)
    }
}

fn parse_authorization(value: &str) -> Option<Credentials> {
    let (scheme, rest) = value.trim().split_once(' ')?;
    let rest = rest.trim();

    if scheme.eq_ignore_ascii_case("basic") {
        let decoded = STANDARD.decode(rest).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Credentials::Basic {
            username: username.to_string(),
            password: password.to_string(),
        })
    } else if scheme.eq_ignore_ascii_case("bearer") && !rest.is_empty() {
        Some(Credentials::Session(rest.to_string()))
    } else {
        None
    }
}

fn session_cookie(header_value: &str) -> Option<String> {
    header_value.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// 登录成功后写入的 cookie
pub fn session_cookie_header(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn test_basic_credentials() {
        let encoded = STANDARD.encode("alice:pa:ss");
        let creds =
            Credentials::from_headers(&headers(header::AUTHORIZATION, &format!("Basic {encoded}")));
        assert_eq!(
            creds,
            Some(Credentials::Basic {
                username: "alice".to_string(),
                password: "pa:ss".to_string()
            })
        );
    }

    #[test]
    fn test_bearer_and_cookie() {
        assert_eq!(
            Credentials::from_headers(&headers(header::AUTHORIZATION, "Bearer abc")),
            Some(Credentials::Session("abc".to_string()))
        );
        assert_eq!(
            Credentials::from_headers(&headers(header::COOKIE, "theme=dark; sessionid=xyz")),
            Some(Credentials::Session("xyz".to_string()))
        );
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(Credentials::from_headers(&HeaderMap::new()), None);
        assert_eq!(
            Credentials::from_headers(&headers(header::AUTHORIZATION, "Basic !!!")),
            None
        );
        assert_eq!(
            Credentials::from_headers(&headers(header::AUTHORIZATION, "Digest abc")),
            None
        );
        let no_colon = STANDARD.encode("alice");
        assert_eq!(
            Credentials::from_headers(&headers(header::AUTHORIZATION, &format!("Basic {no_colon}"))),
            None
        );
    }

    #[test]
    fn test_cookie_header_format() {
        assert_eq!(
            session_cookie_header("t", 60),
            "sessionid=t; HttpOnly; Path=/; SameSite=Lax; Max-Age=60"
        );
    }
}
