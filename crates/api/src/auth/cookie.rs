//! The HTTP-only cookie carrying the refresh token.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// `Set-Cookie` value installing a refresh token.
pub fn refresh_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{REFRESH_COOKIE_NAME}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the refresh token from the client.
pub fn clear_refresh_cookie(secure: bool) -> String {
    refresh_cookie("", 0, secure)
}

/// Find a cookie by name across all `Cookie` headers.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn refresh_cookie_attributes() {
        let cookie = refresh_cookie("abc", 1_296_000, false);
        assert_eq!(
            cookie,
            "refreshToken=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=1296000"
        );
        assert!(refresh_cookie("abc", 10, true).ends_with("; Secure"));
    }

    #[test]
    fn clearing_cookie_expires_it_immediately() {
        let cookie = clear_refresh_cookie(false);
        assert!(cookie.starts_with("refreshToken=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("a=1; refreshToken=tok.en.x; b=2"));
        assert_eq!(get_cookie(&headers, REFRESH_COOKIE_NAME), Some("tok.en.x"));
        assert_eq!(get_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_value_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("refreshToken="));
        assert_eq!(get_cookie(&headers, REFRESH_COOKIE_NAME), None);
    }
}
