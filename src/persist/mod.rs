//! Browser-side effects of a page change: frame navigation, address bar
//! history and the position cookie, plus reading them back on load.

use crate::pages::{PageRef, PageSource};

/// Fire-and-forget browser effects. None of these report failure back to the
/// controller; a missing resource or a blocked cookie is not detected.
pub trait Browser {
    /// Point the content frame at `url`, always triggering a load.
    fn navigate_frame(&mut self, url: &str);

    /// Push a history entry whose query is `?{param}={page}`.
    fn push_history(&mut self, param: &str, page: u32);

    /// Store `name=value`, expiring `days` from now.
    fn write_cookie(&mut self, name: &str, value: &str, days: u32);
}

/// `name=value; expires=...` as assigned to `document.cookie`.
pub fn cookie_string(name: &str, value: &str, expires_utc: &str) -> String {
    format!("{}={}; expires={}", name, value, expires_utc)
}

/// Address bar URL for a page: `origin + path + ?param=page`.
pub fn history_url(origin: &str, pathname: &str, param: &str, page: u32) -> String {
    format!("{}{}?{}={}", origin, pathname, param, page)
}

/// Value of `name` in a `document.cookie` style header.
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Value of `param` in a `location.search` style query.
pub fn read_query<'a>(search: &'a str, param: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == param)
        .map(|(_, value)| value)
}

/// Page to resume at on load: the address bar wins over the cookie.
///
/// Empty values and values that do not resolve against `source` are skipped,
/// so a stale `?p=` still lets the cookie through.
pub fn resume_page(
    source: &PageSource,
    search: &str,
    history_param: Option<&str>,
    cookies: &str,
    cookie_name: Option<&str>,
) -> Option<PageRef> {
    let from_address = history_param.and_then(|param| read_query(search, param));
    let from_cookie = cookie_name.and_then(|name| read_cookie(cookies, name));
    [from_address, from_cookie]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .map(PageRef::parse)
        .find(|page_ref| source.resolve(page_ref).is_some())
}

/// Milliseconds since the epoch.
pub fn now_millis() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }
}

/// Expiry timestamp `days` from `now_ms`.
pub fn expiry_millis(now_ms: f64, days: u32) -> f64 {
    now_ms + f64::from(days) * 24.0 * 60.0 * 60.0 * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_string() {
        assert_eq!(
            cookie_string("p", "3", "Sun, 18 Oct 2027 00:00:00 GMT"),
            "p=3; expires=Sun, 18 Oct 2027 00:00:00 GMT"
        );
    }

    #[test]
    fn test_history_url() {
        assert_eq!(
            history_url("https://example.org", "/tutorial/", "p", 4),
            "https://example.org/tutorial/?p=4"
        );
    }

    #[test]
    fn test_read_cookie() {
        let header = "theme=dark; p=7; tutorial=2";
        assert_eq!(read_cookie(header, "p"), Some("7"));
        assert_eq!(read_cookie(header, "tutorial"), Some("2"));
        assert_eq!(read_cookie(header, "q"), None);
        assert_eq!(read_cookie("", "p"), None);
    }

    #[test]
    fn test_read_query() {
        assert_eq!(read_query("?p=5", "p"), Some("5"));
        assert_eq!(read_query("?x=1&p=2", "p"), Some("2"));
        assert_eq!(read_query("", "p"), None);
    }

    #[test]
    fn test_resume_prefers_address() {
        let source = PageSource::Count(5);
        assert_eq!(
            resume_page(&source, "?p=4", Some("p"), "p=2", Some("p")),
            Some(PageRef::Index(4))
        );
        assert_eq!(
            resume_page(&source, "", Some("p"), "p=2", Some("p")),
            Some(PageRef::Index(2))
        );
        assert_eq!(resume_page(&source, "?p=4", None, "p=2", None), None);
        assert_eq!(resume_page(&source, "?p=", Some("p"), "", Some("p")), None);
    }

    #[test]
    fn test_resume_skips_empty_or_unknown_address() {
        let source = PageSource::Count(5);
        assert_eq!(
            resume_page(&source, "?p=", Some("p"), "p=4", Some("p")),
            Some(PageRef::Index(4))
        );
        assert_eq!(
            resume_page(&source, "?p=99", Some("p"), "p=4", Some("p")),
            Some(PageRef::Index(4))
        );
        assert_eq!(resume_page(&source, "?p=99", Some("p"), "p=0", Some("p")), None);
    }

    #[test]
    fn test_resume_by_name() {
        let source = PageSource::Toc(vec!["a.html".into(), "b.html".into()]);
        assert_eq!(
            resume_page(&source, "?p=z.html", Some("p"), "p=b.html", Some("p")),
            Some(PageRef::Name("b.html".into()))
        );
    }

    #[test]
    fn test_expiry_one_year() {
        let year = expiry_millis(0.0, 365);
        assert_eq!(year, 365.0 * 86_400_000.0);
    }
}
