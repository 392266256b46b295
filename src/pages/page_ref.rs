//! Page references: 1-based index or a table-of-contents filename

use std::fmt;

/// A request for a page, before validation.
///
/// Strings made only of ASCII digits are indices; anything else is a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRef {
    /// 1-based page index. Zero and out-of-range values are representable
    /// so the resolver can reject them.
    Index(u64),
    /// Filename looked up in the table of contents.
    Name(String),
}

impl PageRef {
    /// Parse the textual form used by address bars, cookies and range inputs.
    pub fn parse(text: &str) -> Self {
        if is_decimal(text) {
            // Overflow still means "some index", just never a valid one.
            Self::Index(text.parse().unwrap_or(u64::MAX))
        } else {
            Self::Name(text.to_string())
        }
    }

    /// Build from a JS-style number. Non-integral and negative numbers do not
    /// look like indices, so they fall through to name lookup.
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
            Self::Index(value as u64)
        } else {
            Self::Name(value.to_string())
        }
    }

    /// The index, if this is one.
    pub fn index(&self) -> Option<u64> {
        match self {
            Self::Index(n) => Some(*n),
            Self::Name(_) => None,
        }
    }
}

/// `^\d+$`
fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{}", n),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for PageRef {
    fn from(n: u32) -> Self {
        Self::Index(u64::from(n))
    }
}

impl From<u64> for PageRef {
    fn from(n: u64) -> Self {
        Self::Index(n)
    }
}

impl From<i64> for PageRef {
    fn from(n: i64) -> Self {
        match u64::try_from(n) {
            Ok(n) => Self::Index(n),
            Err(_) => Self::Name(n.to_string()),
        }
    }
}

impl From<&str> for PageRef {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for PageRef {
    fn from(text: String) -> Self {
        if is_decimal(&text) {
            Self::parse(&text)
        } else {
            Self::Name(text)
        }
    }
}

impl From<&PageRef> for PageRef {
    fn from(r: &PageRef) -> Self {
        r.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(PageRef::parse("3"), PageRef::Index(3));
        assert_eq!(PageRef::parse("007"), PageRef::Index(7));
        assert_eq!(PageRef::parse("0"), PageRef::Index(0));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(PageRef::parse("b.html"), PageRef::Name("b.html".into()));
        assert_eq!(PageRef::parse("-1"), PageRef::Name("-1".into()));
        assert_eq!(PageRef::parse(" 2"), PageRef::Name(" 2".into()));
        assert_eq!(PageRef::parse(""), PageRef::Name(String::new()));
    }

    #[test]
    fn test_overflow_is_still_an_index() {
        let r = PageRef::parse("99999999999999999999999");
        assert_eq!(r, PageRef::Index(u64::MAX));
    }

    #[test]
    fn test_from_number() {
        assert_eq!(PageRef::from_number(4.0), PageRef::Index(4));
        assert_eq!(PageRef::from_number(2.5), PageRef::Name("2.5".into()));
        assert_eq!(PageRef::from_number(-1.0), PageRef::Name("-1".into()));
        assert!(PageRef::from_number(f64::NAN).index().is_none());
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(PageRef::from(0i64), PageRef::Index(0));
        assert_eq!(PageRef::from(-2i64), PageRef::Name("-2".into()));
    }
}
