//! Construction options
//!
//! [`PagerOptions`] mirrors the JS options object field for field and is
//! deserialized with serde. [`PagerOptions::validate`] turns it into a
//! [`PagerConfig`], failing before any UI is touched.

use serde::{Deserialize, Deserializer};

use crate::error::{PagerError, Result};
use crate::pages::{PageRef, PageSource};

/// Cookie and history parameter name used when none is configured.
pub const DEFAULT_KEY: &str = "p";

/// Cookie lifetime used when none is configured.
pub const DEFAULT_COOKIE_DAYS: u32 = 365;

/// Which buttons the pager renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSet {
    /// Previous and next.
    #[default]
    Minimal,
    /// First, previous, next and last.
    Full,
}

/// How conditional fragments reach their companion tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentTransfer {
    /// Serialize the fragment's markup and parse it into the companion body.
    #[default]
    Copy,
    /// Move the fragment's child nodes into the companion body.
    Move,
}

/// Button glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Solid triangles.
    #[default]
    Triangles,
    /// Plain ASCII, for platforms without the triangle glyphs.
    Ascii,
}

/// Address bar strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStrategy {
    /// Leave the address alone.
    None,
    /// Push a history entry carrying `?{param}={page}`.
    PushQuery { param: String },
}

/// Cookie persistence settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub days: u32,
}

/// Raw `maxPage`: JS callers pass numbers or digit strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(f64),
    Text(String),
}

/// Raw `startPage`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPageRef {
    Number(f64),
    Text(String),
}

impl From<RawPageRef> for PageRef {
    fn from(raw: RawPageRef) -> Self {
        match raw {
            RawPageRef::Number(n) => PageRef::from_number(n),
            RawPageRef::Text(text) => PageRef::from(text),
        }
    }
}

/// Raw `cookieName`: a name, or a boolean switch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawKey {
    Flag(bool),
    Name(String),
}

/// Options object as passed by the host page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagerOptions {
    pub toc: Option<Vec<String>>,
    pub max_page: Option<RawCount>,
    pub start_page: Option<RawPageRef>,
    #[serde(alias = "subfolder", alias = "basePath")]
    pub path: Option<String>,
    /// Absent: default name. `null`, `false` or `""`: persistence off.
    #[serde(alias = "persistenceKey", deserialize_with = "nullable")]
    pub cookie_name: Option<Option<RawKey>>,
    pub cookie_days: Option<u32>,
    pub push_history: Option<bool>,
    pub history_param: Option<String>,
    pub controls: ControlSet,
    pub transfer: FragmentTransfer,
    pub glyphs: GlyphSet,
    /// Absent: on.
    pub resume: Option<bool>,
}

/// Distinguish an explicit `null` from a missing field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PagerOptions {
    /// Read options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the options and produce a config.
    pub fn validate(self) -> Result<PagerConfig> {
        let source = match (self.toc, self.max_page) {
            (Some(_), Some(_)) => return Err(PagerError::AmbiguousPageSource),
            (Some(toc), None) if toc.is_empty() => return Err(PagerError::EmptyTableOfContents),
            (Some(toc), None) => PageSource::Toc(toc),
            (None, Some(count)) => PageSource::Count(parse_count(&count)?),
            (None, None) => return Err(PagerError::MissingPageSource),
        };

        let cookie = match self.cookie_name {
            None | Some(Some(RawKey::Flag(true))) => Some(DEFAULT_KEY.to_string()),
            Some(None) | Some(Some(RawKey::Flag(false))) => None,
            Some(Some(RawKey::Name(name))) if name.is_empty() => None,
            Some(Some(RawKey::Name(name))) => Some(name),
        }
        .map(|name| CookieConfig {
            name,
            days: self.cookie_days.unwrap_or(DEFAULT_COOKIE_DAYS),
        });

        let history = if self.push_history.unwrap_or(true) {
            HistoryStrategy::PushQuery {
                param: self
                    .history_param
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| DEFAULT_KEY.to_string()),
            }
        } else {
            HistoryStrategy::None
        };

        Ok(PagerConfig {
            source,
            start_page: self.start_page.map(PageRef::from),
            base_path: self.path.unwrap_or_default(),
            cookie,
            history,
            controls: self.controls,
            transfer: self.transfer,
            glyphs: self.glyphs,
            resume: self.resume.unwrap_or(true),
        })
    }
}

fn parse_count(raw: &RawCount) -> Result<u32> {
    let invalid = |value: String| PagerError::InvalidMaxPage { value };
    let count = match raw {
        RawCount::Number(n) => {
            if !(n.is_finite() && n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u32::MAX)) {
                return Err(invalid(n.to_string()));
            }
            *n as u32
        }
        RawCount::Text(text) => match PageRef::parse(text) {
            PageRef::Index(n) => u32::try_from(n).map_err(|_| invalid(text.clone()))?,
            PageRef::Name(_) => return Err(invalid(text.clone())),
        },
    };
    if count == 0 {
        return Err(invalid("0".to_string()));
    }
    Ok(count)
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    pub source: PageSource,
    /// Unresolvable start pages fall back to page 1.
    pub start_page: Option<PageRef>,
    pub base_path: String,
    pub cookie: Option<CookieConfig>,
    pub history: HistoryStrategy,
    pub controls: ControlSet,
    pub transfer: FragmentTransfer,
    pub glyphs: GlyphSet,
    /// Resume from the address bar, then the cookie, when no start page is set.
    pub resume: bool,
}

impl PagerConfig {
    fn with_source(source: PageSource) -> Self {
        Self {
            source,
            start_page: None,
            base_path: String::new(),
            cookie: Some(CookieConfig {
                name: DEFAULT_KEY.to_string(),
                days: DEFAULT_COOKIE_DAYS,
            }),
            history: HistoryStrategy::PushQuery {
                param: DEFAULT_KEY.to_string(),
            },
            controls: ControlSet::default(),
            transfer: FragmentTransfer::default(),
            glyphs: GlyphSet::default(),
            resume: true,
        }
    }

    /// Named pages.
    pub fn from_toc<I, S>(toc: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let toc: Vec<String> = toc.into_iter().map(Into::into).collect();
        if toc.is_empty() {
            return Err(PagerError::EmptyTableOfContents);
        }
        Ok(Self::with_source(PageSource::Toc(toc)))
    }

    /// Numbered pages.
    pub fn from_max_page(max_page: u32) -> Result<Self> {
        if max_page == 0 {
            return Err(PagerError::InvalidMaxPage {
                value: "0".to_string(),
            });
        }
        Ok(Self::with_source(PageSource::Count(max_page)))
    }

    pub fn start_page(mut self, page: impl Into<PageRef>) -> Self {
        self.start_page = Some(page.into());
        self
    }

    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn cookie(mut self, cookie: Option<CookieConfig>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn history(mut self, history: HistoryStrategy) -> Self {
        self.history = history;
        self
    }

    pub fn controls(mut self, controls: ControlSet) -> Self {
        self.controls = controls;
        self
    }

    pub fn transfer(mut self, transfer: FragmentTransfer) -> Self {
        self.transfer = transfer;
        self
    }
}
