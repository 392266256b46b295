//! Error types for the pager.
//!
//! Only construction and the frame-registration bridge can fail. A page
//! reference that does not resolve is not an error: navigation methods return
//! `None` and leave every piece of state untouched.

use std::result::Result as StdResult;

use thiserror::Error;

/// Result type alias using [`PagerError`].
pub type Result<T> = StdResult<T, PagerError>;

/// Main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagerError {
    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------
    /// Neither `toc` nor `maxPage` was supplied.
    #[error("options.toc must be a non-empty array or options.maxPage must be a positive integer")]
    MissingPageSource,

    /// Both `toc` and `maxPage` were supplied.
    #[error("options.toc and options.maxPage are mutually exclusive")]
    AmbiguousPageSource,

    /// `toc` was supplied but holds no entries.
    #[error("options.toc must not be empty")]
    EmptyTableOfContents,

    /// `maxPage` is not a positive integer.
    #[error("options.maxPage must be a positive integer, got {value}")]
    InvalidMaxPage {
        /// The rejected value, as written.
        value: String,
    },

    /// The options object could not be read.
    #[error("invalid options: {message}")]
    InvalidOptions {
        /// Deserializer message.
        message: String,
    },

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------
    /// No visible `src`-less frame was found in the tab container.
    #[error("no visible content frame found in the tab container")]
    NoContentFrame,

    /// An element the pager markup should contain is missing.
    #[error("missing element: {selector}")]
    MissingElement {
        /// Selector that matched nothing.
        selector: String,
    },

    /// Content document names a conditional tab the tab bar does not have.
    #[error("conditional content names unknown tab {name:?}")]
    UnknownConditionalTab {
        /// Tab name read from the fragment's `name` attribute.
        name: String,
    },

    // ------------------------------------------------------------------
    // Host
    // ------------------------------------------------------------------
    /// A DOM call threw.
    #[error("DOM operation failed: {message}")]
    Js {
        /// Stringified exception.
        message: String,
    },
}

impl PagerError {
    /// Wrap a thrown JS value.
    pub fn js(value: &wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Js { message }
    }

    /// True for failures raised before any UI was touched.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingPageSource
                | Self::AmbiguousPageSource
                | Self::EmptyTableOfContents
                | Self::InvalidMaxPage { .. }
                | Self::InvalidOptions { .. }
        )
    }
}

impl From<serde_json::Error> for PagerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOptions {
            message: err.to_string(),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for PagerError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::InvalidOptions {
            message: err.to_string(),
        }
    }
}

impl From<PagerError> for wasm_bindgen::JsValue {
    fn from(err: PagerError) -> Self {
        js_sys::Error::new(&format!("CurvyTabsPager: {}", err)).into()
    }
}
