//! Page space: how many pages exist and what each one loads

mod page_ref;

pub use page_ref::PageRef;

/// Where the page list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Ordered filenames; page `n` loads `toc[n - 1]`.
    Toc(Vec<String>),
    /// Page count only; page `n` loads `"{n}.html"`.
    Count(u32),
}

impl PageSource {
    /// Highest valid page number.
    pub fn max_page(&self) -> u32 {
        match self {
            Self::Toc(toc) => u32::try_from(toc.len()).unwrap_or(u32::MAX),
            Self::Count(n) => *n,
        }
    }

    /// Table of contents, when pages are named.
    pub fn toc(&self) -> Option<&[String]> {
        match self {
            Self::Toc(toc) => Some(toc),
            Self::Count(_) => None,
        }
    }

    /// Validate a page reference.
    ///
    /// Indices are valid in `1..=max_page`. Names resolve to the first matching
    /// toc entry and never resolve in count mode.
    pub fn resolve(&self, page_ref: &PageRef) -> Option<u32> {
        match page_ref {
            PageRef::Index(n) => {
                let n = u32::try_from(*n).ok()?;
                (1..=self.max_page()).contains(&n).then_some(n)
            }
            PageRef::Name(name) => {
                let index = self.toc()?.iter().position(|entry| entry == name)?;
                u32::try_from(index + 1).ok()
            }
        }
    }

    /// Resource name for a valid page, without any path prefix.
    pub fn resource(&self, page: u32) -> Option<String> {
        if page == 0 || page > self.max_page() {
            return None;
        }
        match self {
            Self::Toc(toc) => toc.get(page as usize - 1).cloned(),
            Self::Count(_) => Some(format!("{}.html", page)),
        }
    }

    /// `base_path` + resource name.
    pub fn target(&self, base_path: &str, page: u32) -> Option<String> {
        self.resource(page)
            .map(|resource| format!("{}{}", base_path, resource))
    }
}
