//! Tab Pager: a paginated content navigator for tabbed frame containers
//!
//! One frame of a tab container becomes a multi-page viewer. This crate
//! provides:
//! - Page resolution by 1-based index or table-of-contents filename
//! - Page transitions that keep the tab bar, address bar, cookie, frame and
//!   pager chrome in step
//! - Keyboard paging with arrow keys
//! - A registration handshake through which the displayed document fills
//!   conditionally shown companion tabs
//!
//! The core, [`PageController`], talks to the host through the [`TabBar`],
//! [`PagerView`], [`Browser`] and [`ContentDocument`] traits. The [`wasm`]
//! module implements them against the DOM.
//!
//! Without a `startPage`, a pager reopens at the page named in the address bar
//! or, failing that, the position cookie. Pass `resume: false` to always open
//! on page 1.

pub mod config;
pub mod error;
pub mod input;
pub mod pages;
pub mod persist;
pub mod render;
pub mod tabs;
pub mod wasm;

#[cfg(test)]
mod test_support;

// Re-export WASM types for direct use
pub use wasm::WasmPager;

// Re-export primary types
pub use config::{
    ControlSet, CookieConfig, FragmentTransfer, GlyphSet, HistoryStrategy, PagerConfig,
    PagerOptions,
};
pub use error::{PagerError, Result};
pub use input::{Focus, PagingKey};
pub use pages::{PageRef, PageSource};
pub use persist::Browser;
pub use render::{Control, PagerView};
pub use tabs::{ConditionalFragment, ContentDocument, RevealedTabs, TabBar};

/// State owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerState {
    current_page: u32,
    source: PageSource,
    base_path: String,
}

impl PagerState {
    /// Always in `1..=max_page`.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn max_page(&self) -> u32 {
        self.source.max_page()
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

/// The page-state controller.
///
/// Owns the current page and drives every side effect of a page change. The
/// collaborators only execute commands.
pub struct PageController<T: TabBar, V: PagerView, B: Browser> {
    state: PagerState,
    cookie: Option<CookieConfig>,
    history: HistoryStrategy,
    controls: ControlSet,
    transfer: FragmentTransfer,
    tabs: T,
    view: V,
    browser: B,
    /// Tab hosting the content frame.
    main_tab: T::Tab,
}

impl<T: TabBar, V: PagerView, B: Browser> PageController<T, V, B> {
    /// Create a controller and load the start page.
    ///
    /// A start page that does not resolve falls back to page 1.
    pub fn new(config: PagerConfig, tabs: T, view: V, browser: B, main_tab: T::Tab) -> Self {
        let start = config
            .start_page
            .as_ref()
            .and_then(|r| config.source.resolve(r))
            .unwrap_or(1);

        let mut controller = Self {
            state: PagerState {
                current_page: start,
                source: config.source,
                base_path: config.base_path,
            },
            cookie: config.cookie,
            history: config.history,
            controls: config.controls,
            transfer: config.transfer,
            tabs,
            view,
            browser,
            main_tab,
        };

        controller.view.set_max_page(controller.state.max_page());
        controller.page(start);
        controller
    }

    /// Validate a page reference without side effects.
    pub fn resolve(&self, page_ref: impl Into<PageRef>) -> Option<u32> {
        self.state.source.resolve(&page_ref.into())
    }

    /// Go to a page using the configured base path.
    pub fn page(&mut self, page_ref: impl Into<PageRef>) -> Option<u32> {
        self.goto_page(page_ref, None)
    }

    /// Go to a page, optionally loading it from a different path prefix.
    ///
    /// Returns the page number, or `None` without touching anything when the
    /// reference does not resolve. Going to the current page reloads it.
    pub fn goto_page(&mut self, page_ref: impl Into<PageRef>, path_override: Option<&str>) -> Option<u32> {
        let page_ref = page_ref.into();
        let Some(page) = self.state.source.resolve(&page_ref) else {
            log::trace!("page {:?} not found", page_ref);
            return None;
        };
        let base_path = path_override.unwrap_or(self.state.base_path.as_str());
        let target = self.state.source.target(base_path, page)?;

        self.tabs.select(&self.main_tab);

        self.state.current_page = page;

        if let HistoryStrategy::PushQuery { param } = &self.history {
            self.browser.push_history(param, page);
        }

        if let Some(cookie) = &self.cookie {
            self.browser.write_cookie(&cookie.name, &page.to_string(), cookie.days);
        }

        self.browser.navigate_frame(&target);

        self.view.set_current_page(page);
        self.refresh_controls();

        log::debug!("page {} of {} -> {}", page, self.state.max_page(), target);
        Some(page)
    }

    fn refresh_controls(&mut self) {
        let (page, max_page) = (self.state.current_page, self.state.max_page());
        for &control in self.controls.controls() {
            self.view
                .set_control_enabled(control, control.is_enabled(page, max_page));
        }
    }

    /// Handle a click on a paging button.
    ///
    /// Boundary clicks are rejected by the resolver, not by unbinding.
    pub fn activate(&mut self, control: Control) -> Option<u32> {
        let current = u64::from(self.state.current_page);
        let target = match control {
            Control::First => 1,
            Control::Previous => current - 1,
            Control::Next => current + 1,
            Control::Last => u64::from(self.state.max_page()),
        };
        self.page(target)
    }

    pub fn first(&mut self) -> Option<u32> {
        self.activate(Control::First)
    }

    pub fn previous(&mut self) -> Option<u32> {
        self.activate(Control::Previous)
    }

    pub fn next(&mut self) -> Option<u32> {
        self.activate(Control::Next)
    }

    pub fn last(&mut self) -> Option<u32> {
        self.activate(Control::Last)
    }

    /// Handle a range control commit (`input` or `change`) carrying its raw value.
    pub fn slider_commit(&mut self, value: &str) -> Option<u32> {
        self.page(PageRef::parse(value))
    }

    /// Handle a host-document key press.
    pub fn handle_key(&mut self, key: &str, focus: Focus) -> Option<u32> {
        let key = PagingKey::from_key(key)?;
        let target = input::route(key, focus, self.state.current_page, self.state.max_page())?;
        self.page(target)
    }

    /// Handle the content document's readiness signal.
    ///
    /// Applies to `document` as given; the current page is neither consulted
    /// nor changed, so a late signal from a slow page acts on whatever the
    /// caller hands in.
    pub fn register_frame<D>(&mut self, document: &D) -> Result<RevealedTabs>
    where
        D: ContentDocument<Fragment = T::Fragment>,
    {
        log::debug!("frame registered on page {}", self.state.current_page);
        tabs::apply_conditional_tabs(&mut self.tabs, document, self.transfer)
    }

    pub fn state(&self) -> &PagerState {
        &self.state
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    pub fn max_page(&self) -> u32 {
        self.state.max_page()
    }

    pub fn toc(&self) -> Option<&[String]> {
        self.state.source.toc()
    }

    /// URL a page loads with the configured base path.
    pub fn target_for(&self, page: u32) -> Option<String> {
        self.state.source.target(&self.state.base_path, page)
    }

    pub fn controls(&self) -> ControlSet {
        self.controls
    }

    pub fn tabs(&self) -> &T {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut T {
        &mut self.tabs
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        BrowserEvent, FakeDocument, RecordingBrowser, RecordingTabs, RecordingView, TabEvent,
    };

    type TestPager = PageController<RecordingTabs, RecordingView, RecordingBrowser>;

    fn pager(config: PagerConfig) -> TestPager {
        PageController::new(
            config,
            RecordingTabs::with_tabs(&["main", "notes", "hints"]),
            RecordingView::default(),
            RecordingBrowser::default(),
            "main".to_string(),
        )
    }

    fn abc() -> PagerConfig {
        PagerConfig::from_toc(["a.html", "b.html", "c.html"]).unwrap()
    }

    #[test]
    fn test_named_start_page() {
        let pager = pager(abc().start_page("b.html"));
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.view().max_page, Some(3));
        assert_eq!(pager.view().current_page, Some(2));
        assert_eq!(pager.browser().last_navigation(), Some("b.html"));
    }

    #[test]
    fn test_bad_start_page_falls_back() {
        assert_eq!(pager(abc().start_page("z.html")).current_page(), 1);
        assert_eq!(pager(abc().start_page(9u32)).current_page(), 1);
        assert_eq!(pager(abc()).current_page(), 1);
    }

    #[test]
    fn test_rejected_page_changes_nothing() {
        let mut pager = pager(abc().start_page(2u32));
        let events = pager.browser().events.len();
        let renders = pager.view().renders;
        let tab_events = pager.tabs().events.len();

        assert_eq!(pager.page(0u32), None);
        assert_eq!(pager.page(4u32), None);
        assert_eq!(pager.page("nope.html"), None);
        assert_eq!(pager.goto_page(7u32, Some("other/")), None);

        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.view().current_page, Some(2));
        assert_eq!(pager.browser().cookie("p"), Some("2"));
        assert_eq!(pager.browser().events.len(), events);
        assert_eq!(pager.view().renders, renders);
        assert_eq!(pager.tabs().events.len(), tab_events);
    }

    #[test]
    fn test_side_effect_order() {
        let mut pager = pager(abc());
        pager.browser.events.clear();
        pager.tabs.events.clear();

        assert_eq!(pager.page(3u32), Some(3));

        assert_eq!(pager.tabs().events, vec![TabEvent::Select("main".into())]);
        assert_eq!(
            pager.browser().events,
            vec![
                BrowserEvent::Push("p".into(), 3),
                BrowserEvent::Cookie("p".into(), "3".into(), 365),
                BrowserEvent::Navigate("c.html".into()),
            ]
        );
    }

    #[test]
    fn test_controls_track_boundaries() {
        let mut pager = pager(PagerConfig::from_max_page(4).unwrap().controls(ControlSet::Full));
        for n in 1..=4u32 {
            assert_eq!(pager.page(n), Some(n));
            let view = pager.view();
            assert_eq!(view.current_page, Some(n));
            assert_eq!(view.is_enabled(Control::First), Some(n != 1));
            assert_eq!(view.is_enabled(Control::Previous), Some(n != 1));
            assert_eq!(view.is_enabled(Control::Next), Some(n != 4));
            assert_eq!(view.is_enabled(Control::Last), Some(n != 4));
        }
    }

    #[test]
    fn test_minimal_controls_leave_first_last_alone() {
        let pager = pager(abc());
        assert_eq!(pager.view().is_enabled(Control::First), None);
        assert_eq!(pager.view().is_enabled(Control::Previous), Some(false));
        assert_eq!(pager.view().is_enabled(Control::Next), Some(true));
    }

    #[test]
    fn test_cookie_persistence() {
        let mut pager = pager(abc());
        pager.page(3u32);
        assert_eq!(pager.browser().cookie("p"), Some("3"));

        let mut quiet = self::pager(abc().cookie(None).history(HistoryStrategy::None));
        quiet.page(3u32);
        assert!(quiet
            .browser()
            .events
            .iter()
            .all(|e| matches!(e, BrowserEvent::Navigate(_))));
    }

    #[test]
    fn test_custom_cookie_and_history_keys() {
        let config = abc()
            .cookie(Some(CookieConfig { name: "tutorial".into(), days: 30 }))
            .history(HistoryStrategy::PushQuery { param: "page".into() });
        let mut pager = pager(config);
        pager.page("c.html");
        assert_eq!(pager.browser().cookie("tutorial"), Some("3"));
        assert!(pager
            .browser()
            .events
            .contains(&BrowserEvent::Push("page".into(), 3)));
    }

    #[test]
    fn test_same_page_reloads() {
        let mut pager = pager(abc());
        let before = pager.browser().events.len();
        pager.page(1u32);
        pager.page(1u32);
        let navigations = pager.browser().events[before..]
            .iter()
            .filter(|e| matches!(e, BrowserEvent::Navigate(_)))
            .count();
        assert_eq!(navigations, 2);
    }

    #[test]
    fn test_paths() {
        let mut pager = pager(PagerConfig::from_max_page(5).unwrap().base_path("pages/"));
        assert_eq!(pager.browser().last_navigation(), Some("pages/1.html"));

        pager.goto_page(4u32, Some("archive/"));
        assert_eq!(pager.browser().last_navigation(), Some("archive/4.html"));

        pager.page(5u32);
        assert_eq!(pager.browser().last_navigation(), Some("pages/5.html"));
        assert_eq!(pager.target_for(2).as_deref(), Some("pages/2.html"));
    }

    #[test]
    fn test_count_mode_rejects_names() {
        let mut pager = pager(PagerConfig::from_max_page(3).unwrap());
        assert_eq!(pager.page("2.html"), None);
        assert_eq!(pager.page("2"), Some(2));
        assert!(pager.toc().is_none());
    }

    #[test]
    fn test_buttons() {
        let mut pager = pager(abc().controls(ControlSet::Full));
        assert_eq!(pager.previous(), None);
        assert_eq!(pager.next(), Some(2));
        assert_eq!(pager.last(), Some(3));
        assert_eq!(pager.next(), None);
        assert_eq!(pager.current_page(), 3);
        assert_eq!(pager.first(), Some(1));
    }

    #[test]
    fn test_slider() {
        let mut pager = pager(abc());
        assert_eq!(pager.slider_commit("3"), Some(3));
        assert_eq!(pager.slider_commit("0"), None);
        assert_eq!(pager.slider_commit(""), None);
        assert_eq!(pager.current_page(), 3);
    }

    #[test]
    fn test_keyboard() {
        let mut pager = pager(abc());
        assert_eq!(pager.handle_key("ArrowLeft", Focus::Other), None);
        assert_eq!(pager.current_page(), 1);

        assert_eq!(pager.handle_key("ArrowRight", Focus::Other), Some(2));
        assert_eq!(pager.handle_key("ArrowLeft", Focus::Other), Some(1));

        assert_eq!(pager.handle_key("ArrowRight", Focus::TextInput), None);
        assert_eq!(pager.handle_key("ArrowRight", Focus::TextArea), None);
        assert_eq!(pager.handle_key("Enter", Focus::Other), None);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn test_registration_fills_companion_tabs() {
        let mut pager = pager(abc());
        let doc = FakeDocument::with_fragments(&[("notes", "one"), ("notes", "two"), ("hints", "h")]);

        let revealed = pager.register_frame(&doc).unwrap();

        assert_eq!(revealed.to_vec(), vec!["notes".to_string(), "hints".to_string()]);
        assert_eq!(pager.tabs().body("notes"), Some("two"));
        assert_eq!(pager.tabs().count(&TabEvent::Show("notes".into())), 1);
    }

    #[test]
    fn test_stale_registration_applies_to_current_frame() {
        let mut pager = pager(abc());
        let slow_page_doc = FakeDocument::with_fragments(&[("notes", "from page 2")]);
        pager.page(2u32);
        pager.page(3u32);
        let events = pager.browser().events.len();

        pager.register_frame(&slow_page_doc).unwrap();

        assert_eq!(pager.current_page(), 3);
        assert_eq!(pager.browser().events.len(), events);
        assert_eq!(pager.tabs().body("notes"), Some("from page 2"));
    }

    #[test]
    fn test_independent_instances() {
        let mut one = pager(abc());
        let two = pager(PagerConfig::from_max_page(9).unwrap());
        one.page(3u32);
        assert_eq!(one.current_page(), 3);
        assert_eq!(two.current_page(), 1);
        assert_eq!(two.max_page(), 9);
    }
}
