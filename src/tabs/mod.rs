//! Tab bar collaborator and the conditional-tab bridge
//!
//! A content document may carry fragments meant for companion tabs. Each
//! fragment has the [`CONDITIONAL_CLASS`] class and a `name` attribute naming
//! its tab. When the document registers, every fragment's content replaces the
//! body of its tab's frame and the tab is revealed. Tabs not named this round
//! stay hidden.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::config::FragmentTransfer;
use crate::error::{PagerError, Result};

/// Class marking conditional fragments in a content document.
pub const CONDITIONAL_CLASS: &str = "curvy-tab-conditional";

/// Id suffix of the stylesheet injected into content documents.
pub const CONDITIONAL_STYLESHEET_ID: &str = "curvy-tabs-pager-conditional";

/// Hides fragments until they have been moved out.
pub const CONDITIONAL_STYLESHEET: &str = ".curvy-tab-conditional { display: none; }";

/// Tab names revealed by one registration, in first-appearance order.
pub type RevealedTabs = SmallVec<[String; 4]>;

/// The tabbed container the pager lives in.
pub trait TabBar {
    /// Root element of a tab.
    type Tab;
    /// A conditional fragment taken from a content document.
    type Fragment;

    /// Draw tab chrome.
    fn paint(&mut self);

    /// Hide every conditional tab.
    fn reset(&mut self);

    /// Reveal a tab by name.
    fn show(&mut self, name: &str);

    /// Bring a tab to the foreground.
    fn select(&mut self, tab: &Self::Tab);

    /// Look a tab up by name.
    fn get_tab(&self, name: &str) -> Option<Self::Tab>;

    /// Replace the body of `tab`'s frame with `fragment`'s content.
    fn fill_companion(
        &mut self,
        tab: &Self::Tab,
        fragment: &Self::Fragment,
        transfer: FragmentTransfer,
    ) -> Result<()>;
}

/// A fragment and the tab it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalFragment<F> {
    pub tab_name: String,
    pub content: F,
}

/// The document currently loaded in the content frame.
pub trait ContentDocument {
    type Fragment;

    /// Add a `<style>` element unless one with the same id exists.
    fn inject_stylesheet(&self, id: &str, css: &str) -> Result<()>;

    /// Re-dispatch arrow keys pressed inside the frame on the host document.
    fn forward_paging_keys(&self) -> Result<()>;

    /// Every element carrying `class_name`, in document order.
    fn conditional_fragments(&self, class_name: &str) -> Vec<ConditionalFragment<Self::Fragment>>;
}

/// Run the registration handshake against `document`.
///
/// Bodies are replaced in document order, so when two fragments name the same
/// tab the later one wins. Each named tab is shown once. A fragment naming a
/// tab that does not exist aborts the pass; fragments before it stay applied.
pub fn apply_conditional_tabs<T, D>(
    tabs: &mut T,
    document: &D,
    transfer: FragmentTransfer,
) -> Result<RevealedTabs>
where
    T: TabBar,
    D: ContentDocument<Fragment = T::Fragment>,
{
    document.inject_stylesheet(CONDITIONAL_STYLESHEET_ID, CONDITIONAL_STYLESHEET)?;
    document.forward_paging_keys()?;

    tabs.reset();

    let mut revealed = RevealedTabs::new();
    let mut seen = FxHashSet::default();
    for fragment in document.conditional_fragments(CONDITIONAL_CLASS) {
        let tab = tabs
            .get_tab(&fragment.tab_name)
            .ok_or_else(|| PagerError::UnknownConditionalTab {
                name: fragment.tab_name.clone(),
            })?;
        tabs.fill_companion(&tab, &fragment.content, transfer)?;
        if seen.insert(fragment.tab_name.clone()) {
            revealed.push(fragment.tab_name);
        }
    }

    for name in &revealed {
        tabs.show(name);
    }
    log::debug!("conditional tabs revealed: {:?}", revealed);

    Ok(revealed)
}
