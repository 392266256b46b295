//! Pager chrome: passive view commands and the injected markup

mod markup;

pub use markup::{markup, STYLESHEET, STYLESHEET_ID};

use crate::config::ControlSet;

/// A paging button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    First,
    Previous,
    Next,
    Last,
}

impl Control {
    /// All controls, in visual order.
    pub const ALL: [Control; 4] = [Control::First, Control::Previous, Control::Next, Control::Last];

    /// `data-control` value in the injected markup.
    pub fn key(self) -> &'static str {
        match self {
            Control::First => "first",
            Control::Previous => "prev",
            Control::Next => "next",
            Control::Last => "last",
        }
    }

    /// Class toggled on while the control can move somewhere.
    pub fn enabled_class(self) -> &'static str {
        match self {
            Control::First => "page-button-enabled-first",
            Control::Previous => "page-button-enabled-prev",
            Control::Next => "page-button-enabled-next",
            Control::Last => "page-button-enabled-last",
        }
    }

    /// Whether this control points at a page before `page`.
    pub fn is_backward(self) -> bool {
        matches!(self, Control::First | Control::Previous)
    }

    /// Enabled iff not already at the boundary this control moves towards.
    pub fn is_enabled(self, page: u32, max_page: u32) -> bool {
        if self.is_backward() {
            page != 1
        } else {
            page != max_page
        }
    }
}

impl ControlSet {
    /// Controls rendered for this set.
    pub fn controls(self) -> &'static [Control] {
        match self {
            ControlSet::Minimal => &[Control::Previous, Control::Next],
            ControlSet::Full => &Control::ALL,
        }
    }

    pub fn contains(self, control: Control) -> bool {
        self.controls().contains(&control)
    }
}

/// Render target for the pager chrome.
///
/// Implementations only display what they are told; the controller owns
/// every value passed here.
pub trait PagerView {
    /// Show the page count and bound the range control to `1..=max_page`.
    fn set_max_page(&mut self, max_page: u32);

    /// Show `page` in the counter and move the range control to it.
    fn set_current_page(&mut self, page: u32);

    /// Style `control` as enabled or disabled. Handlers stay attached either way.
    fn set_control_enabled(&mut self, control: Control, enabled: bool);
}
