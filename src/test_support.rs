//! Recording fakes for the host collaborators

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;

use crate::config::FragmentTransfer;
use crate::error::Result;
use crate::persist::Browser;
use crate::render::{Control, PagerView};
use crate::tabs::{ConditionalFragment, ContentDocument, TabBar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    Paint,
    Reset,
    Show(String),
    Select(String),
    Fill(String, FragmentTransfer),
}

/// Tabs are their names; fragments are their text.
#[derive(Debug, Default)]
pub struct RecordingTabs {
    pub names: Vec<String>,
    pub bodies: FxHashMap<String, String>,
    pub events: Vec<TabEvent>,
}

impl RecordingTabs {
    pub fn with_tabs(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn body(&self, name: &str) -> Option<&str> {
        self.bodies.get(name).map(String::as_str)
    }

    pub fn count(&self, event: &TabEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

impl TabBar for RecordingTabs {
    type Tab = String;
    type Fragment = String;

    fn paint(&mut self) {
        self.events.push(TabEvent::Paint);
    }

    fn reset(&mut self) {
        self.events.push(TabEvent::Reset);
    }

    fn show(&mut self, name: &str) {
        self.events.push(TabEvent::Show(name.to_string()));
    }

    fn select(&mut self, tab: &String) {
        self.events.push(TabEvent::Select(tab.clone()));
    }

    fn get_tab(&self, name: &str) -> Option<String> {
        self.names.iter().find(|n| *n == name).cloned()
    }

    fn fill_companion(
        &mut self,
        tab: &String,
        fragment: &String,
        transfer: FragmentTransfer,
    ) -> Result<()> {
        self.bodies.insert(tab.clone(), fragment.clone());
        self.events.push(TabEvent::Fill(tab.clone(), transfer));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub max_page: Option<u32>,
    pub current_page: Option<u32>,
    pub enabled: FxHashMap<Control, bool>,
    pub renders: usize,
}

impl RecordingView {
    pub fn is_enabled(&self, control: Control) -> Option<bool> {
        self.enabled.get(&control).copied()
    }
}

impl PagerView for RecordingView {
    fn set_max_page(&mut self, max_page: u32) {
        self.max_page = Some(max_page);
    }

    fn set_current_page(&mut self, page: u32) {
        self.current_page = Some(page);
        self.renders += 1;
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.enabled.insert(control, enabled);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    Navigate(String),
    Push(String, u32),
    Cookie(String, String, u32),
}

#[derive(Debug, Default)]
pub struct RecordingBrowser {
    pub events: Vec<BrowserEvent>,
    pub cookies: FxHashMap<String, String>,
}

impl RecordingBrowser {
    pub fn last_navigation(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            BrowserEvent::Navigate(url) => Some(url.as_str()),
            _ => None,
        })
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

impl Browser for RecordingBrowser {
    fn navigate_frame(&mut self, url: &str) {
        self.events.push(BrowserEvent::Navigate(url.to_string()));
    }

    fn push_history(&mut self, param: &str, page: u32) {
        self.events.push(BrowserEvent::Push(param.to_string(), page));
    }

    fn write_cookie(&mut self, name: &str, value: &str, days: u32) {
        self.cookies.insert(name.to_string(), value.to_string());
        self.events
            .push(BrowserEvent::Cookie(name.to_string(), value.to_string(), days));
    }
}

/// A content document holding `(tab name, text)` fragments.
#[derive(Debug, Default)]
pub struct FakeDocument {
    fragments: Vec<(String, String)>,
    stylesheets: RefCell<Vec<String>>,
    forwarders: Cell<usize>,
}

impl FakeDocument {
    pub fn with_fragments(fragments: &[(&str, &str)]) -> Self {
        Self {
            fragments: fragments
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn stylesheets(&self) -> Vec<String> {
        self.stylesheets.borrow().clone()
    }

    pub fn forwarders(&self) -> usize {
        self.forwarders.get()
    }
}

impl ContentDocument for FakeDocument {
    type Fragment = String;

    fn inject_stylesheet(&self, id: &str, _css: &str) -> Result<()> {
        let mut sheets = self.stylesheets.borrow_mut();
        if !sheets.iter().any(|s| s == id) {
            sheets.push(id.to_string());
        }
        Ok(())
    }

    fn forward_paging_keys(&self) -> Result<()> {
        self.forwarders.set(self.forwarders.get() + 1);
        Ok(())
    }

    fn conditional_fragments(&self, _class_name: &str) -> Vec<ConditionalFragment<String>> {
        self.fragments
            .iter()
            .map(|(name, text)| ConditionalFragment {
                tab_name: name.clone(),
                content: text.clone(),
            })
            .collect()
    }
}
